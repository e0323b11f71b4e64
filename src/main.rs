use anyhow::{anyhow, Result};
use clap::{crate_version, App as Cli, Arg};
use folio_tui::{app::App, config::Config, content::Portfolio, error::AppError, ui::Theme};
use std::path::{Path, PathBuf};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = Cli::new("folio-tui")
        .version(crate_version!())
        .about("A terminal portfolio page")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("content")
                .long("content")
                .value_name("FILE")
                .help("Portfolio content as .yml, .yaml or .json")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("theme")
                .short("t")
                .long("theme")
                .value_name("NAME")
                .help("Color theme for this session")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    if let Some(theme) = matches.value_of("theme") {
        if Theme::from_name(theme).is_none() {
            return Err(anyhow!(
                "Unknown theme '{}'. Available themes: {}",
                theme,
                Theme::available_themes().join(", ")
            ));
        }
        config.theme_name = theme.to_string();
    }

    let content_path = matches
        .value_of("content")
        .map(PathBuf::from)
        .or_else(|| config.content_path.clone());
    let portfolio = load_portfolio(content_path.as_deref())?;

    App::start(config, portfolio).await?;
    Ok(())
}

/// Load the portfolio from `path`, or use the built-in one.
///
fn load_portfolio(path: Option<&Path>) -> Result<Portfolio, AppError> {
    match path {
        Some(path) => Ok(Portfolio::load(path)?),
        None => Ok(Portfolio::default()),
    }
}
