use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for current list items.
///
pub fn current_list_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for active list items.
///
pub fn active_list_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.primary.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for the page background.
///
pub fn page_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.text.to_color())
        .bg(theme.background.to_color())
}

/// Return the style for the owner's name in the navigation bar.
///
pub fn brand_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.primary.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for section headings.
///
pub fn heading_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.accent.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for external links and asset references.
///
pub fn link_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.secondary.to_color())
        .add_modifier(Modifier::UNDERLINED)
}

/// Return the style for clickable controls.
///
pub fn button_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.primary.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style of a formatted log line, colored by its level.
///
pub fn log_line_style(theme: &Theme, line: &str) -> Style {
    let color = if line.contains(" ERROR ") {
        theme.error
    } else if line.contains(" WARN ") {
        theme.warning
    } else if line.contains(" INFO ") {
        theme.info
    } else {
        theme.text_muted
    };
    Style::default().fg(color.to_color())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_line_style_by_level() {
        let theme = Theme::default();
        let style = |line: &str| log_line_style(&theme, line).fg;
        assert_eq!(
            style("12:00:00.000 ERROR boom"),
            Some(theme.error.to_color())
        );
        assert_eq!(
            style("12:00:00.000 WARN  careful"),
            Some(theme.warning.to_color())
        );
        assert_eq!(
            style("12:00:00.000 INFO  hello"),
            Some(theme.info.to_color())
        );
        assert_eq!(
            style("12:00:00.000 DEBUG detail"),
            Some(theme.text_muted.to_color())
        );
    }
}
