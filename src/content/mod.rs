//! Portfolio content.
//!
//! Everything shown on the page is static for the session: the built-in
//! portfolio, or one loaded from a YAML or JSON file at start-up. Asset
//! references are opaque strings that are displayed, never opened.

mod error;

pub use error::ContentError;

use crate::state::Slide;
use fake::Dummy;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Labels of the navigation bar, in page order.
///
pub const NAV_LABELS: [&str; 6] = [
    "Profile",
    "Certifications",
    "Projects",
    "Designs",
    "Web Designs",
    "Tools",
];

/// Defines the page owner's name as shown in the navigation bar.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub first_name: String,
    pub last_name: String,
}

impl Owner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Defines the profile card.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub headline: String,
    pub bio: String,
    pub image: String,
}

/// Defines a certification card.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    pub received: String,
    pub image: String,
    pub link: String,
}

/// Defines a project card.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub preview: String,
    pub demo: String,
}

/// Defines a poster design card.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
}

/// Defines a tool card.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub icon: String,
}

/// Defines the whole page.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub owner: Owner,
    pub profile: Profile,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub designs: Vec<Design>,
    #[serde(default)]
    pub web_designs: Vec<String>,
    #[serde(default)]
    pub tools: Vec<Tool>,
}

impl Default for Portfolio {
    fn default() -> Self {
        built_in()
    }
}

impl Portfolio {
    /// Load content from a `.yml`/`.yaml` or `.json` file.
    ///
    pub fn load(path: &Path) -> Result<Portfolio, ContentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let contents = fs::read_to_string(path).map_err(|e| ContentError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Portfolio::parse(&contents, extension.as_deref(), path)
    }

    fn parse(contents: &str, extension: Option<&str>, path: &Path) -> Result<Portfolio, ContentError> {
        let parse_failed = |message: String| ContentError::ParseFailed {
            path: path.to_path_buf(),
            message,
        };
        match extension {
            Some("yml") | Some("yaml") => {
                serde_yaml::from_str(contents).map_err(|e| parse_failed(e.to_string()))
            }
            Some("json") => serde_json::from_str(contents).map_err(|e| parse_failed(e.to_string())),
            _ => Err(ContentError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Carousel slides in display order.
    ///
    pub fn slides(&self) -> Vec<Slide> {
        self.web_designs.iter().cloned().map(Slide).collect()
    }
}

fn built_in() -> Portfolio {
    Portfolio {
        owner: Owner {
            first_name: "Gohan".to_string(),
            last_name: "Pescasio".to_string(),
        },
        profile: Profile {
            headline: "Hi! I'm Gohan Pescasio".to_string(),
            bio: "A Computer Science Graduate, UI/UX Designer, and Web Developer dedicated to \
                  creating modern, responsive, and user-focused applications. My expertise are \
                  React, JavaScript, Data Analysis and various other cutting-edge web \
                  technologies."
                .to_string(),
            image: "images/user.png".to_string(),
        },
        certifications: vec![
            Certification {
                title: "Introduction to Data Analytics".to_string(),
                received: "Jan 2025".to_string(),
                image: "images/Certificate_DA.png".to_string(),
                link: "https://imgur.com/a/coursera-certificates-5iBkePs".to_string(),
            },
            Certification {
                title: "Data Analysis with Spreadsheets and SQL".to_string(),
                received: "Feb 2025".to_string(),
                image: "images/Certificate_DAwSQL.png".to_string(),
                link: "https://imgur.com/a/coursera-certificates-5iBkePs".to_string(),
            },
            Certification {
                title: "Linux Essentials".to_string(),
                received: "May 2025".to_string(),
                image: "images/Certificate_Linux.png".to_string(),
                link: "https://imgur.com/a/cisco-certificates-OlQBKnm".to_string(),
            },
        ],
        projects: vec![
            Project {
                title: "Task Priority Estimator".to_string(),
                description: "A simple task organizer that uses random forest to determine the \
                              optimal order of which tasks to prioritize."
                    .to_string(),
                preview: "images/tpe_demo.png".to_string(),
                demo: "https://youtu.be/_xsuqiTC9Oc".to_string(),
            },
            Project {
                title: "AuthentiX".to_string(),
                description: "A Sentiment-Based Social Media Impersonation Detector with Sarcasm \
                              Analysis Using Machine Learning"
                    .to_string(),
                preview: "images/authentix_demo.png".to_string(),
                demo: "https://youtu.be/L3SnD98d9bU".to_string(),
            },
        ],
        designs: vec![
            Design {
                title: "Zenless Zone Zero (Miyabi)".to_string(),
                description: "Promotional poster design concept. Poster focusing on a game \
                              character with the use of different overlays."
                    .to_string(),
                image: "images/poster1.png".to_string(),
                link: "https://imgur.com/a/XAAbhrx".to_string(),
            },
            Design {
                title: "McLaren P1 GTR".to_string(),
                description: "Sports car design concept. Poster using a car as the main subject \
                              to show its aggressive yet bold design."
                    .to_string(),
                image: "images/poster2.png".to_string(),
                link: "https://imgur.com/a/UhF6rpd".to_string(),
            },
            Design {
                title: "Kobe Bryant".to_string(),
                description: "Basketball Poster. Poster that uses the main subject's theme as the \
                              whole color palette."
                    .to_string(),
                image: "images/poster3.png".to_string(),
                link: "https://imgur.com/a/y10Dm3o".to_string(),
            },
        ],
        web_designs: vec![
            "/webdesign1.jpg".to_string(),
            "/webdesign2.jpg".to_string(),
            "/webdesign3.jpg".to_string(),
        ],
        tools: [
            ("JavaScript", "images/js.svg"),
            ("HTML5", "images/html5.svg"),
            ("CSS3", "images/css3.svg"),
            ("React.js", "images/reactjs.svg"),
            ("Vite", "images/vite.png"),
            ("Tailwind CSS", "/tailwind-logo.png"),
            ("GitHub", "/github-logo.png"),
            ("Firebase", "/firebase-logo.png"),
        ]
        .iter()
        .map(|(name, icon)| Tool {
            name: name.to_string(),
            icon: icon.to_string(),
        })
        .collect(),
    }
}
