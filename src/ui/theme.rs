use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used on the page.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_secondary: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Log level colors
    pub info: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// An RGB palette entry.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }

    /// Blend towards `other`; `amount` 0.0 keeps self, 1.0 gives `other`.
    ///
    pub fn mix(&self, other: &ColorSpec, amount: f32) -> ColorSpec {
        let amount = amount.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * amount).round() as u8;
        ColorSpec {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec::new(125, 207, 255),
            secondary: ColorSpec::new(158, 206, 106),
            accent: ColorSpec::new(255, 159, 196),
            text: ColorSpec::new(169, 177, 214),
            text_secondary: ColorSpec::new(192, 202, 245),
            text_muted: ColorSpec::new(117, 121, 148),
            background: ColorSpec::new(26, 27, 38),
            surface: ColorSpec::new(36, 40, 59),
            info: ColorSpec::new(125, 207, 255),
            warning: ColorSpec::new(255, 202, 40),
            error: ColorSpec::new(247, 118, 142),
            border_active: ColorSpec::new(125, 207, 255),
            border_normal: ColorSpec::new(117, 121, 148),
            highlight_bg: ColorSpec::new(125, 207, 255),
            highlight_fg: ColorSpec::new(26, 27, 38),
        }
    }

    /// Tokyo Night Day theme.
    ///
    pub fn tokyo_night_day() -> Self {
        Theme {
            name: "tokyo-night-day".to_string(),
            primary: ColorSpec::new(38, 139, 210),
            secondary: ColorSpec::new(34, 154, 83),
            accent: ColorSpec::new(220, 50, 47),
            text: ColorSpec::new(26, 27, 38),
            text_secondary: ColorSpec::new(36, 40, 59),
            text_muted: ColorSpec::new(117, 121, 148),
            background: ColorSpec::new(234, 238, 255),
            surface: ColorSpec::new(203, 211, 255),
            info: ColorSpec::new(38, 139, 210),
            warning: ColorSpec::new(196, 157, 0),
            error: ColorSpec::new(220, 50, 47),
            border_active: ColorSpec::new(38, 139, 210),
            border_normal: ColorSpec::new(117, 121, 148),
            highlight_bg: ColorSpec::new(38, 139, 210),
            highlight_fg: ColorSpec::new(234, 238, 255),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: ColorSpec::new(189, 147, 249),
            secondary: ColorSpec::new(139, 233, 253),
            accent: ColorSpec::new(255, 121, 198),
            text: ColorSpec::new(248, 248, 242),
            text_secondary: ColorSpec::new(189, 147, 249),
            text_muted: ColorSpec::new(98, 114, 164),
            background: ColorSpec::new(40, 42, 54),
            surface: ColorSpec::new(68, 71, 90),
            info: ColorSpec::new(139, 233, 253),
            warning: ColorSpec::new(255, 184, 108),
            error: ColorSpec::new(255, 85, 85),
            border_active: ColorSpec::new(189, 147, 249),
            border_normal: ColorSpec::new(98, 114, 164),
            highlight_bg: ColorSpec::new(139, 233, 253),
            highlight_fg: ColorSpec::new(40, 42, 54),
        }
    }

    /// Catppuccin Mocha theme.
    ///
    pub fn catppuccin_mocha() -> Self {
        Theme {
            name: "catppuccin-mocha".to_string(),
            primary: ColorSpec::new(203, 166, 247),
            secondary: ColorSpec::new(166, 227, 161),
            accent: ColorSpec::new(250, 179, 135),
            text: ColorSpec::new(205, 214, 244),
            text_secondary: ColorSpec::new(186, 194, 222),
            text_muted: ColorSpec::new(166, 173, 200),
            background: ColorSpec::new(17, 17, 27),
            surface: ColorSpec::new(24, 24, 37),
            info: ColorSpec::new(137, 180, 250),
            warning: ColorSpec::new(249, 226, 175),
            error: ColorSpec::new(243, 139, 168),
            border_active: ColorSpec::new(203, 166, 247),
            border_normal: ColorSpec::new(166, 173, 200),
            highlight_bg: ColorSpec::new(137, 180, 250),
            highlight_fg: ColorSpec::new(17, 17, 27),
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: ColorSpec::new(161, 119, 255),
            secondary: ColorSpec::new(59, 247, 209),
            accent: ColorSpec::new(255, 109, 146),
            text: ColorSpec::new(88, 82, 96),
            text_secondary: ColorSpec::new(121, 117, 147),
            text_muted: ColorSpec::new(152, 147, 165),
            background: ColorSpec::new(250, 244, 237),
            surface: ColorSpec::new(255, 250, 243),
            info: ColorSpec::new(61, 174, 233),
            warning: ColorSpec::new(255, 210, 0),
            error: ColorSpec::new(235, 111, 146),
            border_active: ColorSpec::new(161, 119, 255),
            border_normal: ColorSpec::new(88, 82, 96),
            highlight_bg: ColorSpec::new(61, 174, 233),
            highlight_fg: ColorSpec::new(0, 0, 0),
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "tokyo-night-day" => Some(Self::tokyo_night_day()),
            "dracula" => Some(Self::dracula()),
            "catppuccin-mocha" => Some(Self::catppuccin_mocha()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            _ => None,
        }
    }

    /// Copy of the theme with every foreground color blended towards the
    /// background. `opacity` 1.0 is the theme itself, 0.0 is invisible.
    ///
    pub fn faded(&self, opacity: f32) -> Theme {
        let fade = |color: &ColorSpec| self.background.mix(color, opacity);
        Theme {
            name: self.name.clone(),
            primary: fade(&self.primary),
            secondary: fade(&self.secondary),
            accent: fade(&self.accent),
            text: fade(&self.text),
            text_secondary: fade(&self.text_secondary),
            text_muted: fade(&self.text_muted),
            background: self.background,
            surface: fade(&self.surface),
            info: fade(&self.info),
            warning: fade(&self.warning),
            error: fade(&self.error),
            border_active: fade(&self.border_active),
            border_normal: fade(&self.border_normal),
            highlight_bg: fade(&self.highlight_bg),
            highlight_fg: fade(&self.highlight_fg),
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tokyo-night".to_string(),
            "tokyo-night-day".to_string(),
            "dracula".to_string(),
            "catppuccin-mocha".to_string(),
            "rose-pine-dawn".to_string(),
        ]
    }
}
