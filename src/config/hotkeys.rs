//! Hotkey configuration management.
//!
//! This module defines the hotkey system for the application: the actions a
//! key can trigger, how bindings are stored in the config file, and the
//! default bindings for the page and for the open menu.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::str::FromStr;

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // Page actions
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    ScrollBottom,
    BackToTop,
    OpenMenu,
    CarouselNext,
    CarouselPrev,
    CarouselTogglePause,
    ToggleLog,
    Quit,

    // Menu actions
    MenuNext,
    MenuPrev,
    MenuSelect,
    CloseMenu,
}

/// Specifying which set of bindings applies.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Page,
    Menu,
}

/// Represents a key combination (KeyCode + modifiers).
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    /// A binding without modifiers.
    ///
    pub fn plain(code: KeyCode) -> Self {
        Hotkey {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;

    /// Parse the footer notation: `j`, `Space`, `PgDn`, `Ctrl+c`, `Alt+Shift+Left`.
    ///
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = text.split('+').collect();
        // A trailing "+" means the plus key itself.
        let key = if text.ends_with("++") || text == "+" {
            parts.retain(|part| !part.is_empty());
            "+"
        } else {
            parts.pop().unwrap_or_default()
        };

        let mut modifiers = KeyModifiers::empty();
        for part in parts {
            modifiers |= match part {
                "Ctrl" => KeyModifiers::CONTROL,
                "Shift" => KeyModifiers::SHIFT,
                "Alt" => KeyModifiers::ALT,
                other => return Err(format!("unknown modifier '{}' in '{}'", other, text)),
            };
        }

        let code = match key {
            "Space" => KeyCode::Char(' '),
            "Esc" => KeyCode::Esc,
            "Enter" => KeyCode::Enter,
            "Tab" => KeyCode::Tab,
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "PgUp" => KeyCode::PageUp,
            "PgDn" => KeyCode::PageDown,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            single => {
                let mut chars = single.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(format!("unknown key '{}'", text)),
                }
            }
        };
        Ok(Hotkey { code, modifiers })
    }
}

/// Hotkeys are stored in `config.yml` in the same notation the footer shows.
///
impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_hotkey_display(self))
    }
}

impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Maps hotkey actions to their key bindings per input mode.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewHotkeys {
    pub page: HashMap<HotkeyAction, Hotkey>,
    pub menu: HashMap<HotkeyAction, Hotkey>,
}

/// Bindings in the config file override the defaults one action at a time.
///
impl<'de> Deserialize<'de> for ViewHotkeys {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Default, Deserialize)]
        #[serde(default)]
        struct Overrides {
            page: HashMap<HotkeyAction, Hotkey>,
            menu: HashMap<HotkeyAction, Hotkey>,
        }

        let overrides = Overrides::deserialize(deserializer)?;
        let mut hotkeys = default_hotkeys();
        hotkeys.page.extend(overrides.page);
        hotkeys.menu.extend(overrides.menu);
        Ok(hotkeys)
    }
}

impl Default for ViewHotkeys {
    fn default() -> Self {
        default_hotkeys()
    }
}

impl ViewHotkeys {
    pub fn for_mode(&self, mode: InputMode) -> &HashMap<HotkeyAction, Hotkey> {
        match mode {
            InputMode::Page => &self.page,
            InputMode::Menu => &self.menu,
        }
    }
}

/// Returns default hotkey mappings for the page and the menu.
///
pub fn default_hotkeys() -> ViewHotkeys {
    let page = [
        (HotkeyAction::ScrollDown, KeyCode::Char('j')),
        (HotkeyAction::ScrollUp, KeyCode::Char('k')),
        (HotkeyAction::PageDown, KeyCode::PageDown),
        (HotkeyAction::PageUp, KeyCode::PageUp),
        (HotkeyAction::ScrollBottom, KeyCode::End),
        (HotkeyAction::BackToTop, KeyCode::Home),
        (HotkeyAction::OpenMenu, KeyCode::Char('m')),
        (HotkeyAction::CarouselNext, KeyCode::Char('l')),
        (HotkeyAction::CarouselPrev, KeyCode::Char('h')),
        (HotkeyAction::CarouselTogglePause, KeyCode::Char(' ')),
        (HotkeyAction::ToggleLog, KeyCode::Char('L')),
        (HotkeyAction::Quit, KeyCode::Char('q')),
    ];
    let menu = [
        (HotkeyAction::MenuNext, KeyCode::Char('j')),
        (HotkeyAction::MenuPrev, KeyCode::Char('k')),
        (HotkeyAction::MenuSelect, KeyCode::Enter),
        (HotkeyAction::CloseMenu, KeyCode::Esc),
        (HotkeyAction::Quit, KeyCode::Char('q')),
    ];

    ViewHotkeys {
        page: page
            .into_iter()
            .map(|(action, code)| (action, Hotkey::plain(code)))
            .collect(),
        menu: menu
            .into_iter()
            .map(|(action, code)| (action, Hotkey::plain(code)))
            .collect(),
    }
}

/// Checks if a KeyEvent matches a Hotkey.
///
/// Shift is ignored for character keys, since terminals report it inconsistently
/// for upper-case letters.
///
pub fn matches_hotkey(event: &KeyEvent, hotkey: &Hotkey) -> bool {
    if event.code != hotkey.code {
        return false;
    }
    match event.code {
        KeyCode::Char(_) => {
            event.modifiers.difference(KeyModifiers::SHIFT)
                == hotkey.modifiers.difference(KeyModifiers::SHIFT)
        }
        _ => event.modifiers == hotkey.modifiers,
    }
}

/// Gets the action for a KeyEvent in a specific input mode.
///
pub fn get_action_for_event(
    event: &KeyEvent,
    mode: InputMode,
    hotkeys: &ViewHotkeys,
) -> Option<HotkeyAction> {
    hotkeys
        .for_mode(mode)
        .iter()
        .find(|(_, hotkey)| matches_hotkey(event, hotkey))
        .map(|(action, _)| *action)
}

/// Builds a footer text string from hotkey configurations.
/// Takes a list of tuples: (action, description, optional_second_action_for_paired_keys)
///
pub fn build_footer_text(
    hotkeys: &HashMap<HotkeyAction, Hotkey>,
    actions: &[(HotkeyAction, &str, Option<HotkeyAction>)],
) -> String {
    let parts: Vec<String> = actions
        .iter()
        .filter_map(|(action, description, paired_action)| {
            let hotkey = hotkeys.get(action)?;
            let paired = paired_action.and_then(|paired| hotkeys.get(&paired));
            Some(match paired {
                Some(paired_hotkey) => format!(
                    " {}/{}: {}",
                    format_hotkey_display(hotkey),
                    format_hotkey_display(paired_hotkey),
                    description
                ),
                None => format!(" {}: {}", format_hotkey_display(hotkey), description),
            })
        })
        .collect();
    parts.join(",")
}

/// Formats a hotkey for display in the footer.
///
pub fn format_hotkey_display(hotkey: &Hotkey) -> String {
    let mut parts = Vec::new();
    if hotkey.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if hotkey.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if hotkey.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    let key_str = match &hotkey.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => "Unknown".to_string(),
    };

    if parts.is_empty() {
        key_str
    } else {
        format!("{}+{}", parts.join("+"), key_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_matches_hotkey() {
        let hotkey = Hotkey::plain(KeyCode::Char('j'));
        assert!(matches_hotkey(
            &press(KeyCode::Char('j'), KeyModifiers::empty()),
            &hotkey
        ));
        assert!(!matches_hotkey(
            &press(KeyCode::Char('k'), KeyModifiers::empty()),
            &hotkey
        ));
        assert!(!matches_hotkey(
            &press(KeyCode::Char('j'), KeyModifiers::CONTROL),
            &hotkey
        ));
    }

    #[test]
    fn test_matches_hotkey_ignores_shift_on_chars() {
        let hotkey = Hotkey::plain(KeyCode::Char('L'));
        assert!(matches_hotkey(
            &press(KeyCode::Char('L'), KeyModifiers::SHIFT),
            &hotkey
        ));
        let hotkey = Hotkey::plain(KeyCode::PageDown);
        assert!(!matches_hotkey(
            &press(KeyCode::PageDown, KeyModifiers::SHIFT),
            &hotkey
        ));
    }

    #[test]
    fn test_get_action_for_event() {
        let hotkeys = default_hotkeys();
        let event = press(KeyCode::Char('j'), KeyModifiers::empty());

        let action = get_action_for_event(&event, InputMode::Page, &hotkeys);
        assert_eq!(action, Some(HotkeyAction::ScrollDown));

        let action = get_action_for_event(&event, InputMode::Menu, &hotkeys);
        assert_eq!(action, Some(HotkeyAction::MenuNext));

        let event = press(KeyCode::Char('z'), KeyModifiers::empty());
        assert_eq!(get_action_for_event(&event, InputMode::Page, &hotkeys), None);
    }

    #[test]
    fn test_default_hotkeys() {
        let hotkeys = default_hotkeys();
        assert_eq!(hotkeys.page.len(), 12);
        assert_eq!(hotkeys.menu.len(), 5);
        assert!(hotkeys.page.contains_key(&HotkeyAction::Quit));
        assert!(hotkeys.menu.contains_key(&HotkeyAction::Quit));
    }

    #[test]
    fn test_hotkey_parsing() {
        assert_eq!("j".parse::<Hotkey>(), Ok(Hotkey::plain(KeyCode::Char('j'))));
        assert_eq!("Space".parse::<Hotkey>(), Ok(Hotkey::plain(KeyCode::Char(' '))));
        assert_eq!("PgDn".parse::<Hotkey>(), Ok(Hotkey::plain(KeyCode::PageDown)));
        assert_eq!(
            "Ctrl+Alt+Left".parse::<Hotkey>(),
            Ok(Hotkey {
                code: KeyCode::Left,
                modifiers: KeyModifiers::CONTROL | KeyModifiers::ALT,
            })
        );
        assert_eq!(
            "Ctrl++".parse::<Hotkey>(),
            Ok(Hotkey {
                code: KeyCode::Char('+'),
                modifiers: KeyModifiers::CONTROL,
            })
        );
        assert!("Hyper+j".parse::<Hotkey>().is_err());
        assert!("F13".parse::<Hotkey>().is_err());
        assert!("".parse::<Hotkey>().is_err());
    }

    #[test]
    fn test_hotkeys_are_stored_as_display_text() {
        let hotkey = Hotkey {
            code: KeyCode::PageDown,
            modifiers: KeyModifiers::CONTROL,
        };
        let serialized = serde_yaml::to_string(&hotkey).unwrap();
        assert!(serialized.contains("Ctrl+PgDn"));
        let deserialized: Hotkey = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(hotkey, deserialized);

        let defaults = default_hotkeys();
        let yaml = serde_yaml::to_string(&defaults).unwrap();
        let parsed: ViewHotkeys = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, defaults);
    }

    #[test]
    fn test_partial_bindings_merge_over_defaults() {
        let hotkeys: ViewHotkeys = serde_yaml::from_str("page:\n  scroll_down: x\n").unwrap();
        assert_eq!(
            hotkeys.page.get(&HotkeyAction::ScrollDown),
            Some(&Hotkey::plain(KeyCode::Char('x')))
        );
        assert_eq!(
            hotkeys.page.get(&HotkeyAction::Quit),
            Some(&Hotkey::plain(KeyCode::Char('q')))
        );
        assert_eq!(hotkeys.page.len(), default_hotkeys().page.len());
        assert_eq!(hotkeys.menu, default_hotkeys().menu);
    }

    #[test]
    fn test_unknown_key_is_rejected_on_load() {
        let result: Result<Hotkey, _> = serde_yaml::from_str("\"Meta+x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_build_footer_text() {
        let hotkeys = default_hotkeys();
        let text = build_footer_text(
            &hotkeys.page,
            &[
                (HotkeyAction::ScrollDown, "Scroll", Some(HotkeyAction::ScrollUp)),
                (HotkeyAction::Quit, "Quit", None),
            ],
        );
        assert_eq!(text, " j/k: Scroll, q: Quit");
    }

    #[test]
    fn test_format_hotkey_display() {
        assert_eq!(format_hotkey_display(&Hotkey::plain(KeyCode::Char(' '))), "Space");
        let hotkey = Hotkey {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(format_hotkey_display(&hotkey), "Ctrl+c");
    }
}
