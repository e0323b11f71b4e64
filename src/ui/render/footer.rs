use super::Frame;
use crate::config::{build_footer_text, HotkeyAction, InputMode};
use crate::state::{State, Viewport};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Format the hotkeys of the current input mode as a display string.
///
fn format_hotkeys_for_mode(mode: InputMode, state: &State) -> String {
    let hotkeys = state.hotkeys().for_mode(mode);
    match mode {
        InputMode::Page => {
            let text = build_footer_text(
                hotkeys,
                &[
                    (
                        HotkeyAction::ScrollDown,
                        "scroll",
                        Some(HotkeyAction::ScrollUp),
                    ),
                    (HotkeyAction::PageDown, "page", Some(HotkeyAction::PageUp)),
                    (HotkeyAction::OpenMenu, "menu", None),
                    (
                        HotkeyAction::CarouselPrev,
                        "slides",
                        Some(HotkeyAction::CarouselNext),
                    ),
                    (HotkeyAction::CarouselTogglePause, "pause", None),
                    (HotkeyAction::BackToTop, "top", None),
                    (HotkeyAction::ToggleLog, "log", None),
                    (HotkeyAction::Quit, "quit", None),
                ],
            );
            let links = state.navigation().links().len();
            if links == 0 {
                text
            } else {
                format!(" 1-{}: jump,{}", links, text)
            }
        }
        InputMode::Menu => build_footer_text(
            hotkeys,
            &[
                (
                    HotkeyAction::MenuNext,
                    "select",
                    Some(HotkeyAction::MenuPrev),
                ),
                (HotkeyAction::MenuSelect, "go", None),
                (HotkeyAction::CloseMenu, "close", None),
                (HotkeyAction::Quit, "quit", None),
            ],
        ),
    }
}

/// How far down the page the viewport is, in percent.
///
fn scroll_percent(viewport: &Viewport) -> u32 {
    if viewport.max_offset() == 0 {
        return 100;
    }
    viewport.offset() * 100 / viewport.max_offset()
}

pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let mode = state.input_mode();
    let controls_text = format_hotkeys_for_mode(mode, state);
    let tag = match mode {
        InputMode::Page => "PAGE:",
        InputMode::Menu => "MENU:",
    };
    let controls_content = Line::from(vec![
        Span::styled(
            tag,
            Style::default()
                .fg(theme.highlight_fg.to_color())
                .bg(theme.highlight_bg.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            controls_text,
            Style::default().fg(theme.text_muted.to_color()),
        ),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    let right_content = Line::from(vec![
        Span::styled(
            format!(" {:>3}% ", scroll_percent(state.viewport())),
            Style::default().fg(theme.text.to_color()),
        ),
        Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.secondary.to_color()),
        ),
    ]);
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
