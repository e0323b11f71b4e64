use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let logs = state.logs();
    let title = format!("Log ({} entries, L: hide)", logs.len());
    let block = Block::default()
        .title(Span::styled(title, styling::active_block_title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styling::normal_block_border_style(theme))
        .style(styling::page_style(theme));

    let visible = size.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = logs
        .tail(visible)
        .into_iter()
        .map(|entry| {
            let style = styling::log_line_style(theme, &entry);
            ListItem::new(Line::from(vec![Span::styled(entry, style)]))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .block(block);
    frame.render_widget(list, size);
}
