use super::Frame;
use crate::state::{HitTarget, NavLink, State};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, BorderType, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const LINK_GAP: u16 = 2;
const BURGER_LABEL: &str = " ☰ ";
const CLOSE_LABEL: &str = " ✕ ";
const MENU_WIDTH: u16 = 28;

fn link_label(index: usize, link: &NavLink) -> String {
    format!("{} {}", index + 1, link.label)
}

/// Horizontal placement of the inline links, right-aligned in `inner`.
///
fn inline_link_areas(inner: Rect, links: &[NavLink]) -> Vec<Rect> {
    let widths: Vec<u16> = links
        .iter()
        .enumerate()
        .map(|(index, link)| link_label(index, link).width() as u16)
        .collect();
    let total = widths.iter().sum::<u16>() + LINK_GAP * widths.len().saturating_sub(1) as u16;
    let mut x = inner.x + inner.width.saturating_sub(total);
    widths
        .into_iter()
        .map(|width| {
            let area = Rect::new(x, inner.y, width, 1).intersection(inner);
            x = x.saturating_add(width + LINK_GAP);
            area
        })
        .collect()
}

/// Render the navigation bar: the owner's name, then either the inline links
/// or the burger button.
///
pub fn navbar(frame: &mut Frame, area: Rect, state: &State, regions: &mut Vec<(Rect, HitTarget)>) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styling::normal_block_border_style(theme))
        .style(styling::page_style(theme));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let brand = Paragraph::new(Span::styled(
        format!(" {}", state.portfolio().owner.full_name()),
        styling::brand_style(theme),
    ));
    frame.render_widget(brand, inner);

    let navigation = state.navigation();
    if state.is_compact() {
        let width = BURGER_LABEL.width() as u16;
        let burger =
            Rect::new(inner.right().saturating_sub(width), inner.y, width, 1).intersection(inner);
        frame.render_widget(
            Paragraph::new(Span::styled(BURGER_LABEL, styling::button_style(theme))),
            burger,
        );
        regions.push((burger, HitTarget::Burger));
        return;
    }

    let links = navigation.links();
    for (index, (link, link_area)) in links
        .iter()
        .zip(inline_link_areas(inner, links))
        .enumerate()
    {
        let style = if index == navigation.selected() {
            styling::active_list_item_style(theme)
        } else {
            styling::normal_text_style(theme)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(link_label(index, link), style)),
            link_area,
        );
        regions.push((link_area, HitTarget::NavLink(index)));
    }
}

/// Area of the menu overlay under the navigation bar.
///
fn menu_area(screen: Rect, navbar: Rect, links: usize) -> Rect {
    let width = MENU_WIDTH.min(screen.width);
    let height = (links as u16 + 2).min(screen.bottom().saturating_sub(navbar.bottom()));
    Rect::new(screen.right() - width, navbar.bottom(), width, height)
}

/// Render the menu overlay when open. A closing menu is drawn faded until
/// the transition ends.
///
pub fn menu(
    frame: &mut Frame,
    screen: Rect,
    navbar: Rect,
    state: &State,
    regions: &mut Vec<(Rect, HitTarget)>,
) {
    let navigation = state.navigation();
    if !navigation.is_open() {
        return;
    }
    let theme: Theme = if navigation.is_closing() {
        state.theme().faded(0.5)
    } else {
        state.theme().clone()
    };
    let area = menu_area(screen, navbar, navigation.links().len());
    if area.height < 3 || area.width < 8 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styling::active_block_border_style(&theme))
        .style(styling::page_style(&theme))
        .title(Span::styled(" Menu ", styling::active_block_title_style()))
        .title(
            Title::from(Span::styled(CLOSE_LABEL, styling::button_style(&theme)))
                .alignment(Alignment::Right),
        );
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    regions.push((area, HitTarget::Menu));

    for (index, link) in navigation.links().iter().enumerate() {
        if index as u16 >= inner.height {
            break;
        }
        let row = Rect::new(inner.x, inner.y + index as u16, inner.width, 1);
        let style = if index == navigation.selected() {
            styling::current_list_item_style(&theme)
        } else {
            styling::normal_text_style(&theme)
        };
        frame.render_widget(
            Paragraph::new(Line::styled(format!(" {}", link_label(index, link)), style))
                .style(style),
            row,
        );
        regions.push((row, HitTarget::NavLink(index)));
    }

    let close_width = CLOSE_LABEL.width() as u16;
    let close = Rect::new(area.right() - 1 - close_width, area.y, close_width, 1);
    regions.push((close, HitTarget::CloseMenu));
}
