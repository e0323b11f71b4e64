use super::carousel::carousel;
use super::Frame;
use crate::content::{Certification, Design, Portfolio, Project, Tool};
use crate::layout::{PageLayout, SectionKind};
use crate::state::{Group, HitTarget, State};
use crate::ui::theme::Theme;
use crate::ui::widgets::canvas::{scratch, Appearance, Canvas};
use crate::ui::widgets::styling;
use crate::utils::text_processing::truncate;
use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

const BACK_TO_TOP_LABEL: &str = " ↑ Top ";
const FIELD_LABEL_WIDTH: usize = 10;

/// Render the visible part of the page and register the clickable regions
/// on it.
///
pub fn page(frame: &mut Frame, area: Rect, state: &State, regions: &mut Vec<(Rect, HitTarget)>) {
    let theme = state.theme();
    frame.render_widget(Block::default().style(styling::page_style(theme)), area);
    if area.height == 0 {
        return;
    }

    {
        let mut canvas = Canvas::new(frame.buffer_mut(), area, state.viewport().top_row());
        let layout = state.layout();
        let portfolio = state.portfolio();

        if let Some(appearance) = Appearance::of(state.profile_phase()) {
            let faded = appearance.theme(theme);
            draw(&mut canvas, layout.profile_area(), appearance.shift, &faded, |buf, theme| {
                profile_card(buf, portfolio, theme)
            });
        }
        for section in layout.sections() {
            section_heading(&mut canvas, layout, section.kind, section.top, portfolio, theme);
        }

        for element in layout.elements() {
            if canvas.to_screen(element.area).is_none() {
                continue;
            }
            let appearance = match Appearance::of(state.element_phase(element.id)) {
                Some(appearance) => appearance,
                None => continue,
            };
            let faded = appearance.theme(theme);
            let index = element.id.index;
            let shift = appearance.shift;
            match element.id.group {
                Group::Certification => {
                    if let Some(item) = portfolio.certifications.get(index) {
                        draw(&mut canvas, element.area, shift, &faded, |buf, theme| {
                            certification_card(buf, item, theme)
                        });
                    }
                }
                Group::Project => {
                    if let Some(item) = portfolio.projects.get(index) {
                        draw(&mut canvas, element.area, shift, &faded, |buf, theme| {
                            project_card(buf, item, theme)
                        });
                    }
                }
                Group::Design => {
                    if let Some(item) = portfolio.designs.get(index) {
                        draw(&mut canvas, element.area, shift, &faded, |buf, theme| {
                            design_card(buf, item, theme)
                        });
                    }
                }
                Group::Tool => {
                    if let Some(item) = portfolio.tools.get(index) {
                        draw(&mut canvas, element.area, shift, &faded, |buf, theme| {
                            tool_card(buf, item, theme)
                        });
                    }
                }
                Group::WebDesign => {
                    let carousel_state = state.carousel();
                    carousel(
                        &mut canvas,
                        element.area,
                        carousel_state.slides(),
                        carousel_state.snapshot(),
                        &faded,
                        shift,
                        regions,
                    );
                }
            }
        }
    }

    if state.watcher().past_threshold() {
        back_to_top(frame, area, theme, regions);
    }
}

/// Draw one element through a scratch buffer of its own size.
///
fn draw<F>(canvas: &mut Canvas, area: Rect, shift: u16, theme: &Theme, render: F)
where
    F: FnOnce(&mut Buffer, &Theme),
{
    if area.width == 0 || area.height == 0 {
        return;
    }
    let mut buf = scratch(area, styling::page_style(theme));
    render(&mut buf, theme);
    canvas.blit(&buf, area, shift);
}

fn section_heading(
    canvas: &mut Canvas,
    layout: &PageLayout,
    kind: SectionKind,
    top: u16,
    portfolio: &Portfolio,
    theme: &Theme,
) {
    let column = layout.profile_area();
    let area = Rect::new(column.x, top, column.width, 2);
    match kind {
        SectionKind::Profile => (),
        SectionKind::Footer => draw(canvas, area, 0, theme, |buf, theme| {
            let rule = "─".repeat(buf.area.width as usize);
            let notice = format!(
                "© {} {}. All rights reserved.",
                chrono::Local::now().year(),
                portfolio.owner.full_name()
            );
            Paragraph::new(vec![
                Line::styled(rule, styling::normal_block_border_style(theme)),
                Line::styled(notice, styling::muted_text_style(theme)),
            ])
            .alignment(Alignment::Center)
            .render(buf.area, buf);
        }),
        _ => draw(canvas, area, 0, theme, |buf, theme| {
            let title = kind.title();
            let underline = "━".repeat(title.width());
            Paragraph::new(vec![
                Line::styled(title, styling::heading_style(theme)),
                Line::styled(underline, styling::active_block_border_style(theme)),
            ])
            .render(buf.area, buf);
        }),
    }
}

fn card_block<'a>(title: &str, width: u16, theme: &Theme) -> Block<'a> {
    let title = truncate(title, width.saturating_sub(4) as usize);
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styling::normal_block_border_style(theme))
        .title(Span::styled(
            format!(" {} ", title),
            styling::active_block_title_style().fg(theme.text_secondary.to_color()),
        ))
        .padding(Padding::horizontal(1))
}

/// A one-line `label value` pair, cut to `width`.
///
fn field<'a>(label: &str, value: &str, width: u16, value_style: Style, theme: &Theme) -> Line<'a> {
    let value_width = (width as usize).saturating_sub(FIELD_LABEL_WIDTH);
    Line::from(vec![
        Span::styled(
            format!("{:<w$}", label, w = FIELD_LABEL_WIDTH),
            styling::muted_text_style(theme),
        ),
        Span::styled(truncate(value, value_width), value_style),
    ])
}

/// Rect of the `n`th line of `inner`, empty when out of range.
///
fn line(inner: Rect, n: u16) -> Rect {
    if n >= inner.height {
        return Rect::new(inner.x, inner.y, 0, 0);
    }
    Rect::new(inner.x, inner.y + n, inner.width, 1)
}

fn profile_card(buf: &mut Buffer, portfolio: &Portfolio, theme: &Theme) {
    let area = buf.area;
    let profile = &portfolio.profile;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styling::active_block_border_style(theme))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    block.render(area, buf);

    let lines = vec![
        Line::styled(profile.headline.clone(), styling::heading_style(theme)),
        Line::default(),
        Line::styled(profile.bio.clone(), styling::normal_text_style(theme)),
    ];
    let photo = field("Photo", &profile.image, inner.width, styling::link_style(theme), theme);
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(
            Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1)),
            buf,
        );
    Paragraph::new(photo).render(line(inner, inner.height.saturating_sub(1)), buf);
}

fn certification_card(buf: &mut Buffer, item: &Certification, theme: &Theme) {
    let area = buf.area;
    let block = card_block(&item.title, area.width, theme);
    let inner = block.inner(area);
    block.render(area, buf);

    let width = inner.width;
    let rows = [
        field("Received", &item.received, width, styling::active_list_item_style(theme), theme),
        Line::default(),
        field("Image", &item.image, width, styling::muted_text_style(theme), theme),
        field("Link", &item.link, width, styling::link_style(theme), theme),
    ];
    for (n, row) in rows.into_iter().enumerate() {
        Paragraph::new(row).render(line(inner, n as u16), buf);
    }
}

/// Body shared by projects and designs: wrapped description above two
/// reference lines.
///
fn described_card(
    buf: &mut Buffer,
    title: &str,
    description: &str,
    references: [(&str, &str); 2],
    theme: &Theme,
) {
    let area = buf.area;
    let block = card_block(title, area.width, theme);
    let inner = block.inner(area);
    block.render(area, buf);

    let body_height = inner.height.saturating_sub(3);
    Paragraph::new(Line::styled(
        description.to_string(),
        styling::normal_text_style(theme),
    ))
    .wrap(Wrap { trim: true })
    .render(Rect::new(inner.x, inner.y, inner.width, body_height), buf);

    let [(first_label, first), (second_label, second)] = references;
    let first = field(first_label, first, inner.width, styling::muted_text_style(theme), theme);
    let second = field(second_label, second, inner.width, styling::link_style(theme), theme);
    Paragraph::new(first).render(line(inner, body_height + 1), buf);
    Paragraph::new(second).render(line(inner, body_height + 2), buf);
}

fn project_card(buf: &mut Buffer, item: &Project, theme: &Theme) {
    described_card(
        buf,
        &item.title,
        &item.description,
        [("Preview", &item.preview), ("Demo", &item.demo)],
        theme,
    );
}

fn design_card(buf: &mut Buffer, item: &Design, theme: &Theme) {
    described_card(
        buf,
        &item.title,
        &item.description,
        [("Image", &item.image), ("Link", &item.link)],
        theme,
    );
}

fn tool_card(buf: &mut Buffer, item: &Tool, theme: &Theme) {
    let area = buf.area;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styling::normal_block_border_style(theme));
    let inner = block.inner(area);
    block.render(area, buf);

    let width = inner.width as usize;
    Paragraph::new(vec![
        Line::styled(truncate(&item.name, width), styling::active_list_item_style(theme)),
        Line::styled(truncate(&item.icon, width), styling::muted_text_style(theme)),
    ])
    .alignment(Alignment::Center)
    .render(inner, buf);
}

fn back_to_top(frame: &mut Frame, page: Rect, theme: &Theme, regions: &mut Vec<(Rect, HitTarget)>) {
    let width = BACK_TO_TOP_LABEL.width() as u16;
    if page.width < width + 2 || page.height < 2 {
        return;
    }
    let button = Rect::new(page.right() - width - 2, page.bottom() - 2, width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(BACK_TO_TOP_LABEL, styling::button_style(theme))),
        button,
    );
    regions.push((button, HitTarget::BackToTop));
}
