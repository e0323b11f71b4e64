use crate::state::{CarouselSnapshot, HitTarget, Slide};
use crate::ui::theme::Theme;
use crate::ui::widgets::canvas::{scratch, Canvas};
use crate::ui::widgets::styling;
use crate::utils::text_processing::truncate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, BorderType, Borders, Paragraph, Widget},
};

const ARROW_WIDTH: u16 = 3;

/// Clickable parts of a drawn carousel, in card-local coordinates.
///
#[derive(Debug, Default, PartialEq, Eq)]
struct Controls {
    prev: Option<Rect>,
    next: Option<Rect>,
    dots: Vec<Rect>,
}

/// Render the web design carousel into `area` of the page and register its
/// controls.
///
pub fn carousel(
    canvas: &mut Canvas,
    area: Rect,
    slides: &[Slide],
    snapshot: CarouselSnapshot,
    theme: &Theme,
    shift: u16,
    regions: &mut Vec<(Rect, HitTarget)>,
) {
    let mut buf = scratch(area, styling::page_style(theme));
    let controls = draw(&mut buf, slides, snapshot, theme);
    canvas.blit(&buf, area, shift);

    let to_page = |local: Rect| {
        Rect::new(
            area.x + local.x,
            area.y + local.y,
            local.width,
            local.height,
        )
    };
    if let Some(screen) = canvas.to_screen(area) {
        regions.push((screen, HitTarget::Carousel));
    }
    let arrows = [
        (controls.prev, HitTarget::CarouselPrev),
        (controls.next, HitTarget::CarouselNext),
    ];
    for (rect, target) in arrows {
        if let Some(screen) = rect.and_then(|rect| canvas.to_screen(to_page(rect))) {
            regions.push((screen, target));
        }
    }
    for (index, dot) in controls.dots.iter().enumerate() {
        if let Some(screen) = canvas.to_screen(to_page(*dot)) {
            regions.push((screen, HitTarget::CarouselDot(index)));
        }
    }
}

fn draw(buf: &mut Buffer, slides: &[Slide], snapshot: CarouselSnapshot, theme: &Theme) -> Controls {
    let area = buf.area;
    let status = if snapshot.paused { " ⏸ paused " } else { " ▶ playing " };
    let counter = if snapshot.len == 0 {
        " No slides ".to_string()
    } else {
        format!(" Slide {}/{} ", snapshot.index + 1, snapshot.len)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(counter, styling::active_block_title_style()))
        .title(
            Title::from(Span::styled(status, styling::muted_text_style(theme)))
                .alignment(Alignment::Right),
        );
    let inner = block.inner(area);
    block.render(area, buf);
    if slides.is_empty() || inner.height < 3 || inner.width < ARROW_WIDTH * 2 + 4 {
        return Controls::default();
    }

    let strip_height = inner.height.saturating_sub(2).max(1);
    let strip = Rect::new(
        inner.x + ARROW_WIDTH + 1,
        inner.y,
        inner.width - (ARROW_WIDTH + 1) * 2,
        strip_height,
    );
    for (index, slide) in slides.iter().enumerate() {
        // Only the slide translated to the origin of the strip is on screen.
        if index as i64 * 100 + snapshot.offset_percent() != 0 {
            continue;
        }
        draw_slide(buf, strip, slide, theme);
    }

    let arrow_y = inner.y + strip_height / 2;
    let prev = Rect::new(inner.x, arrow_y, ARROW_WIDTH, 1);
    let next = Rect::new(inner.right() - ARROW_WIDTH, arrow_y, ARROW_WIDTH, 1);
    Paragraph::new(Span::styled(" ◀ ", styling::button_style(theme))).render(prev, buf);
    Paragraph::new(Span::styled(" ▶ ", styling::button_style(theme))).render(next, buf);

    let dots_y = inner.y + strip_height + 1;
    let dots = if dots_y < inner.bottom() {
        let total = (slides.len() * 2).saturating_sub(1) as u16;
        let start = inner.x + inner.width.saturating_sub(total) / 2;
        (0..slides.len())
            .map(|index| Rect::new(start + index as u16 * 2, dots_y, 1, 1))
            .filter(|dot| dot.x < inner.right())
            .collect::<Vec<_>>()
    } else {
        vec![]
    };
    for (index, dot) in dots.iter().enumerate() {
        let (symbol, style) = if index == snapshot.index {
            ("●", styling::active_list_item_style(theme))
        } else {
            ("○", styling::muted_text_style(theme))
        };
        buf.set_string(dot.x, dot.y, symbol, style);
    }

    Controls {
        prev: Some(prev),
        next: Some(next),
        dots,
    }
}

fn draw_slide(buf: &mut Buffer, area: Rect, slide: &Slide, theme: &Theme) {
    let frame = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(styling::normal_block_border_style(theme));
    let inner = frame.inner(area);
    frame.render(area, buf);

    let width = inner.width as usize;
    let mut lines = vec![Line::default(); (inner.height.saturating_sub(2) / 2) as usize];
    lines.push(Line::from(Span::styled(
        "[ web design ]",
        styling::muted_text_style(theme),
    )));
    lines.push(Line::from(Span::styled(
        truncate(&slide.0, width),
        styling::link_style(theme),
    )));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(count: usize) -> Vec<Slide> {
        (0..count)
            .map(|i| Slide(format!("/webdesign{}.jpg", i + 1)))
            .collect()
    }

    fn text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf.get(x, y).symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn snapshot(index: usize, len: usize, paused: bool) -> CarouselSnapshot {
        CarouselSnapshot { index, len, paused }
    }

    #[test]
    fn shows_only_the_current_slide() {
        let slides = slides(3);
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 11));
        draw(&mut buf, &slides, snapshot(1, 3, false), &Theme::default());
        let text = text(&buf);
        assert!(text.contains("/webdesign2.jpg"));
        assert!(!text.contains("/webdesign1.jpg"));
        assert!(!text.contains("/webdesign3.jpg"));
        assert!(text.contains("Slide 2/3"));
        assert!(text.contains("playing"));
    }

    #[test]
    fn controls_cover_arrows_and_dots() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 11));
        let controls = draw(&mut buf, &slides(3), snapshot(0, 3, true), &Theme::default());
        assert_eq!(controls.prev, Some(Rect::new(1, 4, 3, 1)));
        assert_eq!(controls.next, Some(Rect::new(46, 4, 3, 1)));
        assert_eq!(controls.dots.len(), 3);
        assert_eq!(buf.get(controls.dots[0].x, controls.dots[0].y).symbol(), "●");
        assert_eq!(buf.get(controls.dots[1].x, controls.dots[1].y).symbol(), "○");
        assert!(text(&buf).contains("paused"));
    }

    #[test]
    fn empty_carousel_has_no_controls() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 11));
        let controls = draw(&mut buf, &[], snapshot(0, 0, false), &Theme::default());
        assert_eq!(controls, Controls::default());
        assert!(text(&buf).contains("No slides"));
    }
}
