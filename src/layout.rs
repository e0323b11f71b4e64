//! Page layout.
//!
//! Lays the portfolio out on a virtual canvas as wide as the terminal and as
//! tall as the content needs. Sections stack vertically; card groups flow
//! into as many columns as fit. The layout resolves in-page anchors and
//! reports how much of each observed element is inside the viewport.

use crate::content::Portfolio;
use crate::state::{AnchorResolver, ElementId, Group, StateError, Viewport, LINE_HEIGHT};
use crate::utils::text_processing::wrapped_height;
use log::*;
use ratatui::layout::Rect;

/// Narrowest a card may get before the grid drops a column.
///
pub const CARD_MIN_WIDTH: u16 = 34;

/// Terminal width from which navigation links are shown inline.
///
pub const NAV_COLLAPSE_WIDTH: u16 = 90;

/// Rows taken by the navigation bar.
///
pub const NAVBAR_HEIGHT: u16 = 3;

/// Rows taken by the key hint footer.
///
pub const FOOTER_HINT_HEIGHT: u16 = 1;

/// Rows taken by the log panel when shown.
///
pub const LOG_PANEL_HEIGHT: u16 = 8;

const MARGIN: u16 = 1;
const GAP: u16 = 2;
const ROW_GAP: u16 = 1;
const SECTION_GAP: u16 = 2;
const TITLE_HEIGHT: u16 = 2;
const FOOTER_HEIGHT: u16 = 2;

const CERT_HEIGHT: u16 = 7;
const PROJECT_HEIGHT: u16 = 9;
const DESIGN_HEIGHT: u16 = 9;
const TOOL_HEIGHT: u16 = 4;
const CAROUSEL_HEIGHT: u16 = 11;

/// Specifying the page sections, in page order.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Profile,
    Certifications,
    Projects,
    Designs,
    WebDesigns,
    Tools,
    Footer,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Profile => "Profile",
            SectionKind::Certifications => "Certifications",
            SectionKind::Projects => "Projects",
            SectionKind::Designs => "Poster Designs",
            SectionKind::WebDesigns => "Web Designs",
            SectionKind::Tools => "Web Development Tools",
            SectionKind::Footer => "",
        }
    }

    pub fn anchor(&self) -> Option<&'static str> {
        match self {
            SectionKind::Profile => Some("#profile"),
            SectionKind::Certifications => Some("#certifications"),
            SectionKind::Projects => Some("#projects"),
            SectionKind::Designs => Some("#designs"),
            SectionKind::WebDesigns => Some("#webdesigns"),
            SectionKind::Tools => Some("#tools"),
            SectionKind::Footer => None,
        }
    }

    fn group(&self) -> Option<Group> {
        match self {
            SectionKind::Certifications => Some(Group::Certification),
            SectionKind::Projects => Some(Group::Project),
            SectionKind::Designs => Some(Group::Design),
            SectionKind::WebDesigns => Some(Group::WebDesign),
            SectionKind::Tools => Some(Group::Tool),
            SectionKind::Profile | SectionKind::Footer => None,
        }
    }
}

/// Vertical extent of a section, in canvas rows.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub kind: SectionKind,
    pub top: u16,
    pub height: u16,
}

/// Placement of an observed element on the canvas.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLayout {
    pub id: ElementId,
    pub area: Rect,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    width: u16,
    height: u16,
    profile: Rect,
    sections: Vec<SectionLayout>,
    elements: Vec<ElementLayout>,
}

impl PageLayout {
    /// Lay out `portfolio` for a canvas `width` columns wide.
    ///
    pub fn compute(portfolio: &Portfolio, width: u16) -> PageLayout {
        let inner = width.saturating_sub(MARGIN * 2).max(1);
        let mut layout = PageLayout {
            width,
            ..PageLayout::default()
        };
        let mut top = 1;

        let profile_height = profile_height(portfolio, inner);
        layout.profile = Rect::new(MARGIN, top, inner, profile_height);
        layout.sections.push(SectionLayout {
            kind: SectionKind::Profile,
            top: 0,
            height: profile_height.saturating_add(1),
        });
        top = top.saturating_add(profile_height).saturating_add(SECTION_GAP);

        let groups = [
            (SectionKind::Certifications, portfolio.certifications.len(), CERT_HEIGHT),
            (SectionKind::Projects, portfolio.projects.len(), PROJECT_HEIGHT),
            (SectionKind::Designs, portfolio.designs.len(), DESIGN_HEIGHT),
            (SectionKind::WebDesigns, 1, CAROUSEL_HEIGHT),
            (SectionKind::Tools, portfolio.tools.len(), TOOL_HEIGHT),
        ];
        for (kind, count, card_height) in groups {
            let height = layout.push_grid(kind, top, inner, count, card_height);
            top = top.saturating_add(height).saturating_add(SECTION_GAP);
        }

        layout.sections.push(SectionLayout {
            kind: SectionKind::Footer,
            top,
            height: FOOTER_HEIGHT,
        });
        layout.height = top.saturating_add(FOOTER_HEIGHT);
        layout
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Canvas height in rows.
    ///
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Canvas height in page units.
    ///
    pub fn content_height(&self) -> u32 {
        self.height as u32 * LINE_HEIGHT
    }

    pub fn profile_area(&self) -> Rect {
        self.profile
    }

    pub fn sections(&self) -> &[SectionLayout] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&SectionLayout> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    pub fn elements(&self) -> &[ElementLayout] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementLayout> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// Fraction of an element's height inside the viewport, or `None` if the
    /// element is not on the page.
    ///
    pub fn intersection_ratio(&self, id: ElementId, viewport: &Viewport) -> Option<f32> {
        let area = self.element(id)?.area;
        if area.height == 0 {
            return None;
        }
        let top = area.y as u32 * LINE_HEIGHT;
        let bottom = (area.y as u32 + area.height as u32) * LINE_HEIGHT;
        let view_top = viewport.offset();
        let view_bottom = view_top + viewport.height();
        let overlap = bottom.min(view_bottom).saturating_sub(top.max(view_top));
        Some(overlap as f32 / (bottom - top) as f32)
    }

    fn push_grid(
        &mut self,
        kind: SectionKind,
        top: u16,
        inner: u16,
        count: usize,
        card_height: u16,
    ) -> u16 {
        let columns = grid_columns(inner, count);
        let card_width = inner.saturating_sub(GAP.saturating_mul(columns - 1)) / columns;
        let grid_top = top.saturating_add(TITLE_HEIGHT) as usize;
        let stride = (card_height + ROW_GAP) as usize;

        if let Some(group) = kind.group() {
            for index in 0..count {
                let column = index as u16 % columns;
                let y = grid_top + index / columns as usize * stride;
                if y + card_height as usize > u16::MAX as usize {
                    warn!(
                        "Canvas is full; {} of {} {:?} cards laid out",
                        index, count, kind
                    );
                    break;
                }
                self.elements.push(ElementLayout {
                    id: ElementId::new(group, index),
                    area: Rect::new(
                        MARGIN + column * (card_width + GAP),
                        y as u16,
                        card_width,
                        card_height,
                    ),
                });
            }
        }

        let rows = count.div_ceil(columns as usize);
        let grid_height = match rows {
            0 => 0,
            rows => rows * card_height as usize + (rows - 1) * ROW_GAP as usize,
        };
        let height = u16::try_from(grid_height)
            .unwrap_or(u16::MAX)
            .saturating_add(TITLE_HEIGHT);
        self.sections.push(SectionLayout { kind, top, height });
        height
    }
}

impl AnchorResolver for PageLayout {
    fn resolve(&self, anchor: &str) -> Result<u32, StateError> {
        self.sections
            .iter()
            .find(|section| section.kind.anchor() == Some(anchor))
            .map(|section| section.top as u32 * LINE_HEIGHT)
            .ok_or_else(|| StateError::AnchorNotFound {
                anchor: anchor.to_string(),
            })
    }
}

/// Terminal regions around the scrolling page.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenAreas {
    pub navbar: Rect,
    pub page: Rect,
    pub log: Option<Rect>,
    pub footer: Rect,
}

/// Split the terminal into navbar, page, optional log panel and hint footer.
/// The log panel never takes the last page row.
///
pub fn screen_areas(size: Rect, show_log: bool) -> ScreenAreas {
    let navbar_height = NAVBAR_HEIGHT.min(size.height);
    let footer_height = FOOTER_HINT_HEIGHT.min(size.height.saturating_sub(navbar_height));
    let remaining = size.height - navbar_height - footer_height;
    let log_height = if show_log {
        LOG_PANEL_HEIGHT.min(remaining.saturating_sub(1))
    } else {
        0
    };
    let page_height = remaining - log_height;

    let navbar = Rect::new(size.x, size.y, size.width, navbar_height);
    let page = Rect::new(size.x, navbar.bottom(), size.width, page_height);
    let log = (log_height > 0).then(|| Rect::new(size.x, page.bottom(), size.width, log_height));
    let footer = Rect::new(size.x, page.bottom() + log_height, size.width, footer_height);
    ScreenAreas {
        navbar,
        page,
        log,
        footer,
    }
}

/// Number of card columns that fit in `inner` columns, never more than there
/// are cards.
///
pub fn grid_columns(inner: u16, count: usize) -> u16 {
    let fit = (inner.saturating_add(GAP) / (CARD_MIN_WIDTH + GAP)).max(1);
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    fit.min(count)
}

fn profile_height(portfolio: &Portfolio, inner: u16) -> u16 {
    let text_width = inner.saturating_sub(4) as usize;
    let bio = u16::try_from(wrapped_height(&portfolio.profile.bio, text_width)).unwrap_or(u16::MAX);
    // borders, headline, blank, bio, blank, image reference
    bio.saturating_add(6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Behavior;

    fn layout(width: u16) -> PageLayout {
        PageLayout::compute(&Portfolio::default(), width)
    }

    fn viewport(layout: &PageLayout, rows: u32) -> Viewport {
        let mut viewport = Viewport::new();
        viewport.resize(rows * LINE_HEIGHT, layout.content_height());
        viewport
    }

    #[test]
    fn sections_stack_in_page_order() {
        let layout = layout(120);
        let kinds: Vec<SectionKind> = layout.sections().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Profile,
                SectionKind::Certifications,
                SectionKind::Projects,
                SectionKind::Designs,
                SectionKind::WebDesigns,
                SectionKind::Tools,
                SectionKind::Footer,
            ]
        );
        for pair in layout.sections().windows(2) {
            assert!(pair[0].top + pair[0].height <= pair[1].top);
        }
        let footer = layout.section(SectionKind::Footer).unwrap();
        assert_eq!(layout.height(), footer.top + footer.height);
    }

    #[test]
    fn every_card_is_an_element() {
        let layout = layout(120);
        let portfolio = Portfolio::default();
        let expected = portfolio.certifications.len()
            + portfolio.projects.len()
            + portfolio.designs.len()
            + 1
            + portfolio.tools.len();
        assert_eq!(layout.elements().len(), expected);
        assert!(layout.element(ElementId::new(Group::WebDesign, 0)).is_some());
        assert!(layout.element(ElementId::new(Group::Tool, 7)).is_some());
        assert!(layout.element(ElementId::new(Group::Tool, 8)).is_none());
    }

    #[test]
    fn grid_columns_follow_width() {
        assert_eq!(grid_columns(40, 3), 1);
        assert_eq!(grid_columns(70, 3), 2);
        assert_eq!(grid_columns(200, 3), 3);
        assert_eq!(grid_columns(200, 0), 1);
    }

    #[test]
    fn oversized_content_fills_the_canvas_without_overflow() {
        let mut portfolio = Portfolio::default();
        let tool = portfolio.tools[0].clone();
        portfolio.tools = vec![tool; 14_000];

        let layout = PageLayout::compute(&portfolio, 40);
        assert_eq!(layout.height(), u16::MAX);
        let tools = layout
            .elements()
            .iter()
            .filter(|element| element.id.group == Group::Tool)
            .count();
        assert!(tools > 0 && tools < 14_000);
        for element in layout.elements() {
            assert!(element.area.y as usize + element.area.height as usize <= u16::MAX as usize);
        }
        assert!(layout.resolve("#tools").is_ok());
    }

    #[test]
    fn grid_columns_handle_huge_counts() {
        assert_eq!(grid_columns(200, 70_000), 5);
        assert_eq!(grid_columns(u16::MAX, 3), 3);
    }

    #[test]
    fn narrow_pages_are_taller() {
        assert!(layout(40).height() > layout(160).height());
    }

    #[test]
    fn cards_stay_inside_the_canvas() {
        for width in [30, 60, 90, 140] {
            let layout = layout(width);
            for element in layout.elements() {
                assert!(element.area.right() <= width);
                assert!(element.area.bottom() <= layout.height());
            }
        }
    }

    #[test]
    fn anchors_resolve_to_section_tops() {
        let layout = layout(120);
        let projects = layout.section(SectionKind::Projects).unwrap();
        assert_eq!(
            layout.resolve("#projects").unwrap(),
            projects.top as u32 * LINE_HEIGHT
        );
        assert_eq!(layout.resolve("#profile").unwrap(), 0);
        assert!(layout.resolve("#webdesigns").is_ok());
        assert!(matches!(
            layout.resolve("#contact"),
            Err(StateError::AnchorNotFound { .. })
        ));
    }

    #[test]
    fn intersection_ratio_tracks_viewport() {
        let layout = layout(120);
        let id = ElementId::new(Group::Tool, 0);
        let area = layout.element(id).unwrap().area;
        let mut viewport = viewport(&layout, 10);

        assert_eq!(layout.intersection_ratio(id, &viewport), Some(0.0));

        viewport.scroll_to(area.y as u32 * LINE_HEIGHT, Behavior::Instant);
        assert_eq!(layout.intersection_ratio(id, &viewport), Some(1.0));

        let half = (area.y as u32 + area.height as u32 / 2) * LINE_HEIGHT;
        viewport.scroll_to(half, Behavior::Instant);
        assert_eq!(layout.intersection_ratio(id, &viewport), Some(0.5));
    }

    #[test]
    fn screen_areas_split_the_terminal() {
        let areas = screen_areas(Rect::new(0, 0, 100, 40), false);
        assert_eq!(areas.navbar.height, NAVBAR_HEIGHT);
        assert_eq!(areas.page, Rect::new(0, 3, 100, 36));
        assert_eq!(areas.log, None);
        assert_eq!(areas.footer, Rect::new(0, 39, 100, 1));

        let areas = screen_areas(Rect::new(0, 0, 100, 40), true);
        assert_eq!(areas.page.height, 36 - LOG_PANEL_HEIGHT);
        assert_eq!(areas.log, Some(Rect::new(0, 39 - LOG_PANEL_HEIGHT, 100, LOG_PANEL_HEIGHT)));
        assert_eq!(areas.footer.y, 39);
    }

    #[test]
    fn screen_areas_survive_tiny_terminals() {
        let areas = screen_areas(Rect::new(0, 0, 20, 2), true);
        assert_eq!(areas.page.height, 0);
        assert_eq!(areas.log, None);
        let areas = screen_areas(Rect::new(0, 0, 20, 6), true);
        assert_eq!(areas.page.height, 1);
    }

    #[test]
    fn empty_groups_keep_their_section() {
        let mut portfolio = Portfolio::default();
        portfolio.projects.clear();
        let layout = PageLayout::compute(&portfolio, 100);
        let section = layout.section(SectionKind::Projects).unwrap();
        assert_eq!(section.height, TITLE_HEIGHT);
        assert!(layout.resolve("#projects").is_ok());
    }
}
