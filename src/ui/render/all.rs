use super::*;
use crate::state::State;

/// Render the whole screen: page, navigation bar, optional log panel, key
/// hints and, on top of everything, the menu overlay. Records the clickable
/// regions of the frame in the state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    if size != state.terminal_size() {
        state.resize(size);
    }
    let areas = state.areas();
    let mut regions = vec![];

    page(frame, areas.page, state, &mut regions);
    navbar(frame, areas.navbar, state, &mut regions);
    if let Some(area) = areas.log {
        log(frame, area, state);
    }
    footer(frame, areas.footer, state);
    menu(frame, size, areas.navbar, state, &mut regions);

    state.set_hit_regions(regions);
}
