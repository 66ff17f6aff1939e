use std::ops::Range;

/// Index range of items worth drawing for a scrolled list of fixed-height
/// items, widened by `overscan` items on both sides and clamped to the list.
pub fn visible_range(
    item_count: usize,
    item_height: usize,
    viewport_height: usize,
    scroll: usize,
    overscan: usize,
) -> Range<usize> {
    if item_height == 0 || item_count == 0 {
        return 0..0;
    }
    let first = (scroll / item_height).saturating_sub(overscan);
    let last = (scroll + viewport_height).div_ceil(item_height) + overscan;
    first.min(item_count)..last.min(item_count)
}

/// Total height of the list
pub fn total_height(item_count: usize, item_height: usize) -> usize {
    item_count * item_height
}

/// Smallest scroll offset change that brings item `index` fully into view
pub fn scroll_to_reveal(index: usize, item_height: usize, viewport_height: usize, scroll: usize) -> usize {
    let top = index * item_height;
    let bottom = top + item_height;
    if top < scroll {
        top
    } else if bottom > scroll + viewport_height {
        bottom.saturating_sub(viewport_height)
    } else {
        scroll
    }
}
