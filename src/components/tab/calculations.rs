//! Pure helpers for tab drag reordering.

/// Whether the pointer moved far enough from where it was pressed to start a drag
pub fn exceeds_drag_threshold(dx: f64, dy: f64, threshold: f64) -> bool {
    dx * dx + dy * dy >= threshold * threshold
}

/// CSS class for the tab at `index` while the tab at `from` is dragged over `to`
pub fn calculate_shift_class(from: usize, to: usize, index: usize) -> Option<&'static str> {
    if index == from {
        Some("dragging")
    } else if index == to {
        Some("drop-target")
    } else {
        None
    }
}
