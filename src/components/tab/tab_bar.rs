use dioxus::prelude::*;

use super::calculations::{calculate_shift_class, exceeds_drag_threshold};
use super::tab_item::TabItem;
use crate::state::AppState;

/// Drag start threshold in pixels
const DRAG_THRESHOLD: f64 = 5.0;

/// Pending drag state before threshold is reached
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingDrag {
    /// Index of the tab being dragged
    pub index: usize,
    /// Initial pointer X position (client coordinates)
    pub start_x: f64,
    /// Initial pointer Y position (client coordinates)
    pub start_y: f64,
}

/// Local drag state of the tab bar
#[derive(Debug, Clone, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Pending(PendingDrag),
    /// Threshold exceeded; `to` is the tab under the pointer
    Active { from: usize, to: usize },
}

#[component]
pub fn TabBar() -> Element {
    let mut state = use_context::<AppState>();
    let (tabs, active_tab_index) = {
        let notebook = state.notebook.read();
        let tabs: Vec<_> = notebook
            .tabs()
            .iter()
            .map(|tab| (tab.id(), tab.title().to_string()))
            .collect();
        (tabs, notebook.active_index())
    };

    let mut drag_state = use_signal(DragState::default);

    let handle_keydown = move |evt: Event<KeyboardData>| {
        if evt.key() == Key::Escape && *drag_state.read() != DragState::Idle {
            tracing::debug!("Tab drag cancelled");
            drag_state.set(DragState::Idle);
        }
    };

    // Pending → Active once the pointer leaves the threshold
    let handle_pointermove = move |evt: Event<PointerData>| {
        let current = drag_state.read().clone();
        if let DragState::Pending(pending) = current {
            let point = evt.data().client_coordinates();
            let dx = point.x - pending.start_x;
            let dy = point.y - pending.start_y;
            if exceeds_drag_threshold(dx, dy, DRAG_THRESHOLD) {
                tracing::debug!(index = pending.index, "Started tab drag");
                drag_state.set(DragState::Active {
                    from: pending.index,
                    to: pending.index,
                });
            }
        }
    };

    let handle_pointerup = move |_evt: Event<PointerData>| {
        let current = drag_state.read().clone();
        if let DragState::Active { from, to } = current {
            state.move_tab(from, to);
        }
        drag_state.set(DragState::Idle);
    };

    let drag_target = match *drag_state.read() {
        DragState::Active { from, to } => Some((from, to)),
        _ => None,
    };
    let always_on_top = *state.always_on_top.read();

    rsx! {
        div {
            class: "tab-bar",
            tabindex: "0",
            onkeydown: handle_keydown,
            onpointermove: handle_pointermove,
            onpointerup: handle_pointerup,
            onpointerleave: move |_| drag_state.set(DragState::Idle),

            div {
                class: "tab-list",
                for (index, (id, title)) in tabs.into_iter().enumerate() {
                    TabItem {
                        key: "{id}",
                        index,
                        title,
                        is_active: index == active_tab_index,
                        shift_class: drag_target.and_then(|(from, to)| calculate_shift_class(from, to, index)),
                        on_drag_start: move |pending: PendingDrag| {
                            drag_state.set(DragState::Pending(pending));
                        },
                        on_drag_over: move |over: usize| {
                            let current = drag_state.read().clone();
                            if let DragState::Active { from, .. } = current {
                                drag_state.set(DragState::Active { from, to: over });
                            }
                        },
                    }
                }
            }

            NewTabButton {}

            button {
                class: "tab-action",
                title: "Always on Top",
                onclick: move |_| state.toggle_always_on_top(),
                if always_on_top { "Stop keeping on top" } else { "Keep on top" }
            }
        }
    }
}

#[component]
fn NewTabButton() -> Element {
    let mut state = use_context::<AppState>();

    rsx! {
        button {
            class: "tab-new",
            title: "New Tab",
            onclick: move |_| {
                state.add_empty_tab();
            },
            "+"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_drag_default_values() {
        let pending = PendingDrag::default();
        assert_eq!(pending.index, 0);
        assert_eq!(pending.start_x, 0.0);
        assert_eq!(pending.start_y, 0.0);
    }

    #[test]
    fn test_drag_state_starts_idle() {
        assert_eq!(DragState::default(), DragState::Idle);
    }
}
