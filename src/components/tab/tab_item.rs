use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;

use super::tab_bar::PendingDrag;
use crate::state::AppState;

#[component]
pub fn TabItem(
    index: usize,
    title: String,
    is_active: bool,
    shift_class: Option<&'static str>,
    on_drag_start: EventHandler<PendingDrag>,
    on_drag_over: EventHandler<usize>,
) -> Element {
    let mut state = use_context::<AppState>();

    let handle_pointerdown = move |evt: Event<PointerData>| {
        // Only start drag on left button
        if evt.data().trigger_button() != Some(MouseButton::Primary) {
            return;
        }
        let client_coords = evt.client_coordinates();
        on_drag_start.call(PendingDrag {
            index,
            start_x: client_coords.x,
            start_y: client_coords.y,
        });
    };

    let shift_class_str = shift_class.unwrap_or("");
    rsx! {
        div {
            class: "tab {shift_class_str}",
            class: if is_active { "active" },
            title: "{title}",
            onpointerdown: handle_pointerdown,
            onpointerenter: move |_| on_drag_over.call(index),
            onclick: move |_| state.switch_to_tab(index),

            span {
                class: "tab-name",
                "{title}"
            }

            button {
                class: "tab-close",
                title: "Close Tab",
                onpointerdown: move |evt| evt.stop_propagation(),
                onclick: move |evt| {
                    evt.stop_propagation();
                    state.request_close_tab(index);
                },
                "×"
            }
        }
    }
}
