use dioxus::prelude::*;

use crate::components::pane_view::PaneView;
use crate::state::{AppState, PaneRef, PaneSlot, TabId};

/// The three panes of one tab.
///
/// Every tab stays mounted and inactive ones are hidden, so each textarea
/// keeps its caret, scroll position and undo history across tab switches.
#[component]
pub fn TabView(tab_id: TabId, is_active: bool) -> Element {
    let mut state = use_context::<AppState>();
    let panes: Vec<(PaneSlot, String, usize)> = {
        let notebook = state.notebook.read();
        let Some(tab) = notebook.tab_by_id(tab_id) else {
            return rsx! {};
        };
        PaneSlot::ALL
            .iter()
            .map(|&slot| {
                let pane = tab.pane(slot);
                (slot, pane.text().to_string(), pane.char_count())
            })
            .collect()
    };

    rsx! {
        div {
            class: "tab-view",
            class: if is_active { "active" },

            div {
                class: "panes",
                for (slot, text, char_count) in panes {
                    PaneView {
                        key: "{slot}",
                        pane: PaneRef::new(tab_id, slot),
                        text,
                        char_count,
                    }
                }
            }

            button {
                class: "tab-clear",
                title: "Clear all text in this tab",
                onclick: move |_| state.clear_tab(tab_id),
                "Clear All"
            }
        }
    }
}
