use dioxus::prelude::*;
use std::ops::Range;

use crate::components::pane_view::dom;
use crate::search::Scope;
use crate::state::{AppState, FindField};
use crate::utils::text_offsets::utf16_range_to_bytes;

const SEARCH_INPUT_ID: &str = "find-search-input";
const REPLACE_INPUT_ID: &str = "find-replace-input";

/// Selection of the pane the dialog is bound to, as a byte range
async fn bound_selection(state: AppState) -> Option<Range<usize>> {
    let pane = state.find_pane()?;
    let selection = dom::read_selection(&pane.element_id()).await?;
    let notebook = state.notebook.peek();
    let text = notebook.tab_by_id(pane.tab)?.text(pane.slot);
    Some(utf16_range_to_bytes(text, selection))
}

async fn find_next(mut state: AppState) {
    let cursor = bound_selection(state).await.map(|selection| selection.end);
    state.find_next(cursor);
}

async fn replace_one(mut state: AppState) {
    let selection = bound_selection(state)
        .await
        .filter(|selection| !selection.is_empty());
    state.replace_one(selection);
}

/// Enter in a dialog field runs that field's action
fn handle_field_keydown(evt: Event<KeyboardData>, state: AppState, on_enter: fn(AppState)) {
    if evt.key() == Key::Enter && !evt.data().is_composing() {
        evt.prevent_default();
        on_enter(state);
    }
}

/// Non-modal find/replace panel, bound to one pane at a time.
///
/// Rendered only while a find session exists.
#[component]
pub fn FindDialog() -> Element {
    let mut state = use_context::<AppState>();

    // Uncontrolled inputs keep IME composition intact; seed them once
    let initial_query = use_hook(|| {
        state
            .find_replace
            .peek()
            .as_ref()
            .map(|controller| controller.query.clone())
            .unwrap_or_default()
    });
    let initial_replacement = use_hook(|| {
        state
            .find_replace
            .peek()
            .as_ref()
            .map(|controller| controller.replacement.clone())
            .unwrap_or_default()
    });

    // `open_find` sets the field on every request, even an unchanged one
    use_effect(move || {
        let id = match *state.find_field.read() {
            FindField::Search => SEARCH_INPUT_ID,
            FindField::Replace => REPLACE_INPUT_ID,
        };
        spawn(async move {
            dom::focus(id).await;
        });
    });

    let Some((case_sensitive, global)) = state
        .find_replace
        .read()
        .as_ref()
        .map(|controller| (controller.case_sensitive, controller.scope() == Scope::Global))
    else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "find-dialog",
            onkeydown: move |evt| {
                if evt.key() == Key::Escape {
                    state.close_find();
                }
            },

            div {
                class: "find-dialog-title",
                span { "Find / Replace" }
                button {
                    class: "tab-close",
                    title: "Close",
                    onclick: move |_| state.close_find(),
                    "×"
                }
            }

            label { r#for: SEARCH_INPUT_ID, "Find:" }
            input {
                id: SEARCH_INPUT_ID,
                r#type: "text",
                spellcheck: "false",
                initial_value: "{initial_query}",
                oninput: move |evt| {
                    let query = evt.value();
                    state.update_find(|controller| controller.query = query);
                },
                onkeydown: move |evt| {
                    handle_field_keydown(evt, state, |state| {
                        spawn(find_next(state));
                    })
                },
            }

            label { r#for: REPLACE_INPUT_ID, "Replace:" }
            input {
                id: REPLACE_INPUT_ID,
                r#type: "text",
                spellcheck: "false",
                initial_value: "{initial_replacement}",
                oninput: move |evt| {
                    let replacement = evt.value();
                    state.update_find(|controller| controller.replacement = replacement);
                },
                onkeydown: move |evt| {
                    handle_field_keydown(evt, state, |state| {
                        spawn(replace_one(state));
                    })
                },
            }

            div {
                class: "find-options",
                label {
                    input {
                        r#type: "checkbox",
                        checked: case_sensitive,
                        onchange: move |evt| {
                            let checked = evt.checked();
                            state.update_find(|controller| controller.case_sensitive = checked);
                        },
                    }
                    " Match case"
                }
                label {
                    input {
                        r#type: "checkbox",
                        checked: global,
                        onchange: move |evt| {
                            let scope = if evt.checked() { Scope::Global } else { Scope::Local };
                            state.set_find_scope(scope);
                        },
                    }
                    " Search all tabs"
                }
            }

            div {
                class: "find-actions",
                button {
                    onclick: move |_| {
                        spawn(find_next(state));
                    },
                    "Find Next"
                }
                button {
                    onclick: move |_| {
                        spawn(replace_one(state));
                    },
                    "Replace"
                }
                button {
                    onclick: move |_| state.replace_all(),
                    "Replace All"
                }
            }
        }
    }
}
