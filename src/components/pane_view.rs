use dioxus::prelude::*;

use crate::state::{AppState, FindField, PaneRef, PaneSlot};
use crate::utils::text_offsets::byte_range_to_utf16;

pub mod dom;

/// Tooltip of the pane whose first line names the tab
const TITLE_PANE_HINT: &str = "The first characters of this pane become the tab title";

/// Shortcut handled on the pane itself so it knows which pane to bind
fn find_shortcut(evt: &KeyboardData) -> Option<FindField> {
    let modifiers = evt.modifiers();
    let command = if cfg!(target_os = "macos") {
        modifiers.meta()
    } else {
        modifiers.ctrl()
    };
    if !command || modifiers.alt() {
        return None;
    }
    match evt.key() {
        Key::Character(c) if c.eq_ignore_ascii_case("f") => Some(FindField::Search),
        Key::Character(c) if c.eq_ignore_ascii_case("h") => Some(FindField::Replace),
        _ => None,
    }
}

/// One plain-text pane with its character count and export button.
///
/// The textarea is uncontrolled: its DOM value is only written when the
/// notebook text diverges from what the user typed (replace, clear,
/// normalization), which keeps IME composition intact.
#[component]
pub fn PaneView(pane: PaneRef, text: String, char_count: usize) -> Element {
    let mut state = use_context::<AppState>();
    let element_id = pane.element_id();
    let initial_text = use_hook(|| text.clone());
    // What the textarea currently holds, as far as we know
    let mut dom_text = use_signal(|| text.clone());

    use_effect(use_reactive!(|text| {
        if *dom_text.peek() == text {
            return;
        }
        dom_text.set(text.clone());
        spawn(async move {
            dom::set_value(&pane.element_id(), &text).await;
        });
    }));

    // Select a search hit in this pane
    use_effect(move || {
        let Some(selection) = state.pending_selection.read().clone() else {
            return;
        };
        if selection.pane != pane {
            return;
        }
        state.pending_selection.set(None);
        let text = state
            .notebook
            .peek()
            .tab_by_id(pane.tab)
            .map(|tab| tab.text(pane.slot).to_string());
        let Some(text) = text else {
            return;
        };
        let range = byte_range_to_utf16(&text, selection.range);
        dom_text.set(text.clone());
        spawn(async move {
            let id = pane.element_id();
            dom::set_value(&id, &text).await;
            dom::select_range(&id, range).await;
        });
    });

    let handle_export = move |_| async move {
        let file = rfd::AsyncFileDialog::new()
            .set_title(format!("Save {} pane text as", pane.slot))
            .add_filter("Text Files", &["txt"])
            .add_filter("All Files", &["*"])
            .save_file()
            .await;
        match file {
            Some(file) => state.begin_export(pane, file.path().to_path_buf()),
            None => tracing::debug!(pane = %pane.element_id(), "Export cancelled"),
        }
    };

    let hint = match pane.slot {
        PaneSlot::Left => Some(TITLE_PANE_HINT),
        _ => None,
    };

    rsx! {
        div {
            class: "pane",

            textarea {
                id: "{element_id}",
                class: "pane-text",
                title: hint,
                spellcheck: "false",
                initial_value: "{initial_text}",
                oninput: move |evt| {
                    let value = evt.value();
                    dom_text.set(value.clone());
                    state.edit_pane(pane, &value);
                },
                onfocus: move |_| state.focused_pane.set(Some(pane)),
                onkeydown: move |evt| {
                    if let Some(field) = find_shortcut(&evt.data()) {
                        evt.prevent_default();
                        state.open_find(Some(pane), field);
                    }
                },
            }

            div {
                class: "pane-footer",
                span {
                    class: "pane-count",
                    "Characters: {char_count}"
                }
                button {
                    class: "pane-clear",
                    title: "Clear this pane",
                    onclick: move |_| state.clear_pane(pane),
                    "Clear"
                }
                button {
                    class: "pane-export",
                    title: "Save {pane.slot} pane text as...",
                    onclick: handle_export,
                    "Export..."
                }
            }
        }
    }
}
