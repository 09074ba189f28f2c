//! In-window modal dialogs: notices, close confirmation and the export
//! encoding picker.

use dioxus::prelude::*;

use crate::export::ExportEncoding;
use crate::state::{AppState, NoticeLevel};

/// Focus the default button when a dialog opens
async fn focus_default(evt: Event<MountedData>) {
    if let Err(e) = evt.data().set_focus(true).await {
        tracing::debug!(?e, "Failed to focus dialog button");
    }
}

#[component]
pub fn NoticeDialog() -> Element {
    let mut state = use_context::<AppState>();
    let Some(notice) = state.notice.read().clone() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onkeydown: move |evt| {
                if evt.key() == Key::Escape {
                    state.dismiss_notice();
                }
            },
            div {
                class: "modal",
                class: if notice.level == NoticeLevel::Warning { "warning" },
                role: "alertdialog",
                h2 { class: "modal-title", "{notice.title}" }
                p { class: "modal-message", "{notice.message}" }
                div {
                    class: "modal-actions",
                    button {
                        onmounted: focus_default,
                        onclick: move |_| state.dismiss_notice(),
                        "OK"
                    }
                }
            }
        }
    }
}

/// Asks before closing a tab that still has text
#[component]
pub fn ConfirmCloseDialog() -> Element {
    let mut state = use_context::<AppState>();
    let Some(title) = state.pending_close_title() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onkeydown: move |evt| {
                if evt.key() == Key::Escape {
                    state.cancel_close_tab();
                }
            },
            div {
                class: "modal",
                role: "alertdialog",
                h2 { class: "modal-title", "Close Tab" }
                p {
                    class: "modal-message",
                    "Close \"{title}\"? Unsaved changes will be lost."
                }
                div {
                    class: "modal-actions",
                    button {
                        onclick: move |_| state.confirm_close_tab(),
                        "Yes"
                    }
                    button {
                        onmounted: focus_default,
                        onclick: move |_| state.cancel_close_tab(),
                        "No"
                    }
                }
            }
        }
    }
}

/// Picks the encoding of a pending export; UTF-8 is preselected
#[component]
pub fn ExportEncodingDialog() -> Element {
    let mut state = use_context::<AppState>();
    let mut encoding = use_signal(ExportEncoding::default);
    let Some(file_name) = state.pending_export.read().as_ref().map(|export| {
        export
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| export.path.display().to_string())
    }) else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onkeydown: move |evt| {
                if evt.key() == Key::Escape {
                    state.cancel_export();
                }
            },
            div {
                class: "modal",
                role: "dialog",
                h2 { class: "modal-title", "Choose Encoding" }
                p { class: "modal-message", "Encoding for \"{file_name}\":" }
                select {
                    onmounted: focus_default,
                    onchange: move |evt| {
                        match ExportEncoding::from_label(&evt.value()) {
                            Some(chosen) => encoding.set(chosen),
                            None => tracing::warn!(value = %evt.value(), "Unknown encoding"),
                        }
                    },
                    for choice in ExportEncoding::ALL {
                        option {
                            value: choice.label(),
                            selected: choice == *encoding.read(),
                            "{choice}"
                        }
                    }
                }
                div {
                    class: "modal-actions",
                    button {
                        onclick: move |_| state.finish_export(*encoding.read()),
                        "OK"
                    }
                    button {
                        onclick: move |_| state.cancel_export(),
                        "Cancel"
                    }
                }
            }
        }
    }
}
