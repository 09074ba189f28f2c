//! Showing, hiding and quitting the application.
//!
//! Hiding to the tray never saves; quitting always saves first.

use dioxus::desktop::window;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use super::tray::{has_tray_icon, hide_tray_icon};
use crate::state::AppState;

/// Hide the window, leaving the tray icon as the way back
pub fn hide_main_window() {
    if !has_tray_icon() {
        tracing::debug!("No tray icon, minimizing instead of hiding");
        window().set_minimized(true);
        return;
    }
    tracing::debug!("Hiding main window to tray");
    window().set_visible(false);
}

/// What the window's close button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// The window hides; the tray icon brings it back
    Hide,
    /// Same path as the Quit menu item
    Quit,
}

pub fn close_action(tray_present: bool) -> CloseAction {
    if tray_present {
        CloseAction::Hide
    } else {
        CloseAction::Quit
    }
}

/// Called on every close request. The window itself is already hidden by the
/// close behavior, so quitting shows it again if the user cancels.
pub fn handle_close_requested(state: &mut AppState) {
    match close_action(has_tray_icon()) {
        CloseAction::Hide => tracing::debug!("Close requested, hidden to tray"),
        CloseAction::Quit => {
            tracing::debug!("Close requested without tray, quitting");
            quit(state);
        }
    }
}

pub fn show_main_window() {
    let window = window();
    window.set_visible(true);
    window.set_minimized(false);
    window.set_focus();
}

/// Save and exit.
///
/// When saving fails the user decides whether to quit anyway; otherwise the
/// window is brought back so nothing is lost silently.
pub fn quit(state: &mut AppState) {
    match state.save() {
        Ok(_) => exit(),
        Err(e) => {
            tracing::error!(%e, "Failed to save tabs on quit");
            let answer = MessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title("Save failed")
                .set_description(format!("{e}\n\nQuit anyway? Unsaved changes will be lost."))
                .set_buttons(MessageButtons::YesNo)
                .show();
            if answer == MessageDialogResult::Yes {
                tracing::warn!("Quitting without saving");
                exit();
            } else {
                show_main_window();
            }
        }
    }
}

fn exit() -> ! {
    hide_tray_icon();
    tracing::info!("Exiting");
    std::process::exit(0)
}
