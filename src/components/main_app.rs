use dioxus::desktop::trayicon::init_tray_icon;
use dioxus::desktop::{window, WindowCloseBehaviour};
use dioxus::prelude::*;

use crate::config::CONFIG;
use crate::menu;
use crate::window::{register_tray_icon, tray_icon_from_config};

// ============================================================================
// MainApp component
// ============================================================================

/// MainApp - root component launched from main.rs
///
/// Installs the tray icon when it is enabled. The window always hides on
/// close; `App` then quits through the save-or-ask path when there is no tray.
#[component]
pub fn MainApp() -> Element {
    use_hook(|| {
        tracing::debug!("Configuring main window with WindowHides behavior");
        window().set_close_behavior(WindowCloseBehaviour::WindowHides);

        let tray = CONFIG.read().tray.clone();
        if !tray.enabled {
            tracing::debug!("Tray icon disabled, closing the window quits");
            return;
        }

        let icon = tray_icon_from_config(&tray);
        let tray_icon = init_tray_icon(menu::build_tray_menu(), icon);
        if let Err(e) = tray_icon.set_tooltip(Some(crate::window::main::WINDOW_TITLE)) {
            tracing::warn!(%e, "Failed to set tray tooltip");
        }
        register_tray_icon(tray_icon);
    });

    rsx! {
        crate::components::app::App {}
    }
}
