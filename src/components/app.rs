use dioxus::desktop::tao::event::{Event as TaoEvent, WindowEvent};
use dioxus::desktop::trayicon::TrayIconEvent;
use dioxus::desktop::{
    use_muda_event_handler, use_tray_icon_event_handler, use_tray_menu_event_handler,
    use_wry_event_handler, window,
};
use dioxus::prelude::*;

use super::dialogs::{ConfirmCloseDialog, ExportEncodingDialog, NoticeDialog};
use super::find_dialog::FindDialog;
use super::tab::TabBar;
use super::tab_view::TabView;
use crate::config::CONFIG;
use crate::menu;
use crate::state::{AppState, Document};
use crate::window::{handle_close_requested, show_main_window, window_title};

#[component]
pub fn App() -> Element {
    // Load the saved tabs once per window
    let mut state = use_context_provider(|| {
        let path = Document::path();
        let notebook = Document::load_notebook(&path);
        tracing::info!(path = %path.display(), tabs = notebook.len(), "Loaded tabs");
        AppState::new(notebook, CONFIG.read().window.always_on_top)
    });

    // Handle menu bar events
    use_muda_event_handler(move |event| {
        menu::handle_menu_event_with_state(event, &mut state);
    });

    // Handle tray context menu events
    use_tray_menu_event_handler(move |event| {
        menu::handle_tray_menu_event(&event.id().0, &mut state);
    });

    // Double-clicking the tray icon brings the window back
    use_tray_icon_event_handler(move |event| {
        if let TrayIconEvent::DoubleClick { .. } = event {
            show_main_window();
        }
    });

    // Update window title when the dirty flag changes
    use_effect(move || {
        let dirty = state.notebook.read().is_dirty();
        window().set_title(&window_title(dirty));
    });

    // Closing the window either hides it to the tray or quits like the menu
    use_wry_event_handler(move |event, _| {
        if let TaoEvent::WindowEvent {
            event: WindowEvent::CloseRequested,
            window_id,
            ..
        } = event
        {
            if window_id == &window().id() {
                handle_close_requested(&mut state);
            }
        }
    });

    let (tab_ids, active_tab_index) = {
        let notebook = state.notebook.read();
        let ids: Vec<_> = notebook.tabs().iter().map(|tab| tab.id()).collect();
        (ids, notebook.active_index())
    };
    let find_open = state.find_replace.read().is_some();
    let export_pending = state.pending_export.read().is_some();

    rsx! {
        div {
            class: "app",

            TabBar {}

            for (index, tab_id) in tab_ids.into_iter().enumerate() {
                TabView {
                    key: "{tab_id}",
                    tab_id,
                    is_active: index == active_tab_index,
                }
            }

            if find_open {
                FindDialog {}
            }

            ConfirmCloseDialog {}
            // Mounted per export so the picker starts from the default
            if export_pending {
                ExportEncodingDialog {}
            }
            NoticeDialog {}
        }
    }
}
