use dioxus::desktop::trayicon::menu::{Menu as TrayMenu, MenuItem as TrayMenuItem};
use dioxus_desktop::muda::accelerator::{Accelerator, Code, Modifiers};
use dioxus_desktop::muda::{Menu, MenuEvent, MenuItem, PredefinedMenuItem, Submenu};

use crate::state::{AppState, FindField};
use crate::window;

/// Menu identifier enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuId {
    NewTab,
    CloseTab,
    Save,
    HideToTray,
    Quit,
    Find,
    Replace,
    AlwaysOnTop,
    TrayShow,
    TrayQuit,
}

impl MenuId {
    /// Convert menu ID string to enum variant
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "file.new_tab" => Some(Self::NewTab),
            "file.close_tab" => Some(Self::CloseTab),
            "file.save" => Some(Self::Save),
            "file.hide_to_tray" => Some(Self::HideToTray),
            "file.quit" => Some(Self::Quit),
            "edit.find" => Some(Self::Find),
            "edit.replace" => Some(Self::Replace),
            "view.always_on_top" => Some(Self::AlwaysOnTop),
            "tray.show" => Some(Self::TrayShow),
            "tray.quit" => Some(Self::TrayQuit),
            _ => None,
        }
    }

    /// Get the string ID for this menu item
    fn as_str(self) -> &'static str {
        match self {
            Self::NewTab => "file.new_tab",
            Self::CloseTab => "file.close_tab",
            Self::Save => "file.save",
            Self::HideToTray => "file.hide_to_tray",
            Self::Quit => "file.quit",
            Self::Find => "edit.find",
            Self::Replace => "edit.replace",
            Self::AlwaysOnTop => "view.always_on_top",
            Self::TrayShow => "tray.show",
            Self::TrayQuit => "tray.quit",
        }
    }

    fn is_tray(self) -> bool {
        matches!(self, Self::TrayShow | Self::TrayQuit)
    }
}

/// Helper to create a menu item with optional keyboard shortcut
fn create_menu_item(id: MenuId, label: &str, code: Option<Code>) -> MenuItem {
    let accelerator = code.map(get_cmd_or_ctrl);
    MenuItem::with_id(id.as_str(), label, true, accelerator)
}

/// Build the application menu bar
///
/// `tray_enabled` controls whether "Hide to Tray" is offered.
pub fn build_menu(tray_enabled: bool) -> Menu {
    let menu = Menu::new();
    if let Err(e) = populate_menu(&menu, tray_enabled) {
        tracing::error!(%e, "Failed to build menu bar");
    }
    menu
}

fn populate_menu(menu: &Menu, tray_enabled: bool) -> dioxus_desktop::muda::Result<()> {
    #[cfg(target_os = "macos")]
    add_app_menu(menu)?;
    add_file_menu(menu, tray_enabled)?;
    add_edit_menu(menu)?;
    add_view_menu(menu)?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn add_app_menu(menu: &Menu) -> dioxus_desktop::muda::Result<()> {
    let app_menu = Submenu::new("Tripad", true);
    app_menu.append_items(&[
        &PredefinedMenuItem::about(Some("About Tripad"), None),
        &PredefinedMenuItem::separator(),
        &create_menu_item(MenuId::Quit, "Quit Tripad", Some(Code::KeyQ)),
    ])?;
    menu.append(&app_menu)
}

fn add_file_menu(menu: &Menu, tray_enabled: bool) -> dioxus_desktop::muda::Result<()> {
    let file_menu = Submenu::new("File", true);

    file_menu.append_items(&[
        &create_menu_item(MenuId::NewTab, "New Tab", Some(Code::KeyT)),
        &create_menu_item(MenuId::CloseTab, "Close Tab", Some(Code::KeyW)),
        &PredefinedMenuItem::separator(),
        &create_menu_item(MenuId::Save, "Save", Some(Code::KeyS)),
        &PredefinedMenuItem::separator(),
    ])?;
    if tray_enabled {
        file_menu.append(&create_menu_item(MenuId::HideToTray, "Hide to Tray", None))?;
    }
    #[cfg(not(target_os = "macos"))]
    file_menu.append(&create_menu_item(MenuId::Quit, "Quit", None))?;

    menu.append(&file_menu)
}

fn add_edit_menu(menu: &Menu) -> dioxus_desktop::muda::Result<()> {
    let edit_menu = Submenu::new("Edit", true);

    edit_menu.append_items(&[
        &PredefinedMenuItem::undo(Some("Undo")),
        &PredefinedMenuItem::redo(Some("Redo")),
        &PredefinedMenuItem::separator(),
        &PredefinedMenuItem::cut(Some("Cut")),
        &PredefinedMenuItem::copy(Some("Copy")),
        &PredefinedMenuItem::paste(Some("Paste")),
        &PredefinedMenuItem::separator(),
        &PredefinedMenuItem::select_all(Some("Select All")),
        &PredefinedMenuItem::separator(),
        // Ctrl+F / Ctrl+H are bound on the panes so they reach the focused one
        &create_menu_item(MenuId::Find, "Find...", None),
        &create_menu_item(MenuId::Replace, "Replace...", None),
    ])?;

    menu.append(&edit_menu)
}

fn add_view_menu(menu: &Menu) -> dioxus_desktop::muda::Result<()> {
    let view_menu = Submenu::new("View", true);
    view_menu.append(&create_menu_item(MenuId::AlwaysOnTop, "Always on Top", None))?;
    menu.append(&view_menu)
}

/// Build the context menu of the tray icon
pub fn build_tray_menu() -> TrayMenu {
    let menu = TrayMenu::new();
    let items = [
        TrayMenuItem::with_id(MenuId::TrayShow.as_str(), "Show", true, None),
        TrayMenuItem::with_id(MenuId::TrayQuit.as_str(), "Quit", true, None),
    ];
    for item in &items {
        if let Err(e) = menu.append(item) {
            tracing::error!(%e, "Failed to build tray menu");
        }
    }
    menu
}

/// Get Cmd (macOS) or Ctrl modifier
fn get_cmd_or_ctrl(code: Code) -> Accelerator {
    let modifier = if cfg!(target_os = "macos") {
        Modifiers::SUPER
    } else {
        Modifiers::CONTROL
    };
    Accelerator::new(Some(modifier), code)
}

/// Handle a menu bar event
pub fn handle_menu_event_with_state(event: &MenuEvent, state: &mut AppState) -> bool {
    let menu_id = event.id().0.as_ref();
    tracing::debug!("Menu event: {}", menu_id);

    let id = match MenuId::from_str(menu_id) {
        Some(id) if !id.is_tray() => id,
        _ => return false,
    };

    match id {
        MenuId::NewTab => {
            state.add_empty_tab();
        }
        MenuId::CloseTab => {
            state.request_close_active_tab();
        }
        MenuId::Save => {
            state.save_or_warn();
        }
        MenuId::HideToTray => {
            window::hide_main_window();
        }
        MenuId::Quit => {
            window::quit(state);
        }
        MenuId::Find => {
            state.open_find(None, FindField::Search);
        }
        MenuId::Replace => {
            state.open_find(None, FindField::Replace);
        }
        MenuId::AlwaysOnTop => {
            state.toggle_always_on_top();
        }
        MenuId::TrayShow | MenuId::TrayQuit => return false,
    }

    true
}

/// Handle a tray menu event, given the clicked item's id
pub fn handle_tray_menu_event(menu_id: &str, state: &mut AppState) -> bool {
    tracing::debug!("Tray menu event: {}", menu_id);

    match MenuId::from_str(menu_id) {
        Some(MenuId::TrayShow) => {
            window::show_main_window();
            true
        }
        Some(MenuId::TrayQuit) => {
            window::quit(state);
            true
        }
        _ => false,
    }
}
