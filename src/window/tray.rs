use anyhow::Context as _;
use dioxus::desktop::trayicon::{Icon, TrayIcon};
use image::GenericImageView;
use std::cell::RefCell;
use std::path::Path;

use crate::config::TrayConfig;

thread_local! {
    static TRAY_ICON: RefCell<Option<TrayIcon>> = const { RefCell::new(None) };
}

/// Load a PNG/ICO file as a tray icon
pub fn load_tray_icon(path: &Path) -> anyhow::Result<Icon> {
    let image = image::open(path)
        .with_context(|| format!("failed to open tray icon {}", path.display()))?;
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_rgba8().into_raw(), width, height)
        .with_context(|| format!("invalid tray icon {}", path.display()))
}

/// The configured tray icon, or `None` for the built-in one
pub fn tray_icon_from_config(config: &TrayConfig) -> Option<Icon> {
    let path = config.icon_path.as_deref()?;
    match load_tray_icon(path) {
        Ok(icon) => Some(icon),
        Err(e) => {
            tracing::warn!("{e:#}; using the built-in tray icon");
            None
        }
    }
}

/// Keep a handle so the icon can be removed before exiting
pub fn register_tray_icon(tray: TrayIcon) {
    TRAY_ICON.with(|slot| *slot.borrow_mut() = Some(tray));
}

pub fn has_tray_icon() -> bool {
    TRAY_ICON.with(|slot| slot.borrow().is_some())
}

pub fn hide_tray_icon() {
    TRAY_ICON.with(|slot| {
        if let Some(tray) = slot.borrow().as_ref() {
            if let Err(e) = tray.set_visible(false) {
                tracing::warn!(%e, "Failed to hide tray icon");
            }
        }
    });
}
