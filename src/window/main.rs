use dioxus::desktop::tao::dpi::{LogicalPosition, LogicalSize};
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};

use crate::assets::{editor_style, MAIN_STYLE};
use crate::config::Config;
use crate::utils::screen::{centered_position, get_primary_display};

pub const WINDOW_TITLE: &str = "Tripad";

/// Create the main window config from the application config.
/// This config can be further customized with .with_menu(), etc.
pub fn create_main_window_config(config: &Config) -> DesktopConfig {
    let size = LogicalSize::new(config.window.width, config.window.height);

    let mut window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(size)
        .with_always_on_top(config.window.always_on_top);
    if let Some(position) = initial_position(size) {
        window = window.with_position(position);
    }

    DesktopConfig::new()
        .with_window(window)
        // Add styles in config. Otherwise the style takes time to load and
        // the window appears unstyled for a brief moment.
        .with_custom_head(indoc::formatdoc! {r#"
            <style>{MAIN_STYLE}</style>
            <style>{editor}</style>
        "#, editor = editor_style(&config.editor)})
}

/// Center the window on the primary display
fn initial_position(size: LogicalSize<u32>) -> Option<LogicalPosition<i32>> {
    let primary = get_primary_display()?;
    let position = centered_position(primary, size);
    tracing::debug!(display = ?primary, ?position, "Centering main window");
    Some(position)
}

/// Window title, marking unsaved changes
pub fn window_title(dirty: bool) -> String {
    if dirty {
        format!("{WINDOW_TITLE} *")
    } else {
        WINDOW_TITLE.to_string()
    }
}
