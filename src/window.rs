pub mod lifecycle;
pub mod main;
pub mod tray;

pub use lifecycle::{handle_close_requested, hide_main_window, quit, show_main_window};
pub use main::{create_main_window_config, window_title};
pub use tray::{register_tray_icon, tray_icon_from_config};
