pub mod app;
pub mod dialogs;
pub mod find_dialog;
pub mod main_app;
pub mod pane_view;
pub mod tab;
pub mod tab_view;
