// State module - manages application state

mod app_state;
pub use app_state::{
    normalize_plain_text, AppState, FindField, Notebook, NoticeLevel, PaneRef, PaneSlot, Tab,
    TabId, UNTITLED,
};

mod persistence;
pub use persistence::Document;
