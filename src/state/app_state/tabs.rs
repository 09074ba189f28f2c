mod notebook;
mod pane;
mod state_ext;
mod tab;

pub use notebook::Notebook;
pub use pane::{normalize_plain_text, PaneSlot};
pub use tab::{PaneRef, Tab, TabId, UNTITLED};
