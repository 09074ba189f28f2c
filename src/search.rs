// Search module - find/replace across panes and tabs

mod controller;
mod matcher;
mod session;

pub use controller::{FindOutcome, FindReplace, Scope};
