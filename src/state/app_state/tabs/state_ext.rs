//! AppState extension methods for tab management.
//!
//! These are thin wrappers over [`Notebook`]; the behavior itself is unit
//! tested in `notebook.rs`, since Signals need a Dioxus runtime.

use super::notebook::CloseRequest;
use super::tab::TabId;
use crate::state::AppState;
use dioxus::prelude::*;

impl AppState {
    /// Add an empty tab and switch to it
    pub fn add_empty_tab(&mut self) -> usize {
        self.notebook.write().add_empty_tab()
    }

    /// Switch to a specific tab by index
    pub fn switch_to_tab(&mut self, index: usize) {
        self.notebook.write().switch_to(index);
    }

    /// Ask to close the tab at `index`.
    ///
    /// Tabs with content are parked in `pending_close` until the user answers
    /// the confirmation dialog.
    pub fn request_close_tab(&mut self, index: usize) {
        let request = self.notebook.write().request_close(index);
        match request {
            CloseRequest::Closed => self.forget_closed_tabs(),
            CloseRequest::NeedsConfirmation(id) => self.pending_close.set(Some(id)),
            CloseRequest::Refused => tracing::debug!(index, "Refused to close tab"),
        }
    }

    /// Close the active tab (menu command)
    pub fn request_close_active_tab(&mut self) {
        let index = self.notebook.read().active_index();
        self.request_close_tab(index);
    }

    /// User answered "yes" in the close confirmation dialog
    pub fn confirm_close_tab(&mut self) {
        let Some(id) = self.pending_close.write().take() else {
            return;
        };
        if self.notebook.write().confirm_close(id) {
            self.forget_closed_tabs();
        }
    }

    pub fn cancel_close_tab(&mut self) {
        self.pending_close.set(None);
    }

    /// Move a tab within the tab bar; the active tab stays active
    pub fn move_tab(&mut self, from: usize, to: usize) {
        if self.notebook.write().move_tab(from, to) {
            tracing::debug!(from, to, "Moved tab");
        }
    }

    /// Title of the tab waiting for close confirmation
    pub fn pending_close_title(&self) -> Option<String> {
        let id: TabId = (*self.pending_close.read())?;
        let notebook = self.notebook.read();
        notebook.tab_by_id(id).map(|tab| tab.title().to_string())
    }

    /// Drop references to panes whose tab no longer exists
    fn forget_closed_tabs(&mut self) {
        let ids: Vec<TabId> = self.notebook.read().tabs().iter().map(|t| t.id()).collect();
        let exists = |id: TabId| ids.contains(&id);

        if self.focused_pane.read().is_some_and(|pane| !exists(pane.tab)) {
            self.focused_pane.set(None);
        }
        if self
            .pending_selection
            .read()
            .as_ref()
            .is_some_and(|selection| !exists(selection.pane.tab))
        {
            self.pending_selection.set(None);
        }
        if self
            .pending_export
            .read()
            .as_ref()
            .is_some_and(|export| !exists(export.pane.tab))
        {
            self.pending_export.set(None);
        }
    }
}
