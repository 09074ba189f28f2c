use dioxus::prelude::*;
use std::ops::Range;
use std::path::PathBuf;

use super::persistence::{Document, PersistenceError};
use crate::export::{export_in_background, ExportEncoding};
use crate::search::{FindOutcome, FindReplace, Scope};

mod tabs;

pub use tabs::{normalize_plain_text, Notebook, PaneRef, PaneSlot, Tab, TabId, UNTITLED};

/// Which field of the find/replace dialog receives focus when it opens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FindField {
    #[default]
    Search,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message shown in an in-window modal until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Export waiting for the user to pick an encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExport {
    pub pane: PaneRef,
    pub path: PathBuf,
}

/// Selection to apply to a pane's textarea (byte range into its text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneSelection {
    pub pane: PaneRef,
    pub range: Range<usize>,
}

/// Application state shared by every component of the window.
///
/// All fields are `Signal<T>`, so the struct is `Copy` and can be moved into
/// event handlers and async blocks freely. The notebook lives in a single
/// signal; every mutation goes through [`Notebook`] methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppState {
    pub notebook: Signal<Notebook>,
    pub always_on_top: Signal<bool>,
    /// Pane that most recently had keyboard focus
    pub focused_pane: Signal<Option<PaneRef>>,
    /// The find/replace dialog, when open
    pub find_replace: Signal<Option<FindReplace>>,
    pub find_field: Signal<FindField>,
    pub notice: Signal<Option<Notice>>,
    /// Tab awaiting close confirmation
    pub pending_close: Signal<Option<TabId>>,
    pub pending_export: Signal<Option<PendingExport>>,
    /// Selection the pane views apply on their next render
    pub pending_selection: Signal<Option<PaneSelection>>,
}

impl AppState {
    pub fn new(notebook: Notebook, always_on_top: bool) -> Self {
        Self {
            notebook: Signal::new(notebook),
            always_on_top: Signal::new(always_on_top),
            focused_pane: Signal::new(None),
            find_replace: Signal::new(None),
            find_field: Signal::new(FindField::default()),
            notice: Signal::new(None),
            pending_close: Signal::new(None),
            pending_export: Signal::new(None),
            pending_selection: Signal::new(None),
        }
    }

    /// Replace a pane's text with what the user typed
    pub fn edit_pane(&mut self, pane: PaneRef, text: &str) {
        self.notebook.write().set_text_by_id(pane.tab, pane.slot, text);
    }

    pub fn clear_pane(&mut self, pane: PaneRef) {
        self.edit_pane(pane, "");
    }

    pub fn clear_tab(&mut self, tab: TabId) {
        self.notebook.write().clear_all(tab);
    }

    /// Toggle the window's always-on-top flag
    pub fn toggle_always_on_top(&mut self) {
        let on_top = !*self.always_on_top.read();
        self.always_on_top.set(on_top);
        dioxus::desktop::window().set_always_on_top(on_top);
        tracing::debug!(on_top, "Toggled always on top");
    }

    /// Write the notebook to disk and clear the dirty flag
    pub fn save(&mut self) -> Result<PathBuf, PersistenceError> {
        let path = Document::save_notebook(&self.notebook.read())?;
        self.notebook.write().mark_saved();
        tracing::info!(path = %path.display(), "Saved tabs");
        Ok(path)
    }

    /// Save, reporting a failure in the window instead of returning it
    pub fn save_or_warn(&mut self) {
        if let Err(e) = self.save() {
            tracing::error!(%e, "Failed to save tabs");
            self.show_notice(Notice::warning("Save failed", e.to_string()));
        }
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice.set(Some(notice));
    }

    pub fn dismiss_notice(&mut self) {
        self.notice.set(None);
    }

    // === Find / replace ===

    /// Open the find/replace dialog bound to `pane`.
    ///
    /// Without a pane the dialog binds to the focused pane, falling back to
    /// the left pane of the active tab. An open dialog is rebound, keeping its
    /// query and options.
    pub fn open_find(&mut self, pane: Option<PaneRef>, field: FindField) {
        let pane = pane.or_else(|| *self.focused_pane.read()).unwrap_or_else(|| {
            PaneRef::new(self.notebook.read().active_tab().id(), PaneSlot::Left)
        });
        let notebook = self.notebook.read();
        let mut controller = FindReplace::new(pane, &notebook);
        if let Some(previous) = self.find_replace.read().as_ref() {
            controller.query = previous.query.clone();
            controller.replacement = previous.replacement.clone();
            controller.case_sensitive = previous.case_sensitive;
            if previous.scope() == Scope::Global {
                controller.set_scope(Scope::Global, &notebook);
            }
        }
        drop(notebook);
        tracing::debug!(pane = %pane.element_id(), ?field, "Opening find dialog");
        self.find_replace.set(Some(controller));
        self.find_field.set(field);
    }

    pub fn close_find(&mut self) {
        self.find_replace.set(None);
    }

    /// Update the dialog's query, replacement and case option
    pub fn update_find(&mut self, update: impl FnOnce(&mut FindReplace)) {
        if let Some(controller) = self.find_replace.write().as_mut() {
            update(controller);
        }
    }

    pub fn set_find_scope(&mut self, scope: Scope) {
        let notebook = self.notebook.read();
        if let Some(controller) = self.find_replace.write().as_mut() {
            controller.set_scope(scope, &notebook);
        }
    }

    /// The pane the dialog is currently bound to
    pub fn find_pane(&self) -> Option<PaneRef> {
        self.find_replace.read().as_ref().map(FindReplace::pane)
    }

    /// Find next. `cursor` is the byte offset of the bound pane's cursor.
    pub fn find_next(&mut self, cursor: Option<usize>) {
        let outcome = {
            let mut controller = self.find_replace.write();
            let Some(controller) = controller.as_mut() else {
                return;
            };
            controller.find_next(&mut self.notebook.write(), cursor)
        };
        self.report_find(outcome);
    }

    /// Replace the selected occurrence (or the next one) and move on.
    /// `selection` is the bound pane's selection as a byte range.
    pub fn replace_one(&mut self, selection: Option<Range<usize>>) {
        let outcome = {
            let mut controller = self.find_replace.write();
            let Some(controller) = controller.as_mut() else {
                return;
            };
            controller.replace_one(&mut self.notebook.write(), selection)
        };
        if outcome.replaced {
            tracing::debug!("Replaced one occurrence");
        }
        self.report_find(outcome.next);
    }

    pub fn replace_all(&mut self) {
        let (count, scope) = {
            let mut controller = self.find_replace.write();
            let Some(controller) = controller.as_mut() else {
                return;
            };
            let count = controller.replace_all(&mut self.notebook.write());
            (count, controller.scope())
        };
        let Some(count) = count else {
            return;
        };
        let message = match scope {
            Scope::Local => format!("Replaced {count} occurrence(s)"),
            Scope::Global => format!("Replaced {count} occurrence(s) in all tabs"),
        };
        self.show_notice(Notice::info("Replace", message));
    }

    fn report_find(&mut self, outcome: FindOutcome) {
        match outcome {
            FindOutcome::Skipped => {}
            FindOutcome::Found(hit) => {
                self.pending_selection.set(Some(PaneSelection {
                    pane: hit.pane,
                    range: hit.range,
                }));
            }
            FindOutcome::NotFound => {
                self.show_notice(Notice::info("Find", "Text not found"));
            }
            FindOutcome::NotFoundAnywhere { visited } => {
                tracing::debug!(visited, "Search wrapped around every pane");
                self.show_notice(Notice::info("Find", "Text not found in any tab"));
            }
        }
    }

    // === Export ===

    /// Remember the chosen destination and show the encoding picker
    pub fn begin_export(&mut self, pane: PaneRef, path: PathBuf) {
        self.pending_export.set(Some(PendingExport { pane, path }));
    }

    pub fn cancel_export(&mut self) {
        self.pending_export.set(None);
    }

    /// Write the pending export in `encoding` on a background thread
    pub fn finish_export(&mut self, encoding: ExportEncoding) {
        let Some(PendingExport { pane, path }) = self.pending_export.write().take() else {
            return;
        };
        let text = self
            .notebook
            .read()
            .tab_by_id(pane.tab)
            .map(|tab| tab.text(pane.slot).to_string());
        let Some(text) = text else {
            tracing::warn!("Pane to export was closed");
            return;
        };

        let mut state = *self;
        spawn(async move {
            if let Err(e) = export_in_background(path, text, encoding).await {
                tracing::warn!(%e, "Export failed");
                state.show_notice(Notice::warning("Export failed", e.to_string()));
            }
        });
    }
}
