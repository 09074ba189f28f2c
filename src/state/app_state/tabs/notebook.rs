use super::pane::PaneSlot;
use super::tab::{Reaction, Tab, TabId};

/// Result of asking the notebook to close a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    /// The tab was removed
    Closed,
    /// The tab has content; the caller must ask the user and then call
    /// [`Notebook::confirm_close`]
    NeedsConfirmation(TabId),
    /// Closing was refused (last remaining tab, or unknown index)
    Refused,
}

/// Ordered collection of tabs. Always holds at least one tab.
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    tabs: Vec<Tab>,
    active: usize,
    dirty: bool,
}

impl Default for Notebook {
    fn default() -> Self {
        Self::from_tabs(Vec::new())
    }
}

impl Notebook {
    /// Build a notebook from restored tabs; an empty list yields one blank tab
    pub fn from_tabs(mut tabs: Vec<Tab>) -> Self {
        if tabs.is_empty() {
            tabs.push(Tab::default());
        }
        Self {
            tabs,
            active: 0,
            dirty: false,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn tab(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id() == id)
    }

    pub fn tab_by_id(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id() == id)
    }

    pub fn text(&self, index: usize, slot: PaneSlot) -> Option<&str> {
        self.tabs.get(index).map(|tab| tab.text(slot))
    }

    /// Whether anything changed since the last [`Notebook::mark_saved`]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Append a tab and select it. Returns its index.
    ///
    /// With `title == None` the title is derived from `left`.
    pub fn add_tab(&mut self, left: &str, middle: &str, right: &str, title: Option<&str>) -> usize {
        let tab = match title {
            Some(title) => Tab::with_title(left, middle, right, title),
            None => Tab::new(left, middle, right),
        };
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        self.dirty = true;
        tracing::debug!(index = self.active, count = self.tabs.len(), "Added tab");
        self.active
    }

    pub fn add_empty_tab(&mut self) -> usize {
        self.add_tab("", "", "", None)
    }

    /// Switch to a specific tab by index
    pub fn switch_to(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active = index;
        }
    }

    /// Set the text of one pane of the tab at `index`
    pub fn set_text(&mut self, index: usize, slot: PaneSlot, text: &str) -> bool {
        let Some(tab) = self.tabs.get_mut(index) else {
            return false;
        };
        let ran = tab.set_text(slot, text);
        if ran.contains(&Reaction::MarkDirty) {
            self.dirty = true;
        }
        !ran.is_empty()
    }

    pub fn set_text_by_id(&mut self, id: TabId, slot: PaneSlot, text: &str) -> bool {
        match self.position(id) {
            Some(index) => self.set_text(index, slot, text),
            None => false,
        }
    }

    /// Empty all panes of one tab
    pub fn clear_all(&mut self, id: TabId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let changed = self.tabs[index].clear_all();
        self.dirty |= changed;
        changed
    }

    /// Ask to close the tab at `index`.
    ///
    /// Blank tabs close immediately. The last remaining tab is never closed.
    pub fn request_close(&mut self, index: usize) -> CloseRequest {
        if self.tabs.len() <= 1 {
            tracing::debug!("Refusing to close the last tab");
            return CloseRequest::Refused;
        }
        let Some(tab) = self.tabs.get(index) else {
            return CloseRequest::Refused;
        };
        if tab.is_blank() {
            self.remove(index);
            CloseRequest::Closed
        } else {
            CloseRequest::NeedsConfirmation(tab.id())
        }
    }

    /// Close a tab after the user confirmed. Returns `true` if it was removed.
    pub fn confirm_close(&mut self, id: TabId) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        match self.position(id) {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, index: usize) -> Tab {
        let tab = self.tabs.remove(index);

        self.active = match self.active.cmp(&index) {
            std::cmp::Ordering::Greater => self.active - 1,
            std::cmp::Ordering::Equal if self.active >= self.tabs.len() => {
                self.tabs.len().saturating_sub(1)
            }
            _ => self.active,
        };
        self.dirty = true;
        tracing::debug!(index, active = self.active, "Closed tab");
        tab
    }

    /// Move a tab from one index to another, keeping the active tab selected.
    ///
    /// `to` is the index the tab should have after the move.
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tabs.len() || to >= self.tabs.len() {
            return false;
        }
        if from == to {
            return true;
        }
        let active_id = self.tabs[self.active].id();
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        self.active = self.position(active_id).unwrap_or(0);
        self.dirty = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UNTITLED;

    fn notebook_with(texts: &[&str]) -> Notebook {
        Notebook::from_tabs(texts.iter().map(|t| Tab::new(t, "", "")).collect())
    }

    fn titles(notebook: &Notebook) -> Vec<String> {
        notebook.tabs().iter().map(|t| t.title().to_string()).collect()
    }

    // === Construction ===

    #[test]
    fn test_default_has_one_blank_tab() {
        let notebook = Notebook::default();
        assert_eq!(notebook.len(), 1);
        assert!(notebook.active_tab().is_blank());
        assert_eq!(notebook.active_tab().title(), UNTITLED);
        assert!(!notebook.is_dirty());
    }

    #[test]
    fn test_add_tab_selects_and_derives_title() {
        let mut notebook = Notebook::default();
        let index = notebook.add_tab("Shopping\nlist", "", "", None);
        assert_eq!(index, 1);
        assert_eq!(notebook.active_index(), 1);
        assert_eq!(notebook.active_tab().title(), "Shopping");
        assert!(notebook.is_dirty());
    }

    #[test]
    fn test_add_tab_with_explicit_title() {
        let mut notebook = Notebook::default();
        notebook.add_tab("Shopping", "", "", Some("Saved"));
        assert_eq!(notebook.active_tab().title(), "Saved");
    }

    // === Closing ===

    #[test]
    fn test_close_last_tab_refused_when_blank() {
        let mut notebook = Notebook::default();
        assert_eq!(notebook.request_close(0), CloseRequest::Refused);
        assert_eq!(notebook.len(), 1);
    }

    #[test]
    fn test_close_last_tab_refused_with_content() {
        let mut notebook = notebook_with(&["important"]);
        assert_eq!(notebook.request_close(0), CloseRequest::Refused);
        let id = notebook.active_tab().id();
        assert!(!notebook.confirm_close(id));
        assert_eq!(notebook.len(), 1);
    }

    #[test]
    fn test_close_blank_tab_without_confirmation() {
        let mut notebook = notebook_with(&["a", ""]);
        notebook.set_text(1, PaneSlot::Right, "  \n\t");
        assert_eq!(notebook.request_close(1), CloseRequest::Closed);
        assert_eq!(titles(&notebook), vec!["a"]);
    }

    #[test]
    fn test_close_non_blank_tab_needs_confirmation() {
        let mut notebook = notebook_with(&["a", "b"]);
        let id = notebook.tab(1).map(Tab::id);
        assert_eq!(notebook.request_close(1), CloseRequest::NeedsConfirmation(id.unwrap()));
        assert_eq!(notebook.len(), 2);

        assert!(notebook.confirm_close(id.unwrap()));
        assert_eq!(titles(&notebook), vec!["a"]);
    }

    #[test]
    fn test_close_content_only_in_right_pane_needs_confirmation() {
        let mut notebook = notebook_with(&["a", ""]);
        notebook.set_text(1, PaneSlot::Right, "x");
        assert!(matches!(
            notebook.request_close(1),
            CloseRequest::NeedsConfirmation(_)
        ));
    }

    #[test]
    fn test_close_out_of_range_refused() {
        let mut notebook = notebook_with(&["a", "b"]);
        assert_eq!(notebook.request_close(5), CloseRequest::Refused);
    }

    #[test]
    fn test_confirm_close_unknown_id() {
        let mut notebook = notebook_with(&["a", "b"]);
        assert!(!notebook.confirm_close(TabId::new()));
        assert_eq!(notebook.len(), 2);
    }

    #[test]
    fn test_close_before_active_shifts_selection() {
        let mut notebook = notebook_with(&["", "b", "c"]);
        notebook.switch_to(2);
        notebook.request_close(0);
        assert_eq!(notebook.active_index(), 1);
        assert_eq!(notebook.active_tab().title(), "c");
    }

    #[test]
    fn test_close_active_last_selects_new_last() {
        let mut notebook = notebook_with(&["a", "b", ""]);
        notebook.switch_to(2);
        notebook.request_close(2);
        assert_eq!(notebook.active_index(), 1);
    }

    // === Editing ===

    #[test]
    fn test_set_text_marks_dirty() {
        let mut notebook = Notebook::default();
        assert!(notebook.set_text(0, PaneSlot::Middle, "x"));
        assert!(notebook.is_dirty());
        notebook.mark_saved();
        assert!(!notebook.set_text(0, PaneSlot::Middle, "x"));
        assert!(!notebook.is_dirty());
    }

    #[test]
    fn test_set_text_by_id() {
        let mut notebook = notebook_with(&["a", "b"]);
        let id = notebook.tab(1).map(Tab::id).unwrap();
        assert!(notebook.set_text_by_id(id, PaneSlot::Left, "renamed"));
        assert_eq!(notebook.tab(1).unwrap().title(), "renamed");
        assert!(!notebook.set_text_by_id(TabId::new(), PaneSlot::Left, "x"));
    }

    #[test]
    fn test_clear_all_only_affects_one_tab() {
        let mut notebook = notebook_with(&["a", "b"]);
        let id = notebook.tab(0).map(Tab::id).unwrap();
        assert!(notebook.clear_all(id));
        assert!(notebook.tab(0).unwrap().is_blank());
        assert_eq!(notebook.tab(1).unwrap().title(), "b");
    }

    // === Reordering ===

    #[test]
    fn test_move_tab_forward() {
        let mut notebook = notebook_with(&["a", "b", "c"]);
        assert!(notebook.move_tab(0, 2));
        assert_eq!(titles(&notebook), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_tab_backward() {
        let mut notebook = notebook_with(&["a", "b", "c"]);
        assert!(notebook.move_tab(2, 0));
        assert_eq!(titles(&notebook), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_move_tab_keeps_active_tab() {
        let mut notebook = notebook_with(&["a", "b", "c"]);
        notebook.switch_to(1);
        notebook.move_tab(0, 2);
        assert_eq!(notebook.active_tab().title(), "b");
        assert_eq!(notebook.active_index(), 0);
    }

    #[test]
    fn test_move_tab_out_of_range() {
        let mut notebook = notebook_with(&["a", "b"]);
        assert!(!notebook.move_tab(0, 2));
        assert!(!notebook.move_tab(3, 0));
        assert!(notebook.move_tab(1, 1));
        assert_eq!(titles(&notebook), vec!["a", "b"]);
    }

    #[test]
    fn test_move_tab_preserves_content() {
        let mut notebook = notebook_with(&["a", "b"]);
        notebook.set_text(0, PaneSlot::Right, "right of a");
        let id = notebook.tab(0).map(Tab::id).unwrap();
        notebook.move_tab(0, 1);
        let moved = notebook.tab_by_id(id).unwrap();
        assert_eq!(moved.text(PaneSlot::Right), "right of a");
        assert_eq!(notebook.position(id), Some(1));
    }
}
