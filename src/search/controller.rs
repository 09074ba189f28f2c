use std::ops::Range;

use super::matcher::{find_forward, is_exact_match, replace_all_in};
use super::session::SearchSession;
use crate::state::{normalize_plain_text, Notebook, PaneRef, PaneSlot};

/// Whether a search covers the bound pane or every pane of every tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    Local,
    Global,
}

/// A located occurrence. `range` is a byte range into the pane's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub pane: PaneRef,
    pub tab_index: usize,
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    /// Empty query, nothing searched
    Skipped,
    Found(Hit),
    /// No match in the bound pane, even after wrapping
    NotFound,
    /// A full ring over all panes found nothing
    NotFoundAnywhere { visited: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub replaced: bool,
    pub next: FindOutcome,
}

/// Find/replace state bound to one originating pane.
///
/// Holds the query, options and the [`SearchSession`] watermark. Every
/// operation takes the notebook explicitly, so the controller never owns
/// tab data and survives tabs being closed underneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct FindReplace {
    pub query: String,
    pub replacement: String,
    pub case_sensitive: bool,
    scope: Scope,
    pane: PaneRef,
    session: SearchSession,
    last_hit: Option<Hit>,
}

impl FindReplace {
    pub fn new(pane: PaneRef, notebook: &Notebook) -> Self {
        let tab = notebook
            .position(pane.tab)
            .unwrap_or_else(|| notebook.active_index());
        Self {
            query: String::new(),
            replacement: String::new(),
            case_sensitive: false,
            scope: Scope::Local,
            pane,
            session: SearchSession::new(tab, pane.slot),
            last_hit: None,
        }
    }

    /// The pane the controller currently operates on
    pub fn pane(&self) -> PaneRef {
        self.pane
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn session(&self) -> SearchSession {
        self.session
    }

    pub fn last_hit(&self) -> Option<&Hit> {
        self.last_hit.as_ref()
    }

    /// Change scope. The watermark restarts at the current tab whenever the
    /// scope actually changes; the bound pane is kept.
    pub fn set_scope(&mut self, scope: Scope, notebook: &Notebook) {
        if self.scope != scope {
            self.scope = scope;
            self.session = SearchSession::start_of(notebook.active_index());
            self.last_hit = None;
        }
    }

    /// Back to (current tab, left pane, offset 0), rebinding the pane too
    pub fn reset(&mut self, notebook: &Notebook) {
        let tab = notebook.active_index();
        self.pane = PaneRef::new(notebook.active_tab().id(), PaneSlot::Left);
        self.session = SearchSession::start_of(tab);
        self.last_hit = None;
    }

    /// Re-derive state if the bound tab disappeared or moved
    fn rebind(&mut self, notebook: &Notebook) {
        match notebook.position(self.pane.tab) {
            Some(index) => {
                if self.session.tab >= notebook.len() {
                    self.session = SearchSession::new(index, self.pane.slot);
                }
                if self.scope == Scope::Local {
                    self.session.tab = index;
                    self.session.slot = self.pane.slot;
                }
            }
            None => {
                tracing::debug!("Bound pane was closed, rebinding to the current tab");
                self.reset(notebook);
            }
        }
    }

    /// Search forward.
    ///
    /// `cursor` is the live cursor position (byte offset) in the bound pane,
    /// used by local scope. Global scope always resumes from the watermark.
    pub fn find_next(&mut self, notebook: &mut Notebook, cursor: Option<usize>) -> FindOutcome {
        if self.query.is_empty() {
            return FindOutcome::Skipped;
        }
        self.rebind(notebook);
        match self.scope {
            Scope::Local => self.find_local(notebook, cursor),
            Scope::Global => self.find_global(notebook),
        }
    }

    fn find_local(&mut self, notebook: &mut Notebook, cursor: Option<usize>) -> FindOutcome {
        let index = self.session.tab;
        let slot = self.pane.slot;
        let Some(text) = notebook.text(index, slot) else {
            return FindOutcome::NotFound;
        };
        let from = cursor.unwrap_or(self.session.offset);
        let found = find_forward(text, &self.query, from, self.case_sensitive)
            .or_else(|| find_forward(text, &self.query, 0, self.case_sensitive));

        match found {
            Some(range) => {
                self.session.offset = range.end;
                self.record_hit(notebook, index, slot, range)
            }
            None => {
                self.last_hit = None;
                FindOutcome::NotFound
            }
        }
    }

    fn find_global(&mut self, notebook: &mut Notebook) -> FindOutcome {
        let start = self.session;
        let mut visited = 0;
        loop {
            visited += 1;
            let found = notebook
                .text(self.session.tab, self.session.slot)
                .and_then(|text| {
                    find_forward(text, &self.query, self.session.offset, self.case_sensitive)
                });
            if let Some(range) = found {
                self.session.offset = range.end;
                let (index, slot) = (self.session.tab, self.session.slot);
                return self.record_hit(notebook, index, slot, range);
            }

            self.session.advance(notebook.len());
            if self.session.same_pane(&start) {
                tracing::debug!(visited, query = %self.query, "Global search found nothing");
                self.reset(notebook);
                return FindOutcome::NotFoundAnywhere { visited };
            }
        }
    }

    fn record_hit(
        &mut self,
        notebook: &mut Notebook,
        index: usize,
        slot: PaneSlot,
        range: Range<usize>,
    ) -> FindOutcome {
        notebook.switch_to(index);
        let id = notebook.active_tab().id();
        self.pane = PaneRef::new(id, slot);
        let hit = Hit {
            pane: self.pane,
            tab_index: index,
            range,
        };
        self.last_hit = Some(hit.clone());
        FindOutcome::Found(hit)
    }

    /// Replace the current occurrence, then move on to the next one.
    ///
    /// `selection` is the live selection (byte range) in the bound pane. When
    /// it still covers the last hit, that hit is replaced; otherwise a search
    /// runs first and the occurrence it finds is replaced.
    pub fn replace_one(
        &mut self,
        notebook: &mut Notebook,
        selection: Option<Range<usize>>,
    ) -> ReplaceOutcome {
        if self.query.is_empty() {
            return ReplaceOutcome {
                replaced: false,
                next: FindOutcome::Skipped,
            };
        }
        self.rebind(notebook);

        let target = match self.current_selection_hit(notebook, selection.clone()) {
            Some(hit) => hit,
            None => match self.find_next(notebook, selection.map(|s| s.start)) {
                FindOutcome::Found(hit) => hit,
                other => {
                    return ReplaceOutcome {
                        replaced: false,
                        next: other,
                    }
                }
            },
        };

        let replacement = normalize_plain_text(&self.replacement);
        let Some(mut text) = notebook
            .text(target.tab_index, target.pane.slot)
            .map(str::to_string)
        else {
            return ReplaceOutcome {
                replaced: false,
                next: FindOutcome::NotFound,
            };
        };
        text.replace_range(target.range.clone(), &replacement);
        notebook.set_text(target.tab_index, target.pane.slot, &text);

        let after = target.range.start + replacement.len();
        self.pane = target.pane;
        self.session = SearchSession {
            tab: target.tab_index,
            slot: target.pane.slot,
            offset: after,
        };
        self.last_hit = None;

        let next = self.find_next(notebook, Some(after));
        ReplaceOutcome {
            replaced: true,
            next,
        }
    }

    /// The last hit, if it is still selected and still matches the query
    fn current_selection_hit(
        &self,
        notebook: &Notebook,
        selection: Option<Range<usize>>,
    ) -> Option<Hit> {
        let hit = self.last_hit.as_ref()?;
        if hit.pane != self.pane {
            return None;
        }
        if selection.is_some_and(|s| s != hit.range) {
            return None;
        }
        let index = notebook.position(hit.pane.tab)?;
        let text = notebook.text(index, hit.pane.slot)?;
        let candidate = text.get(hit.range.clone())?;
        is_exact_match(candidate, &self.query, self.case_sensitive).then(|| Hit {
            tab_index: index,
            ..hit.clone()
        })
    }

    /// Replace every occurrence in scope. Returns `None` for an empty query.
    pub fn replace_all(&mut self, notebook: &mut Notebook) -> Option<usize> {
        if self.query.is_empty() {
            return None;
        }
        self.rebind(notebook);
        let replacement = normalize_plain_text(&self.replacement);

        let targets: Vec<(usize, PaneSlot)> = match self.scope {
            Scope::Local => vec![(self.session.tab, self.pane.slot)],
            Scope::Global => (0..notebook.len())
                .flat_map(|tab| PaneSlot::ALL.into_iter().map(move |slot| (tab, slot)))
                .collect(),
        };

        let mut total = 0;
        for (tab, slot) in targets {
            let Some(text) = notebook.text(tab, slot) else {
                continue;
            };
            let (replaced, count) =
                replace_all_in(text, &self.query, &replacement, self.case_sensitive);
            if count > 0 {
                notebook.set_text(tab, slot, &replaced);
                total += count;
            }
        }

        tracing::debug!(total, scope = ?self.scope, "Replaced all occurrences");
        match self.scope {
            Scope::Global => self.reset(notebook),
            Scope::Local => {
                self.session.offset = 0;
                self.last_hit = None;
            }
        }
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Tab;

    fn notebook(tabs: &[[&str; 3]]) -> Notebook {
        Notebook::from_tabs(
            tabs.iter()
                .map(|[l, m, r]| Tab::new(l, m, r))
                .collect(),
        )
    }

    fn controller(notebook: &Notebook, tab: usize, slot: PaneSlot, query: &str) -> FindReplace {
        let id = notebook.tab(tab).map(Tab::id).unwrap();
        let mut fr = FindReplace::new(PaneRef::new(id, slot), notebook);
        fr.query = query.to_string();
        fr
    }

    fn found(outcome: FindOutcome) -> (usize, PaneSlot, Range<usize>) {
        match outcome {
            FindOutcome::Found(hit) => (hit.tab_index, hit.pane.slot, hit.range),
            other => panic!("expected a hit, got {other:?}"),
        }
    }

    // === Local find ===

    #[test]
    fn test_local_find_from_cursor() {
        let mut nb = notebook(&[["foo bar foo", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "foo");
        assert_eq!(found(fr.find_next(&mut nb, Some(1))), (0, PaneSlot::Left, 8..11));
    }

    #[test]
    fn test_local_find_wraps_once() {
        let mut nb = notebook(&[["foo bar", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "foo");
        assert_eq!(found(fr.find_next(&mut nb, Some(5))), (0, PaneSlot::Left, 0..3));
    }

    #[test]
    fn test_local_find_advances_with_watermark() {
        let mut nb = notebook(&[["", "x x x", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Middle, "x");
        assert_eq!(found(fr.find_next(&mut nb, None)).2, 0..1);
        assert_eq!(found(fr.find_next(&mut nb, None)).2, 2..3);
        assert_eq!(found(fr.find_next(&mut nb, None)).2, 4..5);
        assert_eq!(found(fr.find_next(&mut nb, None)).2, 0..1);
    }

    #[test]
    fn test_local_find_not_found() {
        let mut nb = notebook(&[["abc", "needle", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "needle");
        assert_eq!(fr.find_next(&mut nb, None), FindOutcome::NotFound);
        // Controller remains usable
        fr.query = "b".to_string();
        assert_eq!(found(fr.find_next(&mut nb, None)).2, 1..2);
    }

    #[test]
    fn test_local_find_case_toggle() {
        let mut nb = notebook(&[["Alpha", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "alpha");
        fr.case_sensitive = true;
        assert_eq!(fr.find_next(&mut nb, None), FindOutcome::NotFound);
        fr.case_sensitive = false;
        assert_eq!(found(fr.find_next(&mut nb, None)).2, 0..5);
    }

    #[test]
    fn test_empty_query_is_noop() {
        let mut nb = notebook(&[["abc", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "");
        assert_eq!(fr.find_next(&mut nb, None), FindOutcome::Skipped);
        assert_eq!(fr.replace_one(&mut nb, None).next, FindOutcome::Skipped);
        assert_eq!(fr.replace_all(&mut nb), None);
        assert_eq!(nb.text(0, PaneSlot::Left), Some("abc"));
    }

    // === Global find ===

    #[test]
    fn test_global_find_crosses_panes_and_tabs() {
        let mut nb = notebook(&[["needle", "", "needle"], ["", "needle", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "needle");
        fr.set_scope(Scope::Global, &nb);

        assert_eq!(found(fr.find_next(&mut nb, None)), (0, PaneSlot::Left, 0..6));
        assert_eq!(found(fr.find_next(&mut nb, None)), (0, PaneSlot::Right, 0..6));
        assert_eq!(found(fr.find_next(&mut nb, None)), (1, PaneSlot::Middle, 0..6));
        assert_eq!(nb.active_index(), 1);
        assert_eq!(fr.pane().tab, nb.tab(1).unwrap().id());
        assert_eq!(fr.pane().slot, PaneSlot::Middle);
    }

    #[test]
    fn test_global_find_multiple_hits_in_one_pane() {
        let mut nb = notebook(&[["a a", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "a");
        fr.set_scope(Scope::Global, &nb);
        assert_eq!(found(fr.find_next(&mut nb, None)).2, 0..1);
        assert_eq!(found(fr.find_next(&mut nb, None)).2, 2..3);
        assert_eq!(fr.session().offset, 3);
    }

    #[test]
    fn test_global_find_absent_visits_every_pane_once() {
        let mut nb = notebook(&[["a", "b", "c"], ["d", "e", "f"], ["g", "h", "i"]]);
        nb.switch_to(0);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "zzz");
        fr.set_scope(Scope::Global, &nb);

        assert_eq!(
            fr.find_next(&mut nb, None),
            FindOutcome::NotFoundAnywhere { visited: 9 }
        );
        assert_eq!(fr.session(), SearchSession::start_of(0));
        assert_eq!(fr.pane(), PaneRef::new(nb.tab(0).unwrap().id(), PaneSlot::Left));
    }

    #[test]
    fn test_global_not_found_resets_to_current_tab() {
        let mut nb = notebook(&[["a", "", ""], ["b", "", ""]]);
        nb.switch_to(1);
        let mut fr = controller(&nb, 1, PaneSlot::Right, "zzz");
        fr.set_scope(Scope::Global, &nb);
        fr.find_next(&mut nb, None);
        assert_eq!(fr.session(), SearchSession::start_of(1));
        assert_eq!(fr.pane().slot, PaneSlot::Left);
    }

    #[test]
    fn test_global_find_wraps_around_tabs() {
        let mut nb = notebook(&[["hit", "", ""], ["", "", ""]]);
        nb.switch_to(1);
        let mut fr = controller(&nb, 1, PaneSlot::Middle, "hit");
        fr.set_scope(Scope::Global, &nb);
        assert_eq!(found(fr.find_next(&mut nb, None)), (0, PaneSlot::Left, 0..3));
        assert_eq!(nb.active_index(), 0);
    }

    #[test]
    fn test_scope_change_resets_session() {
        let mut nb = notebook(&[["x", "", ""], ["x", "", ""]]);
        nb.switch_to(1);
        let mut fr = controller(&nb, 1, PaneSlot::Right, "x");
        fr.set_scope(Scope::Global, &nb);
        assert_eq!(fr.session(), SearchSession::start_of(1));
        fr.find_next(&mut nb, None);
        fr.set_scope(Scope::Global, &nb);
        assert_eq!(fr.session().offset, 1);
        fr.set_scope(Scope::Local, &nb);
        assert_eq!(fr.session(), SearchSession::start_of(1));
    }

    #[test]
    fn test_scope_toggle_keeps_bound_pane() {
        let mut nb = notebook(&[["", "", "a target"]]);
        let mut fr = controller(&nb, 0, PaneSlot::Right, "target");
        fr.set_scope(Scope::Global, &nb);
        fr.set_scope(Scope::Local, &nb);

        assert_eq!(fr.pane().slot, PaneSlot::Right);
        assert_eq!(found(fr.find_next(&mut nb, None)), (0, PaneSlot::Right, 2..8));
    }

    #[test]
    fn test_closed_bound_tab_rebinds_to_current() {
        let mut nb = notebook(&[["keep", "", ""], ["gone", "", ""]]);
        let mut fr = controller(&nb, 1, PaneSlot::Middle, "keep");
        let gone = nb.tab(1).unwrap().id();
        assert!(nb.confirm_close(gone));

        assert_eq!(found(fr.find_next(&mut nb, None)), (0, PaneSlot::Left, 0..4));
    }

    #[test]
    fn test_reordered_tabs_follow_bound_pane() {
        let mut nb = notebook(&[["one", "", ""], ["two", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "one");
        nb.move_tab(0, 1);
        assert_eq!(found(fr.find_next(&mut nb, None)), (1, PaneSlot::Left, 0..3));
    }

    // === Replace one ===

    #[test]
    fn test_replace_one_without_selection_finds_then_replaces() {
        let mut nb = notebook(&[["cat cat", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "cat");
        fr.replacement = "dog".to_string();

        let outcome = fr.replace_one(&mut nb, None);
        assert!(outcome.replaced);
        assert_eq!(nb.text(0, PaneSlot::Left), Some("dog cat"));
        assert_eq!(found(outcome.next).2, 4..7);
    }

    #[test]
    fn test_replace_one_uses_selected_hit() {
        let mut nb = notebook(&[["cat cat", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "cat");
        fr.replacement = "dog".to_string();
        let hit = found(fr.find_next(&mut nb, Some(1))).2;
        assert_eq!(hit, 4..7);

        let outcome = fr.replace_one(&mut nb, Some(hit));
        assert!(outcome.replaced);
        assert_eq!(nb.text(0, PaneSlot::Left), Some("cat dog"));
        // Wraps to the remaining occurrence
        assert_eq!(found(outcome.next).2, 0..3);
    }

    #[test]
    fn test_replace_one_stale_selection_searches_again() {
        let mut nb = notebook(&[["cat cat", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "cat");
        fr.replacement = "dog".to_string();
        fr.find_next(&mut nb, None);
        // User edited the hit away
        nb.set_text(0, PaneSlot::Left, "cow cat");

        let outcome = fr.replace_one(&mut nb, Some(0..3));
        assert!(outcome.replaced);
        assert_eq!(nb.text(0, PaneSlot::Left), Some("cow dog"));
    }

    #[test]
    fn test_replace_one_not_found() {
        let mut nb = notebook(&[["abc", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "x");
        let outcome = fr.replace_one(&mut nb, None);
        assert!(!outcome.replaced);
        assert_eq!(outcome.next, FindOutcome::NotFound);
        assert_eq!(nb.text(0, PaneSlot::Left), Some("abc"));
    }

    #[test]
    fn test_replace_one_containing_query_does_not_rematch() {
        let mut nb = notebook(&[["a b", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "a");
        fr.replacement = "aa".to_string();
        let outcome = fr.replace_one(&mut nb, None);
        assert_eq!(nb.text(0, PaneSlot::Left), Some("aa b"));
        // Next search starts after the inserted "aa" and wraps to it
        assert_eq!(found(outcome.next).2, 0..1);
    }

    #[test]
    fn test_replace_one_global_moves_across_tabs() {
        let mut nb = notebook(&[["x", "", ""], ["", "", "x"]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "x");
        fr.set_scope(Scope::Global, &nb);
        fr.replacement = "y".to_string();

        let outcome = fr.replace_one(&mut nb, None);
        assert!(outcome.replaced);
        assert_eq!(nb.text(0, PaneSlot::Left), Some("y"));
        assert_eq!(found(outcome.next), (1, PaneSlot::Right, 0..1));

        let outcome = fr.replace_one(&mut nb, Some(0..1));
        assert!(outcome.replaced);
        assert_eq!(nb.text(1, PaneSlot::Right), Some("y"));
        assert!(matches!(outcome.next, FindOutcome::NotFoundAnywhere { .. }));
    }

    #[test]
    fn test_replace_one_retitles_left_pane() {
        let mut nb = notebook(&[["Draft notes", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "Draft");
        fr.replacement = "Final".to_string();
        fr.replace_one(&mut nb, None);
        assert_eq!(nb.active_tab().title(), "Final note");
    }

    // === Replace all ===

    #[test]
    fn test_replace_all_local_growing_replacement() {
        let mut nb = notebook(&[["aaa", "aaa", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "a");
        fr.replacement = "aa".to_string();
        assert_eq!(fr.replace_all(&mut nb), Some(3));
        assert_eq!(nb.text(0, PaneSlot::Left), Some("aaaaaa"));
        // Other panes untouched in local scope
        assert_eq!(nb.text(0, PaneSlot::Middle), Some("aaa"));
    }

    #[test]
    fn test_replace_all_global() {
        let mut nb = notebook(&[["Tea", "tea", ""], ["", "", "TEA time"]]);
        nb.switch_to(1);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "tea");
        fr.set_scope(Scope::Global, &nb);
        fr.replacement = "coffee".to_string();

        assert_eq!(fr.replace_all(&mut nb), Some(3));
        assert_eq!(nb.text(0, PaneSlot::Left), Some("coffee"));
        assert_eq!(nb.text(0, PaneSlot::Middle), Some("coffee"));
        assert_eq!(nb.text(1, PaneSlot::Right), Some("coffee time"));
        assert_eq!(fr.session(), SearchSession::start_of(nb.active_index()));
    }

    #[test]
    fn test_replace_all_zero_matches() {
        let mut nb = notebook(&[["abc", "", ""]]);
        let mut fr = controller(&nb, 0, PaneSlot::Left, "x");
        assert_eq!(fr.replace_all(&mut nb), Some(0));
        assert!(!nb.is_dirty());
    }
}
