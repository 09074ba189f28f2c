use crate::state::PaneSlot;

/// Where the next global search resumes.
///
/// `offset` is the watermark: a byte offset into the pane at
/// `(tab, slot)` just after the previous hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSession {
    pub tab: usize,
    pub slot: PaneSlot,
    pub offset: usize,
}

impl SearchSession {
    pub fn new(tab: usize, slot: PaneSlot) -> Self {
        Self {
            tab,
            slot,
            offset: 0,
        }
    }

    /// Start of the left pane of `tab`
    pub fn start_of(tab: usize) -> Self {
        Self::new(tab, PaneSlot::Left)
    }

    /// Move to the beginning of the next pane in ring order
    pub fn advance(&mut self, tab_count: usize) {
        let (slot, wrapped) = self.slot.next();
        self.slot = slot;
        if wrapped {
            self.tab = (self.tab + 1) % tab_count.max(1);
        }
        self.offset = 0;
    }

    pub fn same_pane(&self, other: &SearchSession) -> bool {
        self.tab == other.tab && self.slot == other.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_within_tab() {
        let mut session = SearchSession {
            tab: 0,
            slot: PaneSlot::Left,
            offset: 12,
        };
        session.advance(2);
        assert_eq!(session, SearchSession::new(0, PaneSlot::Middle));
    }

    #[test]
    fn test_advance_wraps_to_next_tab() {
        let mut session = SearchSession::new(0, PaneSlot::Right);
        session.advance(2);
        assert_eq!(session, SearchSession::start_of(1));
    }

    #[test]
    fn test_advance_wraps_to_first_tab() {
        let mut session = SearchSession::new(1, PaneSlot::Right);
        session.advance(2);
        assert_eq!(session, SearchSession::start_of(0));
    }

    #[test]
    fn test_same_pane_ignores_offset() {
        let a = SearchSession {
            tab: 1,
            slot: PaneSlot::Middle,
            offset: 4,
        };
        assert!(a.same_pane(&SearchSession::new(1, PaneSlot::Middle)));
        assert!(!a.same_pane(&SearchSession::new(1, PaneSlot::Right)));
    }
}
