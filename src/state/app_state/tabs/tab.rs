use super::pane::{PaneSlot, TextPane};
use std::fmt;
use uuid::Uuid;

/// Title shown for a tab whose left pane has no first line
pub const UNTITLED: &str = "New Tab";

/// Maximum number of characters taken from the left pane's first line
pub const TITLE_MAX_CHARS: usize = 10;

/// Stable identity of a tab, independent of its position in the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Non-owning reference to one pane of one tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneRef {
    pub tab: TabId,
    pub slot: PaneSlot,
}

impl PaneRef {
    pub fn new(tab: TabId, slot: PaneSlot) -> Self {
        Self { tab, slot }
    }

    /// DOM id of the textarea rendering this pane
    pub fn element_id(&self) -> String {
        format!("pane-{}-{}", self.tab, self.slot)
    }
}

/// Work done after a pane's text changed, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Recount,
    Retitle,
    MarkDirty,
}

const ON_TEXT_CHANGED: [Reaction; 3] = [Reaction::Recount, Reaction::Retitle, Reaction::MarkDirty];

/// A tab with three text panes
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    id: TabId,
    panes: [TextPane; 3],
    title: String,
}

impl Default for Tab {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl Tab {
    /// Create a tab whose title is derived from `left`
    pub fn new(left: &str, middle: &str, right: &str) -> Self {
        let panes = [TextPane::new(left), TextPane::new(middle), TextPane::new(right)];
        let title = derive_title(panes[0].text());
        Self {
            id: TabId::new(),
            panes,
            title,
        }
    }

    /// Create a tab with an explicit title (used when restoring saved tabs)
    pub fn with_title(left: &str, middle: &str, right: &str, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::new(left, middle, right)
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pane(&self, slot: PaneSlot) -> &TextPane {
        &self.panes[slot.index()]
    }

    pub fn text(&self, slot: PaneSlot) -> &str {
        self.pane(slot).text()
    }

    /// `true` when every pane is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.panes.iter().all(TextPane::is_blank)
    }

    /// Replace the text of one pane and run the change reactions.
    ///
    /// Returns the reactions that ran (empty when the text did not change).
    pub fn set_text(&mut self, slot: PaneSlot, text: &str) -> Vec<Reaction> {
        if !self.panes[slot.index()].replace_text(text) {
            return Vec::new();
        }
        self.react(slot)
    }

    /// Empty one pane through the normal change path
    pub fn clear(&mut self, slot: PaneSlot) -> Vec<Reaction> {
        self.set_text(slot, "")
    }

    /// Empty all three panes. Returns `true` if anything changed.
    pub fn clear_all(&mut self) -> bool {
        let mut changed = false;
        for slot in PaneSlot::ALL {
            changed |= !self.clear(slot).is_empty();
        }
        changed
    }

    fn react(&mut self, slot: PaneSlot) -> Vec<Reaction> {
        let mut ran = Vec::with_capacity(ON_TEXT_CHANGED.len());
        for reaction in ON_TEXT_CHANGED {
            match reaction {
                Reaction::Recount => self.panes[slot.index()].recount(),
                // Middle and right panes never affect the title
                Reaction::Retitle if slot != PaneSlot::Left => continue,
                Reaction::Retitle => self.title = derive_title(self.panes[0].text()),
                // Dirtiness is tracked by the notebook, which reads the returned list
                Reaction::MarkDirty => {}
            }
            ran.push(reaction);
        }
        ran
    }
}

/// First line of `text`, trimmed and cut to [`TITLE_MAX_CHARS`] characters.
pub fn derive_title(text: &str) -> String {
    let first_line = text.split('\n').next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return UNTITLED.to_string();
    }
    first_line.chars().take(TITLE_MAX_CHARS).collect()
}
