use std::fmt;

/// Position of a pane inside its tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaneSlot {
    Left,
    Middle,
    Right,
}

impl PaneSlot {
    pub const ALL: [PaneSlot; 3] = [PaneSlot::Left, PaneSlot::Middle, PaneSlot::Right];

    pub fn index(self) -> usize {
        match self {
            PaneSlot::Left => 0,
            PaneSlot::Middle => 1,
            PaneSlot::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next slot in ring order, and whether the ring wrapped to the next tab
    pub fn next(self) -> (Self, bool) {
        match self {
            PaneSlot::Left => (PaneSlot::Middle, false),
            PaneSlot::Middle => (PaneSlot::Right, false),
            PaneSlot::Right => (PaneSlot::Left, true),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaneSlot::Left => "left",
            PaneSlot::Middle => "middle",
            PaneSlot::Right => "right",
        }
    }
}

impl fmt::Display for PaneSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single plain-text editing surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPane {
    text: String,
    char_count: usize,
}

impl TextPane {
    pub fn new(text: impl AsRef<str>) -> Self {
        let mut pane = Self::default();
        pane.replace_text(text.as_ref());
        pane.recount();
        pane
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cached count of visible characters (see [`count_chars`])
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Replace the buffer with normalized plain text.
    ///
    /// Returns `false` when the normalized text equals the current buffer.
    /// Derived values are NOT refreshed here; the owning tab runs its
    /// reactions after a change.
    pub(super) fn replace_text(&mut self, text: &str) -> bool {
        let normalized = normalize_plain_text(text);
        if normalized == self.text {
            return false;
        }
        self.text = normalized;
        true
    }

    pub(super) fn recount(&mut self) {
        self.char_count = count_chars(&self.text);
    }
}

/// Count every code point except newline, space and tab.
pub fn count_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| !matches!(c, '\n' | ' ' | '\t'))
        .count()
}

/// Strip anything that is not plain text.
///
/// Line breaks of every flavor become `\n`; remaining control characters
/// other than tab are dropped.
pub fn normalize_plain_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\u{2028}' | '\u{2029}' => out.push('\n'),
            '\n' | '\t' => out.push(c),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // === count_chars ===

    #[test]
    fn test_count_chars_excludes_whitespace() {
        assert_eq!(count_chars("ab cd\tef\ngh"), 8);
    }

    #[test]
    fn test_count_chars_empty() {
        assert_eq!(count_chars(""), 0);
        assert_eq!(count_chars(" \n\t"), 0);
    }

    #[test]
    fn test_count_chars_counts_code_points() {
        assert_eq!(count_chars("日本語 テキスト"), 7);
        assert_eq!(count_chars("📝x"), 2);
    }

    #[test]
    fn test_count_chars_keeps_other_whitespace() {
        // Only the three listed characters are excluded
        assert_eq!(count_chars("a\u{3000}b"), 3);
    }

    // === normalize_plain_text ===

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_plain_text("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_normalize_paragraph_separators() {
        assert_eq!(normalize_plain_text("a\u{2029}b\u{2028}c"), "a\nb\nc");
    }

    #[test]
    fn test_normalize_drops_control_chars() {
        assert_eq!(normalize_plain_text("a\u{0}b\u{7}c\td"), "abc\td");
    }

    #[test]
    fn test_normalize_keeps_unicode() {
        let text = "這是一個很長的句子\n📝";
        assert_eq!(normalize_plain_text(text), text);
    }

    // === TextPane ===

    #[test]
    fn test_pane_new_counts() {
        let pane = TextPane::new("hello world");
        assert_eq!(pane.text(), "hello world");
        assert_eq!(pane.char_count(), 10);
    }

    #[test]
    fn test_pane_replace_text_reports_change() {
        let mut pane = TextPane::new("abc");
        assert!(!pane.replace_text("abc"));
        assert!(!pane.replace_text("abc\u{0}"));
        assert!(pane.replace_text("abcd"));
        assert_eq!(pane.text(), "abcd");
    }

    #[test]
    fn test_pane_is_blank() {
        assert!(TextPane::default().is_blank());
        assert!(TextPane::new("  \n\t ").is_blank());
        assert!(!TextPane::new(" x ").is_blank());
    }

    // === PaneSlot ===

    #[test]
    fn test_slot_ring_order() {
        assert_eq!(PaneSlot::Left.next(), (PaneSlot::Middle, false));
        assert_eq!(PaneSlot::Middle.next(), (PaneSlot::Right, false));
        assert_eq!(PaneSlot::Right.next(), (PaneSlot::Left, true));
    }

    #[test]
    fn test_slot_index_roundtrip() {
        for slot in PaneSlot::ALL {
            assert_eq!(PaneSlot::from_index(slot.index()), Some(slot));
        }
        assert_eq!(PaneSlot::from_index(3), None);
    }
}
