//! Plain-text matching on byte offsets.
//!
//! Case-insensitive comparison maps code points one to one, so a match always
//! covers exactly as many characters as the query and its byte range can be
//! used to slice the original text.

use std::ops::Range;

/// Find the first occurrence of `needle` in `haystack` starting at byte `from`.
///
/// `from` is clamped to the text and moved back to a character boundary.
/// An empty needle never matches.
pub fn find_forward(
    haystack: &str,
    needle: &str,
    from: usize,
    case_sensitive: bool,
) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let from = floor_char_boundary(haystack, from);
    let rest = &haystack[from..];

    if case_sensitive {
        return rest
            .find(needle)
            .map(|start| from + start..from + start + needle.len());
    }

    rest.char_indices().find_map(|(start, _)| {
        match_len_ignore_case(&rest[start..], needle).map(|len| from + start..from + start + len)
    })
}

/// `true` if `candidate` is exactly one occurrence of `needle`
pub fn is_exact_match(candidate: &str, needle: &str, case_sensitive: bool) -> bool {
    if needle.is_empty() {
        return false;
    }
    if case_sensitive {
        return candidate == needle;
    }
    match_len_ignore_case(candidate, needle) == Some(candidate.len())
}

/// Replace every occurrence of `needle`, scanning left to right.
///
/// Each search resumes after the previous match in the original text, so an
/// inserted replacement is never searched again. Returns the new text and the
/// number of replacements.
pub fn replace_all_in(
    text: &str,
    needle: &str,
    replacement: &str,
    case_sensitive: bool,
) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut count = 0;
    while let Some(range) = find_forward(text, needle, pos, case_sensitive) {
        out.push_str(&text[pos..range.start]);
        out.push_str(replacement);
        pos = range.end;
        count += 1;
    }
    out.push_str(&text[pos..]);
    (out, count)
}

/// Byte length of the prefix of `text` matching `needle` ignoring case
fn match_len_ignore_case(text: &str, needle: &str) -> Option<usize> {
    let mut len = 0;
    let mut hay = text.chars();
    for expected in needle.chars() {
        let actual = hay.next()?;
        if !chars_eq_ignore_case(actual, expected) {
            return None;
        }
        len += actual.len_utf8();
    }
    Some(len)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
