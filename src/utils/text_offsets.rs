//! Conversion between Rust byte offsets and the UTF-16 code unit offsets
//! used by `selectionStart`/`selectionEnd` in the WebView.

use std::ops::Range;

/// Byte offset for a UTF-16 offset.
///
/// Offsets past the end clamp to the text length; an offset splitting a
/// surrogate pair resolves to the start of that character.
pub fn utf16_to_byte(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (byte, c) in text.char_indices() {
        let next = units + c.len_utf16();
        if next > utf16_offset {
            return byte;
        }
        units = next;
    }
    text.len()
}

/// UTF-16 offset for a byte offset. Byte offsets inside a character count
/// up to the start of that character.
pub fn byte_to_utf16(text: &str, byte_offset: usize) -> usize {
    text.char_indices()
        .take_while(|(byte, c)| byte + c.len_utf8() <= byte_offset)
        .map(|(_, c)| c.len_utf16())
        .sum()
}

pub fn utf16_range_to_bytes(text: &str, range: Range<usize>) -> Range<usize> {
    utf16_to_byte(text, range.start)..utf16_to_byte(text, range.end)
}

pub fn byte_range_to_utf16(text: &str, range: Range<usize>) -> Range<usize> {
    byte_to_utf16(text, range.start)..byte_to_utf16(text, range.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_equal() {
        assert_eq!(utf16_to_byte("hello", 3), 3);
        assert_eq!(byte_to_utf16("hello", 3), 3);
    }

    #[test]
    fn test_multibyte_bmp_characters() {
        // Each CJK character is 3 bytes and 1 UTF-16 unit
        let text = "中文ab";
        assert_eq!(utf16_to_byte(text, 2), 6);
        assert_eq!(utf16_to_byte(text, 3), 7);
        assert_eq!(byte_to_utf16(text, 6), 2);
        assert_eq!(byte_to_utf16(text, 8), 4);
    }

    #[test]
    fn test_astral_characters() {
        // 4 bytes, 2 UTF-16 units
        let text = "a😀b";
        assert_eq!(utf16_to_byte(text, 1), 1);
        assert_eq!(utf16_to_byte(text, 3), 5);
        assert_eq!(byte_to_utf16(text, 5), 3);
    }

    #[test]
    fn test_offset_inside_surrogate_pair() {
        assert_eq!(utf16_to_byte("a😀b", 2), 1);
    }

    #[test]
    fn test_offsets_past_end_clamp() {
        assert_eq!(utf16_to_byte("abc", 99), 3);
        assert_eq!(byte_to_utf16("abc", 99), 3);
    }

    #[test]
    fn test_range_conversion() {
        let text = "日本語テキスト";
        let bytes = utf16_range_to_bytes(text, 3..5);
        assert_eq!(&text[bytes.clone()], "テキ");
        assert_eq!(byte_range_to_utf16(text, bytes), 3..5);
    }
}
