//! Textarea access through `document::eval`.
//!
//! The textareas are uncontrolled so IME composition is never interrupted;
//! programmatic changes are pushed here instead. Offsets on this side of the
//! bridge are UTF-16 code units, as the DOM reports them.

use dioxus::document;
use std::ops::Range;

/// JSON-encode a value for embedding in a script
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Current selection of a textarea as a UTF-16 range
pub async fn read_selection(element_id: &str) -> Option<Range<usize>> {
    let js = format!(
        r#"
        const el = document.getElementById({});
        if (!el) {{ return null; }}
        return [el.selectionStart, el.selectionEnd];
        "#,
        js_string(element_id)
    );
    let value = document::eval(&js).await.ok()?;
    let bounds = value.as_array()?;
    let start = bounds.first()?.as_u64()? as usize;
    let end = bounds.get(1)?.as_u64()? as usize;
    Some(start.min(end)..start.max(end))
}

/// Replace a textarea's value, keeping the caret where it was if possible
pub async fn set_value(element_id: &str, text: &str) {
    let js = format!(
        r#"
        const el = document.getElementById({});
        if (!el) {{ return; }}
        const value = {};
        if (el.value === value) {{ return; }}
        const start = Math.min(el.selectionStart, value.length);
        const end = Math.min(el.selectionEnd, value.length);
        el.value = value;
        el.setSelectionRange(start, end);
        "#,
        js_string(element_id),
        js_string(text)
    );
    if let Err(e) = document::eval(&js).await {
        tracing::warn!(element_id, ?e, "Failed to update textarea");
    }
}

/// Focus a textarea, select `range` and scroll it into view
pub async fn select_range(element_id: &str, range: Range<usize>) {
    let js = format!(
        r#"
        const el = document.getElementById({});
        if (!el) {{ return; }}
        el.focus();
        el.setSelectionRange({}, {});
        const style = getComputedStyle(el);
        const lineHeight = parseFloat(style.lineHeight) || parseFloat(style.fontSize) * 1.4 || 18;
        const line = el.value.slice(0, {}).split("\n").length - 1;
        const top = line * lineHeight;
        if (top < el.scrollTop || top > el.scrollTop + el.clientHeight - lineHeight) {{
            el.scrollTop = Math.max(0, top - el.clientHeight / 3);
        }}
        "#,
        js_string(element_id),
        range.start,
        range.end,
        range.start
    );
    if let Err(e) = document::eval(&js).await {
        tracing::warn!(element_id, ?e, "Failed to select text");
    }
}

/// Move keyboard focus to an element
pub async fn focus(element_id: &str) {
    let js = format!(
        r#"
        const el = document.getElementById({});
        if (el) {{ el.focus(); if (el.select) {{ el.select(); }} }}
        "#,
        js_string(element_id)
    );
    let _ = document::eval(&js).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("pane-1-left"), r#""pane-1-left""#);
        assert_eq!(js_string("a\"b\nc"), r#""a\"b\nc""#);
        assert_eq!(js_string("</script>"), r#""</script>""#);
    }
}
