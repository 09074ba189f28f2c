use anyhow::Context as _;
use base64::Engine as _;
use std::path::Path;

use crate::config::EditorConfig;

/// Base stylesheet, inlined into the window head
pub const MAIN_STYLE: &str = include_str!("../assets/main.css");

/// Font fallbacks after the configured family
const FALLBACK_FONTS: &str =
    r#""Microsoft JhengHei", "PingFang TC", "Noto Sans CJK TC", "Noto Sans TC", sans-serif"#;

/// CSS for the text panes derived from the editor config.
///
/// A configured font file is embedded as a data URL; if it cannot be read the
/// panes fall back to the installed fonts.
pub fn editor_style(editor: &EditorConfig) -> String {
    let mut css = String::new();
    if let Some(path) = editor.font_path.as_deref() {
        match font_face_css(&editor.font_family, path) {
            Ok(font_face) => css.push_str(&font_face),
            Err(e) => tracing::warn!("{e:#}; using the default font"),
        }
    }
    css.push_str(&format!(
        ":root {{ --editor-font-family: {}, {FALLBACK_FONTS}; --editor-font-size: {}pt; }}\n",
        css_string(&editor.font_family),
        editor.font_size,
    ));
    css
}

/// An `@font-face` rule embedding the font file at `path`
pub fn font_face_css(family: &str, path: &Path) -> anyhow::Result<String> {
    let format = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("ttf") => ("font/ttf", "truetype"),
        Some("otf") => ("font/otf", "opentype"),
        Some("woff") => ("font/woff", "woff"),
        Some("woff2") => ("font/woff2", "woff2"),
        _ => anyhow::bail!("unsupported font file {}", path.display()),
    };
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    tracing::debug!(path = %path.display(), family, "Embedding font");
    Ok(format!(
        "@font-face {{ font-family: {}; src: url(data:{};base64,{}) format(\"{}\"); }}\n",
        css_string(family),
        format.0,
        encoded,
        format.1,
    ))
}

/// Quote a value as a CSS string
fn css_string(value: &str) -> String {
    let escaped: String = value
        .chars()
        .filter(|c| !c.is_control())
        .flat_map(|c| match c {
            '"' | '\\' => vec!['\\', c],
            _ => vec![c],
        })
        .collect();
    format!("\"{escaped}\"")
}
