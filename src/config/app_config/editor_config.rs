use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_FONT_FAMILY: &str = "Microsoft JhengHei";
pub const DEFAULT_FONT_SIZE: u32 = 11;
pub const MIN_FONT_SIZE: u32 = 6;
pub const MAX_FONT_SIZE: u32 = 72;

/// Clamp a font size (points) to the supported range
pub fn normalize_font_size(size: u32) -> u32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Text pane appearance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub font_family: String,
    /// Point size
    pub font_size: u32,
    /// TTF/OTF file embedded as a web font under `font_family`
    pub font_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_path: None,
        }
    }
}
