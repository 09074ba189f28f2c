use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// System tray settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrayConfig {
    /// When disabled, closing the window quits the application
    pub enabled: bool,
    /// PNG/ICO used instead of the built-in icon
    pub icon_path: Option<PathBuf>,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            icon_path: None,
        }
    }
}
