use serde::{Deserialize, Serialize};

mod editor_config;
mod storage_config;
mod tray_config;
mod window_config;

pub use editor_config::{normalize_font_size, EditorConfig};
pub use storage_config::StorageConfig;
pub use tray_config::TrayConfig;
pub use window_config::WindowConfig;

/// Global application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub window: WindowConfig,
    pub editor: EditorConfig,
    pub tray: TrayConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Clamp values that would produce an unusable window
    pub fn normalized(mut self) -> Self {
        self.editor.font_size = normalize_font_size(self.editor.font_size);
        self.window.width = self.window.width.max(window_config::MIN_WIDTH);
        self.window.height = self.window.height.max(window_config::MIN_HEIGHT);
        self
    }
}
