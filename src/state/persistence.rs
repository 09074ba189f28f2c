use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::config::CONFIG;
use crate::state::{Notebook, PaneSlot, Tab, UNTITLED};
use crate::utils::file_operations::{backup_with_suffix, write_atomically};

const FILENAME: &str = "editor_data.json";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize tabs: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One saved tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub left_content: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub middle_content: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub right_content: String,
    #[serde(default = "untitled", deserialize_with = "lenient_title")]
    pub title: String,
}

impl Default for TabRecord {
    fn default() -> Self {
        Self {
            left_content: String::new(),
            middle_content: String::new(),
            right_content: String::new(),
            title: untitled(),
        }
    }
}

impl From<&Tab> for TabRecord {
    fn from(tab: &Tab) -> Self {
        Self {
            left_content: tab.text(PaneSlot::Left).to_string(),
            middle_content: tab.text(PaneSlot::Middle).to_string(),
            right_content: tab.text(PaneSlot::Right).to_string(),
            title: tab.title().to_string(),
        }
    }
}

impl From<TabRecord> for Tab {
    fn from(record: TabRecord) -> Self {
        Tab::with_title(
            &record.left_content,
            &record.middle_content,
            &record.right_content,
            record.title,
        )
    }
}

fn untitled() -> String {
    UNTITLED.to_string()
}

/// Strings stay as they are; any other JSON value becomes empty
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => untitled(),
    })
}

/// The saved notebook (`editor_data.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub tabs: Vec<TabRecord>,
}

/// Wire shape used while loading; records are validated one by one
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    tabs: Vec<Value>,
}

impl From<&Notebook> for Document {
    fn from(notebook: &Notebook) -> Self {
        Self {
            tabs: notebook.tabs().iter().map(TabRecord::from).collect(),
        }
    }
}

impl Document {
    /// Get the save file path
    ///
    /// `storage.dataFile` in the config wins; otherwise the file lives in the
    /// local data directory.
    pub fn path() -> PathBuf {
        if let Some(path) = CONFIG.read().storage.data_file.clone() {
            return path;
        }
        if let Some(mut path) = dirs::data_local_dir() {
            path.push("tripad");
            path.push(FILENAME);
            return path;
        }

        // Fallback to home directory
        if let Some(mut path) = dirs::home_dir() {
            path.push(".tripad");
            path.push(FILENAME);
            return path;
        }

        PathBuf::from(FILENAME)
    }

    /// Parse a saved document, skipping records that are not objects
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let raw: RawDocument = serde_json::from_str(content)?;
        let tabs = raw
            .tabs
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(index, %e, "Skipping malformed tab record");
                    None
                }
            })
            .collect();
        Ok(Self { tabs })
    }

    /// Read a document. A missing file is an empty document, not an error.
    pub fn read_from(path: &Path) -> Result<Self, PersistenceError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| PersistenceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| PersistenceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the notebook, falling back to a single empty tab.
    ///
    /// An unreadable or unparseable file is copied aside as `<name>.corrupt`
    /// so the next save does not destroy it.
    pub fn load_notebook(path: &Path) -> Notebook {
        match Self::read_from(path) {
            Ok(document) => {
                tracing::info!(path = %path.display(), tabs = document.tabs.len(), "Loaded saved tabs");
                document.into_notebook()
            }
            Err(e) => {
                tracing::warn!(%e, "Could not load saved tabs, starting empty");
                if path.exists() {
                    match backup_with_suffix(path, "corrupt") {
                        Ok(backup) => {
                            tracing::warn!(backup = %backup.display(), "Unreadable save file copied aside")
                        }
                        Err(e) => tracing::warn!(%e, "Failed to back up unreadable save file"),
                    }
                }
                Notebook::default()
            }
        }
    }

    pub fn into_notebook(self) -> Notebook {
        Notebook::from_tabs(self.tabs.into_iter().map(Tab::from).collect())
    }

    /// Write the document as pretty JSON via a temporary sibling file
    pub fn write_to(&self, path: &Path) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(self)?;
        write_atomically(path, content.as_bytes()).map_err(|source| PersistenceError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the notebook to the configured location
    pub fn save_notebook(notebook: &Notebook) -> Result<PathBuf, PersistenceError> {
        let path = Self::path();
        let document = Self::from(notebook);
        tracing::debug!(path = %path.display(), tabs = document.tabs.len(), "Saving tabs");
        document.write_to(&path)?;
        Ok(path)
    }
}
