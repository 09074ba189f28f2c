//! Exporting a single pane to a file in a chosen character encoding.
//!
//! Encoding is strict: the first character the target encoding cannot
//! represent aborts the export and nothing is written.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::utils::file_operations::write_atomically;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExportEncoding {
    #[default]
    Utf8,
    /// Little-endian with a byte order mark
    Utf16,
    Gbk,
    ShiftJis,
    Latin1,
}

impl ExportEncoding {
    /// Picker order; the first entry is preselected
    pub const ALL: [ExportEncoding; 5] = [
        ExportEncoding::Utf8,
        ExportEncoding::Utf16,
        ExportEncoding::Gbk,
        ExportEncoding::ShiftJis,
        ExportEncoding::Latin1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExportEncoding::Utf8 => "UTF-8",
            ExportEncoding::Utf16 => "UTF-16",
            ExportEncoding::Gbk => "GBK",
            ExportEncoding::ShiftJis => "Shift-JIS",
            ExportEncoding::Latin1 => "ISO-8859-1",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.label() == label)
    }

    /// Encode `text`, failing on the first unrepresentable character
    pub fn encode(self, text: &str) -> Result<Vec<u8>, ExportError> {
        match self {
            ExportEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            ExportEncoding::Utf16 => {
                let mut bytes = Vec::with_capacity(2 + text.len() * 2);
                bytes.extend_from_slice(&[0xFF, 0xFE]);
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                Ok(bytes)
            }
            ExportEncoding::Latin1 => text
                .chars()
                .enumerate()
                .map(|(position, character)| {
                    u8::try_from(u32::from(character)).map_err(|_| ExportError::Unmappable {
                        encoding: self,
                        character,
                        position,
                    })
                })
                .collect(),
            ExportEncoding::Gbk => self.encode_legacy(encoding_rs::GBK, text),
            ExportEncoding::ShiftJis => self.encode_legacy(encoding_rs::SHIFT_JIS, text),
        }
    }

    fn encode_legacy(
        self,
        encoding: &'static encoding_rs::Encoding,
        text: &str,
    ) -> Result<Vec<u8>, ExportError> {
        let (bytes, _, had_errors) = encoding.encode(text);
        if !had_errors {
            return Ok(bytes.into_owned());
        }
        // encoding_rs substitutes numeric character references; locate the
        // first character that needed one
        let mut buf = [0u8; 4];
        let unmappable = text.chars().enumerate().find(|(_, c)| {
            let (_, _, failed) = encoding.encode(c.encode_utf8(&mut buf));
            failed
        });
        match unmappable {
            Some((position, character)) => Err(ExportError::Unmappable {
                encoding: self,
                character,
                position,
            }),
            None => Ok(bytes.into_owned()),
        }
    }
}

impl fmt::Display for ExportEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{encoding} cannot represent {character:?} (U+{:04X}) at character {position}", code_point(.character))]
    Unmappable {
        encoding: ExportEncoding,
        character: char,
        position: usize,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("export task did not finish: {0}")]
    Task(String),
}

fn code_point(c: &char) -> u32 {
    u32::from(*c)
}

/// Encode and write `text` to `path`
pub fn export_to_file(
    path: &Path,
    text: &str,
    encoding: ExportEncoding,
) -> Result<(), ExportError> {
    let bytes = encoding.encode(text)?;
    write_atomically(path, &bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), %encoding, bytes = bytes.len(), "Exported pane");
    Ok(())
}

/// Run [`export_to_file`] on the blocking pool
pub async fn export_in_background(
    path: PathBuf,
    text: String,
    encoding: ExportEncoding,
) -> Result<(), ExportError> {
    tokio::task::spawn_blocking(move || export_to_file(&path, &text, encoding))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?
}
