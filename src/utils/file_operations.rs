use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sibling path used while a file is being written
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to `path` so that a failure leaves any existing file intact.
///
/// Parent directories are created as needed. The data goes to a temporary
/// sibling first and is renamed over the destination once fully flushed.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = temp_sibling(path);

    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();
    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            tracing::debug!(%e, tmp = %tmp.display(), "No temporary file to clean up");
        }
    }
    result
}

/// Copy `path` aside as `<name>.<suffix>`, returning the backup path
pub fn backup_with_suffix(path: &Path, suffix: &str) -> std::io::Result<PathBuf> {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    let backup = path.with_file_name(name);
    fs::copy(path, &backup)?;
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomically_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();

        write_atomically(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("out.txt.tmp").exists());
    }

    #[test]
    fn test_write_atomically_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("out.txt");
        write_atomically(&path, b"x").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"x");
    }

    #[test]
    fn test_backup_with_suffix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "broken").unwrap();

        let backup = backup_with_suffix(&path, "corrupt").unwrap();
        assert_eq!(backup, dir.path().join("data.json.corrupt"));
        assert_eq!(fs::read_to_string(backup).unwrap(), "broken");
        assert!(path.exists());
    }

    #[test]
    fn test_backup_of_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(backup_with_suffix(&dir.path().join("absent"), "corrupt").is_err());
    }
}
