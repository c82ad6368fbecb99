//! Settings and secrets locations, plus the atomic file write used for every
//! settings mutation.

use crate::error::{CoreError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Project-relative settings document
pub const PROJECT_SETTINGS_PATH: &str = ".claude/settings.local.json";

/// Project-relative secrets file holding the alternate provider token
pub const SECRETS_PATH: &str = ".env";

pub fn get_project_settings_path() -> PathBuf {
    PathBuf::from(PROJECT_SETTINGS_PATH)
}

pub fn get_secrets_path() -> PathBuf {
    PathBuf::from(SECRETS_PATH)
}

pub fn get_claude_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".claude")
}

/// User-level settings document, used with `--global`
pub fn get_global_settings_path() -> PathBuf {
    get_claude_config_dir().join("settings.json")
}

/// Replace `path` with `data` via a temp file in the same directory.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    atomic_write_with(path, |file| {
        file.write_all(data)?;
        Ok(())
    })
}

/// Like [`atomic_write`], but the content is produced by `write`.
///
/// If `write` fails, the temp file is dropped and `path` keeps its previous
/// content. The rename only happens after the data is synced to disk.
pub fn atomic_write_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)?;
    write(temp_file.as_file_mut())?;
    temp_file.as_file().sync_all()?;

    // Keep the original mode; NamedTempFile is created 0600
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp_file.path(), metadata.permissions())?;
    }

    temp_file
        .persist(path)
        .map_err(|e| CoreError::Io(e.error))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
