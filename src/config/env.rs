//! Environment file loading.
//!
//! Loading is best-effort: a missing file is reported, not treated as an error,
//! and malformed lines are skipped with a warning. Variables already set in the
//! process environment always win over values from the file, so the file only
//! provides defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use super::error::ConfigError;

/// Conventional env file name.
pub const DEFAULT_ENV_FILE: &str = "dev.env";

/// Variable that overrides the env file path.
pub const ENV_FILE_VAR: &str = "JARVIS_ENV_FILE";

/// Outcome of loading the env file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EnvFile {
    /// File was read; `keys` entries parsed, `skipped` malformed lines ignored.
    Loaded { path: PathBuf, keys: usize, skipped: usize },
    /// No file at this path.
    Missing { path: PathBuf },
    /// File exists but could not be read, the process environment is used alone.
    Invalid { path: PathBuf },
}

impl EnvFile {
    /// Path that was probed.
    pub fn path(&self) -> &Path {
        match self {
            EnvFile::Loaded { path, .. } | EnvFile::Missing { path } | EnvFile::Invalid { path } => path,
        }
    }
}

impl std::fmt::Display for EnvFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvFile::Loaded { path, keys, skipped: 0 } => write!(f, "{} ({} keys)", path.display(), keys),
            EnvFile::Loaded { path, keys, skipped } => write!(f, "{} ({} keys, {} malformed lines skipped)", path.display(), keys, skipped),
            EnvFile::Missing { path } => write!(f, "{} (not found)", path.display()),
            EnvFile::Invalid { path } => write!(f, "{} (unreadable, ignored)", path.display()),
        }
    }
}

/// Entries parsed from an env file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvEntries {
    /// Parsed key/value pairs. Later duplicates of a key replace earlier ones.
    pub values: HashMap<String, String>,
    /// Number of malformed lines that were skipped.
    pub skipped: usize,
}

/// Parse an env file without touching the process environment.
///
/// Malformed lines are logged and skipped; the remaining lines still count.
///
/// # Returns
/// `None` if the file does not exist, otherwise the parsed entries.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn read_env_file(path: &Path) -> Result<Option<EnvEntries>, ConfigError> {
    let to_error = |source: dotenvy::Error| ConfigError::EnvFile { path: path.to_path_buf(), source };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(None),
        Err(e) => return Err(to_error(e)),
    };

    let mut entries = EnvEntries::default();
    for item in iter {
        match item {
            Ok((key, value)) => {
                entries.values.insert(key, value);
            }
            Err(dotenvy::Error::LineParse(line, index)) => {
                warn!("⚠️  Skipping malformed line in {}: '{}' (error at index {})", path.display(), line, index);
                entries.skipped += 1;
            }
            Err(e) => return Err(to_error(e)),
        }
    }
    Ok(Some(entries))
}

/// Load an env file into the process environment.
///
/// The file is parsed once; only entries whose key is not already set in the
/// process environment are applied. Must run at startup, before any other
/// thread is spawned.
///
/// # Errors
/// Returns an error if the file exists but cannot be read. In that case
/// nothing from the file has been applied.
pub fn load_env_file(path: &Path) -> Result<EnvFile, ConfigError> {
    let Some(entries) = read_env_file(path)? else {
        debug!("No env file at {}, using process environment only", path.display());
        return Ok(EnvFile::Missing { path: path.to_path_buf() });
    };

    let pending = unset_entries(&entries.values, |key| std::env::var_os(key).is_some());
    for (key, value) in &pending {
        // SAFETY: restricted to startup before other threads spin up.
        unsafe {
            std::env::set_var(key, value);
        }
    }
    debug!("Applied {} of {} entries from {}", pending.len(), entries.values.len(), path.display());

    Ok(EnvFile::Loaded { path: path.to_path_buf(), keys: entries.values.len(), skipped: entries.skipped })
}

/// Entries whose key is not already set, sorted by key.
fn unset_entries<'a>(values: &'a HashMap<String, String>, is_set: impl Fn(&str) -> bool) -> Vec<(&'a str, &'a str)> {
    let mut pending: Vec<_> = values.iter().filter(|(key, _)| !is_set(key)).map(|(key, value)| (key.as_str(), value.as_str())).collect();
    pending.sort_unstable();
    pending
}

/// Serializes tests that read or write the process environment.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
