// crates/hpfd-migrator/src/storage.rs
// ============================================================================
// Module: Bounded File Storage
// Description: Size-limited reads and temp-file-then-rename writes.
// Purpose: Keep corpus and fixture I/O bounded and crash-consistent per file.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Reads refuse files larger than the caller's limit without buffering them.
//! Writes go to a hidden sibling temp file that is synced and then renamed
//! over the target, so a reader sees either the old or the new bytes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by bounded reads.
#[derive(Debug, Error)]
pub enum ReadLimitError {
    /// I/O failure while reading.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// File size exceeds the configured limit.
    #[error("file is {size} bytes (limit {limit})")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Reads
// ============================================================================

/// Reads a file from disk while enforcing a hard size limit.
///
/// # Errors
///
/// Returns [`ReadLimitError`] when the file cannot be read or exceeds
/// `max_bytes`.
pub fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Writes
// ============================================================================

/// Writes `bytes` to `path` through a synced sibling temp file.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the temp file cannot be written or renamed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let temp_path = temp_sibling(path);
    let result = write_synced(&temp_path, bytes).and_then(|()| fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Creates or truncates `path` and syncs `bytes` to disk.
fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Returns the hidden temp path next to `path`.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".tmp-");
    if let Some(file_name) = path.file_name() {
        name.push(file_name);
    }
    path.with_file_name(name)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted to panic."
    )]

    use super::*;

    #[test]
    fn read_rejects_file_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pb");
        fs::write(&path, [0u8; 9]).unwrap();
        let err = read_bytes_with_limit(&path, 8).unwrap_err();
        assert!(matches!(err, ReadLimitError::TooLarge { size: 9, limit: 8 }));
        assert_eq!(read_bytes_with_limit(&path, 9).unwrap().len(), 9);
    }

    #[test]
    fn write_replaces_contents_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.pb");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        let names: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![OsString::from("doc.pb")]);
    }
}
