//! Sealed blob files
//!
//! Reads and writes exported files. Every access happens inside a
//! `ScopedFileAccess` guard, which is released on every exit path,
//! including failures further down the pipeline.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{TxsealError, TxsealResult};

use super::file_io::write_bytes_atomic;

/// What a scoped access is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

/// Guard for one access to a user-chosen file
///
/// Acquisition checks that the file (for reads) or its directory (for
/// writes) is reachable; the guard is released when dropped.
#[derive(Debug)]
pub struct ScopedFileAccess {
    path: PathBuf,
    mode: AccessMode,
}

impl ScopedFileAccess {
    /// Start accessing a file
    pub fn acquire(path: impl AsRef<Path>, mode: AccessMode) -> TxsealResult<Self> {
        let path = path.as_ref();

        match mode {
            AccessMode::Read => {
                let metadata = std::fs::metadata(path)
                    .map_err(|e| TxsealError::resource_access(path, e))?;
                if !metadata.is_file() {
                    return Err(TxsealError::resource_access(path, "not a regular file"));
                }
            }
            AccessMode::Write => {
                if path.is_dir() {
                    return Err(TxsealError::resource_access(path, "is a directory"));
                }
            }
        }

        tracing::debug!(path = %path.display(), ?mode, "file access acquired");
        Ok(Self {
            path: path.to_path_buf(),
            mode,
        })
    }

    /// The path being accessed
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file
    pub fn read_all(&self) -> TxsealResult<Vec<u8>> {
        if self.mode != AccessMode::Read {
            return Err(TxsealError::resource_access(&self.path, "not opened for reading"));
        }

        let mut file =
            File::open(&self.path).map_err(|e| TxsealError::resource_access(&self.path, e))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| TxsealError::resource_access(&self.path, e))?;
        Ok(bytes)
    }

    /// Replace the file's contents atomically
    pub fn write_all(&self, bytes: &[u8]) -> TxsealResult<()> {
        if self.mode != AccessMode::Write {
            return Err(TxsealError::resource_access(&self.path, "not opened for writing"));
        }

        write_bytes_atomic(&self.path, bytes).map_err(|e| match e {
            TxsealError::Storage(reason) => TxsealError::resource_access(&self.path, reason),
            other => other,
        })
    }
}

impl Drop for ScopedFileAccess {
    fn drop(&mut self) {
        tracing::debug!(path = %self.path.display(), mode = ?self.mode, "file access released");
    }
}

/// Read a sealed blob file
pub fn read_blob(path: impl AsRef<Path>) -> TxsealResult<Vec<u8>> {
    let access = ScopedFileAccess::acquire(path, AccessMode::Read)?;
    access.read_all()
}

/// Write a sealed blob file
pub fn write_blob(path: impl AsRef<Path>, bytes: &[u8]) -> TxsealResult<()> {
    let access = ScopedFileAccess::acquire(path, AccessMode::Write)?;
    access.write_all(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_blob() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Transactions");

        write_blob(&path, &[7u8; 40]).unwrap();
        assert_eq!(read_blob(&path).unwrap(), vec![7u8; 40]);
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_blob(temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, TxsealError::ResourceAccess { .. }));
    }

    #[test]
    fn test_read_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_blob(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_write_to_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = write_blob(temp_dir.path(), b"data").unwrap_err();
        assert!(matches!(err, TxsealError::ResourceAccess { .. }));
    }

    #[test]
    fn test_mode_is_enforced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob");
        std::fs::write(&path, b"data").unwrap();

        let access = ScopedFileAccess::acquire(&path, AccessMode::Read).unwrap();
        assert!(access.write_all(b"other").is_err());
        assert_eq!(access.path(), path.as_path());
        drop(access);

        let access = ScopedFileAccess::acquire(&path, AccessMode::Write).unwrap();
        assert!(access.read_all().is_err());
    }
}
