//! Path management for txseal
//!
//! ## Path Resolution Order
//!
//! 1. `TXSEAL_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `txseal`
//!    (`~/.config/txseal` on Linux, `~/Library/Application Support/txseal`
//!    on macOS, `%APPDATA%\txseal` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::TxsealError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "TXSEAL_DATA_DIR";

/// Manages all paths used by txseal
#[derive(Debug, Clone)]
pub struct TxsealPaths {
    /// Base directory for all txseal data
    base_dir: PathBuf,
}

impl TxsealPaths {
    /// Create a new TxsealPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, TxsealError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create TxsealPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to records.json
    pub fn records_file(&self) -> PathBuf {
        self.data_dir().join("records.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), TxsealError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TxsealError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TxsealError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, TxsealError> {
    ProjectDirs::from("", "", "txseal")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| TxsealError::Config("Could not determine home directory".into()))
}
