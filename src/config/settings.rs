//! User settings for txseal
//!
//! Manages preferences such as the default export file name and whether
//! export/import operations are written to the audit log.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::TxsealPaths;
use crate::error::TxsealError;

/// User settings for txseal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// File name used by `export` when no output path is given
    #[serde(default = "default_export_name")]
    pub default_export_name: String,

    /// Whether export/import outcomes are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

/// Newest settings schema this build understands
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_export_name() -> String {
    "Transactions".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

/// Date format used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Whether chrono can format dates with this strftime pattern
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_export_name: default_export_name(),
            audit_enabled: default_audit_enabled(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TxsealPaths) -> Result<Self, TxsealError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TxsealError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TxsealError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject settings this build cannot use
    ///
    /// The date format is checked here so a bad strftime string in
    /// config.json fails at load instead of while printing records.
    pub fn validate(&self) -> Result<(), TxsealError> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(TxsealError::Config(format!(
                "Settings schema version {} is newer than supported version {}",
                self.schema_version, SCHEMA_VERSION
            )));
        }

        if !is_valid_date_format(&self.date_format) {
            return Err(TxsealError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TxsealPaths) -> Result<(), TxsealError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TxsealError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            TxsealError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
