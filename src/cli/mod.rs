//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the transfer pipeline.

pub mod record;
pub mod transfer;

use std::path::Path;
use std::sync::Arc;

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::config::{paths::TxsealPaths, settings::Settings};
use crate::error::TxsealResult;
use crate::storage::JsonRecordStore;

pub use record::{handle_add_command, handle_list_command};
pub use transfer::{
    handle_export_command, handle_import_command, handle_inspect_command, PASSPHRASE_ENV,
};

/// Everything a command handler needs
pub struct CliContext {
    pub paths: TxsealPaths,
    pub settings: Settings,
    pub store: Arc<JsonRecordStore>,
    audit: Option<AuditLogger>,
}

impl CliContext {
    /// Load settings and the record store for a data directory
    pub fn load(paths: TxsealPaths) -> TxsealResult<Self> {
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(&paths)?;
        let store = Arc::new(JsonRecordStore::open(paths.records_file())?);
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            paths,
            settings,
            store,
            audit,
        })
    }

    /// Append the outcome of a transfer to the audit log, if enabled
    ///
    /// A failing audit write is logged and otherwise ignored so it never
    /// replaces the outcome of the transfer itself.
    pub fn record_outcome<T>(
        &self,
        operation: Operation,
        file: &Path,
        result: &TxsealResult<T>,
        count: impl FnOnce(&T) -> usize,
    ) {
        let Some(logger) = &self.audit else {
            return;
        };

        let file = file.display().to_string();
        let entry = match result {
            Ok(value) => AuditEntry::success(operation, file, count(value)),
            Err(e) => AuditEntry::failure(operation, file, e),
        };

        if let Err(e) = logger.log(&entry) {
            tracing::warn!(error = %e, "failed to write audit entry");
        }
    }
}

/// Show the most recent audit entries, oldest first
pub fn handle_audit_command(ctx: &CliContext, limit: usize) -> TxsealResult<()> {
    let logger = AuditLogger::new(ctx.paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries in {}", logger.path().display());
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}

/// Show current configuration and paths
pub fn handle_config_command(ctx: &CliContext) -> TxsealResult<()> {
    println!("txseal Configuration");
    println!("====================");
    println!("Base directory: {}", ctx.paths.base_dir().display());
    println!("Records file:   {}", ctx.paths.records_file().display());
    println!("Audit log:      {}", ctx.paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Default export name: {}", ctx.settings.default_export_name);
    println!("  Audit enabled:       {}", ctx.settings.audit_enabled);
    println!("  Date format:         {}", ctx.settings.date_format);
    Ok(())
}
