//! Export, import and inspect commands
//!
//! The passphrase is read fresh for every attempt and handed to the worker
//! by value; it is wiped when the worker finishes, whatever the outcome.

use std::path::PathBuf;
use std::sync::Arc;

use crate::audit::Operation;
use crate::crypto::{SealedBlob, SecureString};
use crate::display::format_blob_info;
use crate::error::{TxsealError, TxsealResult};
use crate::storage::{read_blob, RecordStore};
use crate::transfer::{spawn_export, spawn_import};

use super::CliContext;

/// Environment variable that supplies the passphrase non-interactively
pub const PASSPHRASE_ENV: &str = "TXSEAL_PASSPHRASE";

/// Use the supplied passphrase, or prompt for one (hidden input)
fn read_passphrase(supplied: Option<String>) -> TxsealResult<SecureString> {
    match supplied {
        Some(passphrase) => Ok(SecureString::from(passphrase)),
        None => rpassword::prompt_password("Enter key: ")
            .map(SecureString::from)
            .map_err(|e| TxsealError::Validation(format!("Failed to read passphrase: {}", e))),
    }
}

/// Export every record to a sealed file
pub fn handle_export_command(
    ctx: &CliContext,
    output: Option<PathBuf>,
    passphrase: Option<String>,
) -> TxsealResult<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(&ctx.settings.default_export_name));
    let passphrase = read_passphrase(passphrase)?;

    let store: Arc<dyn RecordStore> = ctx.store.clone();
    let result = spawn_export(store, passphrase, output.clone())?.join();
    ctx.record_outcome(Operation::Export, &output, &result, |s| s.record_count);

    let summary = result?;
    println!(
        "Exported {} record(s) to: {}",
        summary.record_count,
        output.display()
    );
    Ok(())
}

/// Import records from a sealed file
pub fn handle_import_command(
    ctx: &CliContext,
    input: PathBuf,
    passphrase: Option<String>,
) -> TxsealResult<()> {
    let passphrase = read_passphrase(passphrase)?;

    let store: Arc<dyn RecordStore> = ctx.store.clone();
    let result = spawn_import(store, passphrase, input.clone())?.join();
    ctx.record_outcome(Operation::Import, &input, &result, |count| *count);

    let count = result?;
    println!("Imported {} record(s) from: {}", count, input.display());
    Ok(())
}

/// Show the layout of a sealed file without decrypting it
pub fn handle_inspect_command(input: PathBuf) -> TxsealResult<()> {
    let blob = SealedBlob::from_bytes(read_blob(&input)?)?;
    print!("{}", format_blob_info(&input.display().to_string(), &blob));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLogger;
    use crate::config::TxsealPaths;
    use crate::models::{Category, Record};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn context(dir: &TempDir, name: &str) -> CliContext {
        CliContext::load(TxsealPaths::with_base_dir(dir.path().join(name))).unwrap()
    }

    #[test]
    fn test_export_import_between_instances() {
        let temp_dir = TempDir::new().unwrap();
        let source = context(&temp_dir, "source");
        let target = context(&temp_dir, "target");
        let file = temp_dir.path().join("Transactions");

        source
            .store
            .insert(Record::new(
                "Bonus",
                Utc.with_ymd_and_hms(2024, 12, 17, 9, 0, 0).unwrap(),
                500.0,
                Category::Income,
            ))
            .unwrap();
        source.store.commit().unwrap();

        handle_export_command(&source, Some(file.clone()), Some("key".into())).unwrap();
        handle_import_command(&target, file.clone(), Some("key".into())).unwrap();

        assert_eq!(
            target.store.fetch_all_newest_first().unwrap(),
            source.store.fetch_all_newest_first().unwrap()
        );

        let audit = AuditLogger::new(target.paths.audit_log()).read_all().unwrap();
        assert_eq!(audit[0].operation, Operation::Import);
        assert_eq!(audit[0].record_count, Some(1));
    }

    #[test]
    fn test_import_wrong_key_audited_without_secret() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "data");
        let file = temp_dir.path().join("Transactions");

        handle_export_command(&ctx, Some(file.clone()), Some("correct horse".into())).unwrap();
        let err = handle_import_command(&ctx, file, Some("battery staple".into())).unwrap_err();

        assert!(err.is_authentication());
        let log = std::fs::read_to_string(ctx.paths.audit_log()).unwrap();
        assert!(log.contains("authentication"));
        assert!(!log.contains("correct horse"));
        assert!(!log.contains("battery staple"));
    }

    #[test]
    fn test_inspect_rejects_short_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("short");
        std::fs::write(&file, b"12345").unwrap();

        let err = handle_inspect_command(file).unwrap_err();
        assert!(err.is_authentication());
    }
}
