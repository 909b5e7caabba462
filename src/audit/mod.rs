//! Audit logging for txseal
//!
//! Records every export and import attempt, successful or not, in an
//! append-only audit log.
//!
//! - `AuditEntry`: timestamp, operation, file, outcome, and either the
//!   record count or the failure kind.
//! - `AuditLogger`: writes entries to the log file as line-delimited JSON
//!   (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use txseal::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::success(Operation::Export, "Transactions", 12))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, Outcome};
pub use logger::AuditLogger;
