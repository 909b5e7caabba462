//! Audit entry data structures
//!
//! One entry per export or import attempt. Entries describe what happened to
//! which file; they never carry passphrases, keys, or record contents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TxsealError;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Records were sealed into a file
    Export,
    /// Records were read from a sealed file
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Export => write!(f, "EXPORT"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// How an operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation finished (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// The sealed file involved
    pub file: String,

    /// How it ended
    pub outcome: Outcome,

    /// Records exported or imported (successes only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,

    /// Error kind for failures, e.g. "authentication" or "decode"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<String>,
}

impl AuditEntry {
    /// Create an entry for a successful operation
    pub fn success(operation: Operation, file: impl Into<String>, record_count: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            file: file.into(),
            outcome: Outcome::Success,
            record_count: Some(record_count),
            failure_kind: None,
        }
    }

    /// Create an entry for a failed operation
    ///
    /// Only the error kind is kept; the message may name paths or payload
    /// details that do not belong in a long-lived log.
    pub fn failure(operation: Operation, file: impl Into<String>, error: &TxsealError) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            file: file.into(),
            outcome: Outcome::Failure,
            record_count: None,
            failure_kind: Some(error.kind().to_string()),
        }
    }

    /// Format this entry as a human-readable string
    pub fn format_human_readable(&self) -> String {
        let detail = match (self.outcome, self.record_count, &self.failure_kind) {
            (Outcome::Success, Some(count), _) => format!("{} record(s)", count),
            (Outcome::Failure, _, Some(kind)) => format!("failed: {}", kind),
            (Outcome::Success, None, _) => "ok".to_string(),
            (Outcome::Failure, _, None) => "failed".to_string(),
        };

        format!(
            "[{}] {} {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.file,
            detail
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthFailure;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Export.to_string(), "EXPORT");
        assert_eq!(Operation::Import.to_string(), "IMPORT");
    }

    #[test]
    fn test_success_entry() {
        let entry = AuditEntry::success(Operation::Export, "Transactions", 3);
        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.record_count, Some(3));
        assert!(entry.failure_kind.is_none());
        assert!(entry.format_human_readable().contains("EXPORT Transactions - 3 record(s)"));
    }

    #[test]
    fn test_failure_entry_keeps_only_kind() {
        let err = TxsealError::Authentication(AuthFailure::Truncated { len: 5 });
        let entry = AuditEntry::failure(Operation::Import, "backup.bin", &err);

        assert_eq!(entry.outcome, Outcome::Failure);
        assert_eq!(entry.failure_kind.as_deref(), Some("authentication"));
        assert!(entry.format_human_readable().ends_with("failed: authentication"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::success(Operation::Import, "Transactions", 0);
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"operation\":\"import\""));
        assert!(json.contains("\"outcome\":\"success\""));
        assert!(!json.contains("failure_kind"));

        let parsed: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.operation, Operation::Import);
    }
}
