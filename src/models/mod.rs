//! Core data models for txseal
//!
//! Records are the only domain entity: a named, dated amount that is either
//! income or an expense.

pub mod record;

pub use record::{Category, Record};
