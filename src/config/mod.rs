//! Configuration module for txseal
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TxsealPaths;
pub use settings::{is_valid_date_format, Settings, DEFAULT_DATE_FORMAT};
