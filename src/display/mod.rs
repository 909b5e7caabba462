//! Display formatting for terminal output

pub mod record;

pub use record::{format_blob_info, format_record_register, format_record_row};
