//! Record and sealed file display formatting

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::config::{is_valid_date_format, DEFAULT_DATE_FORMAT};
use crate::crypto::{SealedBlob, NONCE_SIZE, TAG_SIZE};
use crate::models::{Category, Record};

/// Patterns chrono cannot render fall back to the default
fn usable_format(date_format: &str) -> &str {
    if is_valid_date_format(date_format) {
        date_format
    } else {
        DEFAULT_DATE_FORMAT
    }
}

/// Format a single record for display (register row)
pub fn format_record_row(record: &Record, date_format: &str) -> String {
    let date_format = usable_format(date_format);
    let direction = match record.category {
        Category::Income => "+",
        Category::Expense => "-",
    };

    let name = if record.name.is_empty() {
        "(no name)".to_string()
    } else {
        record.name.clone()
    };

    format!(
        "{} {:30} {:>12.2} {}",
        record.date.format(date_format),
        truncate(&name, 30),
        record.amount,
        direction
    )
}

/// Format a list of records as a register, in the order given
pub fn format_record_register(records: &[Record], date_format: &str) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let date_format = usable_format(date_format);

    let date_width = records[0].date.format(date_format).to_string().chars().count();

    let mut output = String::new();
    output.push_str(&format!(
        "{:date_width$} {:30} {:>12} {}\n",
        "Date",
        "Name",
        "Amount",
        "",
        date_width = date_width
    ));
    output.push_str(&"-".repeat(date_width + 46));
    output.push('\n');

    for record in records {
        output.push_str(&format_record_row(record, date_format));
        output.push('\n');
    }

    let income: f64 = records.iter().filter(|r| r.is_income()).map(|r| r.amount).sum();
    let expense: f64 = records.iter().filter(|r| r.is_expense()).map(|r| r.amount).sum();
    output.push_str(&format!(
        "\n{} record(s), income {:.2}, expenses {:.2}\n",
        records.len(),
        income,
        expense
    ));

    output
}

/// Describe the structure of a sealed file without opening it
pub fn format_blob_info(file_name: &str, blob: &SealedBlob) -> String {
    let mut output = String::new();

    output.push_str(&format!("File:        {}\n", file_name));
    output.push_str(&format!("Size:        {} bytes\n", blob.len()));
    output.push_str(&format!(
        "Nonce:       {} ({} bytes)\n",
        STANDARD.encode(blob.nonce()),
        NONCE_SIZE
    ));
    output.push_str(&format!("Ciphertext:  {} bytes\n", blob.ciphertext().len()));
    output.push_str(&format!("Tag:         {} bytes\n", TAG_SIZE));

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
