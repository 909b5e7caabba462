//! Record entry and listing commands

use chrono::{DateTime, NaiveDate, Utc};

use crate::display::format_record_register;
use crate::error::{TxsealError, TxsealResult};
use crate::models::{Category, Record};
use crate::storage::RecordStore;

use super::CliContext;

/// Parse a date given as RFC 3339 or as YYYY-MM-DD (midnight UTC)
pub fn parse_record_date(input: &str) -> TxsealResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            TxsealError::Validation(format!(
                "Invalid date '{}': use YYYY-MM-DD or RFC 3339",
                input
            ))
        })
}

/// Add a record and commit it immediately
pub fn handle_add_command(
    ctx: &CliContext,
    name: String,
    amount: f64,
    category: Category,
    date: Option<String>,
) -> TxsealResult<()> {
    if !amount.is_finite() {
        return Err(TxsealError::Validation(format!(
            "Amount must be a finite number, got {}",
            amount
        )));
    }

    let date = match date {
        Some(input) => parse_record_date(&input)?,
        None => Utc::now(),
    };

    let record = Record::new(name, date, amount, category);
    let summary = record.to_string();

    ctx.store.insert(record)?;
    if let Err(e) = ctx.store.commit() {
        ctx.store.discard_pending()?;
        return Err(e);
    }

    println!("Added: {}", summary);
    Ok(())
}

/// List records, newest first
pub fn handle_list_command(ctx: &CliContext, limit: Option<usize>) -> TxsealResult<()> {
    let mut records = ctx.store.fetch_all_newest_first()?;
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    print!(
        "{}",
        format_record_register(&records, &ctx.settings.date_format)
    );
    Ok(())
}
