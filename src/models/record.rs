//! Record model
//!
//! A single income or expense entry, and the JSON shape it takes inside a
//! sealed export. Field names and category tags are shared with other
//! implementations of the format and must not change.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TxsealError;

/// Direction of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Category {
    /// Money coming in
    Income,
    /// Money going out
    #[default]
    Expense,
}

impl Category {
    /// The wire tag for this category
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Category {
    type Err = TxsealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(TxsealError::Validation(format!(
                "Unknown category '{}': expected income or expense",
                other
            ))),
        }
    }
}

/// A financial record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Display name
    #[serde(rename = "transactionName")]
    pub name: String,

    /// When the record happened; newest records sort first
    #[serde(rename = "transactionDate", with = "reference_date")]
    pub date: DateTime<Utc>,

    /// Monetary amount
    #[serde(rename = "transactionAmount")]
    pub amount: f64,

    /// Income or expense
    #[serde(rename = "transactionCategoty")]
    pub category: Category,
}

impl Record {
    /// Create a new record
    ///
    /// The date is truncated to microseconds, the precision kept by the
    /// export format.
    pub fn new(
        name: impl Into<String>,
        date: DateTime<Utc>,
        amount: f64,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.trunc_subsecs(6),
            amount,
            category,
        }
    }

    /// Check if this is an income record
    pub fn is_income(&self) -> bool {
        self.category == Category::Income
    }

    /// Check if this is an expense record
    pub fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.2} ({})",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.amount,
            self.category
        )
    }
}

/// Timestamps as fractional seconds since 2001-01-01T00:00:00Z
///
/// An f64 keeps every microsecond only within about 2^32 seconds of the
/// reference date (roughly 1865 to 2137). Further out, whole seconds still
/// survive but odd microseconds do not; `round_trips` tells the two apart.
pub(crate) mod reference_date {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Unix time of the reference date, in microseconds
    pub const REFERENCE_UNIX_MICROS: i64 = 978_307_200_000_000;

    const MICROS_PER_SEC: f64 = 1_000_000.0;

    pub fn to_seconds(date: &DateTime<Utc>) -> f64 {
        (date.timestamp_micros() - REFERENCE_UNIX_MICROS) as f64 / MICROS_PER_SEC
    }

    pub fn from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
        if !seconds.is_finite() {
            return None;
        }
        let micros = (seconds * MICROS_PER_SEC).round();
        // Bounds check before the cast; `as` would saturate silently
        if micros.abs() >= i64::MAX as f64 / 2.0 {
            return None;
        }
        let unix_micros = (micros as i64).checked_add(REFERENCE_UNIX_MICROS)?;
        DateTime::from_timestamp_micros(unix_micros)
    }

    /// Whether `date` decodes back to exactly itself
    pub fn round_trips(date: &DateTime<Utc>) -> bool {
        from_seconds(to_seconds(date)) == Some(*date)
    }

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(to_seconds(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = f64::deserialize(deserializer)?;
        from_seconds(seconds)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {}", seconds)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_category_tags() {
        assert_eq!(Category::Income.tag(), "Income");
        assert_eq!(Category::Expense.to_string(), "Expense");
        assert_eq!(serde_json::to_string(&Category::Income).unwrap(), "\"Income\"");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("income".parse::<Category>().unwrap(), Category::Income);
        assert_eq!(" EXPENSE ".parse::<Category>().unwrap(), Category::Expense);
        assert!("refund".parse::<Category>().unwrap_err().to_string().contains("refund"));
    }

    #[test]
    fn test_unknown_category_tag_rejected() {
        assert!(serde_json::from_str::<Category>("\"Transfer\"").is_err());
        assert!(serde_json::from_str::<Category>("\"income\"").is_err());
    }

    #[test]
    fn test_new_truncates_to_micros() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(1_234_567);
        let record = Record::new("Coffee", date, -3.5, Category::Expense);
        assert_eq!(record.date.timestamp_subsec_nanos(), 1_234_000);
        assert!(record.is_expense());
        assert!(!record.is_income());
    }

    #[test]
    fn test_reference_date_epoch() {
        let epoch = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(reference_date::to_seconds(&epoch), 0.0);
        assert_eq!(reference_date::from_seconds(0.0), Some(epoch));

        let before = Utc.with_ymd_and_hms(2000, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(reference_date::to_seconds(&before), -1.0);
    }

    #[test]
    fn test_reference_date_rejects_out_of_range() {
        assert!(reference_date::from_seconds(f64::NAN).is_none());
        assert!(reference_date::from_seconds(f64::INFINITY).is_none());
        assert!(reference_date::from_seconds(1e300).is_none());
    }

    #[test]
    fn test_reference_date_precision_range() {
        let micro = chrono::Duration::microseconds(1);
        let near = Utc.with_ymd_and_hms(2130, 6, 1, 0, 0, 0).unwrap() + micro;
        let far = Utc.with_ymd_and_hms(2300, 1, 1, 0, 0, 0).unwrap();

        assert!(reference_date::round_trips(&near));
        assert!(reference_date::round_trips(&far));
        assert!(!reference_date::round_trips(&(far + micro)));
    }

    #[test]
    fn test_wire_field_names() {
        let date = Utc.with_ymd_and_hms(2001, 1, 1, 0, 1, 0).unwrap();
        let record = Record::new("Salary", date, 1200.0, Category::Income);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["transactionName"], "Salary");
        assert_eq!(value["transactionDate"], 60.0);
        assert_eq!(value["transactionAmount"], 1200.0);
        assert_eq!(value["transactionCategoty"], "Income");
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_display() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let record = Record::new("Rent", date, 20.0, Category::Expense);
        assert_eq!(record.to_string(), "2024-06-01 Rent 20.00 (Expense)");
    }
}
