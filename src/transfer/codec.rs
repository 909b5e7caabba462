//! Record payload codec
//!
//! The plaintext inside a sealed export is a compact JSON array of records
//! using the wire field names from `models::record`. Decoding is
//! whole-payload: one bad record rejects the file.

use crate::error::{TxsealError, TxsealResult};
use crate::models::record::reference_date;
use crate::models::Record;

/// Serialize records, preserving their order
///
/// Fails for non-finite amounts, which JSON cannot represent, and for dates
/// the timestamp encoding would shift.
pub fn encode(records: &[Record]) -> TxsealResult<Vec<u8>> {
    for (index, record) in records.iter().enumerate() {
        if !record.amount.is_finite() {
            return Err(TxsealError::Encode(format!(
                "record {} has a non-finite amount: {}",
                index, record.amount
            )));
        }
        if !reference_date::round_trips(&record.date) {
            return Err(TxsealError::Encode(format!(
                "record {} has a date that cannot be stored exactly: {}",
                index,
                record.date.to_rfc3339()
            )));
        }
    }

    serde_json::to_vec(records).map_err(|e| TxsealError::Encode(e.to_string()))
}

/// Deserialize records in payload order
pub fn decode(bytes: &[u8]) -> TxsealResult<Vec<Record>> {
    serde_json::from_slice(bytes).map_err(|e| TxsealError::Decode(e.to_string()))
}
