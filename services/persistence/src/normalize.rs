//! Stored-shape normalization
//!
//! Whatever a backend hands back is turned into an ordered sequence of
//! match records here and nowhere else. Accepted shapes:
//!
//! - a JSON array of records
//! - an object wrapping the array as `{"matches": [...]}`
//! - a JSON string holding either of the above (double-encoded payloads)
//! - `null`, which is an empty ledger
//!
//! Anything else reads as empty. Elements that are not valid records are
//! dropped with a warning so one bad entry cannot hide the rest.

use serde_json::Value;
use tracing::warn;
use types::matches::MatchRecord;

/// Normalize a stored value into the ledger sequence.
pub fn normalize_ledger(value: Value) -> Vec<MatchRecord> {
    match value {
        Value::Array(items) => decode_records(items),
        Value::Object(mut map) => match map.remove("matches") {
            Some(inner @ Value::Array(_)) => normalize_ledger(inner),
            _ => {
                warn!("stored ledger is an object without a matches array; reading as empty");
                Vec::new()
            }
        },
        Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
            Ok(Value::String(_)) => {
                warn!("stored ledger is encoded more than twice; reading as empty");
                Vec::new()
            }
            Ok(inner) => normalize_ledger(inner),
            Err(e) => {
                warn!(error = %e, "stored ledger string is not JSON; reading as empty");
                Vec::new()
            }
        },
        Value::Null => Vec::new(),
        other => {
            warn!(kind = value_kind(&other), "stored ledger has an unexpected shape; reading as empty");
            Vec::new()
        }
    }
}

/// Parse raw stored bytes and normalize them.
pub fn decode_ledger(bytes: &[u8]) -> Result<Vec<MatchRecord>, serde_json::Error> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(normalize_ledger(value))
}

/// Serialize the ledger as the canonical stored document.
pub fn encode_ledger(matches: &[MatchRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(matches)
}

fn decode_records(items: Vec<Value>) -> Vec<MatchRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<MatchRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed match record");
                None
            }
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
