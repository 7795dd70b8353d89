//! Bot collection export/import file format
//!
//! Files are UTF-8 JSON objects mapping arbitrary keys to bot-shaped
//! records. An `id` inside a record is ignored on import: creation assigns
//! a new one.

use super::aggregate::{BotCollection, BotFields};
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Import file must contain a JSON object of bots")]
    NotAnObject,
}

/// One record of an import file
#[derive(Debug, Clone, PartialEq)]
pub struct ImportEntry {
    pub key: String,
    /// Fields to create, or why the record could not be read
    pub fields: Result<BotFields, String>,
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("mybots-export-{}.json", date.format("%Y-%m-%d"))
}

pub fn export_bots(bots: &BotCollection) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(bots)
}

/// Parse an import file into its entries, in key order.
///
/// Fails only when the file is not JSON or its top-level value is not an
/// object; unreadable records are reported per entry.
pub fn parse_import(text: &str) -> Result<Vec<ImportEntry>, ImportError> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Object(map) = root else {
        return Err(ImportError::NotAnObject);
    };

    let entries = map
        .into_iter()
        .map(|(key, value)| {
            let fields = match value {
                Value::Object(_) => {
                    serde_json::from_value::<BotFields>(value).map_err(|e| e.to_string())
                }
                other => Err(format!("expected an object, found {}", json_kind(&other))),
            };
            ImportEntry { key, fields }
        })
        .collect();

    Ok(entries)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
