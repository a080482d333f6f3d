use serde_json::Value;

use crate::errors::CoreError;
use crate::models::payload::StockDataPayload;
use crate::models::stock::StockItem;

/// File name of the data document, relative to the working directory.
pub const DATA_FILE_NAME: &str = "data.json";

/// What a data file turned out to contain.
///
/// Older deployments persisted a bare item array; the current shape is the
/// combined `{ stocks, marketSettings }` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentShape {
    /// Zero bytes or whitespace only.
    Empty,
    /// `{ "stocks": [...], "marketSettings": {...} }`
    Combined(StockDataPayload),
    /// `[ {...}, {...} ]` (needs an upgrade before it can be served).
    LegacyItems(Vec<StockItem>),
}

/// Classify and parse the text of a data file.
///
/// Anything that is not one of the two known shapes is `CorruptStore`;
/// nothing is repaired here.
pub fn read_document(text: &str) -> Result<DocumentShape, CoreError> {
    if text.trim().is_empty() {
        return Ok(DocumentShape::Empty);
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|e| CoreError::CorruptStore(format!("Data file is not valid JSON: {e}")))?;

    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map(DocumentShape::Combined)
            .map_err(|e| CoreError::CorruptStore(format!("Data file has an invalid layout: {e}"))),
        Value::Array(_) => serde_json::from_value(value)
            .map(DocumentShape::LegacyItems)
            .map_err(|e| {
                CoreError::CorruptStore(format!("Legacy stock list has invalid items: {e}"))
            }),
        other => Err(CoreError::CorruptStore(format!(
            "Data file must hold an object or an array, found {}",
            json_kind(&other)
        ))),
    }
}

/// Serialize a payload the way it is stored and served: pretty-printed, 2-space indent.
pub fn write_document(payload: &StockDataPayload) -> Result<String, CoreError> {
    serde_json::to_string_pretty(payload)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize stock data: {e}")))
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
