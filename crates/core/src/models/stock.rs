use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a stock item.
///
/// Fresh ids are UUID v4 strings, but ids read from an existing data file
/// are kept verbatim whatever their format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockId(String);

impl StockId {
    /// Generate a new random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    /// Assigned once at creation, never changed.
    pub id: StockId,

    /// Display name (at least 2 characters).
    pub name: String,

    /// Units in stock (strictly positive).
    pub amount: i64,

    /// Free text, 10..=200 characters.
    pub description: String,

    /// Absolute URL of a product image.
    pub image_url: String,
}

impl StockItem {
    /// Build an item with a freshly generated id.
    pub fn new(fields: StockFields) -> Self {
        Self::with_id(StockId::generate(), fields)
    }

    pub fn with_id(id: StockId, fields: StockFields) -> Self {
        Self {
            id,
            name: fields.name,
            amount: fields.amount,
            description: fields.description,
            image_url: fields.image_url,
        }
    }
}

/// Validated, typed item fields (everything but the id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockFields {
    pub name: String,
    pub amount: i64,
    pub description: String,
    pub image_url: String,
}

/// Raw form input for creating or editing a stock item.
///
/// Every field is text, exactly as typed; `amount` is coerced to a number
/// during validation so that "abc" or "1.5" become field violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDraft {
    pub name: String,
    pub amount: String,
    pub description: String,
    pub image_url: String,
}

impl StockDraft {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            description: description.into(),
            image_url: image_url.into(),
        }
    }
}

impl From<&StockItem> for StockDraft {
    /// Prefill a form from an existing item (used when an edit begins).
    fn from(item: &StockItem) -> Self {
        Self {
            name: item.name.clone(),
            amount: item.amount.to_string(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
        }
    }
}
