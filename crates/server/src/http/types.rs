use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stockflow_core::storage::manager::StockStore;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StockStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn StockStore>) -> Self {
        Self { store }
    }
}

/// `{ "message": "..." }`, used for every non-payload response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
