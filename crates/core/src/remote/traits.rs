use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::payload::StockDataPayload;

/// Client-side view of the `/api/stocks` resource.
///
/// `HttpStockApi` talks to a running server; tests and embedders can plug in
/// any other implementation (an in-process store, a scripted mock).
#[async_trait]
pub trait StockApi: Send + Sync {
    /// `GET`: the whole persisted document.
    async fn fetch_all(&self) -> Result<StockDataPayload, CoreError>;

    /// `POST`: replace the whole persisted document. Returns the server's message.
    async fn replace_all(&self, payload: &StockDataPayload) -> Result<String, CoreError>;
}
