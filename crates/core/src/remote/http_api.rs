use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::payload::StockDataPayload;
use super::traits::StockApi;

/// Path of the stock resource on the server.
pub const STOCKS_PATH: &str = "/api/stocks";

/// Requests that take longer than this fail as `CoreError::Network`.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `StockApi` over HTTP, against a StockFlow server.
pub struct HttpStockApi {
    client: Client,
    url: String,
}

impl HttpStockApi {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:9002`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        let url = format!("{}{STOCKS_PATH}", base_url.as_ref().trim_end_matches('/'));
        Self { client, url }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

// ── Response bodies ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// Turn a non-2xx response into `CoreError::Api`, keeping the server's message.
async fn check_status(resp: Response) -> Result<Response, CoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = match resp.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(%status, error = %e, "failed to read error response body");
            String::new()
        }
    };
    let message = serde_json::from_str::<MessageBody>(&text)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });
    Err(CoreError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl StockApi for HttpStockApi {
    async fn fetch_all(&self) -> Result<StockDataPayload, CoreError> {
        tracing::debug!(url = %self.url, "fetching stock data");
        let resp = self.client.get(&self.url).send().await?;
        let resp = check_status(resp).await?;
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse stock data response: {e}"))
        })
    }

    async fn replace_all(&self, payload: &StockDataPayload) -> Result<String, CoreError> {
        tracing::debug!(url = %self.url, stocks = payload.stocks.len(), "submitting stock data");
        let resp = self.client.post(&self.url).json(payload).send().await?;
        let resp = check_status(resp).await?;
        let text = resp.text().await?;
        let body: MessageBody = serde_json::from_str(&text).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse save response: {e}"))
        })?;
        Ok(body.message)
    }
}
