use serde::{Deserialize, Serialize};

use super::settings::MarketSettings;
use super::stock::{StockId, StockItem};

/// The whole persisted document: every stock item plus the market settings.
///
/// This is also the body of `GET` and `POST /api/stocks`; the API never
/// exposes partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDataPayload {
    /// Newest first.
    pub stocks: Vec<StockItem>,

    pub market_settings: MarketSettings,
}

impl StockDataPayload {
    pub fn new(stocks: Vec<StockItem>, market_settings: MarketSettings) -> Self {
        Self {
            stocks,
            market_settings,
        }
    }

    /// Wrap a legacy bare item list with default market settings.
    pub fn from_legacy(stocks: Vec<StockItem>) -> Self {
        Self::new(stocks, MarketSettings::default())
    }

    #[must_use]
    pub fn find(&self, id: &StockId) -> Option<&StockItem> {
        self.stocks.iter().find(|s| &s.id == id)
    }

    #[must_use]
    pub fn position(&self, id: &StockId) -> Option<usize> {
        self.stocks.iter().position(|s| &s.id == id)
    }
}
