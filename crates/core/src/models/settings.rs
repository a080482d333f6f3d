use serde::{Deserialize, Serialize};

/// Location shown for a store that has never been configured.
pub const DEFAULT_MARKET_LOCATION: &str = "Downtown Store";

/// Market-wide settings, stored next to the stock list in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSettings {
    /// Where the market is (e.g., "Downtown Store").
    pub market_location: String,

    /// `true` when the market is open.
    #[serde(default = "default_open")]
    pub market_status: bool,

    /// Why the market is closed. Required (>= 10 chars) only while closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closure_reason: Option<String>,
}

fn default_open() -> bool {
    true
}

impl MarketSettings {
    /// An open market at `location`.
    pub fn open(location: impl Into<String>) -> Self {
        Self {
            market_location: location.into(),
            market_status: true,
            closure_reason: None,
        }
    }

    /// A closed market at `location` with the given reason.
    pub fn closed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            market_location: location.into(),
            market_status: false,
            closure_reason: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.market_status
    }
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self::open(DEFAULT_MARKET_LOCATION)
    }
}
