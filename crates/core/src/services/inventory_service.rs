use crate::errors::CoreError;
use crate::models::payload::StockDataPayload;
use crate::models::settings::MarketSettings;
use crate::models::stock::{StockFields, StockId, StockItem};

/// Add / edit / remove operations on a working copy.
///
/// Pure collection logic: callers validate first, this only moves items.
pub struct InventoryService;

impl InventoryService {
    pub fn new() -> Self {
        Self
    }

    /// Create an item with a fresh id and put it at the front (newest first).
    pub fn add_item(&self, payload: &mut StockDataPayload, fields: StockFields) -> StockId {
        let item = StockItem::new(fields);
        let id = item.id.clone();
        payload.stocks.insert(0, item);
        id
    }

    /// Replace the fields of the item with `id`, keeping its id and position.
    pub fn replace_item(
        &self,
        payload: &mut StockDataPayload,
        id: &StockId,
        fields: StockFields,
    ) -> Result<(), CoreError> {
        let slot = payload
            .stocks
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;
        *slot = StockItem::with_id(id.clone(), fields);
        Ok(())
    }

    /// Remove the item with `id`. Returns `false` (and changes nothing) when absent.
    pub fn remove_item(&self, payload: &mut StockDataPayload, id: &StockId) -> bool {
        match payload.position(id) {
            Some(idx) => {
                payload.stocks.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn set_market_settings(&self, payload: &mut StockDataPayload, settings: MarketSettings) {
        payload.market_settings = settings;
    }
}

impl Default for InventoryService {
    fn default() -> Self {
        Self::new()
    }
}
