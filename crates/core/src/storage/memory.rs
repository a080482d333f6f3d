use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::CoreError;
use crate::models::payload::StockDataPayload;

use super::manager::StockStore;

/// In-process `StockStore`, for embedding and tests.
///
/// Behaves like the file store (an untouched store loads as the default
/// document) and can be told to fail, to exercise the error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<StockDataPayload>>,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: StockDataPayload) -> Self {
        Self {
            document: Mutex::new(Some(payload)),
            ..Self::default()
        }
    }

    pub fn set_fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    /// Current document, without the create-on-first-read side effect.
    pub fn snapshot(&self) -> Option<StockDataPayload> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl StockStore for MemoryStore {
    fn load(&self) -> Result<StockDataPayload, CoreError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(CoreError::StoreIo("simulated read failure".into()));
        }
        let mut doc = self
            .document
            .lock()
            .map_err(|_| CoreError::StoreIo("store lock poisoned".into()))?;
        Ok(doc.get_or_insert_with(StockDataPayload::default).clone())
    }

    fn save(&self, payload: &StockDataPayload) -> Result<(), CoreError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(CoreError::StoreIo("simulated write failure".into()));
        }
        let mut doc = self
            .document
            .lock()
            .map_err(|_| CoreError::StoreIo("store lock poisoned".into()))?;
        *doc = Some(payload.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
