use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::payload::StockDataPayload;

use super::format::{self, DocumentShape, DATA_FILE_NAME};

/// Owner of the persisted stock document.
///
/// Injected into the HTTP handlers so they never touch the filesystem
/// directly. Implementations never retry; errors go back to the caller.
pub trait StockStore: Send + Sync {
    /// Read the whole document, creating it with defaults if it does not exist yet.
    fn load(&self) -> Result<StockDataPayload, CoreError>;

    /// Replace the whole document. Never merges.
    fn save(&self, payload: &StockDataPayload) -> Result<(), CoreError>;
}

/// `StockStore` backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `data.json` in the current working directory.
    pub fn default_location() -> Self {
        Self::new(DATA_FILE_NAME)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh sibling of the data file, unique per save.
    fn temp_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DATA_FILE_NAME.to_string());
        self.path
            .with_file_name(format!(".{stem}-{}.tmp", Uuid::new_v4()))
    }
}

impl StockStore for JsonFileStore {
    fn load(&self) -> Result<StockDataPayload, CoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let payload = StockDataPayload::default();
                self.save(&payload)?;
                tracing::info!(path = %self.path.display(), "created data file with defaults");
                return Ok(payload);
            }
            Err(e) => {
                return Err(CoreError::StoreIo(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        match format::read_document(&text)? {
            // An empty file is served as the default but left untouched.
            DocumentShape::Empty => Ok(StockDataPayload::default()),
            DocumentShape::Combined(payload) => Ok(payload),
            DocumentShape::LegacyItems(stocks) => {
                let count = stocks.len();
                let payload = StockDataPayload::from_legacy(stocks);
                self.save(&payload)?;
                tracing::info!(
                    path = %self.path.display(),
                    items = count,
                    "upgraded legacy stock list to combined document"
                );
                Ok(payload)
            }
        }
    }

    fn save(&self, payload: &StockDataPayload) -> Result<(), CoreError> {
        let json = format::write_document(payload)?;
        let tmp = self.temp_path();

        std::fs::write(&tmp, json).map_err(|e| {
            CoreError::StoreIo(format!("Failed to write {}: {e}", tmp.display()))
        })?;

        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(CoreError::StoreIo(format!(
                "Failed to replace {}: {e}",
                self.path.display()
            )));
        }

        tracing::debug!(
            path = %self.path.display(),
            stocks = payload.stocks.len(),
            "saved stock data"
        );
        Ok(())
    }
}
