use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use printmarket_core::QuoteItem;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failure: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode quote state: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not decode quote state: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Durable backing for the quote collection. One logical key holds the whole
/// serialized collection; `load` returns `None` when no prior state exists.
pub trait QuoteStorage: Send {
    fn load(&self) -> Result<Option<Vec<QuoteItem>>, StorageError>;
    fn save(&self, items: &[QuoteItem]) -> Result<(), StorageError>;
}

/// Whole-collection JSON document at a fixed path.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl QuoteStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<QuoteItem>>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let items = serde_json::from_str(&raw).map_err(StorageError::Decode)?;
        Ok(Some(items))
    }

    fn save(&self, items: &[QuoteItem]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = serde_json::to_string_pretty(items).map_err(StorageError::Encode)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}

/// Session-only backing, used in tests and as the degraded mode when durable
/// storage is disabled.
#[derive(Default)]
pub struct InMemoryStorage {
    items: Mutex<Option<Vec<QuoteItem>>>,
}

impl QuoteStorage for InMemoryStorage {
    fn load(&self) -> Result<Option<Vec<QuoteItem>>, StorageError> {
        let items = self.items.lock().map(|guard| (*guard).clone()).unwrap_or_default();
        Ok(items)
    }

    fn save(&self, items: &[QuoteItem]) -> Result<(), StorageError> {
        if let Ok(mut guard) = self.items.lock() {
            *guard = Some(items.to_vec());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use printmarket_core::QuoteItemDraft;

    use super::{InMemoryStorage, JsonFileStorage, QuoteStorage};

    #[test]
    fn file_storage_reports_no_state_for_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("quote.json"));
        assert!(storage.load().expect("load").is_none());
    }

    #[test]
    fn file_storage_round_trips_the_collection() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("nested/quote.json"));

        let items = vec![
            QuoteItemDraft::new("poster", "Poster", "/poster.jpg").into_item("poster-1".into()),
            QuoteItemDraft::new("flyer", "Flyer", "/flyer.jpg").into_item("flyer-1".into()),
        ];
        storage.save(&items).expect("save");

        let loaded = storage.load().expect("load").expect("prior state");
        assert_eq!(loaded, items);
    }

    #[test]
    fn file_storage_rejects_corrupt_state() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("quote.json");
        std::fs::write(&path, "{not json").expect("write corrupt file");

        let storage = JsonFileStorage::new(path);
        assert!(storage.load().is_err());
    }

    #[test]
    fn in_memory_storage_round_trips() {
        let storage = InMemoryStorage::default();
        assert!(storage.load().expect("load").is_none());

        let items =
            vec![QuoteItemDraft::new("sticker", "Sticker", "").into_item("sticker-1".into())];
        storage.save(&items).expect("save");
        assert_eq!(storage.load().expect("load"), Some(items));
    }
}
