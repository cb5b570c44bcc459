pub mod storage;
pub mod store;

pub use storage::{InMemoryStorage, JsonFileStorage, QuoteStorage, StorageError};
pub use store::QuoteStore;
