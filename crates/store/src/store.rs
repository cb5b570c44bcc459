use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use printmarket_core::domain::quote_item::{QuoteItem, QuoteItemDraft, QuoteItemPatch};
use printmarket_core::domain::submission::{BulkQuoteRequest, ContactInfo};
use printmarket_core::readiness::{self, ReadinessReport};
use printmarket_core::registry::ProductRegistry;

use crate::storage::QuoteStorage;

/// Exclusive owner of the quote-item collection. All operations are total:
/// absent ids are ignored, storage failures are logged and swallowed, and the
/// store degrades to memory-only when its backing cannot be written.
pub struct QuoteStore {
    items: Vec<QuoteItem>,
    registry: ProductRegistry,
    storage: Box<dyn QuoteStorage>,
}

impl QuoteStore {
    /// Loads prior state from the given backing. A missing or unreadable
    /// collection is treated as an empty cart, never surfaced.
    pub fn open(storage: Box<dyn QuoteStorage>) -> Self {
        Self::open_with_registry(storage, ProductRegistry::standard())
    }

    pub fn open_with_registry(storage: Box<dyn QuoteStorage>, registry: ProductRegistry) -> Self {
        let items = match storage.load() {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, "discarding unreadable quote state, starting empty");
                Vec::new()
            }
        };

        Self { items, registry, storage }
    }

    /// Adds a draft to the cart and returns the assigned id. A draft whose
    /// slug is already present overlays the existing entry instead of growing
    /// the collection, and that entry takes the new id.
    pub fn add(&mut self, draft: QuoteItemDraft) -> String {
        let id = format!("{}-{}", draft.slug, Utc::now().timestamp_millis());

        match self.items.iter_mut().find(|item| item.slug == draft.slug) {
            Some(existing) => existing.absorb(draft, id.clone()),
            None => self.items.push(draft.into_item(id.clone())),
        }

        self.persist();
        id
    }

    /// Merges the patch onto the item with the given id. Unknown ids are a
    /// no-op, not an error. Returns whether a matching item was found.
    pub fn update(&mut self, id: &str, patch: QuoteItemPatch) -> bool {
        let found = match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.apply(patch);
                true
            }
            None => false,
        };

        self.persist();
        found
    }

    /// Removes the item with the given id. Idempotent: a second call for the
    /// same id is a no-op. Returns whether an item was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.persist();
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    pub fn is_in_quote(&self, slug: &str) -> bool {
        self.items.iter().any(|item| item.slug == slug)
    }

    pub fn item_for_slug(&self, slug: &str) -> Option<&QuoteItem> {
        self.items.iter().find(|item| item.slug == slug)
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    pub fn readiness_of(&self, item: &QuoteItem) -> ReadinessReport {
        readiness::assess(item, self.registry.config_for(&item.slug))
    }

    pub fn all_ready(&self) -> bool {
        self.items.iter().all(|item| self.readiness_of(item).is_ready())
    }

    /// Snapshot of the current cart plus contact details, ready to hand to a
    /// submission target.
    pub fn submission(&self, contact: ContactInfo) -> BulkQuoteRequest {
        BulkQuoteRequest {
            request_id: Uuid::new_v4(),
            items: self.items.clone(),
            contact,
            submitted_at: Utc::now(),
        }
    }

    fn persist(&self) {
        if let Err(error) = self.storage.save(&self.items) {
            warn!(%error, "could not persist quote state, continuing in memory");
        }
    }
}
