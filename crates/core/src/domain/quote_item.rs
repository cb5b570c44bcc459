use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One product configuration a user wants a price quote for.
///
/// The `id` is assigned when the item enters the cart and is the sole key for
/// update/remove. `slug` identifies the product type and selects the registry
/// entry that governs readiness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub image_url: String,
    pub quantity: Option<String>,
    pub size: Option<String>,
    pub custom_width: Option<String>,
    pub custom_height: Option<String>,
    pub paper_type: Option<String>,
    pub color_option: Option<String>,
    pub notes: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
}

/// A quote item before the cart has assigned it an id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteItemDraft {
    pub slug: String,
    pub name: String,
    pub image_url: String,
    pub quantity: Option<String>,
    pub size: Option<String>,
    pub custom_width: Option<String>,
    pub custom_height: Option<String>,
    pub paper_type: Option<String>,
    pub color_option: Option<String>,
    pub notes: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub custom_fields: BTreeMap<String, String>,
}

/// Partial overlay applied to an existing item. Fields left as `None` keep
/// their current value; custom fields merge key by key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteItemPatch {
    pub quantity: Option<String>,
    pub size: Option<String>,
    pub custom_width: Option<String>,
    pub custom_height: Option<String>,
    pub paper_type: Option<String>,
    pub color_option: Option<String>,
    pub notes: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub custom_fields: BTreeMap<String, String>,
}

impl QuoteItemDraft {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self { slug: slug.into(), name: name.into(), image_url: image_url.into(), ..Self::default() }
    }

    pub fn into_item(self, id: String) -> QuoteItem {
        QuoteItem {
            id,
            slug: self.slug,
            name: self.name,
            image_url: self.image_url,
            quantity: self.quantity,
            size: self.size,
            custom_width: self.custom_width,
            custom_height: self.custom_height,
            paper_type: self.paper_type,
            color_option: self.color_option,
            notes: self.notes,
            deadline: self.deadline,
            custom_fields: self.custom_fields,
        }
    }

    pub fn into_patch(self) -> QuoteItemPatch {
        QuoteItemPatch {
            quantity: self.quantity,
            size: self.size,
            custom_width: self.custom_width,
            custom_height: self.custom_height,
            paper_type: self.paper_type,
            color_option: self.color_option,
            notes: self.notes,
            deadline: self.deadline,
            custom_fields: self.custom_fields,
        }
    }
}

impl QuoteItem {
    /// Merge a later draft for the same slug onto this item. The id is replaced
    /// by the freshly generated one, display metadata is taken from the new
    /// draft, and configuration fields overlay the existing values.
    pub fn absorb(&mut self, draft: QuoteItemDraft, id: String) {
        self.id = id;
        self.name = draft.name.clone();
        self.image_url = draft.image_url.clone();
        self.apply(draft.into_patch());
    }

    pub fn apply(&mut self, patch: QuoteItemPatch) {
        if let Some(quantity) = patch.quantity {
            self.quantity = Some(quantity);
        }
        if let Some(size) = patch.size {
            self.size = Some(size);
        }
        if let Some(custom_width) = patch.custom_width {
            self.custom_width = Some(custom_width);
        }
        if let Some(custom_height) = patch.custom_height {
            self.custom_height = Some(custom_height);
        }
        if let Some(paper_type) = patch.paper_type {
            self.paper_type = Some(paper_type);
        }
        if let Some(color_option) = patch.color_option {
            self.color_option = Some(color_option);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = Some(deadline);
        }
        self.custom_fields.extend(patch.custom_fields);
    }
}
