use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::quote_item::QuoteItem;

/// Contact details collected alongside a bulk quote request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// The assembled payload handed to a submission target. There is no real
/// backend; callers log the payload and clear the cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkQuoteRequest {
    pub request_id: Uuid,
    pub items: Vec<QuoteItem>,
    pub contact: ContactInfo,
    pub submitted_at: DateTime<Utc>,
}

impl ContactInfo {
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}
