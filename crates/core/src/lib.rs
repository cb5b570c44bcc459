pub mod config;
pub mod domain;
pub mod readiness;
pub mod registry;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::quote_item::{QuoteItem, QuoteItemDraft, QuoteItemPatch};
pub use domain::submission::{BulkQuoteRequest, ContactInfo};
pub use readiness::{assess, MissingField, ReadinessReport};
pub use registry::{CustomField, CustomFieldKind, OptionChoice, ProductConfig, ProductRegistry};
