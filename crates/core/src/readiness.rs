use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::quote_item::QuoteItem;
use crate::registry::ProductConfig;

/// A required field the item has not filled in yet. `Display` renders the
/// user-facing name shown in the missing-fields message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    Quantity,
    Size,
    PaperType,
    ColorOption,
    CustomDimensions,
    Deadline,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Quantity => "quantity",
            Self::Size => "size",
            Self::PaperType => "paper type",
            Self::ColorOption => "color",
            Self::CustomDimensions => "custom dimensions",
            Self::Deadline => "deadline",
        };
        f.write_str(name)
    }
}

/// Whether a quote item has enough information to be submitted. Informational,
/// never an error: an incomplete item only gates submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub missing: Vec<MissingField>,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn summary(&self) -> String {
        match self.missing.len() {
            0 => "Ready to quote".to_string(),
            1 => "1 field needed".to_string(),
            n => format!("{n} fields needed"),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Pure readiness check for one item against its registry entry. Every
/// condition is evaluated independently so the report lists all failing
/// fields at once.
///
/// Registry-declared custom fields and file upload are intentionally not
/// required here, matching the product's current (lax) behavior.
pub fn assess(item: &QuoteItem, config: &ProductConfig) -> ReadinessReport {
    let mut missing = Vec::new();

    if is_blank(item.quantity.as_deref()) {
        missing.push(MissingField::Quantity);
    }
    if is_blank(item.size.as_deref()) {
        missing.push(MissingField::Size);
    }
    if is_blank(item.paper_type.as_deref()) {
        missing.push(MissingField::PaperType);
    }
    if is_blank(item.color_option.as_deref()) {
        missing.push(MissingField::ColorOption);
    }
    if item.size.as_deref() == Some("custom")
        && (is_blank(item.custom_width.as_deref()) || is_blank(item.custom_height.as_deref()))
    {
        missing.push(MissingField::CustomDimensions);
    }
    if config.has_deadline && item.deadline.is_none() {
        missing.push(MissingField::Deadline);
    }

    ReadinessReport { missing }
}
