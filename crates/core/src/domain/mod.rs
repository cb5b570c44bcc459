pub mod quote_item;
pub mod submission;
