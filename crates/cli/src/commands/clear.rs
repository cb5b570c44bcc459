use serde_json::json;

use printmarket_store::QuoteStore;

use crate::commands::CommandResult;

pub fn run(store: &mut QuoteStore) -> CommandResult {
    let removed = store.len();
    store.clear();

    CommandResult::success_with_data(
        "clear",
        format!("cleared {removed} item(s) from the quote cart"),
        Some(json!({ "removed": removed })),
    )
}
