use serde_json::json;

use printmarket_core::QuoteItemPatch;
use printmarket_store::QuoteStore;

use crate::commands::CommandResult;

pub fn run(store: &mut QuoteStore, id: &str, patch: QuoteItemPatch) -> CommandResult {
    let found = store.update(id, patch);

    let message = if found {
        format!("updated quote item `{id}`")
    } else {
        // Absent ids are ignored by the store; surface that without failing.
        format!("no quote item with id `{id}`, nothing changed")
    };

    CommandResult::success_with_data(
        "update",
        message,
        Some(json!({ "id": id, "found": found, "item_count": store.len() })),
    )
}
