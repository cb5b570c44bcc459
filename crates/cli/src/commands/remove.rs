use serde_json::json;

use printmarket_store::QuoteStore;

use crate::commands::CommandResult;

pub fn run(store: &mut QuoteStore, id: &str) -> CommandResult {
    let removed = store.remove(id);

    let message = if removed {
        format!("removed quote item `{id}`")
    } else {
        format!("no quote item with id `{id}`, nothing removed")
    };

    CommandResult::success_with_data(
        "remove",
        message,
        Some(json!({ "id": id, "removed": removed, "item_count": store.len() })),
    )
}
