use serde_json::json;

use printmarket_store::QuoteStore;

use crate::commands::CommandResult;

pub fn run(store: &QuoteStore) -> CommandResult {
    let items: Vec<_> = store
        .items()
        .iter()
        .map(|item| {
            let readiness = store.readiness_of(item);
            json!({
                "id": item.id,
                "slug": item.slug,
                "name": item.name,
                "ready": readiness.is_ready(),
                "status": readiness.summary(),
                "missing": readiness
                    .missing
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let count = items.len();
    CommandResult::success_with_data(
        "list",
        format!("{count} item(s) in the quote cart"),
        Some(json!({ "items": items, "all_ready": store.all_ready() })),
    )
}
