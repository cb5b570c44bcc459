use serde_json::json;

use printmarket_core::QuoteItemDraft;
use printmarket_store::QuoteStore;

use crate::commands::CommandResult;

pub fn run(store: &mut QuoteStore, draft: QuoteItemDraft) -> CommandResult {
    let slug = draft.slug.clone();
    let merged = store.is_in_quote(&slug);
    let id = store.add(draft);

    let item = match store.item_for_slug(&slug) {
        Some(item) => item,
        None => {
            return CommandResult::failure(
                "add",
                "internal",
                format!("item `{slug}` missing right after add"),
                3,
            );
        }
    };
    let readiness = store.readiness_of(item);

    let message = if merged {
        format!("merged `{slug}` onto the existing cart entry")
    } else {
        format!("added `{slug}` to the quote cart")
    };

    CommandResult::success_with_data(
        "add",
        message,
        Some(json!({
            "id": id,
            "slug": slug,
            "merged": merged,
            "item_count": store.len(),
            "readiness": readiness.summary(),
        })),
    )
}
