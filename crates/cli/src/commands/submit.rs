use serde_json::json;
use tracing::info;

use printmarket_core::ContactInfo;
use printmarket_store::QuoteStore;

use crate::commands::CommandResult;

/// Assembles the bulk quote request and logs it. There is no backend; the
/// logged payload is the submission. The cart is cleared afterwards, matching
/// the storefront behavior.
pub fn run(store: &mut QuoteStore, contact: ContactInfo) -> CommandResult {
    if store.is_empty() {
        return CommandResult::failure("submit", "empty_quote", "the quote cart is empty", 1);
    }

    if !contact.has_email() {
        return CommandResult::failure(
            "submit",
            "missing_contact",
            "a contact email is required for submission",
            2,
        );
    }

    let incomplete: Vec<_> = store
        .items()
        .iter()
        .filter_map(|item| {
            let readiness = store.readiness_of(item);
            if readiness.is_ready() {
                None
            } else {
                Some(format!(
                    "{}: {}",
                    item.slug,
                    readiness
                        .missing
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            }
        })
        .collect();

    if !incomplete.is_empty() {
        return CommandResult::failure(
            "submit",
            "incomplete_quote",
            format!("complete all items first ({})", incomplete.join("; ")),
            1,
        );
    }

    let request = store.submission(contact);
    let payload = match serde_json::to_value(&request) {
        Ok(payload) => payload,
        Err(error) => {
            return CommandResult::failure(
                "submit",
                "serialization",
                format!("could not encode the quote request: {error}"),
                3,
            );
        }
    };

    info!(request_id = %request.request_id, item_count = request.items.len(), "bulk quote request assembled");
    store.clear();

    CommandResult::success_with_data(
        "submit",
        format!("quote request {} assembled with {} item(s)", request.request_id, request.items.len()),
        Some(json!({ "request": payload })),
    )
}
