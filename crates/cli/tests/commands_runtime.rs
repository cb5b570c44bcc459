use printmarket_cli::commands::{add, clear, list, products, remove, submit, update};
use printmarket_core::{ContactInfo, QuoteItemDraft, QuoteItemPatch};
use printmarket_store::{InMemoryStorage, QuoteStore};
use serde_json::Value;

fn fresh_store() -> QuoteStore {
    QuoteStore::open(Box::new(InMemoryStorage::default()))
}

fn ready_draft(slug: &str) -> QuoteItemDraft {
    let mut draft = QuoteItemDraft::new(slug, slug, "");
    draft.quantity = Some("100".to_string());
    draft.size = Some("a4".to_string());
    draft.paper_type = Some("matte-130".to_string());
    draft.color_option = Some("4-0".to_string());
    draft
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

#[test]
fn add_reports_the_assigned_id_and_count() {
    let mut store = fresh_store();
    let result = add::run(&mut store, ready_draft("poster"));

    assert_eq!(result.exit_code, 0);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "add");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["data"]["merged"], false);
    assert_eq!(payload["data"]["item_count"], 1);
    assert_eq!(payload["data"]["readiness"], "Ready to quote");
    assert!(payload["data"]["id"].as_str().expect("id").starts_with("poster-"));
}

#[test]
fn second_add_of_the_same_slug_merges() {
    let mut store = fresh_store();
    add::run(&mut store, ready_draft("poster"));

    let mut again = QuoteItemDraft::new("poster", "Poster", "");
    again.size = Some("a1".to_string());
    let result = add::run(&mut store, again);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["merged"], true);
    assert_eq!(payload["data"]["item_count"], 1);
    let item = store.item_for_slug("poster").expect("poster entry");
    assert_eq!(item.size.as_deref(), Some("a1"));
    assert_eq!(item.quantity.as_deref(), Some("100"));
}

#[test]
fn update_of_an_absent_id_succeeds_without_changes() {
    let mut store = fresh_store();
    add::run(&mut store, ready_draft("flyer"));

    let result = update::run(&mut store, "missing-id", QuoteItemPatch::default());
    assert_eq!(result.exit_code, 0);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["found"], false);
    assert_eq!(payload["data"]["item_count"], 1);
}

#[test]
fn remove_twice_reports_the_second_as_noop() {
    let mut store = fresh_store();
    let add_payload = parse_payload(&add::run(&mut store, ready_draft("sticker")).output);
    let id = add_payload["data"]["id"].as_str().expect("id").to_string();

    let first = parse_payload(&remove::run(&mut store, &id).output);
    assert_eq!(first["data"]["removed"], true);

    let second = parse_payload(&remove::run(&mut store, &id).output);
    assert_eq!(second["data"]["removed"], false);
    assert_eq!(second["status"], "ok");
}

#[test]
fn list_includes_missing_fields_per_item() {
    let mut store = fresh_store();
    let mut calendar = ready_draft("calendar");
    calendar.deadline = None;
    add::run(&mut store, calendar);

    let payload = parse_payload(&list::run(&store).output);
    assert_eq!(payload["data"]["all_ready"], false);
    let items = payload["data"]["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["ready"], false);
    assert_eq!(items[0]["status"], "1 field needed");
    assert_eq!(items[0]["missing"][0], "deadline");
}

#[test]
fn products_lists_the_whole_catalog() {
    let store = fresh_store();
    let payload = parse_payload(&products::run(store.registry()).output);

    let listed = payload["data"]["products"].as_array().expect("products array");
    assert_eq!(listed.len(), 9);
    let calendar = listed
        .iter()
        .find(|p| p["slug"] == "calendar")
        .expect("calendar in catalog");
    assert_eq!(calendar["has_deadline"], true);
    assert_eq!(calendar["custom_fields"][0], "year");
}

#[test]
fn submit_rejects_an_empty_cart() {
    let mut store = fresh_store();
    let contact = ContactInfo { email: "print@example.com".to_string(), ..ContactInfo::default() };

    let result = submit::run(&mut store, contact);
    assert_eq!(result.exit_code, 1);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "empty_quote");
}

#[test]
fn submit_requires_a_contact_email() {
    let mut store = fresh_store();
    add::run(&mut store, ready_draft("poster"));

    let result = submit::run(&mut store, ContactInfo::default());
    assert_eq!(result.exit_code, 2);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "missing_contact");
}

#[test]
fn submit_rejects_incomplete_items_with_their_missing_fields() {
    let mut store = fresh_store();
    let mut poster = ready_draft("poster");
    poster.size = Some("custom".to_string());
    add::run(&mut store, poster);

    let contact = ContactInfo { email: "print@example.com".to_string(), ..ContactInfo::default() };
    let result = submit::run(&mut store, contact);

    assert_eq!(result.exit_code, 1);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "incomplete_quote");
    let message = payload["message"].as_str().expect("message");
    assert!(message.contains("custom dimensions"));
}

#[test]
fn successful_submit_logs_the_payload_and_clears_the_cart() {
    let mut store = fresh_store();
    add::run(&mut store, ready_draft("poster"));
    add::run(&mut store, ready_draft("flyer"));

    let contact = ContactInfo {
        email: "print@example.com".to_string(),
        phone: "+45 12 34 56 78".to_string(),
        notes: "deliver to the studio".to_string(),
    };
    let result = submit::run(&mut store, contact);

    assert_eq!(result.exit_code, 0);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "ok");
    let request = &payload["data"]["request"];
    assert_eq!(request["contact"]["email"], "print@example.com");
    assert_eq!(request["items"].as_array().expect("items").len(), 2);
    assert!(request["request_id"].as_str().expect("request id").len() > 0);

    assert!(store.is_empty());
}

#[test]
fn clear_reports_how_many_items_were_dropped() {
    let mut store = fresh_store();
    add::run(&mut store, ready_draft("poster"));
    add::run(&mut store, ready_draft("flyer"));

    let payload = parse_payload(&clear::run(&mut store).output);
    assert_eq!(payload["data"]["removed"], 2);
    assert!(store.is_empty());
}
