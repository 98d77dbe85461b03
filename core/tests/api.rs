//! Call-surface tests — every reply carries the (ok, message, error
//! kind) triple the presentation collaborator depends on.

use ledger_core::{
    api::LedgerApi,
    engine::LedgerEngine,
    error::ErrorKind,
    history::HistoryFilter,
};

fn api() -> LedgerApi {
    LedgerApi::new(LedgerEngine::in_memory().unwrap())
}

#[test]
fn successful_mutation_replies_carry_value_and_message() {
    let api = api();
    let reply = api.create_account("Mona Adel", "01012345678", None, Some(50.0));
    assert!(reply.ok);
    assert!(reply.error.is_none());
    assert_eq!(reply.value, Some(serde_json::json!("1001")));
    assert!(reply.message.contains("1001"));

    let reply = api.deposit("1001", 100.0);
    assert!(reply.ok);
    assert_eq!(reply.value, Some(serde_json::json!(150.0)));
}

#[test]
fn failed_mutation_replies_carry_the_error_kind() {
    let api = api();
    api.create_account("Mona Adel", "01012345678", None, Some(50.0));

    let reply = api.deposit("1001", -5.0);
    assert!(!reply.ok);
    assert_eq!(reply.error, Some(ErrorKind::InvalidAmount));
    assert!(!reply.message.is_empty());

    let reply = api.withdraw("1001", 500.0);
    assert_eq!(reply.error, Some(ErrorKind::InsufficientFunds));

    let reply = api.transfer("1001", "1001", 1.0);
    assert_eq!(reply.error, Some(ErrorKind::SameAccount));
}

#[test]
fn status_strings_are_parsed_at_the_boundary() {
    let api = api();
    api.create_account("Mona Adel", "01012345678", None, None);

    let reply = api.update_status("1001", "Frozen");
    assert!(reply.ok, "mixed-case status strings are accepted");

    let reply = api.update_status("1001", "dormant");
    assert!(!reply.ok);
    assert_eq!(reply.error, Some(ErrorKind::InvalidStatus));
}

#[test]
fn get_account_serializes_the_record() {
    let api = api();
    api.create_account("Mona Adel", "01012345678", None, Some(75.0));

    let reply = api.get_account("1001");
    assert!(reply.ok);
    let value = reply.value.expect("record payload");
    assert_eq!(value["owner_name"], "Mona Adel");
    assert_eq!(value["balance"], 75.0);
    assert_eq!(value["status"], "active");

    let reply = api.get_account("4242");
    assert!(!reply.ok);
    assert_eq!(reply.error, Some(ErrorKind::AccountNotFound));
}

#[test]
fn history_and_dashboard_replies_serialize() {
    let api = api();
    api.create_account("Mona Adel", "01012345678", None, Some(50.0));
    api.deposit("1001", 25.0);

    let reply = api.history_for("1001");
    assert!(reply.ok);
    let entries = reply.value.expect("history payload");
    assert_eq!(entries.as_array().map(|a| a.len()), Some(2));

    let reply = api.filtered_history(&HistoryFilter::default());
    assert!(reply.ok);

    let reply = api.dashboard_metrics();
    assert!(reply.ok);
    let metrics = reply.value.expect("metrics payload");
    assert_eq!(metrics["total_accounts"], 1);
    assert_eq!(metrics["today_deposits"], 25.0);
}

#[test]
fn replies_serialize_without_empty_optional_fields() {
    let api = api();
    let reply = api.create_account("Mona Adel", "01012345678", None, None);
    let json = serde_json::to_string(&reply).unwrap();
    assert!(json.contains("\"ok\":true"));
    assert!(!json.contains("\"error\""));
}
