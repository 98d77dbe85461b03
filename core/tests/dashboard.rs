//! Reporting view tests — dashboard aggregates over live store state.

use ledger_core::{account::AccountStatus, engine::LedgerEngine, report};

fn engine() -> LedgerEngine {
    LedgerEngine::in_memory().unwrap()
}

#[test]
fn counts_accounts_and_sums_balances() {
    let mut engine = engine();
    engine
        .create_account("Mona Adel", "01012345678", None, 50.0)
        .unwrap();
    engine
        .create_account("Omar Said", "01198765432", None, 70.0)
        .unwrap();

    let metrics = report::dashboard_metrics(engine.store()).unwrap();
    assert_eq!(metrics.total_accounts, 2);
    assert_eq!(metrics.total_balance, 120.0);
}

#[test]
fn todays_flows_are_grouped_by_action() {
    let mut engine = engine();
    let a = engine
        .create_account("Mona Adel", "01012345678", None, 100.0)
        .unwrap();
    let b = engine
        .create_account("Omar Said", "01198765432", None, 0.0)
        .unwrap();

    engine.deposit(&a, 100.0).unwrap();
    engine.withdraw(&a, 30.0).unwrap();
    engine.transfer(&a, &b, 20.0).unwrap();

    let metrics = report::dashboard_metrics(engine.store()).unwrap();
    assert_eq!(metrics.today_deposits, 100.0);
    assert_eq!(metrics.today_withdrawals, 30.0);
    assert_eq!(metrics.today_transfers, 20.0);
}

#[test]
fn opening_balances_are_not_counted_as_deposits() {
    let mut engine = engine();
    engine
        .create_account("Mona Adel", "01012345678", None, 500.0)
        .unwrap();

    let metrics = report::dashboard_metrics(engine.store()).unwrap();
    assert_eq!(metrics.today_deposits, 0.0);
    assert_eq!(metrics.total_balance, 500.0);
}

#[test]
fn closed_accounts_remain_in_the_totals() {
    let mut engine = engine();
    let id = engine
        .create_account("Mona Adel", "01012345678", None, 80.0)
        .unwrap();
    engine.update_status(&id, AccountStatus::Closed).unwrap();

    let metrics = report::dashboard_metrics(engine.store()).unwrap();
    assert_eq!(metrics.total_accounts, 1);
    assert_eq!(metrics.total_balance, 80.0);
}
