//! Reporting view — read-only aggregates and history projections.
//! Derives everything from the store; performs no mutation.

use crate::{
    error::LedgerResult,
    history::{HistoryAction, HistoryEntry, HistoryFilter},
    store::LedgerStore,
};
use chrono::Local;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub total_accounts: i64,
    pub total_balance: f64,
    pub today_deposits: f64,
    pub today_withdrawals: f64,
    pub today_transfers: f64,
}

/// Aggregate snapshot for the operator dashboard. "Today" is the
/// current calendar day, not a trailing 24-hour window.
pub fn dashboard_metrics(store: &LedgerStore) -> LedgerResult<DashboardMetrics> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    Ok(DashboardMetrics {
        total_accounts: store.account_count()?,
        total_balance: store.total_balance()?,
        today_deposits: store.sum_for_day(HistoryAction::Deposit, &today)?,
        today_withdrawals: store.sum_for_day(HistoryAction::Withdraw, &today)?,
        today_transfers: store.sum_for_day(HistoryAction::Transfer, &today)?,
    })
}

/// Entries where the account is either side of the movement, oldest
/// first.
pub fn history_for(store: &LedgerStore, account_id: &str) -> LedgerResult<Vec<HistoryEntry>> {
    store.history_for_account(account_id)
}

/// Filter the full log, preserving insertion order.
pub fn filtered_history(
    store: &LedgerStore,
    filter: &HistoryFilter,
) -> LedgerResult<Vec<HistoryEntry>> {
    Ok(store
        .all_history()?
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect())
}
