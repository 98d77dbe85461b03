//! History log model — the append-only audit trail.
//!
//! RULE: entries are written once, in the same transaction as the
//! mutation they record, and never edited afterwards.

use crate::types::AccountId;
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every state-changing operation the ledger records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Create,
    Deposit,
    Withdraw,
    Transfer,
    UpdateStatus,
    CustomerUpdate,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Transfer => "transfer",
            Self::UpdateStatus => "update_status",
            Self::CustomerUpdate => "customer_update",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            "transfer" => Ok(Self::Transfer),
            "update_status" => Ok(Self::UpdateStatus),
            "customer_update" => Ok(Self::CustomerUpdate),
            other => Err(format!("unknown history action '{other}'")),
        }
    }
}

/// One audit row. `to_account` is set only for transfers; `amount` is
/// zero for non-monetary actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Option<i64>,
    pub action: HistoryAction,
    pub account: AccountId,
    pub to_account: Option<AccountId>,
    pub amount: f64,
    pub timestamp: NaiveDateTime,
}

impl HistoryEntry {
    /// A fresh entry stamped with the current wall-clock time.
    pub fn record(action: HistoryAction, account: &str, amount: f64) -> Self {
        Self {
            id: None,
            action,
            account: account.to_string(),
            to_account: None,
            amount,
            timestamp: now(),
        }
    }

    /// The single entry recording both legs of a transfer.
    pub fn transfer(src: &str, dst: &str, amount: f64) -> Self {
        Self {
            to_account: Some(dst.to_string()),
            ..Self::record(HistoryAction::Transfer, src, amount)
        }
    }

    /// Whether this entry involves the account on either side.
    pub fn touches(&self, account_id: &str) -> bool {
        self.account == account_id || self.to_account.as_deref() == Some(account_id)
    }
}

/// Current local time, truncated to whole seconds to match TIME_FORMAT.
pub fn now() -> NaiveDateTime {
    let stamp = Local::now().naive_local();
    stamp.with_nanosecond(0).unwrap_or(stamp)
}

/// Composable predicate over the full log. `None` fields match
/// everything; `account` matches either side of a transfer.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub action: Option<HistoryAction>,
    pub account: Option<AccountId>,
    pub day: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        if let Some(action) = self.action {
            if entry.action != action {
                return false;
            }
        }
        if let Some(account) = &self.account {
            if !entry.touches(account) {
                return false;
            }
        }
        if let Some(day) = self.day {
            if entry.timestamp.date() != day {
                return false;
            }
        }
        true
    }
}
