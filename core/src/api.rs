//! Synchronous call surface for the presentation collaborator.
//!
//! Every call returns an `ApiReply` triple: success flag, human-readable
//! message (or serialized value), machine-readable error kind. Inputs
//! arrive as primitives and are re-validated here and below — caller-side
//! checks are never trusted.
//!
//! One global mutation lock (a `Mutex` around the engine) is held for
//! the duration of each operation, so no two operations interleave
//! mid-mutation and a reader can never observe a half-applied transfer.

use crate::{
    account::AccountStatus,
    engine::LedgerEngine,
    error::{ErrorKind, LedgerError},
    history::HistoryFilter,
    report,
};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Serialize)]
pub struct ApiReply {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl ApiReply {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            value: None,
            error: None,
        }
    }

    fn with_value(message: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            value: Some(value),
            ..Self::ok(message)
        }
    }

    fn err(err: &LedgerError) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
            value: None,
            error: Some(err.kind()),
        }
    }

    /// Serialize `value` into the reply, downgrading to an error reply
    /// if serialization itself fails.
    fn try_with_value<T: Serialize>(message: impl Into<String>, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::with_value(message, value),
            Err(e) => Self::err(&LedgerError::from(e)),
        }
    }
}

pub struct LedgerApi {
    engine: Mutex<LedgerEngine>,
}

impl LedgerApi {
    pub fn new(engine: LedgerEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    fn engine(&self) -> MutexGuard<'_, LedgerEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Mutations ──────────────────────────────────────────────

    pub fn create_account(
        &self,
        name: &str,
        phone: &str,
        national_id: Option<&str>,
        initial_balance: Option<f64>,
    ) -> ApiReply {
        let mut engine = self.engine();
        let balance = initial_balance.unwrap_or(engine.config().opening_balance);
        let currency = engine.config().currency.clone();
        match engine.create_account(name, phone, national_id, balance) {
            Ok(id) => ApiReply::with_value(
                format!("Account {id} created with balance {balance:.2} {currency}."),
                serde_json::Value::String(id),
            ),
            Err(e) => ApiReply::err(&e),
        }
    }

    pub fn deposit(&self, account_id: &str, amount: f64) -> ApiReply {
        let mut engine = self.engine();
        let currency = engine.config().currency.clone();
        match engine.deposit(account_id, amount) {
            Ok(balance) => ApiReply::with_value(
                format!(
                    "Deposited {amount:.2} {currency} into {account_id}. \
                     New balance: {balance:.2} {currency}."
                ),
                serde_json::json!(balance),
            ),
            Err(e) => ApiReply::err(&e),
        }
    }

    pub fn withdraw(&self, account_id: &str, amount: f64) -> ApiReply {
        let mut engine = self.engine();
        let currency = engine.config().currency.clone();
        match engine.withdraw(account_id, amount) {
            Ok(balance) => ApiReply::with_value(
                format!(
                    "Withdrew {amount:.2} {currency} from {account_id}. \
                     New balance: {balance:.2} {currency}."
                ),
                serde_json::json!(balance),
            ),
            Err(e) => ApiReply::err(&e),
        }
    }

    pub fn transfer(&self, src_id: &str, dst_id: &str, amount: f64) -> ApiReply {
        let mut engine = self.engine();
        let currency = engine.config().currency.clone();
        match engine.transfer(src_id, dst_id, amount) {
            Ok(()) => ApiReply::ok(format!(
                "Transferred {amount:.2} {currency} from {src_id} to {dst_id}."
            )),
            Err(e) => ApiReply::err(&e),
        }
    }

    pub fn update_status(&self, account_id: &str, status: &str) -> ApiReply {
        let parsed: AccountStatus = match status.parse() {
            Ok(s) => s,
            Err(e) => return ApiReply::err(&e),
        };
        match self.engine().update_status(account_id, parsed) {
            Ok(()) => ApiReply::ok(format!("Status of {account_id} updated to {parsed}.")),
            Err(e) => ApiReply::err(&e),
        }
    }

    pub fn attach_profile(
        &self,
        account_id: &str,
        name: &str,
        phone: &str,
        email: &str,
    ) -> ApiReply {
        match self
            .engine()
            .attach_profile(account_id, name, phone, email)
        {
            Ok(()) => ApiReply::ok(format!("Customer data saved for account {account_id}.")),
            Err(e) => ApiReply::err(&e),
        }
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn get_account(&self, account_id: &str) -> ApiReply {
        let engine = self.engine();
        match engine.get_account(account_id) {
            Ok(Some(acct)) => ApiReply::try_with_value(format!("Account {account_id}."), &acct),
            Ok(None) => ApiReply::err(&LedgerError::AccountNotFound {
                id: account_id.to_string(),
            }),
            Err(e) => ApiReply::err(&e),
        }
    }

    pub fn history_for(&self, account_id: &str) -> ApiReply {
        let engine = self.engine();
        match report::history_for(engine.store(), account_id) {
            Ok(entries) => ApiReply::try_with_value(
                format!("{} history entries for {account_id}.", entries.len()),
                &entries,
            ),
            Err(e) => ApiReply::err(&e),
        }
    }

    pub fn filtered_history(&self, filter: &HistoryFilter) -> ApiReply {
        let engine = self.engine();
        match report::filtered_history(engine.store(), filter) {
            Ok(entries) => ApiReply::try_with_value(
                format!("{} history entries matched.", entries.len()),
                &entries,
            ),
            Err(e) => ApiReply::err(&e),
        }
    }

    pub fn dashboard_metrics(&self) -> ApiReply {
        let engine = self.engine();
        match report::dashboard_metrics(engine.store()) {
            Ok(metrics) => ApiReply::try_with_value("Dashboard metrics.", &metrics),
            Err(e) => ApiReply::err(&e),
        }
    }
}
