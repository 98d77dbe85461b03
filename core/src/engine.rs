//! The ledger engine — sole writer of balances and statuses.
//!
//! Validation order per operation is fixed and never reordered:
//!   deposit:  amount → existence → status
//!   withdraw: amount → existence → status → funds
//!   transfer: same-account → existence → amount → source status
//!             → receiver status → funds
//!
//! Mutating methods take `&mut self`, so one writer at a time is
//! enforced by the borrow checker; cross-thread callers go through
//! the `api` surface, which holds the engine behind a single lock.

use crate::{
    account::{self, AccountRecord, AccountStatus},
    config::LedgerConfig,
    customer,
    error::{LedgerError, LedgerResult},
    history::{self, HistoryAction, HistoryEntry},
    store::LedgerStore,
    types::AccountId,
};

pub struct LedgerEngine {
    store:   LedgerStore,
    config:  LedgerConfig,
    next_id: u64,
}

impl LedgerEngine {
    /// Wire an engine over an already-migrated store. The id counter
    /// is seeded once from the highest id on file and only ever moves
    /// forward, so identifiers are never reused — not even after an
    /// account is closed.
    pub fn new(store: LedgerStore, config: LedgerConfig) -> LedgerResult<Self> {
        let next_id = match store.max_numeric_account_id()? {
            Some(max) => (max + 1).max(config.id_floor),
            None => config.id_floor,
        };
        Ok(Self {
            store,
            config,
            next_id,
        })
    }

    /// In-memory engine with branch defaults (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let store = LedgerStore::in_memory()?;
        store.migrate()?;
        Self::new(store, LedgerConfig::default())
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ── Operations ─────────────────────────────────────────────

    pub fn create_account(
        &mut self,
        name: &str,
        phone: &str,
        national_id: Option<&str>,
        initial_balance: f64,
    ) -> LedgerResult<AccountId> {
        account::validate_owner_name(name)?;
        account::validate_phone(phone, &self.config)?;
        if initial_balance < 0.0 {
            return Err(LedgerError::InvalidAmount {
                amount: initial_balance,
            });
        }

        let id = self.next_id.to_string();
        let record = AccountRecord {
            id: id.clone(),
            owner_name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            national_id: national_id.map(str::to_string),
            balance: initial_balance,
            status: AccountStatus::Active,
            created_at: history::now(),
            customer_profile: None,
        };
        let entry = HistoryEntry::record(HistoryAction::Create, &id, initial_balance);
        self.store.insert_account(&record, &entry)?;
        self.next_id += 1;
        log::info!(
            "account {id} opened for {} with balance {initial_balance:.2}",
            record.owner_name
        );
        Ok(id)
    }

    pub fn get_account(&self, account_id: &str) -> LedgerResult<Option<AccountRecord>> {
        self.store.get_account(account_id)
    }

    /// Credit the account and return the new balance. Frozen accounts
    /// still accept deposits; closed accounts accept nothing.
    pub fn deposit(&mut self, account_id: &str, amount: f64) -> LedgerResult<f64> {
        if amount <= 0.0 {
            return Err(LedgerError::InvalidAmount { amount });
        }
        let acct = self.require(account_id)?;
        if acct.status == AccountStatus::Closed {
            return Err(LedgerError::AccountClosed { id: acct.id });
        }
        let entry = HistoryEntry::record(HistoryAction::Deposit, account_id, amount);
        self.store.update_balance(account_id, amount, &entry)?;
        let balance = acct.balance + amount;
        log::debug!("deposit account={account_id} amount={amount:.2} balance={balance:.2}");
        Ok(balance)
    }

    /// Debit the account and return the new balance. Outbound movement
    /// requires `Active`.
    pub fn withdraw(&mut self, account_id: &str, amount: f64) -> LedgerResult<f64> {
        if amount <= 0.0 {
            return Err(LedgerError::InvalidAmount { amount });
        }
        let acct = self.require(account_id)?;
        if !acct.status.is_active() {
            return Err(LedgerError::AccountNotActive {
                id: acct.id,
                status: acct.status,
            });
        }
        if acct.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: acct.balance,
                requested: amount,
            });
        }
        let entry = HistoryEntry::record(HistoryAction::Withdraw, account_id, amount);
        self.store.update_balance(account_id, -amount, &entry)?;
        let balance = acct.balance - amount;
        log::debug!("withdraw account={account_id} amount={amount:.2} balance={balance:.2}");
        Ok(balance)
    }

    /// Move `amount` between two accounts. Both legs and the single
    /// transfer entry commit as one unit; a failed transfer leaves
    /// both balances untouched.
    pub fn transfer(&mut self, src_id: &str, dst_id: &str, amount: f64) -> LedgerResult<()> {
        if src_id == dst_id {
            return Err(LedgerError::SameAccount);
        }
        let src = self.require(src_id)?;
        let dst = self.require(dst_id)?;
        if amount <= 0.0 {
            return Err(LedgerError::InvalidAmount { amount });
        }
        if !src.status.is_active() {
            return Err(LedgerError::AccountNotActive {
                id: src.id,
                status: src.status,
            });
        }
        if !dst.status.can_receive() {
            return Err(LedgerError::ReceiverNotAcceptingTransfers {
                id: dst.id,
                status: dst.status,
            });
        }
        if src.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: src.balance,
                requested: amount,
            });
        }
        let entry = HistoryEntry::transfer(src_id, dst_id, amount);
        self.store.apply_transfer(src_id, dst_id, amount, &entry)?;
        log::debug!("transfer from={src_id} to={dst_id} amount={amount:.2}");
        Ok(())
    }

    /// Set the account status. Idempotent: re-asserting the current
    /// status succeeds and still appends a fresh audit entry.
    pub fn update_status(
        &mut self,
        account_id: &str,
        new_status: AccountStatus,
    ) -> LedgerResult<()> {
        let acct = self.require(account_id)?;
        let entry = HistoryEntry::record(HistoryAction::UpdateStatus, account_id, 0.0);
        self.store.update_status(account_id, new_status, &entry)?;
        log::info!("account {account_id} status {} -> {new_status}", acct.status);
        Ok(())
    }

    pub fn attach_profile(
        &mut self,
        account_id: &str,
        name: &str,
        phone: &str,
        email: &str,
    ) -> LedgerResult<()> {
        customer::attach_profile(&mut self.store, account_id, name, phone, email)
    }

    fn require(&self, account_id: &str) -> LedgerResult<AccountRecord> {
        self.store
            .get_account(account_id)?
            .ok_or_else(|| LedgerError::AccountNotFound {
                id: account_id.to_string(),
            })
    }
}
