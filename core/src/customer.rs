//! Customer profile attachment — the only writer of `customer_profile`.
//! Independent of balance logic; shares the account record.

use crate::{
    account::CustomerProfile,
    error::{LedgerError, LedgerResult},
    history::{HistoryAction, HistoryEntry},
    store::LedgerStore,
};

/// All three fields present, an all-digit phone, an email with an `@`.
pub fn validate_profile(name: &str, phone: &str, email: &str) -> LedgerResult<()> {
    if name.trim().is_empty() || phone.is_empty() || email.is_empty() {
        return Err(LedgerError::InvalidProfile);
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(LedgerError::InvalidProfile);
    }
    if !email.contains('@') {
        return Err(LedgerError::InvalidProfile);
    }
    Ok(())
}

/// Overwrite the account's profile and record the update in the same
/// commit unit.
pub fn attach_profile(
    store: &mut LedgerStore,
    account_id: &str,
    name: &str,
    phone: &str,
    email: &str,
) -> LedgerResult<()> {
    if store.get_account(account_id)?.is_none() {
        return Err(LedgerError::AccountNotFound {
            id: account_id.to_string(),
        });
    }
    validate_profile(name, phone, email)?;

    let profile = CustomerProfile {
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    };
    let entry = HistoryEntry::record(HistoryAction::CustomerUpdate, account_id, 0.0);
    store.update_profile(account_id, &profile, &entry)?;
    log::debug!("customer profile attached to account {account_id}");
    Ok(())
}
