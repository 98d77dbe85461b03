//! Account model — the status state machine, the record shape, and
//! field validation for new accounts.

use crate::{config::LedgerConfig, error::LedgerError, types::AccountId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account lifecycle: `Active` on creation, `Frozen` blocks outbound
/// movement but still receives, `Closed` is fully inert for money
/// movement. Transitions happen only through an explicit status
/// update, never as a side effect of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Frozen,
    Closed,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Frozen => "frozen",
            Self::Closed => "closed",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// A frozen account may still receive transfers; a closed one may not.
    pub fn can_receive(&self) -> bool {
        matches!(self, Self::Active | Self::Frozen)
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "frozen" => Ok(Self::Frozen),
            "closed" => Ok(Self::Closed),
            _ => Err(LedgerError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// Optional contact record attached to an account after creation.
/// Overwritten wholesale on update, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub owner_name: String,
    pub phone: String,
    pub national_id: Option<String>,
    pub balance: f64,
    pub status: AccountStatus,
    pub created_at: NaiveDateTime,
    pub customer_profile: Option<CustomerProfile>,
}

// ── Field validation ───────────────────────────────────────────

/// Owner names are letters and whitespace only, never blank.
pub fn validate_owner_name(name: &str) -> Result<(), LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidName);
    }
    if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(LedgerError::InvalidName);
    }
    Ok(())
}

/// Phones are exactly 11 digits and start with a configured carrier
/// prefix.
pub fn validate_phone(phone: &str, config: &LedgerConfig) -> Result<(), LedgerError> {
    let phone = phone.trim();
    if phone.len() != 11 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(LedgerError::InvalidPhone);
    }
    if !config
        .phone_prefixes
        .iter()
        .any(|prefix| phone.starts_with(prefix.as_str()))
    {
        return Err(LedgerError::InvalidPhone);
    }
    Ok(())
}
