use crate::account::AccountStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Amount must be greater than zero (got {amount:.2}).")]
    InvalidAmount { amount: f64 },

    #[error("Invalid owner name (letters and spaces only).")]
    InvalidName,

    #[error("Invalid phone number (11 digits, known carrier prefix).")]
    InvalidPhone,

    #[error("Invalid customer data (name, all-digit phone and an email with '@' required).")]
    InvalidProfile,

    #[error("Invalid account status '{value}'.")]
    InvalidStatus { value: String },

    #[error("Account {id} not found.")]
    AccountNotFound { id: String },

    #[error("Account {id} is not active ({status}).")]
    AccountNotActive { id: String, status: AccountStatus },

    #[error("Account {id} is closed and does not accept operations.")]
    AccountClosed { id: String },

    #[error("Receiving account {id} does not accept transfers ({status}).")]
    ReceiverNotAcceptingTransfers { id: String, status: AccountStatus },

    #[error("Insufficient balance: have {balance:.2}, need {requested:.2}.")]
    InsufficientFunds { balance: f64, requested: f64 },

    #[error("Cannot transfer to the same account.")]
    SameAccount,

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Machine-readable classification reported across the API surface.
/// Every storage-layer failure collapses into `StorageFailure`; all
/// other kinds are recoverable and reported to the immediate caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidAmount,
    InvalidName,
    InvalidPhone,
    InvalidProfile,
    InvalidStatus,
    AccountNotFound,
    AccountNotActive,
    AccountClosed,
    ReceiverNotAcceptingTransfers,
    InsufficientFunds,
    SameAccount,
    StorageFailure,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            Self::InvalidName => ErrorKind::InvalidName,
            Self::InvalidPhone => ErrorKind::InvalidPhone,
            Self::InvalidProfile => ErrorKind::InvalidProfile,
            Self::InvalidStatus { .. } => ErrorKind::InvalidStatus,
            Self::AccountNotFound { .. } => ErrorKind::AccountNotFound,
            Self::AccountNotActive { .. } => ErrorKind::AccountNotActive,
            Self::AccountClosed { .. } => ErrorKind::AccountClosed,
            Self::ReceiverNotAcceptingTransfers { .. } => ErrorKind::ReceiverNotAcceptingTransfers,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::SameAccount => ErrorKind::SameAccount,
            Self::Storage(_) | Self::Serialization(_) | Self::Io(_) => ErrorKind::StorageFailure,
        }
    }

    /// Fatal errors abort the in-progress operation; nothing is retried
    /// by this layer.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::StorageFailure)
    }
}
