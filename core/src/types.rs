//! Shared primitive types used across the entire ledger.

/// A stable account identifier. Decimal string, assigned once at
/// creation, never reused — not even after the account is closed.
pub type AccountId = String;

/// Wall-clock format for every persisted timestamp. The leading ten
/// characters are the calendar day used by the reporting view.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
