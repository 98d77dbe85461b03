//! Branch configuration: identifier floor, carrier prefixes, currency.

use crate::error::LedgerResult;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// First identifier handed out by a fresh ledger.
    #[serde(default = "default_id_floor")]
    pub id_floor: u64,
    /// Opening balance used when the caller does not supply one.
    #[serde(default = "default_opening_balance")]
    pub opening_balance: f64,
    /// Accepted 3-digit carrier prefixes for account phone numbers.
    #[serde(default = "default_phone_prefixes")]
    pub phone_prefixes: Vec<String>,
    /// Currency label used in human-readable messages.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl LedgerConfig {
    /// Load configuration from a JSON file. Missing fields fall back
    /// to the branch defaults.
    pub fn from_file(path: &str) -> LedgerResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config: LedgerConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            id_floor: default_id_floor(),
            opening_balance: default_opening_balance(),
            phone_prefixes: default_phone_prefixes(),
            currency: default_currency(),
        }
    }
}

fn default_id_floor() -> u64 {
    1001
}

fn default_opening_balance() -> f64 {
    50.0
}

fn default_phone_prefixes() -> Vec<String> {
    ["010", "011", "012", "015"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_currency() -> String {
    "EGP".to_string()
}
