//! SQLite persistence layer.
//!
//! RULE: only the store talks to the database. The engine, customer
//! and report modules call store methods — they never execute SQL
//! directly. Mutating methods bundle the row change and its history
//! entry into one transaction.

use crate::{
    error::LedgerResult,
    history::{HistoryAction, HistoryEntry},
    types::TIME_FORMAT,
};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

mod account;

pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    /// Open (or create) the ledger database at `path`. URI paths are
    /// accepted, so shared-cache in-memory databases work too.
    pub fn open(path: &str) -> LedgerResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> LedgerResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_ledger.sql"))?;
        Ok(())
    }

    // ── History log ────────────────────────────────────────────

    /// Append one history row on the given connection. Called inside
    /// the transaction that owns the mutation being recorded.
    fn insert_history(conn: &Connection, entry: &HistoryEntry) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT INTO history (action, account, to_account, amount, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.action.as_str(),
                entry.account,
                entry.to_account,
                entry.amount,
                entry.timestamp.format(TIME_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    /// Entries touching the account on either side, oldest first.
    pub fn history_for_account(&self, account_id: &str) -> LedgerResult<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, action, account, to_account, amount, created_at
             FROM history WHERE account = ?1 OR to_account = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![account_id], history_row_mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// The full log in insertion order.
    pub fn all_history(&self) -> LedgerResult<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, action, account, to_account, amount, created_at
             FROM history ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map([], history_row_mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn history_count(&self) -> LedgerResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
            .map_err(Into::into)
    }

    // ── Dashboard aggregates ───────────────────────────────────

    pub fn account_count(&self) -> LedgerResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM account", [], |row| row.get(0))
            .map_err(Into::into)
    }

    pub fn total_balance(&self) -> LedgerResult<f64> {
        self.conn
            .query_row(
                "SELECT COALESCE(SUM(balance), 0.0) FROM account",
                [],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    /// Sum of amounts for one action on one calendar day (`YYYY-MM-DD`).
    pub fn sum_for_day(&self, action: HistoryAction, day: &str) -> LedgerResult<f64> {
        self.conn
            .query_row(
                "SELECT COALESCE(SUM(amount), 0.0) FROM history
                 WHERE action = ?1 AND substr(created_at, 1, 10) = ?2",
                params![action.as_str(), day],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }
}

fn history_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let action: String = row.get(1)?;
    let created: String = row.get(5)?;
    Ok(HistoryEntry {
        id: Some(row.get(0)?),
        action: action.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, e.into())
        })?,
        account: row.get(2)?,
        to_account: row.get(3)?,
        amount: row.get(4)?,
        timestamp: NaiveDateTime::parse_from_str(&created, TIME_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?,
    })
}
