use super::LedgerStore;
use crate::{
    account::{AccountRecord, AccountStatus, CustomerProfile},
    error::{LedgerError, LedgerResult},
    history::HistoryEntry,
    types::TIME_FORMAT,
};
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};

impl LedgerStore {
    // ── Account ───────────────────────────────────────────────

    /// Insert a new account together with its `Create` history entry —
    /// both rows or neither.
    pub fn insert_account(
        &mut self,
        record: &AccountRecord,
        entry: &HistoryEntry,
    ) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO account (account_id, owner_name, phone, national_id, balance, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.owner_name,
                record.phone,
                record.national_id,
                record.balance,
                record.status.as_str(),
                record.created_at.format(TIME_FORMAT).to_string(),
            ],
        )?;
        Self::insert_history(&tx, entry)?;
        tx.commit()?;
        Ok(())
    }

    /// Lookup by id. Unknown ids are `None`, never an error — callers
    /// decide the error semantics.
    pub fn get_account(&self, account_id: &str) -> LedgerResult<Option<AccountRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT account_id, owner_name, phone, national_id, balance, status, created_at,
                        customer_name, customer_phone, customer_email
                 FROM account WHERE account_id = ?1",
                params![account_id],
                account_row_mapper,
            )
            .optional()?;
        Ok(record)
    }

    pub fn all_accounts(&self) -> LedgerResult<Vec<AccountRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT account_id, owner_name, phone, national_id, balance, status, created_at,
                    customer_name, customer_phone, customer_email
             FROM account ORDER BY account_id ASC",
        )?;
        let records = stmt
            .query_map([], account_row_mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Highest numeric account id on file, if any. Seeds the engine's
    /// id counter at startup.
    pub fn max_numeric_account_id(&self) -> LedgerResult<Option<u64>> {
        let mut stmt = self.conn.prepare("SELECT account_id FROM account")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids.iter().filter_map(|id| id.parse::<u64>().ok()).max())
    }

    /// Apply a signed balance delta and its history entry as one
    /// commit unit.
    pub fn update_balance(
        &mut self,
        account_id: &str,
        delta: f64,
        entry: &HistoryEntry,
    ) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "UPDATE account SET balance = balance + ?1 WHERE account_id = ?2",
            params![delta, account_id],
        )?;
        Self::insert_history(&tx, entry)?;
        tx.commit()?;
        Ok(())
    }

    /// Debit source, credit destination, and record the single
    /// transfer entry — all three or none.
    pub fn apply_transfer(
        &mut self,
        src_id: &str,
        dst_id: &str,
        amount: f64,
        entry: &HistoryEntry,
    ) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "UPDATE account SET balance = balance - ?1 WHERE account_id = ?2",
            params![amount, src_id],
        )?;
        tx.execute(
            "UPDATE account SET balance = balance + ?1 WHERE account_id = ?2",
            params![amount, dst_id],
        )?;
        Self::insert_history(&tx, entry)?;
        tx.commit()?;
        Ok(())
    }

    pub fn update_status(
        &mut self,
        account_id: &str,
        status: AccountStatus,
        entry: &HistoryEntry,
    ) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "UPDATE account SET status = ?1 WHERE account_id = ?2",
            params![status.as_str(), account_id],
        )?;
        Self::insert_history(&tx, entry)?;
        tx.commit()?;
        Ok(())
    }

    /// Overwrite the attached customer profile (not a merge).
    pub fn update_profile(
        &mut self,
        account_id: &str,
        profile: &CustomerProfile,
        entry: &HistoryEntry,
    ) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "UPDATE account SET customer_name = ?1, customer_phone = ?2, customer_email = ?3
             WHERE account_id = ?4",
            params![profile.name, profile.phone, profile.email, account_id],
        )?;
        Self::insert_history(&tx, entry)?;
        tx.commit()?;
        Ok(())
    }
}

fn account_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<AccountRecord> {
    let status: String = row.get(5)?;
    let created: String = row.get(6)?;
    let customer_name: Option<String> = row.get(7)?;
    let customer_phone: Option<String> = row.get(8)?;
    let customer_email: Option<String> = row.get(9)?;
    let customer_profile = match (customer_name, customer_phone, customer_email) {
        (Some(name), Some(phone), Some(email)) => Some(CustomerProfile { name, phone, email }),
        _ => None,
    };
    Ok(AccountRecord {
        id: row.get(0)?,
        owner_name: row.get(1)?,
        phone: row.get(2)?,
        national_id: row.get(3)?,
        balance: row.get(4)?,
        status: status.parse().map_err(|e: LedgerError| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?,
        created_at: NaiveDateTime::parse_from_str(&created, TIME_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?,
        customer_profile,
    })
}
