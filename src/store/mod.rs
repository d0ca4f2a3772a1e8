use anyhow::{Context, Result};

use crate::db::Database;
use crate::models::Transaction;

/// Blob holding the JSON array of transactions.
pub(crate) const TRANSACTIONS_BLOB: &str = "transactions";
/// Blob receiving an unparsable `transactions` value found at load time.
pub(crate) const CORRUPT_BLOB: &str = "transactions.corrupt";

/// The session's transaction collection and the database it is persisted to.
///
/// Every mutating method writes the whole collection back before returning.
pub(crate) struct Store {
    db: Database,
    transactions: Vec<Transaction>,
    load_error: Option<String>,
}

impl Store {
    /// Restore the collection from `db`.
    ///
    /// A missing blob gives an empty collection. An unparsable blob also gives an
    /// empty collection; the raw text is copied to [`CORRUPT_BLOB`] and the parse
    /// error is kept for [`Store::load_error`].
    pub(crate) fn load(db: Database) -> Result<Self> {
        let raw = db.read_blob(TRANSACTIONS_BLOB)?;
        let mut load_error = None;

        let transactions = match raw {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<Transaction>>(&raw) {
                Ok(txns) => txns,
                Err(e) => {
                    tracing::warn!(error = %e, "stored transactions are malformed, starting empty");
                    db.write_blob(CORRUPT_BLOB, &raw)
                        .context("Failed to back up malformed transactions")?;
                    load_error = Some(format!(
                        "Saved data could not be read ({e}); a copy was kept as '{CORRUPT_BLOB}'"
                    ));
                    Vec::new()
                }
            },
        };

        tracing::info!(count = transactions.len(), "loaded transactions");
        Ok(Self {
            db,
            transactions,
            load_error,
        })
    }

    #[cfg(test)]
    pub(crate) fn in_memory() -> Result<Self> {
        Self::load(Database::open_in_memory()?)
    }

    /// Serialize the collection as a JSON array.
    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.transactions).context("Failed to serialize transactions")
    }

    /// Overwrite the persisted blob with the current collection.
    pub(crate) fn persist(&self) -> Result<()> {
        self.write(&self.transactions)
    }

    fn write(&self, txns: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string(txns).context("Failed to serialize transactions")?;
        self.db.write_blob(TRANSACTIONS_BLOB, &json)?;
        tracing::debug!(count = txns.len(), bytes = json.len(), "persisted");
        Ok(())
    }

    /// Persist `next`, and only once that succeeds make it the live collection.
    fn commit(&mut self, next: Vec<Transaction>) -> Result<()> {
        self.write(&next)?;
        self.transactions = next;
        Ok(())
    }

    pub(crate) fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub(crate) fn max_id(&self) -> Option<i64> {
        self.transactions.iter().map(|t| t.id).max()
    }

    /// Why the persisted data was discarded at load time, if it was.
    pub(crate) fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn database(&self) -> &Database {
        &self.db
    }

    // ── Mutations ─────────────────────────────────────────────

    pub(crate) fn push(&mut self, txn: Transaction) -> Result<()> {
        let mut next = self.transactions.clone();
        next.push(txn);
        self.commit(next)
    }

    /// Replace the record sharing `txn.id`, keeping its position.
    /// Returns `false` without touching storage when no such record exists.
    pub(crate) fn replace(&mut self, txn: Transaction) -> Result<bool> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == txn.id) else {
            return Ok(false);
        };
        let mut next = self.transactions.clone();
        next[pos] = txn;
        self.commit(next)?;
        Ok(true)
    }

    pub(crate) fn remove(&mut self, id: i64) -> Result<Option<Transaction>> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let mut next = self.transactions.clone();
        let removed = next.remove(pos);
        self.commit(next)?;
        Ok(Some(removed))
    }

    pub(crate) fn replace_all(&mut self, txns: Vec<Transaction>) -> Result<()> {
        self.commit(txns)
    }
}
