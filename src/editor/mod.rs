use anyhow::Result;

use crate::models::{Transaction, TransactionForm, ValidationError};
use crate::store::Store;

/// Whether the next submitted form creates a record or updates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum EditMode {
    #[default]
    Idle,
    Editing(i64),
}

/// Result of a create/update/delete request. Only storage failures are errors;
/// bad input and unknown ids leave the store untouched and are reported here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Created(i64),
    Updated(i64),
    Deleted(i64),
    Rejected(ValidationError),
    NotFound(i64),
}

impl Outcome {
    pub(crate) fn changed_store(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Updated(_) | Self::Deleted(_))
    }

    /// Short status-line text.
    pub(crate) fn message(&self) -> String {
        match self {
            Self::Created(id) => format!("Added transaction {id}"),
            Self::Updated(id) => format!("Updated transaction {id}"),
            Self::Deleted(id) => format!("Deleted transaction {id}"),
            Self::Rejected(err) => format!("Not saved: {err}"),
            Self::NotFound(id) => format!("No transaction with id {id}"),
        }
    }
}

/// Create/update/delete operations on a [`Store`], plus the single edit session.
#[derive(Debug, Default)]
pub(crate) struct Editor {
    mode: EditMode,
}

impl Editor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mode(&self) -> EditMode {
        self.mode
    }

    pub(crate) fn create(&mut self, store: &mut Store, form: &TransactionForm) -> Result<Outcome> {
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(err) => return Ok(Outcome::Rejected(err)),
        };
        let id = next_id(store, now_millis());
        let txn = fields.into_transaction(id);
        tracing::info!(id, kind = %txn.kind, amount = %txn.amount, "created transaction");
        store.push(txn)?;
        Ok(Outcome::Created(id))
    }

    pub(crate) fn update(
        &mut self,
        store: &mut Store,
        id: i64,
        form: &TransactionForm,
    ) -> Result<Outcome> {
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(err) => return Ok(Outcome::Rejected(err)),
        };
        if store.replace(fields.into_transaction(id))? {
            tracing::info!(id, "updated transaction");
            Ok(Outcome::Updated(id))
        } else {
            Ok(Outcome::NotFound(id))
        }
    }

    pub(crate) fn delete(&mut self, store: &mut Store, id: i64) -> Result<Outcome> {
        match store.remove(id)? {
            Some(_) => {
                tracing::info!(id, "deleted transaction");
                if self.mode == EditMode::Editing(id) {
                    self.mode = EditMode::Idle;
                }
                Ok(Outcome::Deleted(id))
            }
            None => Ok(Outcome::NotFound(id)),
        }
    }

    /// Start editing `id`, returning its current values for the form.
    /// An unknown id leaves the mode unchanged.
    pub(crate) fn begin_edit(&mut self, store: &Store, id: i64) -> Option<TransactionForm> {
        let txn = store.get(id)?;
        self.mode = EditMode::Editing(id);
        Some(TransactionForm::from_transaction(txn))
    }

    pub(crate) fn cancel(&mut self) {
        self.mode = EditMode::Idle;
    }

    /// Create or update depending on the mode. Always leaves the editor idle.
    pub(crate) fn submit(&mut self, store: &mut Store, form: &TransactionForm) -> Result<Outcome> {
        match std::mem::take(&mut self.mode) {
            EditMode::Idle => self.create(store, form),
            EditMode::Editing(id) => self.update(store, id, form),
        }
    }
}

/// Pick an id from the clock, moving past every id already in the store.
pub(crate) fn next_id(store: &Store, now_ms: i64) -> i64 {
    match store.max_id() {
        Some(max) if max >= now_ms => max + 1,
        _ => now_ms,
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Look a record up for display after an outcome.
pub(crate) fn find<'a>(store: &'a Store, outcome: &Outcome) -> Option<&'a Transaction> {
    match outcome {
        Outcome::Created(id) | Outcome::Updated(id) => store.get(*id),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
