mod form;
mod transaction;

pub(crate) use form::{TransactionForm, ValidationError};
#[cfg(test)]
pub(crate) use form::MAX_AMOUNT;
pub(crate) use transaction::{Transaction, TransactionType};
