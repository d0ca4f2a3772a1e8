use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use super::{Transaction, TransactionType};

/// Exclusive upper bound for a typed amount. Together with [`MAX_AMOUNT_DP`]
/// this keeps every amount within 15 significant digits, so it survives the
/// f64 JSON representation unchanged.
/// 10^13, i.e. ten trillion.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(1_316_134_912, 2_328, 0, false, 0);
pub(crate) const MAX_AMOUNT_DP: u32 = 2;

/// Reasons a submitted form is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,

    #[error("amount '{0}' is not a number")]
    InvalidAmount(String),

    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("amount must be below {}", MAX_AMOUNT)]
    AmountTooLarge,

    #[error("amount can have at most {} decimal places", MAX_AMOUNT_DP)]
    TooManyDecimals,

    #[error("date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),
}

/// Raw, user-typed values for a transaction. Amount and date stay as text
/// until [`TransactionForm::validate`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub kind: TransactionType,
    pub date: String,
}

/// The validated counterpart of a [`TransactionForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransactionFields {
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub date: NaiveDate,
}

impl TransactionForm {
    /// An empty expense form dated `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            kind: TransactionType::Expense,
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        kind: TransactionType,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            kind,
            date: date.into(),
        }
    }

    /// Pre-populate a form with the current values of `txn`.
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            description: txn.description.clone(),
            amount: txn.amount.normalize().to_string(),
            kind: txn.kind,
            date: txn.date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self) -> Result<TransactionFields, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let raw_amount = self.amount.trim();
        let amount = Decimal::from_str(&raw_amount.replace(',', ""))
            .map_err(|_| ValidationError::InvalidAmount(raw_amount.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        if amount >= MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge);
        }
        if amount.normalize().scale() > MAX_AMOUNT_DP {
            return Err(ValidationError::TooManyDecimals);
        }

        let raw_date = self.date.trim();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw_date.to_string()))?;

        Ok(TransactionFields {
            description: description.to_string(),
            amount,
            kind: self.kind,
            date,
        })
    }
}

impl TransactionFields {
    pub fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            date: self.date,
        }
    }
}
