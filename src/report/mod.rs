//! Totals and category breakdowns derived from a transaction slice.
//!
//! Nothing here is cached; every call walks the slice it is given. Sums
//! saturate at `Decimal::MAX`/`Decimal::MIN`: imported snapshots are not
//! validated, so the amounts here are unbounded.

use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionType};

pub(crate) fn total_income(txns: &[Transaction]) -> Decimal {
    sum_of(txns, TransactionType::Income)
}

pub(crate) fn total_expenses(txns: &[Transaction]) -> Decimal {
    sum_of(txns, TransactionType::Expense)
}

pub(crate) fn balance(txns: &[Transaction]) -> Decimal {
    total_income(txns).saturating_sub(total_expenses(txns))
}

fn sum_of(txns: &[Transaction], kind: TransactionType) -> Decimal {
    saturating_sum(txns.iter().filter(|t| t.kind == kind).map(|t| t.amount))
}

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, |acc, amt| acc.saturating_add(amt))
}

/// Expense totals grouped by description, in the order each description first
/// appears. Empty descriptions are grouped as "Other".
pub(crate) fn expenses_by_category(txns: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for txn in txns.iter().filter(|t| t.is_expense()) {
        let key = txn.category();
        match groups.iter_mut().find(|(name, _)| name == key) {
            Some((_, total)) => *total = total.saturating_add(txn.amount),
            None => groups.push((key.to_string(), txn.amount)),
        }
    }
    groups
}

/// Share of `total` taken by `amount`, in percent. Zero when `total` is zero.
pub(crate) fn category_percent(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    amount
        .checked_div(total)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if amount.is_sign_negative() == total.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryShare {
    pub name: String,
    pub amount: Decimal,
    pub percent: Decimal,
}

pub(crate) fn category_breakdown(txns: &[Transaction]) -> Vec<CategoryShare> {
    let groups = expenses_by_category(txns);
    let total = saturating_sum(groups.iter().map(|(_, amt)| *amt));
    groups
        .into_iter()
        .map(|(name, amount)| CategoryShare {
            percent: category_percent(amount, total),
            name,
            amount,
        })
        .collect()
}

/// Headline numbers for the overview screen and `pocketbook summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

impl Summary {
    pub(crate) fn from_transactions(txns: &[Transaction]) -> Self {
        let income = total_income(txns);
        let expenses = total_expenses(txns);
        Self {
            income,
            expenses,
            balance: income.saturating_sub(expenses),
            income_count: txns.iter().filter(|t| t.is_income()).count(),
            expense_count: txns.iter().filter(|t| t.is_expense()).count(),
        }
    }
}
