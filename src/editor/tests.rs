#![allow(clippy::unwrap_used, clippy::panic)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::TransactionType;
use crate::report;

fn form(description: &str, amount: &str, kind: TransactionType, date: &str) -> TransactionForm {
    TransactionForm::new(description, amount, kind, date)
}

fn created_id(outcome: Outcome) -> i64 {
    match outcome {
        Outcome::Created(id) => id,
        other => panic!("expected Created, got {other:?}"),
    }
}

// ── Create ────────────────────────────────────────────────────

#[test]
fn test_create_appends_retrievable_record() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();

    let id = created_id(
        editor
            .create(
                &mut store,
                &form("Salary", "1000", TransactionType::Income, "2024-01-01"),
            )
            .unwrap(),
    );

    assert_eq!(store.len(), 1);
    let txn = store.get(id).unwrap();
    assert_eq!(txn.description, "Salary");
    assert_eq!(txn.amount, dec!(1000));
    assert_eq!(txn.kind, TransactionType::Income);
    assert_eq!(txn.date.to_string(), "2024-01-01");
}

#[test]
fn test_create_assigns_unique_ids() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let mut ids = Vec::new();
    for i in 0..20 {
        let f = form(&format!("Item {i}"), "1", TransactionType::Expense, "2024-01-01");
        ids.push(created_id(editor.create(&mut store, &f).unwrap()));
    }
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 20);
}

#[test]
fn test_create_rejects_amounts_that_would_overflow_totals() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let huge = form("Windfall", "50000000000000000000000000000", TransactionType::Income, "2024-01-01");
    for _ in 0..2 {
        assert_eq!(
            editor.create(&mut store, &huge).unwrap(),
            Outcome::Rejected(ValidationError::AmountTooLarge)
        );
    }
    assert!(store.is_empty());
    assert_eq!(report::total_income(store.all()), rust_decimal::Decimal::ZERO);
}

#[test]
fn test_create_empty_description_is_rejected() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let outcome = editor
        .create(&mut store, &form("", "50", TransactionType::Expense, "2024-01-01"))
        .unwrap();
    assert_eq!(outcome, Outcome::Rejected(ValidationError::EmptyDescription));
    assert!(store.is_empty());
}

#[test]
fn test_create_negative_amount_is_rejected() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let outcome = editor
        .create(&mut store, &form("Coffee", "-5", TransactionType::Expense, "2024-01-01"))
        .unwrap();
    assert_eq!(outcome, Outcome::Rejected(ValidationError::NonPositiveAmount));
    assert!(!outcome.changed_store());
    assert!(store.is_empty());
}

// ── next_id ───────────────────────────────────────────────────

#[test]
fn test_next_id_uses_clock_when_ahead() {
    let store = Store::in_memory().unwrap();
    assert_eq!(next_id(&store, 1_000), 1_000);
}

#[test]
fn test_next_id_moves_past_existing() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let id = created_id(
        editor
            .create(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
            .unwrap(),
    );
    // Clock behind the newest id
    assert_eq!(next_id(&store, id - 10), id + 1);
    assert_eq!(next_id(&store, id), id + 1);
}

// ── Update ────────────────────────────────────────────────────

#[test]
fn test_update_preserves_id_and_position() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let a = created_id(
        editor
            .create(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
            .unwrap(),
    );
    let b = created_id(
        editor
            .create(&mut store, &form("B", "2", TransactionType::Expense, "2024-01-02"))
            .unwrap(),
    );

    let outcome = editor
        .update(&mut store, a, &form("A2", "10", TransactionType::Income, "2024-02-01"))
        .unwrap();
    assert_eq!(outcome, Outcome::Updated(a));
    assert_eq!(store.len(), 2);
    assert_eq!(store.all()[0].id, a);
    assert_eq!(store.all()[1].id, b);

    let txn = store.get(a).unwrap();
    assert_eq!(txn.description, "A2");
    assert_eq!(txn.amount, dec!(10));
    assert_eq!(txn.kind, TransactionType::Income);
    assert_eq!(txn.date.to_string(), "2024-02-01");
}

#[test]
fn test_update_unknown_id_is_noop() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let outcome = editor
        .update(&mut store, 42, &form("A", "1", TransactionType::Expense, "2024-01-01"))
        .unwrap();
    assert_eq!(outcome, Outcome::NotFound(42));
    assert!(store.is_empty());
}

#[test]
fn test_update_invalid_input_keeps_record() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let id = created_id(
        editor
            .create(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
            .unwrap(),
    );
    let outcome = editor
        .update(&mut store, id, &form("A", "0", TransactionType::Expense, "2024-01-01"))
        .unwrap();
    assert_eq!(outcome, Outcome::Rejected(ValidationError::NonPositiveAmount));
    assert_eq!(store.get(id).unwrap().amount, dec!(1));
}

// ── Delete ────────────────────────────────────────────────────

#[test]
fn test_delete() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let id = created_id(
        editor
            .create(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
            .unwrap(),
    );
    assert_eq!(editor.delete(&mut store, id).unwrap(), Outcome::Deleted(id));
    assert!(store.is_empty());
    assert_eq!(editor.delete(&mut store, id).unwrap(), Outcome::NotFound(id));
    assert!(store.is_empty());
}

// ── Edit mode ─────────────────────────────────────────────────

#[test]
fn test_begin_edit_prefills_form() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let id = created_id(
        editor
            .create(&mut store, &form("Rent", "400", TransactionType::Expense, "2024-01-02"))
            .unwrap(),
    );

    let prefilled = editor.begin_edit(&store, id).unwrap();
    assert_eq!(editor.mode(), EditMode::Editing(id));
    assert_eq!(prefilled.description, "Rent");
    assert_eq!(prefilled.amount, "400");
    assert_eq!(prefilled.kind, TransactionType::Expense);
    assert_eq!(prefilled.date, "2024-01-02");
}

#[test]
fn test_begin_edit_unknown_id_stays_idle() {
    let store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    assert!(editor.begin_edit(&store, 5).is_none());
    assert_eq!(editor.mode(), EditMode::Idle);
}

#[test]
fn test_submit_while_idle_creates() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let outcome = editor
        .submit(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
        .unwrap();
    assert!(matches!(outcome, Outcome::Created(_)));
    assert_eq!(editor.mode(), EditMode::Idle);
}

#[test]
fn test_submit_while_editing_updates_and_returns_to_idle() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let id = created_id(
        editor
            .create(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
            .unwrap(),
    );

    let mut f = editor.begin_edit(&store, id).unwrap();
    f.amount = "2.50".into();
    let outcome = editor.submit(&mut store, &f).unwrap();
    assert_eq!(outcome, Outcome::Updated(id));
    assert_eq!(editor.mode(), EditMode::Idle);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(id).unwrap().amount, dec!(2.50));
}

#[test]
fn test_rejected_submit_still_returns_to_idle() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let id = created_id(
        editor
            .create(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
            .unwrap(),
    );

    let mut f = editor.begin_edit(&store, id).unwrap();
    f.description.clear();
    let outcome = editor.submit(&mut store, &f).unwrap();
    assert_eq!(outcome, Outcome::Rejected(ValidationError::EmptyDescription));
    assert_eq!(editor.mode(), EditMode::Idle);
    assert_eq!(store.get(id).unwrap().description, "A");
}

#[test]
fn test_deleting_edited_record_cancels_edit() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let id = created_id(
        editor
            .create(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
            .unwrap(),
    );
    editor.begin_edit(&store, id).unwrap();
    editor.delete(&mut store, id).unwrap();
    assert_eq!(editor.mode(), EditMode::Idle);
}

#[test]
fn test_cancel() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let id = created_id(
        editor
            .create(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
            .unwrap(),
    );
    editor.begin_edit(&store, id).unwrap();
    editor.cancel();
    assert_eq!(editor.mode(), EditMode::Idle);
}

// ── Scenario ──────────────────────────────────────────────────

#[test]
fn test_salary_and_rent_scenario() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    editor
        .create(&mut store, &form("Salary", "1000", TransactionType::Income, "2024-01-01"))
        .unwrap();
    editor
        .create(&mut store, &form("Rent", "400", TransactionType::Expense, "2024-01-02"))
        .unwrap();

    let txns = store.all();
    assert_eq!(report::total_income(txns), dec!(1000));
    assert_eq!(report::total_expenses(txns), dec!(400));
    assert_eq!(report::balance(txns), dec!(600));
    assert_eq!(
        report::expenses_by_category(txns),
        vec![("Rent".to_string(), dec!(400))]
    );
}

#[test]
fn test_find_created_record() {
    let mut store = Store::in_memory().unwrap();
    let mut editor = Editor::new();
    let outcome = editor
        .create(&mut store, &form("A", "1", TransactionType::Expense, "2024-01-01"))
        .unwrap();
    assert_eq!(find(&store, &outcome).unwrap().description, "A");
    assert!(find(&store, &Outcome::NotFound(1)).is_none());
}
