use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;

use crate::config::Config;
use crate::editor::{EditMode, Editor, Outcome};
use crate::models::{Transaction, TransactionForm};
use crate::report::{self, CategoryShare, Summary};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Transactions,
    Reports,
    Settings,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Overview,
            Self::Transactions,
            Self::Reports,
            Self::Settings,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Reports => write!(f, "Reports"),
            Self::Settings => write!(f, "Settings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Field of the transaction form that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Description,
    Amount,
    Type,
    Date,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Description, Self::Amount, Self::Type, Self::Date]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Type => "Type",
            Self::Date => "Date",
        }
    }

    pub(crate) fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub(crate) fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
    Import { path: PathBuf },
    Reset,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency: String,
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,

    // Derived views, refreshed after every change
    pub(crate) summary: Summary,
    pub(crate) breakdown: Vec<CategoryShare>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Form
    pub(crate) editor: Editor,
    pub(crate) form: TransactionForm,
    pub(crate) form_field: FormField,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            currency: config.currency.clone(),
            data_dir: config.data_dir.clone(),
            db_path: config.db_path(),
            log_path: config.log_path(),

            summary: Summary::default(),
            breakdown: Vec::new(),
            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            editor: Editor::new(),
            form: TransactionForm::blank(Local::now().date_naive()),
            form_field: FormField::Description,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-read everything shown on screen from the store.
    pub(crate) fn refresh(&mut self, store: &Store) {
        let txns = store.all();
        self.summary = Summary::from_transactions(txns);
        self.breakdown = report::category_breakdown(txns);
        self.transactions = txns.to_vec();
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn money(&self, val: rust_decimal::Decimal) -> String {
        crate::ui::util::format_money(&self.currency, val)
    }

    // ── Form ──────────────────────────────────────────────────

    pub(crate) fn open_new_form(&mut self) {
        self.editor.cancel();
        self.form = TransactionForm::blank(Local::now().date_naive());
        self.form_field = FormField::Description;
        self.screen = Screen::Transactions;
        self.input_mode = InputMode::Form;
        self.set_status("New transaction");
    }

    pub(crate) fn open_edit_form(&mut self, store: &Store, id: i64) {
        match self.editor.begin_edit(store, id) {
            Some(form) => {
                self.form = form;
                self.form_field = FormField::Description;
                self.screen = Screen::Transactions;
                self.input_mode = InputMode::Form;
                self.set_status(format!("Editing transaction {id}"));
            }
            None => self.set_status(Outcome::NotFound(id).message()),
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        matches!(self.editor.mode(), EditMode::Editing(_))
    }

    /// Submit the form. A rejected form stays open with the typed values so it
    /// can be corrected; a rejected edit re-opens the edit session for the same record.
    pub(crate) fn submit_form(&mut self, store: &mut Store) -> Result<()> {
        let editing = match self.editor.mode() {
            EditMode::Editing(id) => Some(id),
            EditMode::Idle => None,
        };
        let outcome = self.editor.submit(store, &self.form)?;
        self.set_status(outcome.message());
        if outcome.changed_store() {
            self.input_mode = InputMode::Normal;
            self.form = TransactionForm::blank(Local::now().date_naive());
            self.refresh(store);
            if let Outcome::Created(_) = outcome {
                self.transaction_index = self.transactions.len().saturating_sub(1);
            }
        } else if let Outcome::NotFound(_) = outcome {
            self.input_mode = InputMode::Normal;
        } else if let Some(id) = editing {
            self.editor.begin_edit(store, id);
        }
        Ok(())
    }

    pub(crate) fn cancel_form(&mut self) {
        self.editor.cancel();
        self.input_mode = InputMode::Normal;
        self.set_status("Edit cancelled");
    }

    pub(crate) fn form_input(&mut self, c: char) {
        match self.form_field {
            FormField::Description => self.form.description.push(c),
            FormField::Amount => self.form.amount.push(c),
            FormField::Date => self.form.date.push(c),
            FormField::Type => match c {
                'i' | 'I' => self.form.kind = crate::models::TransactionType::Income,
                'e' | 'E' => self.form.kind = crate::models::TransactionType::Expense,
                _ => self.form.kind = self.form.kind.toggle(),
            },
        }
    }

    pub(crate) fn form_backspace(&mut self) {
        match self.form_field {
            FormField::Description => {
                self.form.description.pop();
            }
            FormField::Amount => {
                self.form.amount.pop();
            }
            FormField::Date => {
                self.form.date.pop();
            }
            FormField::Type => {}
        }
    }

    // ── Confirmation ──────────────────────────────────────────

    pub(crate) fn confirm(&mut self, action: PendingAction) {
        self.confirm_message = match &action {
            PendingAction::DeleteTransaction { description, .. } => {
                format!("Delete '{description}'?")
            }
            PendingAction::Import { path } => format!(
                "Replace all {} transactions with {}?",
                self.transactions.len(),
                path.display()
            ),
            PendingAction::Reset => {
                format!("Delete all {} transactions?", self.transactions.len())
            }
        };
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::TransactionType;
    use rust_decimal_macros::dec;

    fn config() -> Config {
        Config {
            data_dir: PathBuf::from("/tmp/pocketbook-test"),
            currency: "ZMW".into(),
            log_filter: "info".into(),
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.form_input(c);
        }
    }

    #[test]
    fn test_form_field_cycle() {
        assert_eq!(FormField::Description.next(), FormField::Amount);
        assert_eq!(FormField::Date.next(), FormField::Description);
        assert_eq!(FormField::Description.prev(), FormField::Date);
    }

    #[test]
    fn test_new_form_submit_creates() {
        let mut store = Store::in_memory().unwrap();
        let mut app = App::new(&config());
        app.open_new_form();
        type_text(&mut app, "Rent");
        app.form_field = FormField::Amount;
        type_text(&mut app, "400");
        app.form.date = "2024-01-02".into();
        app.submit_form(&mut store).unwrap();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(store.len(), 1);
        assert_eq!(app.summary.expenses, dec!(400));
        assert_eq!(app.breakdown.len(), 1);
    }

    #[test]
    fn test_rejected_form_stays_open() {
        let mut store = Store::in_memory().unwrap();
        let mut app = App::new(&config());
        app.open_new_form();
        app.form_field = FormField::Amount;
        type_text(&mut app, "12");
        app.submit_form(&mut store).unwrap();

        assert_eq!(app.input_mode, InputMode::Form);
        assert!(app.status_message.contains("description"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_form_updates_selected() {
        let mut store = Store::in_memory().unwrap();
        let mut app = App::new(&config());
        app.open_new_form();
        app.form = TransactionForm::new("Salary", "1000", TransactionType::Income, "2024-01-01");
        app.submit_form(&mut store).unwrap();
        let id = app.selected_transaction().unwrap().id;

        app.open_edit_form(&store, id);
        assert!(app.is_editing());
        assert_eq!(app.form.amount, "1000");
        app.form_field = FormField::Amount;
        app.form_backspace();
        app.form_backspace();
        app.form_backspace();
        type_text(&mut app, "200");
        app.submit_form(&mut store).unwrap();

        assert!(!app.is_editing());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().amount, dec!(1200));
    }

    #[test]
    fn test_rejected_edit_keeps_editing_same_record() {
        let mut store = Store::in_memory().unwrap();
        let mut app = App::new(&config());
        app.form = TransactionForm::new("A", "1", TransactionType::Expense, "2024-01-01");
        app.submit_form(&mut store).unwrap();
        let id = store.all()[0].id;

        app.open_edit_form(&store, id);
        app.form.amount = "-1".into();
        app.submit_form(&mut store).unwrap();
        assert_eq!(app.input_mode, InputMode::Form);
        assert_eq!(app.editor.mode(), EditMode::Editing(id));
        assert_eq!(app.form.amount, "-1");

        app.form.amount = "3".into();
        app.submit_form(&mut store).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().amount, dec!(3));
    }

    #[test]
    fn test_type_field_toggles() {
        let mut app = App::new(&config());
        app.open_new_form();
        app.form_field = FormField::Type;
        app.form_input('i');
        assert_eq!(app.form.kind, TransactionType::Income);
        app.form_input(' ');
        assert_eq!(app.form.kind, TransactionType::Expense);
    }

    #[test]
    fn test_cancel_form_returns_to_idle() {
        let mut store = Store::in_memory().unwrap();
        let mut app = App::new(&config());
        app.form = TransactionForm::new("A", "1", TransactionType::Expense, "2024-01-01");
        app.submit_form(&mut store).unwrap();
        let id = store.all()[0].id;

        app.open_edit_form(&store, id);
        app.cancel_form();
        assert!(!app.is_editing());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_refresh_clamps_cursor() {
        let mut store = Store::in_memory().unwrap();
        let mut app = App::new(&config());
        app.transaction_index = 5;
        app.refresh(&store);
        assert_eq!(app.transaction_index, 0);

        app.form = TransactionForm::new("A", "1", TransactionType::Expense, "2024-01-01");
        app.submit_form(&mut store).unwrap();
        assert_eq!(app.transactions.len(), 1);
    }
}
