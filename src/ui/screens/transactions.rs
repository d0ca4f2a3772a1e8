use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::{Transaction, TransactionType};
use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.input_mode == InputMode::Form {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(8)])
            .split(area);
        render_table(f, chunks[0], app);
        render_form(f, chunks[1], app);
    } else {
        render_table(f, area, app);
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    if app.transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet.", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add one, or :import <file.json>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(theme::panel("Transactions (0)")),
            area,
        );
        return;
    }

    let header_cells = ["Description", "Type", "Amount", "Date"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let editing = match app.editor.mode() {
        crate::editor::EditMode::Editing(id) => Some(id),
        crate::editor::EditMode::Idle => None,
    };

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let is_cursor = i == app.transaction_index;
            let is_edited = editing == Some(txn.id);

            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let amount_str = amount_text(app, txn);

            let marker = if is_edited { "\u{270e} " } else { "  " };

            let style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("{marker}{}", truncate(&txn.description, 40))),
                Cell::from(txn.kind.as_str()),
                Cell::from(Span::styled(amount_str, amount_style)),
                Cell::from(txn.date.to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(9),
        Constraint::Length(18),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(format!("Transactions ({})", app.transactions.len())));

    f.render_widget(table, area);
}

/// Amounts are listed unsigned; the type column and colour tell them apart.
fn amount_text(app: &App, txn: &Transaction) -> String {
    app.money(txn.amount)
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.editor.mode() {
        crate::editor::EditMode::Editing(id) => format!("Edit transaction {id}"),
        crate::editor::EditMode::Idle => "New transaction".to_string(),
    };

    let lines: Vec<Line> = FormField::all()
        .iter()
        .map(|field| {
            let active = *field == app.form_field;
            let value = match field {
                FormField::Description => app.form.description.clone(),
                FormField::Amount => app.form.amount.clone(),
                FormField::Date => app.form.date.clone(),
                FormField::Type => type_toggle(app.form.kind),
            };
            let label_style = if active {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };
            let cursor = if active && *field != FormField::Type {
                "\u{2581}"
            } else {
                ""
            };
            Line::from(vec![
                Span::styled(format!(" {:<12}", field.label()), label_style),
                Span::styled(format!("{value}{cursor}"), theme::normal_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(theme::panel(title)), area);
}

fn type_toggle(kind: TransactionType) -> String {
    match kind {
        TransactionType::Income => "[income]  expense ".to_string(),
        TransactionType::Expense => " income  [expense]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::Config;
    use crate::models::TransactionForm;
    use crate::store::Store;

    #[test]
    fn test_expense_amount_listed_without_sign() {
        let config = Config {
            data_dir: std::path::PathBuf::from("/tmp/pocketbook-test"),
            currency: "ZMW".into(),
            log_filter: "info".into(),
        };
        let mut store = Store::in_memory().unwrap();
        let mut app = App::new(&config);
        app.form = TransactionForm::new("Rent", "400", TransactionType::Expense, "2024-01-02");
        app.submit_form(&mut store).unwrap();

        assert_eq!(amount_text(&app, &app.transactions[0]), "ZMW 400.00");
    }
}
