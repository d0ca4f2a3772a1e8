use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::transfer::EXPORT_FILE_NAME;
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(6)])
        .split(area);

    render_storage(f, chunks[0], app);
    render_actions(f, chunks[1], app);
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<14}"), theme::dim_style()),
        Span::styled(value, theme::normal_style()),
    ])
}

fn render_storage(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        row("Data dir", app.data_dir.display().to_string()),
        row("Database", app.db_path.display().to_string()),
        row("Log file", app.log_path.display().to_string()),
        row("Currency", app.currency.clone()),
        row("Transactions", app.transactions.len().to_string()),
    ];
    f.render_widget(Paragraph::new(lines).block(theme::panel("Storage")), area);
}

fn render_actions(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default()
        .fg(theme::ACCENT)
        .add_modifier(Modifier::BOLD);
    let default_export = app.data_dir.join(EXPORT_FILE_NAME);
    let lines = vec![
        Line::from(vec![
            Span::styled(" x  :export [path]  ", key),
            Span::styled(
                format!("Save a JSON snapshot (default {})", default_export.display()),
                theme::normal_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" i  :import <path>  ", key),
            Span::styled(
                "Replace every transaction with a JSON snapshot",
                theme::normal_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" R  :reset          ", key),
            Span::styled("Delete all transactions", theme::expense_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Import and reset ask for confirmation and cannot be undone.",
            theme::dim_style(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(theme::panel("Data")), area);
}
