use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(8),    // Income vs expenses chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_totals_chart(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let s = &app.summary;
    render_card(
        f,
        cards[0],
        "Income",
        app.money(s.income),
        theme::INCOME,
        format!("{} txns", s.income_count),
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        app.money(s.expenses),
        theme::EXPENSE,
        format!("{} txns", s.expense_count),
    );
    render_card(
        f,
        cards[2],
        "Balance",
        app.money(s.balance),
        theme::balance_color(s.balance),
        format!("{} txns", s.income_count + s.expense_count),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, display: String, color: Color, subtitle: String) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}

fn bar_value(amount: Decimal) -> u64 {
    amount.round().to_u64().unwrap_or(0)
}

fn render_totals_chart(f: &mut Frame, area: Rect, app: &App) {
    if app.transactions.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet.", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add one, or :import <file.json>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(theme::panel("Income vs Expenses"));
        f.render_widget(msg, area);
        return;
    }

    let s = &app.summary;
    let bars = [
        ("Income", s.income, theme::INCOME),
        ("Expenses", s.expenses, theme::EXPENSE),
    ]
    .into_iter()
    .map(|(label, amount, color)| {
        Bar::default()
            .value(bar_value(amount))
            .text_value(app.money(amount))
            .label(Line::from(label))
            .style(Style::default().fg(color))
            .value_style(
                Style::default()
                    .fg(theme::HEADER_BG)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            )
    })
    .collect::<Vec<Bar>>();

    let chart = BarChart::default()
        .block(theme::panel("Income vs Expenses"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(16)
        .bar_gap(4);

    f.render_widget(chart, area);
}
