use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Totals
            Constraint::Min(8),    // Category chart
            Constraint::Length(app.breakdown.len().clamp(1, 10) as u16 + 2),
        ])
        .split(area);

    render_totals(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
    render_breakdown(f, chunks[2], app);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let s = &app.summary;
    let line = Line::from(vec![
        Span::styled(" Income ", theme::dim_style()),
        Span::styled(app.money(s.income), theme::income_style()),
        Span::styled("   Expenses ", theme::dim_style()),
        Span::styled(app.money(s.expenses), theme::expense_style()),
        Span::styled("   Balance ", theme::dim_style()),
        Span::styled(
            app.money(s.balance),
            Style::default()
                .fg(theme::balance_color(s.balance))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line).block(theme::panel("Totals")), area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    if app.breakdown.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses recorded yet.",
            theme::dim_style(),
        )))
        .centered()
        .block(theme::panel("Expenses by Category"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .breakdown
        .iter()
        .take(12)
        .enumerate()
        .map(|(i, share)| {
            let color = theme::category_color(i);
            Bar::default()
                .value(share.amount.round().to_u64().unwrap_or(0))
                .text_value(format_percent(share.percent))
                .label(Line::from(truncate(&share.name, 10)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(theme::panel("Expenses by Category"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = if app.breakdown.is_empty() {
        vec![Line::from(Span::styled(" Nothing to break down", theme::dim_style()))]
    } else {
        app.breakdown
            .iter()
            .enumerate()
            .take(area.height.saturating_sub(2) as usize)
            .map(|(i, share)| {
                Line::from(vec![
                    Span::styled(" \u{25a0} ", Style::default().fg(theme::category_color(i))),
                    Span::styled(format!("{:<24}", truncate(&share.name, 24)), theme::normal_style()),
                    Span::styled(format!("{:>7}", format_percent(share.percent)), theme::dim_style()),
                    Span::styled(" - ", theme::dim_style()),
                    Span::styled(app.money(share.amount), theme::expense_style()),
                ])
            })
            .collect()
    };
    f.render_widget(Paragraph::new(lines).block(theme::panel("Breakdown")), area);
}
