use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};
use rust_decimal::Decimal;

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const HEADER_FG: Color = Color::Rgb(205, 214, 244);
pub(crate) const ACCENT: Color = Color::Rgb(76, 201, 240);
pub(crate) const INCOME: Color = Color::Rgb(76, 201, 240);
pub(crate) const EXPENSE: Color = Color::Rgb(230, 57, 70);
pub(crate) const YELLOW: Color = Color::Rgb(255, 209, 102);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);

/// Colours cycled through for category bars.
pub(crate) const CATEGORY_COLORS: &[Color] = &[
    Color::Rgb(247, 37, 133),
    Color::Rgb(114, 9, 183),
    Color::Rgb(58, 12, 163),
    Color::Rgb(67, 97, 238),
    Color::Rgb(76, 201, 240),
    Color::Rgb(230, 57, 70),
    Color::Rgb(6, 214, 160),
    Color::Rgb(255, 209, 102),
];

pub(crate) fn category_color(index: usize) -> Color {
    CATEGORY_COLORS[index % CATEGORY_COLORS.len()]
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn income_style() -> Style {
    Style::default().fg(INCOME)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(EXPENSE)
}

pub(crate) fn balance_color(val: Decimal) -> Color {
    if val >= Decimal::ZERO {
        INCOME
    } else {
        EXPENSE
    }
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

/// Bordered panel with a dim bold title, used by every screen.
pub(crate) fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(OVERLAY))
        .title(Span::styled(
            format!(" {} ", title.into()),
            Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD),
        ))
}
