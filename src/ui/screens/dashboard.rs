use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use rust_decimal::Decimal;

use super::{analytics, budgets, panel};
use crate::ledger::Ledger;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(8),    // Budgets + chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], ledger);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    budgets::render_compact(f, body[0], ledger);
    analytics::render_category_chart(f, body[1], ledger);
}

fn render_summary_cards(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let summary = ledger.summary();
    let income_count = ledger.transactions().iter().filter(|t| t.is_income()).count();
    let expense_count = ledger.transactions().iter().filter(|t| t.is_expense()).count();

    render_card(
        f,
        cards[0],
        "Current Balance",
        format_amount(summary.balance),
        theme::signed_color(summary.balance >= Decimal::ZERO),
        "Your current financial balance".to_string(),
    );
    render_card(
        f,
        cards[1],
        "Total Income",
        format_amount(summary.income),
        theme::GREEN,
        format!("Money coming in, {income_count} txns"),
    );
    render_card(
        f,
        cards[2],
        "Total Expenses",
        format_amount(summary.expenses),
        theme::RED,
        format!("Money going out, {expense_count} txns"),
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
    .block(panel(title));

    f.render_widget(text, area);
}
