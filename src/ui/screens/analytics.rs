use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::panel;
use crate::ledger::Ledger;
use crate::ui::theme;
use crate::ui::util::truncate;

/// Chart palette, cycled per category.
const PALETTE: [ratatui::style::Color; 6] = [
    theme::ACCENT,
    theme::GREEN,
    theme::YELLOW,
    theme::RED,
    ratatui::style::Color::Rgb(203, 166, 247),
    ratatui::style::Color::Rgb(148, 226, 213),
];

pub(crate) fn render(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_category_chart(f, chunks[0], ledger);
    render_monthly_chart(f, chunks[1], ledger);
}

pub(crate) fn render_category_chart(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let totals = ledger.category_totals();
    let title = "Spending by Category";
    if totals.is_empty() {
        render_no_data(f, area, title, "No expense data available");
        return;
    }

    let all_spending = ledger.total_expenses();
    let bars: Vec<Bar> = totals
        .iter()
        .take(12)
        .enumerate()
        .map(|(i, (name, amt))| {
            let color = PALETTE[i % PALETTE.len()];
            let share = amt
                .checked_div(all_spending)
                .map(|ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED).round())
                .and_then(|pct| pct.to_u64())
                .unwrap_or(0);
            Bar::default()
                .value(amt.round().to_u64().unwrap_or(0))
                .label(Line::from(truncate(name, 10)))
                .text_value(format!("{share}%"))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);

    f.render_widget(chart, area);
}

pub(crate) fn render_monthly_chart(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let months = ledger.spend_by_month();
    let title = "Monthly Expenses";
    if months.is_empty() {
        render_no_data(f, area, title, "No monthly data available");
        return;
    }

    // Keep the most recent months when there are more than fit
    let fit = (area.width.saturating_sub(2) / 10).max(1) as usize;
    let skip = months.len().saturating_sub(fit);

    let bars: Vec<Bar> = months
        .iter()
        .skip(skip)
        .map(|m| {
            Bar::default()
                .value(m.total.round().to_u64().unwrap_or(0))
                .label(Line::from(m.label()))
                .text_value(format!("${}", m.total.round()))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_no_data(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Press n to add a transaction",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(panel(title));
    f.render_widget(msg, area);
}
