use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::panel;
use crate::ledger::Ledger;
use crate::models::Budget;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let items: Vec<ListItem> = ledger
        .budgets()
        .iter()
        .enumerate()
        .map(|(i, budget)| {
            let editing = app.editing_category.as_deref() == Some(budget.category.as_str());
            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let mut spans = budget_spans(budget, style, 30);
            let remaining = budget.remaining();
            spans.push(Span::styled(
                if remaining >= Decimal::ZERO {
                    format!("  {} left", format_amount(remaining))
                } else {
                    format!("  {} over", format_amount(remaining.abs()))
                },
                theme::dim_style(),
            ));
            if editing {
                spans.push(Span::styled("  (editing)", Style::default().fg(theme::GREEN)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(panel("Budget Tracker  e edit limit"));
    f.render_widget(list, area);
}

/// Narrow budget list for the dashboard.
pub(crate) fn render_compact(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let bar_width = (area.width as usize).saturating_sub(48).clamp(5, 20);
    let items: Vec<ListItem> = ledger
        .budgets()
        .iter()
        .map(|budget| ListItem::new(Line::from(budget_spans(budget, theme::normal_style(), bar_width))))
        .collect();

    let list = List::new(items).block(panel("Budget Tracker"));
    f.render_widget(list, area);
}

fn budget_spans(budget: &Budget, name_style: Style, bar_width: usize) -> Vec<Span<'static>> {
    let status = budget.status();
    let color = theme::tier_color(status.tier);
    let ratio = (status.percentage / Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0);

    vec![
        Span::styled(format!("{:<16}", truncate(&budget.category, 15)), name_style),
        Span::styled(
            format!(
                "{:>11} / {:<11}",
                format_amount(budget.spent),
                format_amount(budget.limit)
            ),
            Style::default().fg(color),
        ),
        Span::styled(progress_bar(ratio, bar_width), Style::default().fg(color)),
        Span::styled(
            format!(" {:>4}%", status.percentage.round()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", status.tier), Style::default().fg(color)),
    ]
}
