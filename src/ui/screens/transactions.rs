use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::panel;
use crate::ledger::Ledger;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_date, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let visible = app.visible_transactions(ledger);

    if visible.is_empty() {
        let msg = if !app.search_input.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions matching '{}'", app.search_input),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to clear the search",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No transactions yet", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Press n or use :add to record one",
                    theme::dim_style(),
                )),
            ]
        };
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(panel("Transactions (0)")),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Type", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let sign = if txn.is_income() { "+" } else { "-" };
            let amount_str = format!("{sign}{}", format_amount(txn.amount));

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", format_date(txn.date))),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(truncate(&txn.category, 18)),
                Cell::from(txn.kind.as_str()),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(9),
        Constraint::Length(14),
    ];

    let title = if app.search_input.is_empty() {
        format!("Transactions ({})", visible.len())
    } else {
        format!(
            "Transactions ({}) search: '{}'",
            visible.len(),
            app.search_input
        )
    };

    let table = Table::new(rows, widths).header(header).block(panel(title));
    f.render_widget(table, area);
}
