use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use rust_decimal::Decimal;

use super::app::{App, FormField, InputMode, Screen};
use super::commands;
use super::theme;
use super::util::format_amount;
use crate::ledger::Ledger;

pub(crate) fn render(f: &mut Frame, app: &App, ledger: &Ledger) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app, ledger);
    render_status_bar(f, chunks[2], app, ledger);
    render_command_bar(f, chunks[3], app, ledger);

    if app.input_mode == InputMode::Form {
        render_form_overlay(f, f.area(), app);
    }
    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, ledger),
        Screen::Transactions => super::screens::transactions::render(f, area, app, ledger),
        Screen::Budgets => super::screens::budgets::render(f, area, app, ledger),
        Screen::Analytics => super::screens::analytics::render(f, area, ledger),
    }
}

fn mode_style(mode: InputMode) -> Style {
    let bg = match mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing | InputMode::Form => theme::GREEN,
        InputMode::Search => theme::YELLOW,
        InputMode::Confirm => theme::RED,
    };
    Style::default()
        .fg(theme::HEADER_BG)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let mode_label = format!(" {} ", app.input_mode);
    let balance = ledger.balance();

    let info = format!(
        " {} | {} txns | balance ",
        app.screen,
        ledger.transactions().len()
    );
    let balance_str = format_amount(balance);

    let right = match app.screen {
        Screen::Dashboard => " n add | 1-4 tabs | ? help ",
        Screen::Transactions => " n add | D delete | /search | ? help ",
        Screen::Budgets => " e edit limit | :budget set | ? help ",
        Screen::Analytics => " n add | 1-4 tabs | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + balance_str.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style(app.input_mode)),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(
            balance_str,
            theme::status_bar_style().fg(theme::signed_color(balance >= Decimal::ZERO)),
        ),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Search => {
            let match_info = if !app.search_input.is_empty() {
                format!("  ({} matches)", app.visible_transactions(ledger).len())
            } else {
                String::new()
            };
            (
                Line::from(vec![
                    Span::styled("/", Style::default().fg(theme::YELLOW)),
                    Span::styled(&app.search_input, theme::command_bar_style()),
                    Span::styled(match_info, theme::dim_style()),
                ]),
                Some(1 + app.search_input.chars().count() as u16),
            )
        }
        InputMode::Editing => (
            Line::from(vec![
                Span::styled("limit> ", Style::default().fg(theme::GREEN)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(7 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal | InputMode::Form => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, / to search, n to add, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Rect of `width` x `height` centered inside `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_form_overlay(f: &mut Frame, area: Rect, app: &App) {
    const LABEL_WIDTH: usize = 13;

    let mut lines = vec![Line::from("")];
    let mut cursor = None;

    for (row, field) in FormField::all().iter().enumerate() {
        let focused = *field == app.form_field;
        let value = match field {
            FormField::Description => app.draft.description.clone(),
            FormField::Amount => app.draft.amount.clone(),
            FormField::Kind => format!("< {} >", app.draft.kind),
            FormField::Category => format!("< {} >", app.draft.category),
            FormField::Date => app.draft.date.clone(),
        };

        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        let value_style = if focused {
            theme::command_bar_style().add_modifier(Modifier::BOLD)
        } else {
            theme::normal_style()
        };

        if focused && matches!(field, FormField::Description | FormField::Amount | FormField::Date) {
            // +1 for the border, +1 for the blank first line
            cursor = Some((
                (2 + LABEL_WIDTH + value.chars().count()) as u16,
                (row + 2) as u16,
            ));
        }

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<width$}", field.label(), width = LABEL_WIDTH),
                label_style,
            ),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Tab/Up/Down move | Left/Right/Space change | Enter save | Esc cancel",
        theme::dim_style(),
    )));

    let popup = centered(area, 74, lines.len() as u16 + 2);
    f.render_widget(Clear, popup);
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(" Add Transaction ", theme::title_style()))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(form, popup);

    if let Some((dx, dy)) = cursor {
        if dx < popup.width && dy < popup.height {
            f.set_cursor_position((popup.x + dx, popup.y + dy));
        }
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let row = |text: &'static str| Line::from(Span::styled(text, theme::normal_style()));

    let mut help_text = vec![
        Line::from(Span::styled(
            " Quantro Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Navigation"),
        row("  j/k or Up/Down   Move cursor           1-4        Switch tabs"),
        row("  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom"),
        row("  Ctrl-d/u         Page Down/Up          Ctrl-q     Quit"),
        Line::from(""),
        section(" Actions"),
        row("  :               Command mode           /          Search (live)"),
        row("  n               Add transaction        D          Delete (Transactions)"),
        row("  e (Budgets)     Edit budget limit      Esc        Cancel/Back"),
        Line::from(""),
        section(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    let popup_area = centered(area, 80, help_text.len() as u16 + 2);
    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
