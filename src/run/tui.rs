use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::Ledger;
use crate::ui::app::{App, FormField, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new(ledger);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "dashboard loop failed");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, ledger);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
                InputMode::Search => handle_search_input(key, app, ledger),
                InputMode::Editing => handle_editing_input(key, app, ledger),
                InputMode::Confirm => handle_confirm_input(key, app, ledger),
                InputMode::Form => handle_form_input(key, app, ledger),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.reset_search();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app, ledger);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app, ledger),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app, ledger),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            if let Some(screen) = Screen::all().get(idx) {
                app.screen = *screen;
            }
        }
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + 1) % screens.len()];
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            app.screen = screens[prev];
        }
        KeyCode::Char('n') => app.open_form(ledger),
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete-txn", app, ledger)?;
        }
        KeyCode::Char('e') | KeyCode::Enter if app.screen == Screen::Budgets => {
            commands::handle_command("edit-budget", app, ledger)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
            if !app.search_input.is_empty() {
                app.reset_search();
                app.clamp_cursors(ledger);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.screen = Screen::Transactions;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.reset_search();
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            // Live search: filter as you type
            app.screen = Screen::Transactions;
            app.transaction_index = 0;
            app.transaction_scroll = 0;
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.screen = Screen::Transactions;
            app.transaction_index = 0;
            app.transaction_scroll = 0;
        }
        _ => {}
    }
    app.clamp_cursors(ledger);
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) {
    match key.code {
        KeyCode::Enter => app.commit_budget_edit(ledger),
        KeyCode::Esc => app.cancel_budget_edit(),
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteTransaction { id, description } => {
                        match ledger.delete_transaction(id) {
                            Some(_) => app.set_status(format!("Deleted: {description}")),
                            None => app.set_status("Transaction no longer exists"),
                        }
                        app.clamp_cursors(ledger);
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) {
    match key.code {
        KeyCode::Esc => {
            app.close_form();
            app.set_status("Cancelled");
        }
        KeyCode::Enter => {
            app.submit_form(ledger);
        }
        KeyCode::Tab | KeyCode::Down => app.form_field = app.form_field.next(),
        KeyCode::BackTab | KeyCode::Up => app.form_field = app.form_field.prev(),
        code => {
            let categories = ledger.budget_categories();
            match app.form_field {
                FormField::Kind => {
                    if matches!(
                        code,
                        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                    ) {
                        app.draft.toggle_kind(&categories);
                    }
                }
                FormField::Category => match code {
                    KeyCode::Left => app.draft.cycle_category(&categories, -1),
                    KeyCode::Right | KeyCode::Char(' ') => {
                        app.draft.cycle_category(&categories, 1)
                    }
                    _ => {}
                },
                FormField::Description | FormField::Amount | FormField::Date => {
                    let Some(text) = focused_text(app) else {
                        return;
                    };
                    match code {
                        KeyCode::Backspace => {
                            text.pop();
                        }
                        KeyCode::Char(c) => text.push(c),
                        _ => {}
                    }
                }
            }
        }
    }
}

fn focused_text(app: &mut App) -> Option<&mut String> {
    match app.form_field {
        FormField::Description => Some(&mut app.draft.description),
        FormField::Amount => Some(&mut app.draft.amount),
        FormField::Date => Some(&mut app.draft.date),
        FormField::Kind | FormField::Category => None,
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn handle_move_down(app: &mut App, ledger: &Ledger) {
    match app.screen {
        Screen::Transactions => {
            let len = app.visible_transactions(ledger).len();
            let page = app.visible_rows.max(1);
            scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Budgets => {
            if app.budget_index + 1 < ledger.budgets().len() {
                app.budget_index += 1;
            }
        }
        Screen::Dashboard | Screen::Analytics => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Budgets => {
            app.budget_index = app.budget_index.saturating_sub(1);
        }
        Screen::Dashboard | Screen::Analytics => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Budgets => app.budget_index = 0,
        Screen::Dashboard | Screen::Analytics => {}
    }
}

fn handle_goto_bottom(app: &mut App, ledger: &Ledger) {
    match app.screen {
        Screen::Transactions => {
            let len = app.visible_transactions(ledger).len();
            let page = app.visible_rows.max(1);
            scroll_to_bottom(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Budgets => {
            app.budget_index = ledger.budgets().len().saturating_sub(1);
        }
        Screen::Dashboard | Screen::Analytics => {}
    }
}
