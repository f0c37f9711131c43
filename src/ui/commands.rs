use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::format_amount;
use crate::entry::{self, TransactionDraft};
use crate::ledger::Ledger;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Quantro", cmd_quit, r);
    register_command!("quit", "Quit Quantro", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("a", "Go to Analytics", cmd_analytics, r);
    register_command!("analytics", "Go to Analytics", cmd_analytics, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add expense 2025-04-05 Food 42.50 Groceries)",
        cmd_add,
        r
    );
    register_command!("n", "Open the add-transaction form", cmd_add, r);
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "budget",
        "Set budget limit (e.g. :budget Food 450)",
        cmd_budget,
        r
    );
    register_command!(
        "edit-budget",
        "Edit the selected budget's limit",
        cmd_edit_budget,
        r
    );
    register_command!(
        "search",
        "Search transactions (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search transactions (e.g. :s coffee)", cmd_search, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, "running command");
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_analytics(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Analytics;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

pub(crate) const REJECTED_ADD: &str = "Not added: the budget total for that category is too large";

const ADD_USAGE: &str =
    "Usage: :add <income|expense> <YYYY-MM-DD> <category> <amount> <description>";

fn cmd_add(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.open_form(ledger);
        return Ok(());
    }

    let parts: Vec<&str> = args.splitn(5, ' ').collect();
    if parts.len() < 4 {
        app.set_status(ADD_USAGE);
        return Ok(());
    }

    let kind = match entry::parse_kind(parts[0]) {
        Ok(kind) => kind,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let draft = TransactionDraft {
        description: parts.get(4).copied().unwrap_or("").to_string(),
        amount: parts[3].to_string(),
        kind,
        category: parts[2].to_string(),
        date: parts[1].to_string(),
    };

    match draft.validate() {
        Ok(txn) => {
            let tracked = txn.is_expense() && ledger.budget(&txn.category).is_some();
            let msg = format!(
                "Added {}: {} {} ({}{})",
                txn.kind.as_str().to_lowercase(),
                txn.description,
                format_amount(txn.amount),
                txn.category,
                if txn.is_expense() && !tracked {
                    ", no budget"
                } else {
                    ""
                }
            );
            if ledger.add_transaction(txn) {
                app.clamp_cursors(ledger);
                app.set_status(msg);
            } else {
                app.set_status(REJECTED_ADD);
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "quick add rejected");
            app.set_status(e.to_string());
        }
    }

    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if let Some(txn) = app.selected_transaction(ledger) {
        let id = txn.id;
        let description = txn.description.clone();
        app.confirm_message = format!(
            "Delete '{description}' ({})?",
            format_amount(txn.signed_amount())
        );
        app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
        app.input_mode = InputMode::Confirm;
    } else {
        app.set_status("No transactions to delete");
    }

    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    // Last token is the limit, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if args.is_empty() || parts.len() < 2 {
        app.set_status("Usage: :budget <category> <limit>. Example: :budget Food 450");
        return Ok(());
    }

    let limit_str = parts[0];
    let category_name = parts[1].trim();

    let Some(category) = ledger
        .budgets()
        .iter()
        .find(|b| b.category.eq_ignore_ascii_case(category_name))
        .map(|b| b.category.clone())
    else {
        let names = ledger.budget_categories().join(", ");
        app.set_status(format!(
            "No budget for '{category_name}'. Budgets: {names}"
        ));
        return Ok(());
    };

    match entry::parse_budget_limit(limit_str) {
        Ok(limit) => {
            if !ledger.update_budget_limit(&category, limit) {
                app.set_status(format!("No budget for '{category}'"));
                return Ok(());
            }
            app.screen = Screen::Budgets;
            if let Some(pos) = ledger.budgets().iter().position(|b| b.category == category) {
                app.budget_index = pos;
            }
            app.set_status(format!("Budget for {category} set to {}", format_amount(limit)));
        }
        Err(e) => {
            tracing::warn!(error = %e, %category, "budget command rejected");
            app.set_status(e.to_string());
        }
    }

    Ok(())
}

fn cmd_edit_budget(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Budgets {
        app.set_status("Navigate to Budgets and select one first");
        return Ok(());
    }
    app.begin_budget_edit(ledger);
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.reset_search();
    app.search_input = args.to_string();
    app.screen = Screen::Transactions;
    app.clamp_cursors(ledger);

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        let count = app.visible_transactions(ledger).len();
        app.set_status(format!("Searching: {args} ({count} matches)"));
    }

    Ok(())
}
