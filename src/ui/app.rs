use crate::entry::{self, TransactionDraft};
use crate::ledger::Ledger;
use crate::models::{Budget, Transaction, TransactionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    Analytics,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::Analytics,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Analytics => write!(f, "Analytics"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Editing,
    Confirm,
    Form,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
            Self::Form => write!(f, "ADD"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction {
        id: TransactionId,
        description: String,
    },
}

/// Field focus inside the add-transaction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Description,
    Amount,
    Kind,
    Category,
    Date,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Description,
            Self::Amount,
            Self::Kind,
            Self::Category,
            Self::Date,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Kind => "Type",
            Self::Category => "Category",
            Self::Date => "Date",
        }
    }

    pub(crate) fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub(crate) fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// View state for the terminal dashboard. The ledger itself is owned by the caller
/// and passed in wherever data is read or changed.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Transactions
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Budgets
    pub(crate) budget_index: usize,
    pub(crate) editing_category: Option<String>,

    // Entry form
    pub(crate) draft: TransactionDraft,
    pub(crate) form_field: FormField,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(ledger: &Ledger) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,

            transaction_index: 0,
            transaction_scroll: 0,

            budget_index: 0,
            editing_category: None,

            draft: TransactionDraft::new(&ledger.budget_categories()),
            form_field: FormField::Description,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Transactions shown on the Transactions screen: newest first, narrowed by the search text.
    pub(crate) fn visible_transactions<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Transaction> {
        let all = ledger.transactions_newest_first();
        if self.search_input.is_empty() {
            return all;
        }
        let needle = self.search_input.to_lowercase();
        all.into_iter()
            .filter(|t| {
                t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub(crate) fn selected_transaction<'a>(&self, ledger: &'a Ledger) -> Option<&'a Transaction> {
        self.visible_transactions(ledger)
            .get(self.transaction_index)
            .copied()
    }

    pub(crate) fn selected_budget<'a>(&self, ledger: &'a Ledger) -> Option<&'a Budget> {
        ledger.budgets().get(self.budget_index)
    }

    /// Keep cursors inside their lists after the ledger or the search changed.
    pub(crate) fn clamp_cursors(&mut self, ledger: &Ledger) {
        let txn_len = self.visible_transactions(ledger).len();
        if self.transaction_index >= txn_len {
            self.transaction_index = txn_len.saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        let budget_len = ledger.budgets().len();
        if self.budget_index >= budget_len {
            self.budget_index = budget_len.saturating_sub(1);
        }
    }

    pub(crate) fn reset_search(&mut self) {
        self.search_input.clear();
        self.transaction_index = 0;
        self.transaction_scroll = 0;
    }

    // ── Entry form ────────────────────────────────────────────

    pub(crate) fn open_form(&mut self, ledger: &Ledger) {
        self.draft = TransactionDraft::new(&ledger.budget_categories());
        self.form_field = FormField::Description;
        self.input_mode = InputMode::Form;
        self.set_status("New transaction: Tab to move, Enter to save, Esc to cancel");
    }

    pub(crate) fn close_form(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Validate the draft and hand it to the ledger. The form stays open on error.
    pub(crate) fn submit_form(&mut self, ledger: &mut Ledger) -> bool {
        match self.draft.validate() {
            Ok(txn) => {
                let msg = format!(
                    "Added {}: {} {} ({})",
                    txn.kind.as_str().to_lowercase(),
                    txn.description,
                    super::util::format_amount(txn.amount),
                    txn.category
                );
                if !ledger.add_transaction(txn) {
                    self.set_status(super::commands::REJECTED_ADD);
                    return false;
                }
                self.draft = TransactionDraft::new(&ledger.budget_categories());
                self.form_field = FormField::Description;
                self.close_form();
                self.clamp_cursors(ledger);
                self.set_status(msg);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "transaction entry rejected");
                self.set_status(e.to_string());
                false
            }
        }
    }

    // ── Budget editing ────────────────────────────────────────

    pub(crate) fn begin_budget_edit(&mut self, ledger: &Ledger) {
        let Some(budget) = self.selected_budget(ledger) else {
            self.set_status("No budget selected");
            return;
        };
        self.editing_category = Some(budget.category.clone());
        self.command_input = budget.limit.to_string();
        self.input_mode = InputMode::Editing;
        self.set_status(format!(
            "New limit for {}, Enter to save, Esc to cancel",
            budget.category
        ));
    }

    pub(crate) fn commit_budget_edit(&mut self, ledger: &mut Ledger) {
        let input = std::mem::take(&mut self.command_input);
        self.input_mode = InputMode::Normal;
        let Some(category) = self.editing_category.take() else {
            return;
        };
        match entry::parse_budget_limit(&input) {
            Ok(limit) => {
                if ledger.update_budget_limit(&category, limit) {
                    self.set_status(format!(
                        "Budget for {category} set to {}",
                        super::util::format_amount(limit)
                    ));
                } else {
                    self.set_status(format!("No budget for '{category}'"));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, %category, "budget edit rejected");
                self.set_status(e.to_string());
            }
        }
    }

    pub(crate) fn cancel_budget_edit(&mut self) {
        self.command_input.clear();
        self.editing_category = None;
        self.input_mode = InputMode::Normal;
        self.set_status("Edit cancelled");
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
