use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::*;

/// Session-scoped ledger: every transaction entered so far plus the budgets they count against.
///
/// `Budget::spent` is maintained incrementally by `add_transaction` and
/// `delete_transaction`. All other aggregates are recomputed from the
/// transaction list on every call.
#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

/// Income, expense and balance totals for the summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) balance: Decimal,
}

/// Expense total for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlySpend {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) total: Decimal,
}

impl MonthlySpend {
    /// Short label such as `"Apr 2025"`.
    pub(crate) fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", self.year, self.month))
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Empty ledger seeded with the built-in budgets.
    pub(crate) fn new() -> Self {
        Self::with_budgets(Budget::defaults())
    }

    /// Ledger with custom budget presets. Later duplicates of a category are ignored.
    pub(crate) fn with_budgets(presets: impl IntoIterator<Item = Budget>) -> Self {
        let mut budgets: Vec<Budget> = Vec::new();
        for mut budget in presets {
            if budgets.iter().any(|b| b.category == budget.category) {
                tracing::warn!(category = %budget.category, "duplicate budget preset ignored");
                continue;
            }
            budget.spent = Decimal::ZERO;
            budgets.push(budget);
        }
        Self {
            transactions: Vec::new(),
            budgets,
        }
    }

    /// Default budgets plus a handful of sample transactions.
    pub(crate) fn demo() -> Self {
        let mut ledger = Self::new();
        for txn in demo_transactions() {
            ledger.add_transaction(txn);
        }
        ledger
    }

    // ── Intents ───────────────────────────────────────────────

    /// Record a transaction. The caller guarantees `amount > 0` and a fresh id.
    ///
    /// Returns `false`, leaving the ledger untouched, if the matching budget's
    /// `spent` would overflow.
    pub(crate) fn add_transaction(&mut self, txn: Transaction) -> bool {
        if txn.is_expense() {
            match self.budget_mut(&txn.category) {
                Some(budget) => {
                    let Some(spent) = budget.spent.checked_add(txn.amount) else {
                        tracing::warn!(category = %txn.category, amount = %txn.amount, "transaction rejected: budget total overflow");
                        return false;
                    };
                    budget.spent = spent;
                }
                None => tracing::debug!(category = %txn.category, "expense has no matching budget"),
            }
        }
        tracing::debug!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "transaction added");
        self.transactions.push(txn);
        true
    }

    /// Remove a transaction by id, returning it. Unknown ids are a no-op.
    pub(crate) fn delete_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            tracing::debug!(%id, "delete ignored: no such transaction");
            return None;
        };
        let txn = self.transactions.remove(pos);
        if txn.is_expense() {
            if let Some(budget) = self.budget_mut(&txn.category) {
                budget.spent = budget.spent.saturating_sub(txn.amount);
            }
        }
        tracing::debug!(id = %txn.id, amount = %txn.amount, "transaction deleted");
        Some(txn)
    }

    /// Change a budget's limit. Returns `false` and leaves state untouched when
    /// the limit is not positive or the category has no budget.
    pub(crate) fn update_budget_limit(&mut self, category: &str, new_limit: Decimal) -> bool {
        if new_limit <= Decimal::ZERO {
            tracing::warn!(category, limit = %new_limit, "budget limit rejected");
            return false;
        }
        match self.budget_mut(category) {
            Some(budget) => {
                budget.limit = new_limit;
                tracing::debug!(category, limit = %new_limit, "budget limit updated");
                true
            }
            None => {
                tracing::debug!(category, "limit update ignored: no such budget");
                false
            }
        }
    }

    // ── Read accessors ────────────────────────────────────────

    /// Transactions in insertion order.
    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions ordered by date, newest first. Same-day entries keep insertion order.
    pub(crate) fn transactions_newest_first(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub(crate) fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub(crate) fn budget(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }

    pub(crate) fn budget_categories(&self) -> Vec<&str> {
        self.budgets.iter().map(|b| b.category.as_str()).collect()
    }

    fn budget_mut(&mut self, category: &str) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|b| b.category == category)
    }

    // ── Derived aggregates ────────────────────────────────────

    pub(crate) fn total_income(&self) -> Decimal {
        self.sum_where(|t| t.is_income())
    }

    pub(crate) fn total_expenses(&self) -> Decimal {
        self.sum_where(|t| t.is_expense())
    }

    pub(crate) fn balance(&self) -> Decimal {
        self.total_income().saturating_sub(self.total_expenses())
    }

    pub(crate) fn summary(&self) -> Summary {
        let income = self.total_income();
        let expenses = self.total_expenses();
        Summary {
            income,
            expenses,
            balance: income.saturating_sub(expenses),
        }
    }

    /// Expense total for one category, whether or not it has a budget.
    pub(crate) fn spend_by_category(&self, category: &str) -> Decimal {
        self.sum_where(|t| t.is_expense() && t.category == category)
    }

    /// Expense totals for every category that has spending, largest first.
    pub(crate) fn category_totals(&self) -> Vec<(String, Decimal)> {
        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for txn in self.transactions.iter().filter(|t| t.is_expense()) {
            let total = totals.entry(txn.category.as_str()).or_default();
            *total = total.saturating_add(txn.amount);
        }
        let mut out: Vec<(String, Decimal)> = totals
            .into_iter()
            .map(|(name, total)| (name.to_string(), total))
            .collect();
        // BTreeMap already yields names in order, so a stable sort keeps ties alphabetical.
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    /// Expense totals grouped by calendar month, oldest month first.
    pub(crate) fn spend_by_month(&self) -> Vec<MonthlySpend> {
        let mut months: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
        for txn in self.transactions.iter().filter(|t| t.is_expense()) {
            let total = months.entry((txn.date.year(), txn.date.month())).or_default();
            *total = total.saturating_add(txn.amount);
        }
        months
            .into_iter()
            .map(|((year, month), total)| MonthlySpend { year, month, total })
            .collect()
    }

    pub(crate) fn budget_status(&self, category: &str) -> Option<BudgetStatus> {
        self.budget(category).map(Budget::status)
    }

    fn sum_where(&self, pred: impl Fn(&Transaction) -> bool) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| pred(t))
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    }
}

fn demo_transactions() -> Vec<Transaction> {
    let day = |m: u32, d: u32| NaiveDate::from_ymd_opt(2025, m, d).unwrap_or_default();
    vec![
        Transaction::new(
            "Monthly salary",
            Decimal::from(3000),
            TransactionKind::Income,
            "Salary",
            day(4, 1),
        ),
        Transaction::new(
            "Rent",
            Decimal::from(1200),
            TransactionKind::Expense,
            "Housing",
            day(4, 2),
        ),
        Transaction::new(
            "Groceries",
            Decimal::new(15075, 2),
            TransactionKind::Expense,
            "Food",
            day(4, 5),
        ),
        Transaction::new(
            "Electric bill",
            Decimal::new(8540, 2),
            TransactionKind::Expense,
            "Utilities",
            day(5, 3),
        ),
    ]
}

#[cfg(test)]
mod tests;
