use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{Transaction, TransactionKind, INCOME_CATEGORIES};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw, unvalidated contents of the transaction entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransactionDraft {
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) kind: TransactionKind,
    pub(crate) category: String,
    pub(crate) date: String,
}

impl TransactionDraft {
    /// A blank expense draft dated today, preselecting the first expense category.
    pub(crate) fn new(expense_categories: &[&str]) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            kind: TransactionKind::Expense,
            category: expense_categories.first().copied().unwrap_or_default().to_string(),
            date: today(),
        }
    }

    /// Categories the form offers for the draft's current type.
    pub(crate) fn category_options<'a>(&self, expense_categories: &[&'a str]) -> Vec<&'a str> {
        match self.kind {
            TransactionKind::Income => INCOME_CATEGORIES.to_vec(),
            TransactionKind::Expense => expense_categories.to_vec(),
        }
    }

    /// Flip between income and expense, moving the category to the first option of the new type.
    pub(crate) fn toggle_kind(&mut self, expense_categories: &[&str]) {
        self.kind = self.kind.toggled();
        self.category = self
            .category_options(expense_categories)
            .first()
            .copied()
            .unwrap_or_default()
            .to_string();
    }

    /// Step the category through the options for the current type, wrapping at either end.
    pub(crate) fn cycle_category(&mut self, expense_categories: &[&str], delta: isize) {
        let options = self.category_options(expense_categories);
        if options.is_empty() {
            return;
        }
        let len = options.len() as isize;
        let current = options
            .iter()
            .position(|c| *c == self.category)
            .map_or(-1, |i| i as isize);
        let next = if current < 0 {
            0
        } else {
            (current + delta).rem_euclid(len)
        };
        self.category = options[next as usize].to_string();
    }

    /// Check every field and build a transaction with a freshly generated id.
    pub(crate) fn validate(&self) -> Result<Transaction, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingRequiredField("Description"));
        }
        if self.amount.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField("Amount"));
        }
        let amount = parse_amount(&self.amount)?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingRequiredField("Category"));
        }
        let date = parse_date(&self.date)?;

        Ok(Transaction::new(description, amount, self.kind, category, date))
    }
}

/// Parse a money amount between 0.01 and `MAX_WHOLE_UNITS`. A leading `$` and thousands separators are accepted.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    parse_positive(input).ok_or_else(|| ValidationError::InvalidAmount(input.trim().to_string()))
}

/// Parse an edited budget limit. Anything non-numeric or not above zero is refused.
pub(crate) fn parse_budget_limit(input: &str) -> Result<Decimal, ValidationError> {
    parse_positive(input)
        .ok_or_else(|| ValidationError::InvalidBudgetLimit(input.trim().to_string()))
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingRequiredField("Date"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

pub(crate) fn parse_kind(input: &str) -> Result<TransactionKind, ValidationError> {
    TransactionKind::parse(input.trim()).ok_or_else(|| ValidationError::UnknownKind(input.to_string()))
}

/// Whole-unit ceiling for a single amount or budget limit.
pub(crate) const MAX_WHOLE_UNITS: i64 = 1_000_000_000_000;
/// Amounts and limits are kept to cents.
const MAX_SCALE: u32 = 2;

/// Positive, at most `MAX_WHOLE_UNITS`, and no finer than cents. Keeps every
/// ledger sum and budget percentage far inside `Decimal`'s range.
fn parse_positive(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned)
        .ok()
        .map(|d| d.normalize())
        .filter(|d| {
            *d > Decimal::ZERO && *d <= Decimal::from(MAX_WHOLE_UNITS) && d.scale() <= MAX_SCALE
        })
}

pub(crate) fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}
