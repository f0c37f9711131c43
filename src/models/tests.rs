#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_income_and_expense_flags() {
    let income = Transaction::new("Pay", dec!(100), TransactionKind::Income, "Salary", date(2025, 1, 1));
    assert!(income.is_income());
    assert!(!income.is_expense());

    let expense = Transaction::new("Rent", dec!(100), TransactionKind::Expense, "Housing", date(2025, 1, 1));
    assert!(expense.is_expense());
    assert!(!expense.is_income());
}

#[test]
fn test_signed_amount() {
    let income = Transaction::new("Pay", dec!(42.50), TransactionKind::Income, "Salary", date(2025, 1, 1));
    let expense = Transaction::new("Lunch", dec!(42.50), TransactionKind::Expense, "Food", date(2025, 1, 1));
    assert_eq!(income.signed_amount(), dec!(42.50));
    assert_eq!(expense.signed_amount(), dec!(-42.50));
}

#[test]
fn test_new_transactions_get_distinct_ids() {
    let a = Transaction::new("A", dec!(1), TransactionKind::Expense, "Food", date(2025, 1, 1));
    let b = Transaction::new("A", dec!(1), TransactionKind::Expense, "Food", date(2025, 1, 1));
    assert_ne!(a.id, b.id);
    assert_ne!(a, b);
}

#[test]
fn test_transaction_id_display_is_uuid() {
    let id = TransactionId::new();
    let shown = id.to_string();
    assert_eq!(shown.len(), 36);
    assert_eq!(shown.matches('-').count(), 4);
}

// ── TransactionKind ───────────────────────────────────────────

#[test]
fn test_kind_parse() {
    assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
    assert_eq!(TransactionKind::parse("INCOME"), Some(TransactionKind::Income));
    assert_eq!(TransactionKind::parse("+"), Some(TransactionKind::Income));
    assert_eq!(TransactionKind::parse("expense"), Some(TransactionKind::Expense));
    assert_eq!(TransactionKind::parse("exp"), Some(TransactionKind::Expense));
    assert_eq!(TransactionKind::parse("-"), Some(TransactionKind::Expense));
    assert_eq!(TransactionKind::parse("transfer"), None);
}

#[test]
fn test_kind_roundtrip() {
    for kind in [TransactionKind::Income, TransactionKind::Expense] {
        assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
    }
}

#[test]
fn test_kind_toggled() {
    assert_eq!(TransactionKind::Income.toggled(), TransactionKind::Expense);
    assert_eq!(TransactionKind::Expense.toggled(), TransactionKind::Income);
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_defaults() {
    let budgets = Budget::defaults();
    let names: Vec<&str> = budgets.iter().map(|b| b.category.as_str()).collect();
    assert_eq!(
        names,
        vec!["Housing", "Food", "Transportation", "Entertainment", "Utilities"]
    );
    assert_eq!(budgets[0].limit, dec!(1500));
    assert_eq!(budgets[1].limit, dec!(400));
    assert!(budgets.iter().all(|b| b.spent == Decimal::ZERO));
}

#[test]
fn test_income_categories_have_no_budget() {
    let budgets = Budget::defaults();
    for cat in INCOME_CATEGORIES {
        assert!(!budgets.iter().any(|b| b.category == *cat));
    }
}

fn food_budget(spent: Decimal) -> Budget {
    let mut budget = Budget::new("Food", dec!(400));
    budget.spent = spent;
    budget
}

#[test]
fn test_status_critical() {
    let status = food_budget(dec!(380)).status();
    assert_eq!(status.percentage, dec!(95));
    assert_eq!(status.tier, StatusTier::Critical);
}

#[test]
fn test_status_warning() {
    let status = food_budget(dec!(310)).status();
    assert_eq!(status.percentage, dec!(77.5));
    assert_eq!(status.tier, StatusTier::Warning);
}

#[test]
fn test_status_healthy() {
    let status = food_budget(dec!(100)).status();
    assert_eq!(status.percentage, dec!(25));
    assert_eq!(status.tier, StatusTier::Healthy);
}

#[test]
fn test_status_tier_boundaries() {
    assert_eq!(StatusTier::from_percentage(dec!(75)), StatusTier::Healthy);
    assert_eq!(StatusTier::from_percentage(dec!(75.01)), StatusTier::Warning);
    assert_eq!(StatusTier::from_percentage(dec!(90)), StatusTier::Warning);
    assert_eq!(StatusTier::from_percentage(dec!(90.01)), StatusTier::Critical);
    assert_eq!(StatusTier::from_percentage(dec!(250)), StatusTier::Critical);
}

#[test]
fn test_status_zero_limit_is_zero_percent() {
    let mut budget = Budget::new("Food", Decimal::ZERO);
    budget.spent = dec!(50);
    let status = budget.status();
    assert_eq!(status.percentage, Decimal::ZERO);
    assert_eq!(status.tier, StatusTier::Healthy);
}

#[test]
fn test_percentage_saturates_instead_of_overflowing() {
    let mut budget = Budget::new("Food", dec!(0.0000001));
    budget.spent = Decimal::MAX;
    assert_eq!(budget.percentage(), Decimal::MAX);
    assert_eq!(budget.status().tier, StatusTier::Critical);
}

#[test]
fn test_remaining_saturates() {
    let mut budget = Budget::new("Food", Decimal::MIN);
    budget.spent = Decimal::MAX;
    assert_eq!(budget.remaining(), Decimal::MIN);
}

#[test]
fn test_remaining() {
    assert_eq!(food_budget(dec!(150)).remaining(), dec!(250));
    assert_eq!(food_budget(dec!(450)).remaining(), dec!(-50));
}

#[test]
fn test_status_tier_display() {
    assert_eq!(format!("{}", StatusTier::Healthy), "Healthy");
    assert_eq!(format!("{}", StatusTier::Warning), "Warning");
    assert_eq!(format!("{}", StatusTier::Critical), "Critical");
}
