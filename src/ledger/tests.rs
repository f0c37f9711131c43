#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(category: &str, amount: Decimal) -> Transaction {
    Transaction::new("Test", amount, TransactionKind::Expense, category, date(2025, 4, 5))
}

fn income(category: &str, amount: Decimal) -> Transaction {
    Transaction::new("Test", amount, TransactionKind::Income, category, date(2025, 4, 5))
}

fn spent(ledger: &Ledger, category: &str) -> Decimal {
    ledger.budget(category).unwrap().spent
}

/// Every budget's `spent` must equal the expense sum for its category.
fn assert_budgets_consistent(ledger: &Ledger) {
    for budget in ledger.budgets() {
        let expected: Decimal = ledger
            .transactions()
            .iter()
            .filter(|t| t.is_expense() && t.category == budget.category)
            .map(|t| t.amount)
            .sum();
        assert_eq!(budget.spent, expected, "spent drifted for {}", budget.category);
        assert_eq!(budget.spent, ledger.spend_by_category(&budget.category));
    }
    assert_eq!(
        ledger.total_income() - ledger.total_expenses(),
        ledger.balance()
    );
}

// ── Construction ──────────────────────────────────────────────

#[test]
fn test_new_ledger_is_empty_with_default_budgets() {
    let ledger = Ledger::new();
    assert!(ledger.transactions().is_empty());
    assert_eq!(ledger.budgets().len(), 5);
    assert_eq!(ledger.budget("Housing").unwrap().limit, dec!(1500));
    assert_eq!(ledger.budget("Food").unwrap().limit, dec!(400));
    assert_eq!(ledger.budget("Transportation").unwrap().limit, dec!(200));
    assert_eq!(ledger.budget("Entertainment").unwrap().limit, dec!(150));
    assert_eq!(ledger.budget("Utilities").unwrap().limit, dec!(300));
    assert_eq!(ledger.total_income(), Decimal::ZERO);
    assert_eq!(ledger.total_expenses(), Decimal::ZERO);
    assert_eq!(ledger.balance(), Decimal::ZERO);
}

#[test]
fn test_with_budgets_ignores_duplicates_and_resets_spent() {
    let mut seeded = Budget::new("Food", dec!(400));
    seeded.spent = dec!(99);
    let ledger = Ledger::with_budgets(vec![
        seeded,
        Budget::new("Food", dec!(999)),
        Budget::new("Pets", dec!(50)),
    ]);
    assert_eq!(ledger.budgets().len(), 2);
    assert_eq!(ledger.budget("Food").unwrap().limit, dec!(400));
    assert_eq!(spent(&ledger, "Food"), Decimal::ZERO);
}

#[test]
fn test_demo_ledger_is_consistent() {
    let ledger = Ledger::demo();
    assert_eq!(ledger.transactions().len(), 4);
    assert_eq!(ledger.total_income(), dec!(3000));
    assert_eq!(spent(&ledger, "Housing"), dec!(1200));
    assert_budgets_consistent(&ledger);
}

// ── Add / delete ──────────────────────────────────────────────

#[test]
fn test_scenario_housing_and_salary() {
    let mut ledger = Ledger::new();

    let rent = expense("Housing", dec!(1200));
    let rent_id = rent.id;
    ledger.add_transaction(rent);
    assert_eq!(spent(&ledger, "Housing"), dec!(1200));
    assert_eq!(ledger.total_expenses(), dec!(1200));
    assert_eq!(ledger.balance(), dec!(-1200));

    ledger.add_transaction(income("Salary", dec!(3000)));
    assert_eq!(ledger.total_income(), dec!(3000));
    assert_eq!(ledger.balance(), dec!(1800));

    let removed = ledger.delete_transaction(rent_id).unwrap();
    assert_eq!(removed.id, rent_id);
    assert_eq!(spent(&ledger, "Housing"), Decimal::ZERO);
    assert_eq!(ledger.total_expenses(), Decimal::ZERO);
    assert_eq!(ledger.balance(), dec!(3000));
}

#[test]
fn test_income_never_touches_budgets() {
    let mut ledger = Ledger::new();
    // Same name as a budget, but income does not count as spending
    ledger.add_transaction(income("Food", dec!(50)));
    assert_eq!(spent(&ledger, "Food"), Decimal::ZERO);
    assert_eq!(ledger.total_income(), dec!(50));
}

#[test]
fn test_unmatched_category_expense() {
    let mut ledger = Ledger::new();
    let before: Vec<Budget> = ledger.budgets().to_vec();

    ledger.add_transaction(expense("Pets", dec!(80)));

    assert_eq!(ledger.budgets(), before.as_slice());
    assert_eq!(ledger.total_expenses(), dec!(80));
    assert_eq!(ledger.spend_by_category("Pets"), dec!(80));
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn test_category_match_is_exact() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(expense("food", dec!(10)));
    assert_eq!(spent(&ledger, "Food"), Decimal::ZERO);
}

#[test]
fn test_delete_nonexistent_is_noop() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(expense("Food", dec!(25)));
    let before = ledger.clone();

    assert!(ledger.delete_transaction(TransactionId::new()).is_none());
    assert_eq!(ledger.transactions(), before.transactions());
    assert_eq!(ledger.budgets(), before.budgets());
}

#[test]
fn test_delete_unmatched_expense_leaves_budgets() {
    let mut ledger = Ledger::new();
    let pets = expense("Pets", dec!(30));
    let id = pets.id;
    ledger.add_transaction(pets);
    ledger.add_transaction(expense("Food", dec!(20)));

    ledger.delete_transaction(id);
    assert_eq!(spent(&ledger, "Food"), dec!(20));
    assert_eq!(ledger.total_expenses(), dec!(20));
}

#[test]
fn test_delete_then_readd_roundtrip() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(income("Salary", dec!(2000)));
    let groceries = expense("Food", dec!(75.25));
    let id = groceries.id;
    ledger.add_transaction(groceries.clone());
    ledger.add_transaction(expense("Food", dec!(10)));

    let spent_before = spent(&ledger, "Food");
    let summary_before = ledger.summary();

    ledger.delete_transaction(id);
    assert_eq!(spent(&ledger, "Food"), dec!(10));

    let equivalent = Transaction::new(
        groceries.description.clone(),
        groceries.amount,
        groceries.kind,
        groceries.category.clone(),
        groceries.date,
    );
    ledger.add_transaction(equivalent);

    assert_eq!(spent(&ledger, "Food"), spent_before);
    assert_eq!(ledger.summary(), summary_before);
}

#[test]
fn test_deleting_one_of_duplicates_keeps_the_other() {
    let mut ledger = Ledger::new();
    let first = expense("Food", dec!(12));
    let second = expense("Food", dec!(12));
    let first_id = first.id;
    let second_id = second.id;
    ledger.add_transaction(first);
    ledger.add_transaction(second);

    ledger.delete_transaction(first_id);
    assert_eq!(spent(&ledger, "Food"), dec!(12));
    let ids: Vec<_> = ledger.transactions().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second_id]);
}

#[test]
fn test_invariant_holds_across_operation_sequence() {
    let categories = ["Housing", "Food", "Transportation", "Salary", "Pets", "Utilities"];
    let mut ledger = Ledger::new();
    let mut live: Vec<TransactionId> = Vec::new();

    // Small LCG so the sequence is deterministic without pulling in a rng crate
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        (seed >> 33) as usize
    };

    for step in 0..400 {
        let roll = next();
        if roll % 3 == 0 && !live.is_empty() {
            let id = live.remove(next() % live.len());
            assert!(ledger.delete_transaction(id).is_some());
        } else {
            let category = categories[next() % categories.len()];
            let cents = (next() % 50_000 + 1) as i64;
            let kind = if next() % 4 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            let day = (step % 28 + 1) as u32;
            let txn = Transaction::new(
                "Step",
                Decimal::new(cents, 2),
                kind,
                category,
                date(2025, (step % 12 + 1) as u32, day),
            );
            live.push(txn.id);
            ledger.add_transaction(txn);
        }
        assert_budgets_consistent(&ledger);
    }

    for id in live.drain(..) {
        ledger.delete_transaction(id);
        assert_budgets_consistent(&ledger);
    }
    assert!(ledger.budgets().iter().all(|b| b.spent == Decimal::ZERO));
    assert_eq!(ledger.balance(), Decimal::ZERO);
}

// ── Budget limits ─────────────────────────────────────────────

#[test]
fn test_update_budget_limit() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(expense("Food", dec!(100)));

    assert!(ledger.update_budget_limit("Food", dec!(550)));
    let food = ledger.budget("Food").unwrap();
    assert_eq!(food.limit, dec!(550));
    assert_eq!(food.spent, dec!(100));
}

#[test]
fn test_update_budget_limit_rejects_non_positive() {
    let mut ledger = Ledger::new();
    let before: Vec<Budget> = ledger.budgets().to_vec();

    assert!(!ledger.update_budget_limit("Food", Decimal::ZERO));
    assert!(!ledger.update_budget_limit("Food", dec!(-10)));
    assert!(!ledger.update_budget_limit("Food", dec!(-0.01)));

    assert_eq!(ledger.budgets(), before.as_slice());
}

#[test]
fn test_update_budget_limit_unknown_category() {
    let mut ledger = Ledger::new();
    let before: Vec<Budget> = ledger.budgets().to_vec();
    assert!(!ledger.update_budget_limit("Salary", dec!(100)));
    assert_eq!(ledger.budgets(), before.as_slice());
}

#[test]
fn test_budget_status_lookup() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(expense("Food", dec!(380)));
    let status = ledger.budget_status("Food").unwrap();
    assert_eq!(status.percentage, dec!(95));
    assert_eq!(status.tier, StatusTier::Critical);

    ledger.update_budget_limit("Food", dec!(760));
    assert_eq!(ledger.budget_status("Food").unwrap().tier, StatusTier::Healthy);
    assert!(ledger.budget_status("Salary").is_none());
}

// ── Aggregates ────────────────────────────────────────────────

#[test]
fn test_spend_by_month_groups_and_orders() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(Transaction::new(
        "Later",
        dec!(50),
        TransactionKind::Expense,
        "Food",
        date(2025, 5, 2),
    ));
    ledger.add_transaction(Transaction::new(
        "Earlier",
        dec!(100),
        TransactionKind::Expense,
        "Food",
        date(2025, 4, 5),
    ));

    let months = ledger.spend_by_month();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].label(), "Apr 2025");
    assert_eq!(months[0].total, dec!(100));
    assert_eq!(months[1].label(), "May 2025");
    assert_eq!(months[1].total, dec!(50));
}

#[test]
fn test_spend_by_month_ignores_income_and_spans_years() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(Transaction::new(
        "Jan",
        dec!(20),
        TransactionKind::Expense,
        "Food",
        date(2025, 1, 10),
    ));
    ledger.add_transaction(Transaction::new(
        "Dec",
        dec!(30),
        TransactionKind::Expense,
        "Food",
        date(2024, 12, 31),
    ));
    ledger.add_transaction(Transaction::new(
        "Dec too",
        dec!(5),
        TransactionKind::Expense,
        "Pets",
        date(2024, 12, 1),
    ));
    ledger.add_transaction(Transaction::new(
        "Pay",
        dec!(999),
        TransactionKind::Income,
        "Salary",
        date(2024, 11, 1),
    ));

    let labels: Vec<(String, Decimal)> = ledger
        .spend_by_month()
        .iter()
        .map(|m| (m.label(), m.total))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("Dec 2024".to_string(), dec!(35)),
            ("Jan 2025".to_string(), dec!(20)),
        ]
    );
}

#[test]
fn test_category_totals_largest_first() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(expense("Food", dec!(40)));
    ledger.add_transaction(expense("Housing", dec!(900)));
    ledger.add_transaction(expense("Food", dec!(25)));
    ledger.add_transaction(expense("Pets", dec!(65)));
    ledger.add_transaction(income("Salary", dec!(5000)));

    let totals = ledger.category_totals();
    assert_eq!(
        totals,
        vec![
            ("Housing".to_string(), dec!(900)),
            ("Food".to_string(), dec!(65)),
            ("Pets".to_string(), dec!(65)),
        ]
    );
}

#[test]
fn test_category_totals_match_budget_spent() {
    let ledger = Ledger::demo();
    for (category, total) in ledger.category_totals() {
        if let Some(budget) = ledger.budget(&category) {
            assert_eq!(budget.spent, total);
        }
    }
}

#[test]
fn test_transactions_newest_first() {
    let mut ledger = Ledger::new();
    let mk = |desc: &str, d: NaiveDate| {
        Transaction::new(desc, dec!(1), TransactionKind::Expense, "Food", d)
    };
    ledger.add_transaction(mk("middle", date(2025, 4, 10)));
    ledger.add_transaction(mk("oldest", date(2025, 1, 1)));
    ledger.add_transaction(mk("newest", date(2025, 6, 1)));
    ledger.add_transaction(mk("middle-2", date(2025, 4, 10)));

    let order: Vec<&str> = ledger
        .transactions_newest_first()
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(order, vec!["newest", "middle", "middle-2", "oldest"]);
}

#[test]
fn test_summary_matches_individual_totals() {
    let ledger = Ledger::demo();
    let summary = ledger.summary();
    assert_eq!(summary.income, ledger.total_income());
    assert_eq!(summary.expenses, ledger.total_expenses());
    assert_eq!(summary.balance, ledger.balance());
}

#[test]
fn test_monthly_label_fallback() {
    let bogus = MonthlySpend {
        year: 2025,
        month: 13,
        total: Decimal::ZERO,
    };
    assert_eq!(bogus.label(), "2025-13");
}

// ── Overflow ──────────────────────────────────────────────────

#[test]
fn test_add_rejects_expense_that_would_overflow_budget() {
    let mut ledger = Ledger::new();
    assert!(ledger.add_transaction(expense("Food", Decimal::MAX)));

    let before = ledger.clone();
    assert!(!ledger.add_transaction(expense("Food", Decimal::MAX)));
    assert_eq!(ledger.transactions(), before.transactions());
    assert_eq!(ledger.budgets(), before.budgets());
    assert_eq!(spent(&ledger, "Food"), Decimal::MAX);
    assert_budgets_consistent(&ledger);
}

#[test]
fn test_huge_totals_do_not_panic() {
    let mut ledger = Ledger::new();
    assert!(ledger.add_transaction(income("Salary", Decimal::MAX)));
    assert!(ledger.add_transaction(income("Gifts", Decimal::MAX)));
    assert!(ledger.add_transaction(expense("Pets", Decimal::MAX)));
    assert!(ledger.add_transaction(expense("Toys", Decimal::MAX)));

    assert_eq!(ledger.total_income(), Decimal::MAX);
    assert_eq!(ledger.total_expenses(), Decimal::MAX);
    assert_eq!(ledger.balance(), Decimal::ZERO);
    assert_eq!(ledger.summary().balance, Decimal::ZERO);
    assert_eq!(ledger.spend_by_month()[0].total, Decimal::MAX);
    assert_eq!(ledger.category_totals().len(), 2);
}

#[test]
fn test_budget_status_with_tiny_limit_saturates() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(expense("Food", dec!(1000000000000000000000)));
    assert!(ledger.update_budget_limit("Food", dec!(0.0000001)));

    let status = ledger.budget_status("Food").unwrap();
    assert_eq!(status.percentage, Decimal::MAX);
    assert_eq!(status.tier, StatusTier::Critical);
}
