use anyhow::Result;
use rust_decimal::Decimal;
use std::io::{self, Write};

use crate::config::{Config, Mode, LOG_ENV};
use crate::ledger::Ledger;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(config: &Config, ledger: &Ledger) -> Result<()> {
    match config.mode {
        Mode::Report => {
            let stdout = io::stdout();
            write_report(&mut stdout.lock(), ledger, config.demo)?;
            Ok(())
        }
        Mode::Help => {
            print_usage();
            Ok(())
        }
        Mode::Version => {
            println!("quantro {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Mode::Tui => anyhow::bail!("The interactive dashboard is not a CLI command"),
    }
}

fn print_usage() {
    println!("Quantro: personal finance dashboard");
    println!();
    println!("Usage: quantro [command] [--demo]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  report, r                     Print balances, budgets and spending");
    println!("  --demo                        Start from sample transactions");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Logging: set {LOG_ENV} to a tracing filter (default: info)");
}

fn write_report(out: &mut impl Write, ledger: &Ledger, demo: bool) -> io::Result<()> {
    let summary = ledger.summary();
    let heading = if demo {
        "Quantro (demo data)"
    } else {
        "Quantro"
    };

    writeln!(out, "{heading}")?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Income:     {}", format_amount(summary.income))?;
    writeln!(out, "  Expenses:   {}", format_amount(summary.expenses))?;
    writeln!(out, "  Balance:    {}", format_amount(ledger.balance()))?;
    writeln!(out, "  Total Txns: {}", ledger.transactions().len())?;

    writeln!(out)?;
    writeln!(out, "Budgets:")?;
    for budget in ledger.budgets() {
        let Some(status) = ledger.budget_status(&budget.category) else {
            continue;
        };
        writeln!(
            out,
            "  {:<16} {:>11} / {:<11} {:>4}%  {}",
            budget.category,
            format_amount(budget.spent),
            format_amount(budget.limit),
            status.percentage.round(),
            status.tier,
        )?;
    }

    let budgeted: Decimal = ledger
        .budget_categories()
        .iter()
        .fold(Decimal::ZERO, |acc, c| acc.saturating_add(ledger.spend_by_category(c)));
    let unbudgeted = summary.expenses.saturating_sub(budgeted);
    if unbudgeted > Decimal::ZERO {
        writeln!(out, "  {:<16} {:>11}", "(no budget)", format_amount(unbudgeted))?;
    }

    let totals = ledger.category_totals();
    if !totals.is_empty() {
        writeln!(out)?;
        writeln!(out, "Spending by Category:")?;
        for (name, amount) in &totals {
            writeln!(out, "  {name:<24} {}", format_amount(*amount))?;
        }
    }

    let months = ledger.spend_by_month();
    if !months.is_empty() {
        writeln!(out)?;
        writeln!(out, "Monthly Expenses:")?;
        for month in &months {
            writeln!(out, "  {:<24} {}", month.label(), format_amount(month.total))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::models::{Transaction, TransactionKind};

    fn report(ledger: &Ledger, demo: bool) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, ledger, demo).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_report_lists_budgets_only() {
        let out = report(&Ledger::new(), false);
        assert!(out.starts_with("Quantro\n"));
        assert!(out.contains("  Balance:    $0.00"));
        assert!(out.contains("Housing"));
        assert!(out.contains("Healthy"));
        assert!(!out.contains("Spending by Category"));
        assert!(!out.contains("Monthly Expenses"));
    }

    #[test]
    fn test_demo_report() {
        let out = report(&Ledger::demo(), true);
        assert!(out.starts_with("Quantro (demo data)"));
        assert!(out.contains("  Income:     $3,000.00"));
        assert!(out.contains("  Expenses:   $1,436.15"));
        assert!(out.contains("  Balance:    $1,563.85"));
        assert!(out.contains("Apr 2025"));
        assert!(out.contains("May 2025"));
        assert!(!out.contains("(no budget)"));
    }

    #[test]
    fn test_unbudgeted_spending_is_reported() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(Transaction::new(
            "Vet",
            dec!(80),
            TransactionKind::Expense,
            "Pets",
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        ));
        let out = report(&ledger, false);
        assert!(out.contains("(no budget)"));
        assert!(out.contains("$80.00"));
    }
}
