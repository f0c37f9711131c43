mod budget;
mod transaction;

pub use budget::{Budget, BudgetStatus, StatusTier, DEFAULT_BUDGETS, INCOME_CATEGORIES};
pub use transaction::{Transaction, TransactionId, TransactionKind};

#[cfg(test)]
mod tests;
