use rust_decimal::Decimal;

/// Built-in budget categories and their default limits, in display order.
pub const DEFAULT_BUDGETS: &[(&str, i64)] = &[
    ("Housing", 1500),
    ("Food", 400),
    ("Transportation", 200),
    ("Entertainment", 150),
    ("Utilities", 300),
];

/// Categories offered for income transactions. These carry no budget tracking.
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investments", "Gifts", "Other"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    pub category: String,
    pub limit: Decimal,
    /// Sum of the expense amounts currently recorded against `category`.
    pub spent: Decimal,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: Decimal) -> Self {
        Self {
            category: category.into(),
            limit,
            spent: Decimal::ZERO,
        }
    }

    pub fn defaults() -> Vec<Budget> {
        DEFAULT_BUDGETS
            .iter()
            .map(|(name, limit)| Budget::new(*name, Decimal::from(*limit)))
            .collect()
    }

    /// `spent / limit * 100`, or zero without a positive limit. Saturates instead of overflowing.
    pub fn percentage(&self) -> Decimal {
        if self.limit <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.spent
            .checked_div(self.limit)
            .map_or(Decimal::MAX, |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
    }

    pub fn status(&self) -> BudgetStatus {
        let percentage = self.percentage();
        BudgetStatus {
            percentage,
            tier: StatusTier::from_percentage(percentage),
        }
    }

    pub fn remaining(&self) -> Decimal {
        self.limit.saturating_sub(self.spent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusTier {
    Healthy,
    Warning,
    Critical,
}

impl StatusTier {
    const WARNING_ABOVE: i64 = 75;
    const CRITICAL_ABOVE: i64 = 90;

    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage > Decimal::from(Self::CRITICAL_ABOVE) {
            Self::Critical
        } else if percentage > Decimal::from(Self::WARNING_ABOVE) {
            Self::Warning
        } else {
            Self::Healthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for StatusTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetStatus {
    pub percentage: Decimal,
    pub tier: StatusTier,
}
