use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Opaque transaction identifier, generated client-side when a transaction is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "in" | "+" => Some(Self::Income),
            "expense" | "exp" | "out" | "-" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Always positive; the direction lives in `kind`.
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        kind: TransactionKind,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            date,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the direction applied: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}
