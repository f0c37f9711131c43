use thiserror::Error;

/// Reasons an entry-form submission or budget edit is refused before it reaches the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("Invalid amount: '{0}' (must be between 0.01 and 1,000,000,000,000)")]
    InvalidAmount(String),

    #[error("Invalid budget limit: '{0}' (must be between 0.01 and 1,000,000,000,000)")]
    InvalidBudgetLimit(String),

    #[error("{0} is required")]
    MissingRequiredField(&'static str),

    #[error("Invalid date: '{0}' (use YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown transaction type: '{0}' (use income or expense)")]
    UnknownKind(String),
}
