use thiserror::Error;

use crate::domain::{Money, TradeRequestError};

/// Application error taxonomy. Validation and business-rule failures carry
/// the exact message the HTTP boundary surfaces to clients; `Internal` is
/// never shown in detail.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid trade type: {0}")]
    InvalidTradeKind(String),

    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Project not found")]
    ProjectNotFound,

    #[error("Insufficient balance")]
    InsufficientBalance { balance: Money, required: Money },

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<TradeRequestError> for AppError {
    fn from(err: TradeRequestError) -> Self {
        match err {
            TradeRequestError::MissingFields => AppError::MissingFields,
            TradeRequestError::InvalidKind(kind) => AppError::InvalidTradeKind(kind),
            TradeRequestError::NonPositiveAmount => AppError::NonPositiveAmount,
        }
    }
}
