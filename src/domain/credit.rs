use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Money, ProjectId, UserId};

pub type CreditId = i64;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    Buy,
    Sell,
}

impl TradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeKind::Buy => "buy",
            TradeKind::Sell => "sell",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "buy" => Some(TradeKind::Buy),
            "sell" => Some(TradeKind::Sell),
            _ => None,
        }
    }
}

impl std::fmt::Display for TradeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One settled trade. Credit records are immutable and append-only: the set
/// of a user's records, replayed in creation order, defines their net credit
/// position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    pub id: CreditId,
    pub project_id: ProjectId,
    pub user_id: UserId,
    /// Amount of credits traded; always positive.
    pub amount: Money,
    /// Listed per-credit price at the time of settlement.
    pub price: Money,
    #[serde(rename = "type")]
    pub kind: TradeKind,
    pub timestamp: DateTime<Utc>,
}

/// A credit record before the repository has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewCredit {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub amount: Money,
    pub price: Money,
    pub kind: TradeKind,
    pub timestamp: DateTime<Utc>,
}

/// A validated trade submission.
#[derive(Debug, Clone)]
pub struct TradeRequest {
    pub project_id: ProjectId,
    pub amount: Money,
    pub kind: TradeKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TradeRequestError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid trade type: {0}")]
    InvalidKind(String),
    #[error("Amount must be positive")]
    NonPositiveAmount,
}

impl TradeRequest {
    /// Build a settlement request from the raw body fields. All three
    /// fields must be present; the kind must be `buy` or `sell`; the
    /// amount must be strictly positive.
    pub fn try_from_parts(
        project_id: Option<ProjectId>,
        amount: Option<Money>,
        kind: Option<&str>,
    ) -> Result<Self, TradeRequestError> {
        let (Some(project_id), Some(amount), Some(kind)) = (project_id, amount, kind) else {
            return Err(TradeRequestError::MissingFields);
        };
        if kind.is_empty() {
            return Err(TradeRequestError::MissingFields);
        }
        let kind = TradeKind::from_str(kind)
            .ok_or_else(|| TradeRequestError::InvalidKind(kind.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(TradeRequestError::NonPositiveAmount);
        }
        Ok(Self {
            project_id,
            amount,
            kind,
        })
    }
}
