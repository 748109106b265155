use serde::Serialize;

use super::Money;
use rust_decimal::Decimal;

pub type UserId = i64;

/// Every account starts with the same spendable balance.
const INITIAL_BALANCE_UNITS: i64 = 1_000;

/// A registered trader. The balance is mutated only by trade settlement;
/// accounts are never deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Argon2 PHC hash string. Never leaves the process.
    #[serde(skip_serializing)]
    pub password: String,
    pub balance: Money,
}

impl User {
    /// Create a user with the seeded initial balance. The id is assigned
    /// by the repository.
    pub fn new(id: UserId, username: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            password: password_hash,
            balance: Decimal::from(INITIAL_BALANCE_UNITS),
        }
    }
}
