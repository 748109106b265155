use rust_decimal::Decimal;

use super::{Credit, Money, TradeKind, UserId};

/// Compute a user's net credit position from their ledger records.
/// Position = sum of bought amounts - sum of sold amounts. The sum is
/// commutative, so the result does not depend on record order.
pub fn net_position(user_id: UserId, credits: &[Credit]) -> Money {
    credits
        .iter()
        .filter(|credit| credit.user_id == user_id)
        .fold(Decimal::ZERO, |position, credit| match credit.kind {
            TradeKind::Buy => position + credit.amount,
            TradeKind::Sell => position - credit.amount,
        })
}
