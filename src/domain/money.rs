use rust_decimal::{Decimal, RoundingStrategy};

/// Money and credit quantities share one decimal representation.
/// Balances and per-credit prices are denominated in the same currency.
pub type Money = Decimal;

/// Scale used for computed monetary totals.
pub const MONEY_SCALE: u32 = 2;

/// Round a computed total to the canonical money scale.
/// Round-half-even, so repeated trades don't drift in one direction.
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Total cost of a trade: amount of credits times the listed per-credit
/// price, rounded to the money scale.
pub fn total_cost(amount: Money, price: Money) -> Money {
    round_money(amount * price)
}
