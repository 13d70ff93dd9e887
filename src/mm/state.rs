//! Quoting state owned by the market maker for the process lifetime.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::mm::quoter::PRICE_DECIMALS;

/// Quoting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Quoting and placing orders.
    Active,
    /// Target reached; only price polling continues.
    MonitorOnly,
}

/// Ladder anchor, current order size and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteState {
    pub reference_price: Decimal,
    pub order_size: Decimal,
    pub mode: Mode,
}

impl QuoteState {
    /// Seed from the first observed market price.
    pub fn seed(price: Decimal, order_size: Decimal) -> Self {
        Self {
            reference_price: price.round_dp(PRICE_DECIMALS),
            order_size,
            mode: Mode::Active,
        }
    }

    pub fn target_reached(&self) -> bool {
        self.mode == Mode::MonitorOnly
    }

    /// Step the ladder after an active tick.
    ///
    /// The reference moves up by `step` regardless of the market price; the
    /// order size shrinks by `decay`, truncated to `size_decimals`, but never
    /// below `min_size`.
    pub fn advance(&mut self, step: Decimal, decay: Decimal, min_size: Decimal, size_decimals: u32) {
        debug_assert_eq!(self.mode, Mode::Active);
        self.reference_price = (self.reference_price + step).round_dp(PRICE_DECIMALS);
        self.order_size = (self.order_size * decay)
            .round_dp_with_strategy(size_decimals, RoundingStrategy::ToZero)
            .max(min_size);
    }
}
