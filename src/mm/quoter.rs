//! Quote arithmetic and per-side placement checks.
//!
//! Uses `rust_decimal::Decimal` so that six-decimal rounding of prices and
//! ladder steps is exact.

use chainup::Side;
use rust_decimal::Decimal;

use crate::error::LadderError;

/// Decimal places used for quoted prices and the reference ladder.
pub const PRICE_DECIMALS: u32 = 6;

/// Bid/ask pair derived from the reference price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub bid: Decimal,
    pub ask: Decimal,
}

/// Whether one side of the quote may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideCheck {
    /// Funds cover the order and the price lies inside the band.
    Place,
    /// Free balance is below what the order would lock.
    Insufficient { have: Decimal, need: Decimal },
    /// Price lies outside `[floor, ceiling]`.
    OutOfBand { price: Decimal },
}

/// Derives quotes from the reference price and gates each side.
#[derive(Debug, Clone)]
pub struct Quoter {
    spread: Decimal,
    floor: Decimal,
    ceiling: Decimal,
}

impl Quoter {
    pub fn new(spread: Decimal, floor: Decimal, ceiling: Decimal) -> Self {
        Self {
            spread,
            floor,
            ceiling,
        }
    }

    /// `bid = r(1 - s)`, `ask = r(1 + s)`, both rounded to six decimals.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InvalidQuote`] if the reference is not positive
    /// or rounding collapses the quote onto the reference.
    pub fn quote(&self, reference: Decimal) -> Result<Quote, LadderError> {
        if reference <= Decimal::ZERO {
            return Err(LadderError::InvalidQuote(format!(
                "reference price {reference} is not positive"
            )));
        }

        let bid = (reference * (Decimal::ONE - self.spread)).round_dp(PRICE_DECIMALS);
        let ask = (reference * (Decimal::ONE + self.spread)).round_dp(PRICE_DECIMALS);

        if bid <= Decimal::ZERO || bid >= reference || ask <= reference {
            return Err(LadderError::InvalidQuote(format!(
                "bid {bid} / ask {ask} do not straddle reference {reference}"
            )));
        }

        Ok(Quote { bid, ask })
    }

    /// Decide whether `side` can be placed at `price` for `size` given the
    /// free balance of the asset that side spends.
    ///
    /// A buy spends `price * size` of the quote asset; a sell spends `size`
    /// of the base asset.
    pub fn check(&self, side: Side, price: Decimal, size: Decimal, free: Decimal) -> SideCheck {
        if price < self.floor || price > self.ceiling {
            return SideCheck::OutOfBand { price };
        }
        match required_amount(side, price, size) {
            Some(need) if free >= need => SideCheck::Place,
            Some(need) => SideCheck::Insufficient { have: free, need },
            // An amount beyond `Decimal` range cannot be covered by any balance.
            None => SideCheck::Insufficient {
                have: free,
                need: Decimal::MAX,
            },
        }
    }
}

/// Amount of the spent asset an order locks, `None` on overflow.
pub fn required_amount(side: Side, price: Decimal, size: Decimal) -> Option<Decimal> {
    match side {
        Side::Buy => price.checked_mul(size),
        Side::Sell => Some(size),
    }
}
