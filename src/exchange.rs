//! The exchange seam used by the market maker and the price alert.
//!
//! Every operation is best-effort: implementations absorb transport and
//! payload failures, log them, and return a safe value instead of an error.

use std::future::Future;
use std::pin::Pin;

use chainup::Side;
use rust_decimal::Decimal;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of a single order placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The exchange acknowledged the order with an id.
    Placed { order_id: String },
    /// The exchange answered without an order id.
    Rejected { reason: String },
    /// The request never produced a usable answer.
    Failed { error: String },
}

impl OrderOutcome {
    #[must_use]
    pub fn is_placed(&self) -> bool {
        matches!(self, OrderOutcome::Placed { .. })
    }
}

/// Tally of a cancel-all pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancelReport {
    /// Orders returned by the open-orders listing.
    pub listed: usize,
    pub canceled: usize,
    pub failed: usize,
}

/// Remote operations for one trading pair.
pub trait Exchange: Send + Sync {
    /// Last traded price, or `None` when unknown. Never zero.
    fn last_price(&self) -> BoxFuture<'_, Option<Decimal>>;

    /// Free balance of `asset`; zero on any failure.
    fn free_balance<'a>(&'a self, asset: &'a str) -> BoxFuture<'a, Decimal>;

    /// Place a good-till-canceled limit order.
    fn place_order(&self, side: Side, price: Decimal, quantity: Decimal)
        -> BoxFuture<'_, OrderOutcome>;

    /// List and cancel every open order for the pair, continuing past failures.
    fn cancel_all_open_orders(&self) -> BoxFuture<'_, CancelReport>;
}
