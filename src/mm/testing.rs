//! In-memory exchange and notifier used by the state-machine tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chainup::Side;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use crate::exchange::{BoxFuture, CancelReport, Exchange, OrderOutcome};
use crate::notify::Notifier;

/// A placed order as seen by the fake exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
}

#[derive(Default)]
struct Book {
    prices: VecDeque<Option<Decimal>>,
    balances: HashMap<String, Decimal>,
    resting: Vec<PlacedOrder>,
    placed: Vec<PlacedOrder>,
    calls: Vec<String>,
    cancel_passes: usize,
    next_id: u64,
}

/// Scripted exchange: prices pop from a queue, balances are fixed.
///
/// When the price script runs dry `last_price` returns `None` and, if set,
/// trips `stop_when_drained`.
#[derive(Default)]
pub struct FakeExchange {
    book: Mutex<Book>,
    stop_when_drained: Option<CancellationToken>,
}

impl FakeExchange {
    pub fn new(prices: &[Option<Decimal>]) -> Self {
        let fake = Self::default();
        fake.book.lock().unwrap().prices = prices.iter().copied().collect();
        fake
    }

    pub fn with_balance(self, asset: &str, amount: Decimal) -> Self {
        self.book
            .lock()
            .unwrap()
            .balances
            .insert(asset.to_string(), amount);
        self
    }

    pub fn stop_when_drained(mut self, token: CancellationToken) -> Self {
        self.stop_when_drained = Some(token);
        self
    }

    pub fn placed(&self) -> Vec<PlacedOrder> {
        self.book.lock().unwrap().placed.clone()
    }

    pub fn resting(&self) -> usize {
        self.book.lock().unwrap().resting.len()
    }

    pub fn cancel_passes(&self) -> usize {
        self.book.lock().unwrap().cancel_passes
    }

    /// Call log, e.g. `["price", "cancel", "balance:BTC", "place:BUY"]`.
    pub fn calls(&self) -> Vec<String> {
        self.book.lock().unwrap().calls.clone()
    }
}

impl Exchange for FakeExchange {
    fn last_price(&self) -> BoxFuture<'_, Option<Decimal>> {
        Box::pin(async move {
            let mut book = self.book.lock().unwrap();
            book.calls.push("price".into());
            let next = book.prices.pop_front().flatten();
            if book.prices.is_empty() {
                if let Some(token) = &self.stop_when_drained {
                    token.cancel();
                }
            }
            next
        })
    }

    fn free_balance<'a>(&'a self, asset: &'a str) -> BoxFuture<'a, Decimal> {
        Box::pin(async move {
            let mut book = self.book.lock().unwrap();
            book.calls.push(format!("balance:{asset}"));
            book.balances.get(asset).copied().unwrap_or_default()
        })
    }

    fn place_order(
        &self,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> BoxFuture<'_, OrderOutcome> {
        Box::pin(async move {
            let mut book = self.book.lock().unwrap();
            book.calls.push(format!("place:{side}"));
            let order = PlacedOrder {
                side,
                price,
                quantity,
            };
            book.placed.push(order.clone());
            book.resting.push(order);
            book.next_id += 1;
            OrderOutcome::Placed {
                order_id: book.next_id.to_string(),
            }
        })
    }

    fn cancel_all_open_orders(&self) -> BoxFuture<'_, CancelReport> {
        Box::pin(async move {
            let mut book = self.book.lock().unwrap();
            book.calls.push("cancel".into());
            book.cancel_passes += 1;
            let n = book.resting.len();
            book.resting.clear();
            CancelReport {
                listed: n,
                canceled: n,
                failed: 0,
            }
        })
    }
}

/// Records every message.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.contains(needle))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.messages.lock().unwrap().push(text.to_string());
        })
    }
}
