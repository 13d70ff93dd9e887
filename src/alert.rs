//! Price alert watcher: notify once when price drops below a threshold.

use std::time::Duration;

use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::exchange::Exchange;
use crate::notify::Notifier;

/// What one observation did to the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEvent {
    /// Price crossed below the threshold; notify.
    Triggered,
    /// Price is back at or above the threshold; the alert is armed again.
    Rearmed,
    Unchanged,
}

/// Edge-triggered alert on `price < threshold`.
#[derive(Debug, Clone)]
pub struct PriceAlert {
    threshold: Decimal,
    alerted: bool,
}

impl PriceAlert {
    pub fn new(threshold: Decimal) -> Self {
        Self {
            threshold,
            alerted: false,
        }
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    pub fn observe(&mut self, price: Decimal) -> AlertEvent {
        match (price < self.threshold, self.alerted) {
            (true, false) => {
                self.alerted = true;
                AlertEvent::Triggered
            }
            (false, true) => {
                self.alerted = false;
                AlertEvent::Rearmed
            }
            _ => AlertEvent::Unchanged,
        }
    }
}

/// Poll `exchange` every `interval` until cancelled.
pub async fn run_price_alert<E: Exchange, N: Notifier>(
    exchange: &E,
    notifier: &N,
    symbol: &str,
    mut alert: PriceAlert,
    interval: Duration,
    cancel: CancellationToken,
) {
    info!(symbol, threshold = %alert.threshold(), "price alert started");

    while !cancel.is_cancelled() {
        match exchange.last_price().await {
            None => warn!("price fetch returned nothing, retrying"),
            Some(price) => {
                info!(symbol, price = %price, "PRICE");
                match alert.observe(price) {
                    AlertEvent::Triggered => {
                        let msg = format!(
                            "Price alert! *{symbol}* dropped below {}. Current price: {price}",
                            alert.threshold()
                        );
                        info!("{msg}");
                        notifier.notify(&msg).await;
                    }
                    AlertEvent::Rearmed => info!(price = %price, "price back above threshold, alert re-armed"),
                    AlertEvent::Unchanged => {}
                }
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = cancel.cancelled() => break,
        }
    }

    info!("price alert stopped");
}
