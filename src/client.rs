//! Best-effort exchange adapter over the ChainUp REST SDK.
//!
//! Binds a [`ChainupHttpClient`] to one symbol and implements [`Exchange`],
//! turning every SDK error into a log line plus a safe default.

use chainup::{CancelRequest, ChainupConfig, ChainupHttpClient, OrderRequest, Side};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::error::LadderError;
use crate::exchange::{BoxFuture, CancelReport, Exchange, OrderOutcome};

/// Exchange client for a single trading pair.
pub struct ExchangeClient {
    http: ChainupHttpClient,
    symbol: String,
}

impl ExchangeClient {
    /// Build a client for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::Exchange`] if the HTTP client cannot be built.
    pub fn new(config: ChainupConfig, symbol: impl Into<String>) -> Result<Self, LadderError> {
        let http = ChainupHttpClient::new(config)?;
        let symbol = symbol.into();
        info!(base_url = http.base_url(), symbol = %symbol, "exchange client ready");
        Ok(Self { http, symbol })
    }

    async fn fetch_last_price(&self) -> Option<Decimal> {
        match self.http.get_ticker(&self.symbol).await {
            Ok(ticker) => match ticker.last {
                Some(price) if price > Decimal::ZERO => Some(price),
                Some(price) => {
                    warn!(price = %price, "non-positive last price ignored");
                    None
                }
                None => {
                    warn!(?ticker, "unexpected price response");
                    None
                }
            },
            Err(e) => {
                error!(error = %e, "price fetch error");
                None
            }
        }
    }

    async fn fetch_free_balance(&self, asset: &str) -> Decimal {
        match self.http.get_account().await {
            Ok(account) => match account.free(asset) {
                Some(free) => free,
                None => {
                    warn!(asset, "asset missing from account balances");
                    Decimal::ZERO
                }
            },
            Err(e) => {
                error!(asset, error = %e, "balance fetch failed");
                Decimal::ZERO
            }
        }
    }

    async fn submit_order(&self, side: Side, price: Decimal, quantity: Decimal) -> OrderOutcome {
        let order = OrderRequest::limit(&self.symbol, side, price, quantity);
        match self.http.create_order(&order).await {
            Ok(ack) => match &ack.order_id {
                Some(id) => {
                    info!(side = %side, price = %order.price, quantity = %quantity, order_id = %id, "ORDER");
                    OrderOutcome::Placed {
                        order_id: id.to_string(),
                    }
                }
                None => {
                    let reason = ack
                        .msg
                        .clone()
                        .unwrap_or_else(|| format!("no order id in response: {ack:?}"));
                    warn!(side = %side, price = %order.price, reason = %reason, "order rejected");
                    OrderOutcome::Rejected { reason }
                }
            },
            Err(chainup::ChainupError::Api { code, message }) => {
                warn!(side = %side, price = %order.price, code = %code, message = %message, "order rejected");
                OrderOutcome::Rejected {
                    reason: format!("{code}: {message}"),
                }
            }
            Err(e) => {
                error!(side = %side, error = %e, "error placing order");
                OrderOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn cancel_all(&self) -> CancelReport {
        let open = match self.http.get_open_orders(&self.symbol).await {
            Ok(open) => open.list,
            Err(e) => {
                error!(error = %e, "error listing open orders");
                return CancelReport::default();
            }
        };

        let mut report = CancelReport {
            listed: open.len(),
            ..Default::default()
        };
        if open.is_empty() {
            debug!("no open orders to cancel");
            return report;
        }

        for order in open {
            let request = CancelRequest {
                symbol: self.symbol.clone(),
                order_id: order.order_id,
            };
            match self.http.cancel_order(&request).await {
                Ok(ack) if ack.is_canceled() => {
                    info!(order_id = %request.order_id, "cancelled order");
                    report.canceled += 1;
                }
                Ok(ack) => {
                    warn!(order_id = %request.order_id, ?ack, "failed to cancel");
                    report.failed += 1;
                }
                Err(e) => {
                    warn!(order_id = %request.order_id, error = %e, "failed to cancel");
                    report.failed += 1;
                }
            }
        }

        report
    }
}

impl Exchange for ExchangeClient {
    fn last_price(&self) -> BoxFuture<'_, Option<Decimal>> {
        Box::pin(self.fetch_last_price())
    }

    fn free_balance<'a>(&'a self, asset: &'a str) -> BoxFuture<'a, Decimal> {
        Box::pin(self.fetch_free_balance(asset))
    }

    fn place_order(
        &self,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> BoxFuture<'_, OrderOutcome> {
        Box::pin(self.submit_order(side, price, quantity))
    }

    fn cancel_all_open_orders(&self) -> BoxFuture<'_, CancelReport> {
        Box::pin(self.cancel_all())
    }
}
