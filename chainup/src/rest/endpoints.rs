use crate::error::Result;
use crate::rest::ChainupHttpClient;
use crate::types::*;

pub const TICKER_PATH: &str = "/sapi/v2/ticker";
pub const ACCOUNT_PATH: &str = "/sapi/v1/account";
pub const ORDER_PATH: &str = "/sapi/v2/order";
pub const OPEN_ORDERS_PATH: &str = "/sapi/v2/openOrders";
pub const CANCEL_PATH: &str = "/sapi/v2/cancel";

impl ChainupHttpClient {
    // --- Market data ---

    /// GET /sapi/v2/ticker?symbol= - 24h ticker including the last trade price.
    pub async fn get_ticker(&self, symbol: &str) -> Result<Ticker> {
        self.get(TICKER_PATH, &[("symbol", symbol)]).await
    }

    // --- Account ---

    /// GET /sapi/v1/account - Balances (signed).
    pub async fn get_account(&self) -> Result<Account> {
        self.get_signed(ACCOUNT_PATH, &[]).await
    }

    // --- Orders ---

    /// POST /sapi/v2/order - Place an order (signed).
    pub async fn create_order(&self, order: &OrderRequest) -> Result<OrderAck> {
        self.post_signed(ORDER_PATH, order).await
    }

    /// GET /sapi/v2/openOrders?symbol= - Resting orders for a symbol (signed).
    pub async fn get_open_orders(&self, symbol: &str) -> Result<OpenOrders> {
        self.get_signed(OPEN_ORDERS_PATH, &[("symbol", symbol)]).await
    }

    /// POST /sapi/v2/cancel - Cancel one order (signed).
    pub async fn cancel_order(&self, request: &CancelRequest) -> Result<CancelAck> {
        self.post_signed(CANCEL_PATH, request).await
    }
}
