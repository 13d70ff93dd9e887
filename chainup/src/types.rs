//! Request and response types for the `/sapi` REST surface.
//!
//! The exchange is loose about numeric encoding: prices and balances arrive
//! either as JSON strings or as numbers, and order ids as either integers or
//! strings. `Decimal` deserialization accepts both, and [`OrderId`] keeps
//! whatever representation the exchange used so it can be echoed back.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit,
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    #[serde(rename = "GTC")]
    GoodTillCanceled,
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    #[serde(rename = "FOK")]
    FillOrKill,
}

/// Exchange order identifier, numeric or textual depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(u64),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Number(n) => write!(f, "{n}"),
            OrderId::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

/// `GET /sapi/v2/ticker` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(default)]
    pub last: Option<Decimal>,
    #[serde(default)]
    pub high: Option<Decimal>,
    #[serde(default)]
    pub low: Option<Decimal>,
    #[serde(default)]
    pub buy: Option<Decimal>,
    #[serde(default)]
    pub sell: Option<Decimal>,
    #[serde(default)]
    pub vol: Option<Decimal>,
    #[serde(default)]
    pub time: Option<u64>,
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: Decimal,
    #[serde(default)]
    pub locked: Decimal,
}

/// `GET /sapi/v1/account` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub balances: Vec<Balance>,
}

impl Account {
    /// Free amount of `asset`, matched case-insensitively.
    pub fn free(&self, asset: &str) -> Option<Decimal> {
        self.balances
            .iter()
            .find(|b| b.asset.eq_ignore_ascii_case(asset))
            .map(|b| b.free)
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// `POST /sapi/v2/order` body.
///
/// Field order is the wire order; the serialized form is what gets signed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Limit price, fixed at six decimals.
    pub price: String,
}

impl OrderRequest {
    /// Good-till-canceled limit order.
    pub fn limit(symbol: &str, side: Side, price: Decimal, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            side,
            order_type: OrderType::Limit,
            time_in_force: TimeInForce::GoodTillCanceled,
            quantity,
            price: format!("{price:.6}"),
        }
    }
}

/// Response to an order placement. A missing `order_id` means rejection;
/// the exchange then usually fills `code`/`msg` instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    #[serde(default)]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// One resting order from `GET /sapi/v2/openOrders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrder {
    pub order_id: OrderId,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub orig_qty: Option<Decimal>,
    #[serde(default)]
    pub executed_qty: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenOrders {
    #[serde(default)]
    pub list: Vec<OpenOrder>,
}

/// `POST /sapi/v2/cancel` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub symbol: String,
    pub order_id: OrderId,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl CancelAck {
    /// Whether the exchange accepted the cancel.
    pub fn is_canceled(&self) -> bool {
        matches!(
            self.status.as_deref(),
            Some("CANCELED") | Some("PENDING_CANCEL")
        )
    }
}

/// Error envelope returned in place of a payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: serde_json::Value,
    pub msg: String,
}

impl ApiErrorBody {
    /// Some endpoints wrap successful payloads with `code: 0`.
    pub fn is_success(&self) -> bool {
        self.code_string() == "0"
    }

    /// The code without JSON string quoting.
    pub fn code_string(&self) -> String {
        match &self.code {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
