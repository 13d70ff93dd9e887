pub mod config;
pub mod error;
pub mod rest;
pub mod signing;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

pub use config::{ChainupConfig, Credentials, DEFAULT_TIMEOUT};
pub use error::{ChainupError, Result};
pub use rest::ChainupHttpClient;

pub use types::{
    Account, Balance, CancelAck, CancelRequest, OpenOrder, OpenOrders, OrderAck, OrderId,
    OrderRequest, OrderType, Side, Ticker, TimeInForce,
};
