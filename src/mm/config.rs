//! Market maker configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ConfigError;

/// Quote-asset suffixes tried, in order, when splitting a pair symbol.
const KNOWN_QUOTE_ASSETS: [&str; 6] = ["usdt", "usdc", "busd", "usd", "btc", "eth"];

/// Quantity precision used unless configured otherwise.
pub const DEFAULT_SIZE_DECIMALS: u32 = 6;

/// Largest scale a `Decimal` can carry.
const MAX_SIZE_DECIMALS: u32 = 28;

/// Suffix length used when no known quote asset matches.
const DEFAULT_QUOTE_LEN: usize = 3;

/// All tuneable parameters for the market maker.
///
/// Use [`Default::default()`] for the pacing defaults, then set the pair and
/// price parameters and call [`MarketMakerConfig::validate`].
#[derive(Debug, Clone)]
pub struct MarketMakerConfig {
    /// Exchange pair symbol (e.g. "btcusdt").
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    /// Observed price at or above which quoting stops.
    pub target_price: Decimal,
    /// Fractional distance of bid/ask from the reference price, in (0, 1).
    pub spread: Decimal,
    /// Initial order size in base asset.
    pub order_size: Decimal,
    /// Lower bound for the decaying order size.
    pub min_order_size: Decimal,
    /// Per-tick multiplier applied to the order size, in (0, 1].
    pub order_size_decay: Decimal,
    /// Decimal places kept in order quantities.
    pub size_decimals: u32,
    /// Quotes below this price are not placed.
    pub price_floor: Decimal,
    /// Quotes above this price are not placed.
    pub price_ceiling: Decimal,
    /// Amount added to the reference price after every active tick.
    pub increment_step: Decimal,
    /// Leave monitor-only mode when price drops below this level.
    /// `None` keeps monitor-only terminal.
    pub resume_below: Option<Decimal>,
    /// Pause between the cancel pass and the balance check.
    pub after_cancel: Duration,
    /// Pause between the buy and sell steps.
    pub after_buy: Duration,
    /// Pause after the sell step.
    pub after_sell: Duration,
    /// Pause between active ticks.
    pub cycle_interval: Duration,
    /// Price polling interval while monitoring or waiting for a first price.
    pub monitor_interval: Duration,
    /// Pause after a failed tick.
    pub error_cooldown: Duration,
    /// Cancel resting orders when the bot stops.
    pub cancel_on_shutdown: bool,
    /// Broadcast every observed price.
    pub notify_price_updates: bool,
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            base_asset: String::new(),
            quote_asset: String::new(),
            target_price: Decimal::ZERO,
            spread: dec!(0.01),
            order_size: Decimal::ONE,
            min_order_size: Decimal::ONE,
            order_size_decay: Decimal::ONE,
            size_decimals: DEFAULT_SIZE_DECIMALS,
            price_floor: Decimal::ZERO,
            price_ceiling: Decimal::MAX,
            increment_step: dec!(0.0001),
            resume_below: None,
            after_cancel: Duration::from_secs(2),
            after_buy: Duration::from_secs(2),
            after_sell: Duration::ZERO,
            cycle_interval: Duration::from_secs(3),
            monitor_interval: Duration::from_secs(10),
            error_cooldown: Duration::from_secs(5),
            cancel_on_shutdown: true,
            notify_price_updates: false,
        }
    }
}

impl MarketMakerConfig {
    /// Check the invariants the state machine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.is_empty() {
            return Err(ConfigError::invalid("symbol", "must not be empty"));
        }
        if self.base_asset.is_empty() || self.quote_asset.is_empty() {
            return Err(ConfigError::invalid(
                "symbol",
                format!("cannot derive base/quote assets from {:?}", self.symbol),
            ));
        }
        if self.target_price <= Decimal::ZERO {
            return Err(ConfigError::invalid("target_price", "must be positive"));
        }
        if self.spread <= Decimal::ZERO || self.spread >= Decimal::ONE {
            return Err(ConfigError::invalid("spread", "must be in (0, 1)"));
        }
        if self.order_size <= Decimal::ZERO {
            return Err(ConfigError::invalid("order_size", "must be positive"));
        }
        if self.min_order_size <= Decimal::ZERO || self.min_order_size > self.order_size {
            return Err(ConfigError::invalid(
                "min_order_size",
                "must be positive and not above order_size",
            ));
        }
        if self.order_size_decay <= Decimal::ZERO || self.order_size_decay > Decimal::ONE {
            return Err(ConfigError::invalid("order_size_decay", "must be in (0, 1]"));
        }
        if self.size_decimals > MAX_SIZE_DECIMALS {
            return Err(ConfigError::invalid(
                "size_decimals",
                format!("must be at most {}", MAX_SIZE_DECIMALS),
            ));
        }
        for (field, size) in [
            ("order_size", self.order_size),
            ("min_order_size", self.min_order_size),
        ] {
            if size.normalize().scale() > self.size_decimals {
                return Err(ConfigError::invalid(
                    field,
                    format!("{size} has more than {} decimals", self.size_decimals),
                ));
            }
        }
        if self.price_floor < Decimal::ZERO || self.price_floor >= self.price_ceiling {
            return Err(ConfigError::invalid(
                "price_floor",
                "must be non-negative and below price_ceiling",
            ));
        }
        if self.increment_step < Decimal::ZERO {
            return Err(ConfigError::invalid("increment_step", "must not be negative"));
        }
        if let Some(resume) = self.resume_below {
            if resume <= Decimal::ZERO || resume >= self.target_price {
                return Err(ConfigError::invalid(
                    "resume_below",
                    "must be positive and below target_price",
                ));
            }
        }
        Ok(())
    }
}

/// Split a pair symbol into `(base, quote)` assets, upper-cased.
///
/// An explicit `quote_asset` wins; otherwise a known quote suffix is matched,
/// falling back to a three-character suffix.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if the symbol cannot be split.
pub fn split_symbol(symbol: &str, quote_asset: Option<&str>) -> Result<(String, String), ConfigError> {
    let lower = symbol.to_lowercase();

    let quote_len = match quote_asset {
        Some(q) => {
            let q = q.to_lowercase();
            if !lower.ends_with(&q) {
                return Err(ConfigError::invalid(
                    "quote_asset",
                    format!("{symbol:?} does not end with {q:?}"),
                ));
            }
            q.len()
        }
        None => KNOWN_QUOTE_ASSETS
            .iter()
            .find(|q| lower.ends_with(*q) && lower.len() > q.len())
            .map(|q| q.len())
            .unwrap_or(DEFAULT_QUOTE_LEN),
    };

    if lower.len() <= quote_len || !lower.is_ascii() {
        return Err(ConfigError::invalid(
            "symbol",
            format!("{symbol:?} is too short to split"),
        ));
    }

    let (base, quote) = lower.split_at(lower.len() - quote_len);
    Ok((base.to_uppercase(), quote.to_uppercase()))
}
