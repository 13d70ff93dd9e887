//! Startup configuration: CLI arguments plus secrets from the environment.
//!
//! Everything here runs once before the first tick; any error aborts startup.

use std::time::Duration;

use chainup::{ChainupConfig, Credentials};
use tracing::info;

use crate::cli::{ExchangeArgs, MarketMakerArgs, TelegramArgs};
use crate::error::{ConfigError, LadderError};
use crate::mm::config::{split_symbol, MarketMakerConfig};
use crate::notify::{LogNotifier, Notifier, TelegramConfig, TelegramNotifier};

pub const API_KEY_VAR: &str = "API_KEY";
pub const API_SECRET_VAR: &str = "API_SECRET";

/// Bot token variables tried by the market maker.
pub const MM_TOKEN_VARS: &[&str] = &["TELEGRAM_BOT_TOKEN"];
/// Bot token variables tried by the price alert, dedicated token first.
pub const ALERT_TOKEN_VARS: &[&str] = &["TELEGRAM_BOT_TOKEN_PRICE", "TELEGRAM_BOT_TOKEN"];

/// Process environment lookup; empty values count as unset.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn require(env: impl Fn(&str) -> Option<String>, name: &'static str) -> Result<String, ConfigError> {
    env(name).ok_or(ConfigError::MissingEnv(name))
}

/// Read API credentials.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnv`] if either variable is unset.
pub fn credentials(env: impl Fn(&str) -> Option<String>) -> Result<Credentials, ConfigError> {
    let api_key = require(&env, API_KEY_VAR)?;
    let api_secret = require(&env, API_SECRET_VAR)?;
    Ok(Credentials::new(api_key, api_secret))
}

/// SDK config for the shared exchange arguments.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if the base URL is not http(s).
pub fn exchange_config(
    args: &ExchangeArgs,
    credentials: Option<Credentials>,
) -> Result<ChainupConfig, ConfigError> {
    let base = args.api_base.trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ConfigError::invalid(
            "api_base",
            format!("{base:?} is not an http(s) URL"),
        ));
    }
    if args.request_timeout_ms == 0 {
        return Err(ConfigError::invalid("request_timeout_ms", "must be positive"));
    }

    let timeout = Duration::from_millis(args.request_timeout_ms);
    let config = match credentials {
        Some(c) => ChainupConfig::signed(base, c),
        None => ChainupConfig::public(base),
    };
    Ok(config.with_timeout(timeout))
}

/// Build and validate the market maker configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for a symbol that cannot be split or any
/// value rejected by [`MarketMakerConfig::validate`].
pub fn market_maker_config(args: &MarketMakerArgs) -> Result<MarketMakerConfig, ConfigError> {
    let symbol = args.exchange.symbol.trim().to_lowercase();
    let (base_asset, quote_asset) = split_symbol(&symbol, args.quote_asset.as_deref())?;

    let config = MarketMakerConfig {
        symbol,
        base_asset,
        quote_asset,
        target_price: args.target_price,
        spread: args.spread,
        order_size: args.order_size,
        min_order_size: args.min_order_size.unwrap_or(args.order_size),
        order_size_decay: args.order_size_decay,
        size_decimals: args.size_decimals,
        price_floor: args.price_floor,
        price_ceiling: args.price_ceiling,
        increment_step: args.increment_step,
        resume_below: args.resume_below,
        after_cancel: Duration::from_millis(args.after_cancel_ms),
        after_buy: Duration::from_millis(args.after_buy_ms),
        after_sell: Duration::from_millis(args.after_sell_ms),
        cycle_interval: Duration::from_millis(args.cycle_interval_ms),
        monitor_interval: Duration::from_millis(args.monitor_interval_ms),
        error_cooldown: Duration::from_millis(args.error_cooldown_ms),
        cancel_on_shutdown: !args.keep_orders_on_shutdown,
        notify_price_updates: args.notify_price_updates,
    };
    config.validate()?;
    Ok(config)
}

/// Build the notifier: Telegram when enabled, log-only with `--no-notify`.
///
/// The bot token is the first of `token_vars` that is set.
///
/// # Errors
///
/// Returns [`ConfigError`] when no token is set or no recipient is given,
/// and [`LadderError::Http`] if the HTTP client cannot be built.
pub fn notifier(
    args: &TelegramArgs,
    token_vars: &'static [&'static str],
    timeout: Duration,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Box<dyn Notifier>, LadderError> {
    if args.no_notify {
        info!("telegram disabled, notifications go to the log");
        return Ok(Box::new(LogNotifier));
    }

    let bot_token = token_vars
        .iter()
        .find_map(|name| env(*name))
        .ok_or(ConfigError::MissingEnv(token_vars[0]))?;

    let recipients: Vec<String> = args
        .telegram_user_ids
        .iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    if recipients.is_empty() {
        return Err(ConfigError::invalid("telegram_user_ids", "no recipients given").into());
    }

    info!(recipients = recipients.len(), "telegram notifications enabled");
    let notifier = TelegramNotifier::new(TelegramConfig {
        api_base: args.telegram_api_base.clone(),
        bot_token,
        recipients,
        timeout,
    })?;
    Ok(Box::new(notifier))
}
