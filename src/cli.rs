use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// ladder: market maker and price alert for a ChainUp spot pair.
#[derive(Parser, Debug)]
#[command(name = "ladder", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the ladder market maker
    MarketMaker(MarketMakerArgs),

    /// Watch the ticker and alert when price drops below a threshold
    PriceAlert(PriceAlertArgs),
}

/// Exchange connection shared by both subcommands.
#[derive(Args, Debug, Clone)]
pub struct ExchangeArgs {
    /// Exchange REST base URL (e.g. https://openapi.example.com)
    #[arg(long, env = "API_BASE")]
    pub api_base: String,

    /// Pair symbol (e.g. btcusdt)
    #[arg(long, env = "SYMBOL")]
    pub symbol: String,

    /// HTTP request timeout (ms)
    #[arg(long, default_value = "10000")]
    pub request_timeout_ms: u64,
}

/// Telegram recipients. The bot token is read from the environment.
#[derive(Args, Debug, Clone)]
pub struct TelegramArgs {
    /// Comma-separated Telegram chat ids
    #[arg(long, env = "TELEGRAM_USER_IDS", value_delimiter = ',')]
    pub telegram_user_ids: Vec<String>,

    /// Telegram Bot API base URL
    #[arg(long, default_value = crate::notify::TELEGRAM_API_BASE)]
    pub telegram_api_base: String,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub no_notify: bool,
}

/// Arguments for the `market-maker` subcommand.
#[derive(Parser, Debug)]
pub struct MarketMakerArgs {
    #[command(flatten)]
    pub exchange: ExchangeArgs,

    #[command(flatten)]
    pub telegram: TelegramArgs,

    /// Quote asset of the pair (derived from the symbol when omitted)
    #[arg(long)]
    pub quote_asset: Option<String>,

    /// Price at or above which quoting stops
    #[arg(long, env = "TARGET_PRICE")]
    pub target_price: Decimal,

    /// Bid/ask distance from the reference price as a fraction (0.01 = 1%)
    #[arg(long, env = "SPREAD_PERCENT")]
    pub spread: Decimal,

    /// Order size in base asset
    #[arg(long, env = "ORDER_SIZE")]
    pub order_size: Decimal,

    /// Lowest price at which an order is placed
    #[arg(long, env = "PRICE_FLOOR")]
    pub price_floor: Decimal,

    /// Highest price at which an order is placed
    #[arg(long, env = "PRICE_CEIL")]
    pub price_ceiling: Decimal,

    /// Reference price increase per active tick
    #[arg(long, env = "INCREMENT_STEP", default_value = "0.0001")]
    pub increment_step: Decimal,

    /// Lower bound for the decaying order size (defaults to order size)
    #[arg(long)]
    pub min_order_size: Option<Decimal>,

    /// Per-tick order size multiplier in (0, 1]
    #[arg(long, default_value = "1")]
    pub order_size_decay: Decimal,

    /// Decimal places kept in order quantities
    #[arg(long, default_value = "6")]
    pub size_decimals: u32,

    /// Resume quoting when price falls below this level after the target
    #[arg(long)]
    pub resume_below: Option<Decimal>,

    /// Pause after the cancel pass (ms)
    #[arg(long, default_value = "2000")]
    pub after_cancel_ms: u64,

    /// Pause between the buy and sell steps (ms)
    #[arg(long, default_value = "2000")]
    pub after_buy_ms: u64,

    /// Pause after the sell step (ms)
    #[arg(long, default_value = "0")]
    pub after_sell_ms: u64,

    /// Pause between active ticks (ms)
    #[arg(long, default_value = "3000")]
    pub cycle_interval_ms: u64,

    /// Price poll interval in monitor-only mode (ms)
    #[arg(long, default_value = "10000")]
    pub monitor_interval_ms: u64,

    /// Pause after a failed tick (ms)
    #[arg(long, default_value = "5000")]
    pub error_cooldown_ms: u64,

    /// Leave open orders on the book when stopping
    #[arg(long)]
    pub keep_orders_on_shutdown: bool,

    /// Notify every observed price
    #[arg(long)]
    pub notify_price_updates: bool,
}

/// Arguments for the `price-alert` subcommand.
#[derive(Parser, Debug)]
pub struct PriceAlertArgs {
    #[command(flatten)]
    pub exchange: ExchangeArgs,

    #[command(flatten)]
    pub telegram: TelegramArgs,

    /// Alert once when price drops below this level
    #[arg(long, env = "ALERT_PRICE")]
    pub alert_price: Decimal,

    /// Ticker poll interval (ms)
    #[arg(long, default_value = "60000")]
    pub interval_ms: u64,
}
