mod alert;
mod cli;
mod client;
mod config;
mod error;
mod exchange;
mod mm;
mod notify;

use std::time::Duration;

use clap::Parser;
use cli::Command;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::client::ExchangeClient;
use crate::error::LadderError;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv(); // load .env if present

    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shared cancellation token + signal handlers.
    let cancel = setup_signal_handlers();

    let result = match cli.command {
        Command::MarketMaker(args) => run_market_maker(args, cancel).await,
        Command::PriceAlert(args) => run_price_alert(args, cancel).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "startup failed");
        std::process::exit(1);
    }
}

async fn run_market_maker(
    args: cli::MarketMakerArgs,
    cancel: CancellationToken,
) -> Result<(), LadderError> {
    let mm_config = config::market_maker_config(&args)?;
    let credentials = config::credentials(config::process_env)?;
    let exchange_config = config::exchange_config(&args.exchange, Some(credentials))?;
    let timeout = exchange_config.timeout;

    let exchange = ExchangeClient::new(exchange_config, mm_config.symbol.clone())?;
    let notifier = config::notifier(
        &args.telegram,
        config::MM_TOKEN_VARS,
        timeout,
        config::process_env,
    )?;

    info!(symbol = %mm_config.symbol, "market maker starting");
    let mut bot = mm::bot::MarketMaker::new(mm_config, exchange, notifier);
    bot.run(cancel).await;
    Ok(())
}

async fn run_price_alert(
    args: cli::PriceAlertArgs,
    cancel: CancellationToken,
) -> Result<(), LadderError> {
    if args.interval_ms == 0 {
        return Err(error::ConfigError::invalid("interval_ms", "must be positive").into());
    }
    let exchange_config = config::exchange_config(&args.exchange, None)?;
    let timeout = exchange_config.timeout;

    let symbol = args.exchange.symbol.trim().to_lowercase();
    let exchange = ExchangeClient::new(exchange_config, symbol.clone())?;
    let notifier = config::notifier(
        &args.telegram,
        config::ALERT_TOKEN_VARS,
        timeout,
        config::process_env,
    )?;

    alert::run_price_alert(
        &exchange,
        &notifier,
        &symbol,
        alert::PriceAlert::new(args.alert_price),
        Duration::from_millis(args.interval_ms),
        cancel,
    )
    .await;
    Ok(())
}

/// Register SIGINT and SIGTERM handlers that trigger the returned token.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            let mut sig = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");
            sig.recv().await;
            info!("received SIGTERM, shutting down");
            cancel_clone.cancel();
        });
    }

    cancel
}
