//! Market maker state machine and driver loop.
//!
//! One tick runs to completion before the next begins:
//! price → mode decision → cancel → balances → place bid/ask → advance ladder.
//! The driver decides how long to pause from the tick's outcome.

use std::time::Duration;

use chainup::Side;
use rust_decimal::Decimal;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::LadderError;
use crate::exchange::{CancelReport, Exchange, OrderOutcome};
use crate::mm::config::MarketMakerConfig;
use crate::mm::quoter::{Quote, Quoter, SideCheck};
use crate::mm::state::{Mode, QuoteState};
use crate::notify::Notifier;

/// What happened to one side of the quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideResult {
    /// An order was sent; the outcome is the exchange's answer.
    Submitted(OrderOutcome),
    /// The side was not sent.
    Skipped(SideCheck),
}

/// Everything an active tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteReport {
    pub quote: Quote,
    pub order_size: Decimal,
    pub cancel: CancelReport,
    pub buy: SideResult,
    pub sell: SideResult,
}

/// Result of a completed tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No price has been observed yet; nothing to anchor the ladder on.
    AwaitingPrice,
    /// Active tick: orders were refreshed.
    Quoted(QuoteReport),
    /// Price reached the target; orders canceled and quoting stopped.
    TargetReached { price: Decimal },
    /// Monitor-only tick.
    Monitoring { price: Option<Decimal> },
    /// Price fell below the resume threshold; quoting restarts next tick.
    Resumed { price: Decimal },
}

/// Single-pair ladder market maker.
pub struct MarketMaker<E, N> {
    config: MarketMakerConfig,
    exchange: E,
    notifier: N,
    quoter: Quoter,
    state: Option<QuoteState>,
}

impl<E: Exchange, N: Notifier> MarketMaker<E, N> {
    /// Create a market maker. The ladder is seeded on the first observed price.
    pub fn new(config: MarketMakerConfig, exchange: E, notifier: N) -> Self {
        let quoter = Quoter::new(config.spread, config.price_floor, config.price_ceiling);
        Self {
            config,
            exchange,
            notifier,
            quoter,
            state: None,
        }
    }

    pub fn state(&self) -> Option<&QuoteState> {
        self.state.as_ref()
    }

    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run ticks until `cancel` is triggered, then shut down.
    pub async fn run(&mut self, cancel: CancellationToken) {
        let cfg = &self.config;
        info!(
            symbol = %cfg.symbol,
            base = %cfg.base_asset,
            quote = %cfg.quote_asset,
            target_price = %cfg.target_price,
            spread = %cfg.spread,
            order_size = %cfg.order_size,
            step = %cfg.increment_step,
            "CONFIG"
        );

        while !cancel.is_cancelled() {
            let pause = match self.tick().await {
                Ok(outcome) => self.pause_after(&outcome),
                Err(e) => {
                    error!(error = %e, "loop error");
                    self.notifier.notify(&format!("Bot error: {e}")).await;
                    self.config.error_cooldown
                }
            };
            if !sleep_or_cancel(pause, &cancel).await {
                break;
            }
        }

        self.shutdown().await;
    }

    /// Execute one tick.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::InvalidQuote`] when the reference price cannot
    /// produce a valid quote. State is left untouched in that case.
    pub async fn tick(&mut self) -> Result<TickOutcome, LadderError> {
        let observed = self.exchange.last_price().await;

        if let (true, Some(price)) = (self.config.notify_price_updates, observed) {
            self.notifier
                .notify(&format!("*{}* price update: {price}", self.config.symbol))
                .await;
        }

        let mut state = match (self.state, observed) {
            (Some(state), _) => state,
            (None, Some(price)) => self.seed(price).await,
            (None, None) => {
                warn!("no price yet, waiting to seed the ladder");
                return Ok(TickOutcome::AwaitingPrice);
            }
        };

        if state.mode == Mode::MonitorOnly {
            return Ok(self.monitor(state, observed).await);
        }

        // Only an observed market price can reach the target.
        match observed {
            Some(price) if price >= self.config.target_price => {
                self.enter_monitor_only(state, price).await;
                return Ok(TickOutcome::TargetReached { price });
            }
            Some(_) => {}
            None => {
                warn!(reference = %state.reference_price, "price unavailable, quoting from reference price");
            }
        }

        let quote = self.quoter.quote(state.reference_price)?;
        info!(
            bid = %quote.bid,
            ask = %quote.ask,
            reference = %state.reference_price,
            market = ?observed,
            size = %state.order_size,
            "QUOTE"
        );

        let cancel = self.exchange.cancel_all_open_orders().await;
        if cancel.listed > 0 {
            debug!(?cancel, "cancel pass");
        }
        time::sleep(self.config.after_cancel).await;

        let base_free = self.exchange.free_balance(&self.config.base_asset).await;
        let quote_free = self.exchange.free_balance(&self.config.quote_asset).await;

        let buy = self
            .place_side(Side::Buy, quote.bid, state.order_size, quote_free)
            .await;
        time::sleep(self.config.after_buy).await;

        let sell = self
            .place_side(Side::Sell, quote.ask, state.order_size, base_free)
            .await;
        time::sleep(self.config.after_sell).await;

        let report = QuoteReport {
            quote,
            order_size: state.order_size,
            cancel,
            buy,
            sell,
        };

        state.advance(
            self.config.increment_step,
            self.config.order_size_decay,
            self.config.min_order_size,
            self.config.size_decimals,
        );
        self.state = Some(state);

        Ok(TickOutcome::Quoted(report))
    }

    async fn seed(&mut self, price: Decimal) -> QuoteState {
        let state = QuoteState::seed(price, self.config.order_size);
        self.state = Some(state);
        info!(target_price = %self.config.target_price, start = %state.reference_price, "market maker started");
        self.notifier
            .notify(&format!(
                "Market maker started for *{}*\nTarget: {}\nStart price: {}",
                self.config.symbol, self.config.target_price, state.reference_price
            ))
            .await;
        state
    }

    async fn enter_monitor_only(&mut self, mut state: QuoteState, price: Decimal) {
        let cancel = self.exchange.cancel_all_open_orders().await;
        state.mode = Mode::MonitorOnly;
        self.state = Some(state);

        info!(
            price = %price,
            target_price = %self.config.target_price,
            canceled = cancel.canceled,
            "target reached, monitoring only"
        );
        self.notifier
            .notify(&format!(
                "Target reached for *{}*: price {price} >= target {}. Orders canceled, monitoring only.",
                self.config.symbol, self.config.target_price
            ))
            .await;
    }

    async fn monitor(&mut self, mut state: QuoteState, observed: Option<Decimal>) -> TickOutcome {
        let Some(price) = observed else {
            warn!("price unavailable while monitoring");
            return TickOutcome::Monitoring { price: None };
        };

        match self.config.resume_below {
            Some(resume) if price < resume => {
                state.mode = Mode::Active;
                self.state = Some(state);
                info!(price = %price, resume = %resume, "price below resume level, quoting resumed");
                self.notifier
                    .notify(&format!(
                        "*{}* price {price} fell below {resume}. Quoting resumed.",
                        self.config.symbol
                    ))
                    .await;
                TickOutcome::Resumed { price }
            }
            _ => {
                info!(price = %price, "MONITOR");
                TickOutcome::Monitoring { price: Some(price) }
            }
        }
    }

    async fn place_side(
        &self,
        side: Side,
        price: Decimal,
        size: Decimal,
        free: Decimal,
    ) -> SideResult {
        let asset = match side {
            Side::Buy => &self.config.quote_asset,
            Side::Sell => &self.config.base_asset,
        };

        match self.quoter.check(side, price, size, free) {
            SideCheck::Place => {
                SideResult::Submitted(self.exchange.place_order(side, price, size).await)
            }
            check @ SideCheck::Insufficient { have, need } => {
                let msg = format!(
                    "Not enough {asset} to {side}: have {}, need {}",
                    have.normalize(),
                    need.normalize()
                );
                warn!("{msg}");
                self.notifier.notify(&msg).await;
                SideResult::Skipped(check)
            }
            check @ SideCheck::OutOfBand { price } => {
                warn!(
                    side = %side,
                    price = %price,
                    floor = %self.config.price_floor,
                    ceiling = %self.config.price_ceiling,
                    "quote outside price band, skipped"
                );
                SideResult::Skipped(check)
            }
        }
    }

    fn pause_after(&self, outcome: &TickOutcome) -> Duration {
        match outcome {
            TickOutcome::Quoted(_) | TickOutcome::Resumed { .. } => self.config.cycle_interval,
            TickOutcome::AwaitingPrice
            | TickOutcome::TargetReached { .. }
            | TickOutcome::Monitoring { .. } => self.config.monitor_interval,
        }
    }

    async fn shutdown(&mut self) {
        let Some(state) = self.state else {
            info!("stopped before first price");
            return;
        };

        if self.config.cancel_on_shutdown {
            let report = self.exchange.cancel_all_open_orders().await;
            info!(canceled = report.canceled, failed = report.failed, "shutdown cancel");
        }

        let mode = match state.mode {
            Mode::Active => "active",
            Mode::MonitorOnly => "monitor-only",
        };
        info!(mode, reference = %state.reference_price, size = %state.order_size, "market maker stopped");
        self.notifier
            .notify(&format!(
                "Market maker stopped for *{}*\nMode: {mode}\nReference: {}\nOrder size: {}",
                self.config.symbol, state.reference_price, state.order_size
            ))
            .await;
    }
}

/// Sleep for `duration`; returns `false` if cancelled first.
async fn sleep_or_cancel(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = time::sleep(duration) => true,
        _ = cancel.cancelled() => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::testing::{FakeExchange, PlacedOrder, RecordingNotifier};
    use rust_decimal_macros::dec;

    fn config() -> MarketMakerConfig {
        MarketMakerConfig {
            symbol: "btcusdt".into(),
            base_asset: "BTC".into(),
            quote_asset: "USDT".into(),
            target_price: dec!(100),
            spread: dec!(0.01),
            order_size: dec!(3),
            min_order_size: dec!(3),
            price_floor: dec!(0),
            price_ceiling: dec!(1000000),
            increment_step: dec!(1),
            ..Default::default()
        }
    }

    fn funded(prices: &[Option<Decimal>]) -> FakeExchange {
        FakeExchange::new(prices)
            .with_balance("BTC", dec!(1000))
            .with_balance("USDT", dec!(1000000))
    }

    fn maker(
        config: MarketMakerConfig,
        exchange: FakeExchange,
    ) -> MarketMaker<FakeExchange, RecordingNotifier> {
        MarketMaker::new(config, exchange, RecordingNotifier::default())
    }

    fn prices(ps: &[Decimal]) -> Vec<Option<Decimal>> {
        ps.iter().copied().map(Some).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_target_scenario_is_one_way() {
        let ex = funded(&prices(&[dec!(90), dec!(95), dec!(101), dec!(80)]));
        let mut mm = maker(config(), ex);

        assert!(matches!(mm.tick().await.unwrap(), TickOutcome::Quoted(_)));
        assert!(matches!(mm.tick().await.unwrap(), TickOutcome::Quoted(_)));
        assert_eq!(mm.exchange().placed().len(), 4);
        assert_eq!(mm.exchange().cancel_passes(), 2);

        assert_eq!(
            mm.tick().await.unwrap(),
            TickOutcome::TargetReached { price: dec!(101) }
        );
        assert_eq!(mm.exchange().cancel_passes(), 3);
        assert_eq!(mm.exchange().resting(), 0);
        assert!(mm.state().unwrap().target_reached());
        assert_eq!(mm.notifier().count_containing("Target reached"), 1);

        assert_eq!(
            mm.tick().await.unwrap(),
            TickOutcome::Monitoring {
                price: Some(dec!(80))
            }
        );
        assert_eq!(mm.exchange().placed().len(), 4);
        assert_eq!(mm.exchange().cancel_passes(), 3);
        assert_eq!(mm.notifier().count_containing("Target reached"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reference_ladder_ignores_market_price() {
        let ex = funded(&prices(&[dec!(50), dec!(60), dec!(40), dec!(55)]));
        let cfg = MarketMakerConfig {
            increment_step: dec!(0.5),
            ..config()
        };
        let mut mm = maker(cfg, ex);

        let mut refs = Vec::new();
        for _ in 0..4 {
            mm.tick().await.unwrap();
            refs.push(mm.state().unwrap().reference_price);
        }
        assert_eq!(refs, vec![dec!(50.5), dec!(51), dec!(51.5), dec!(52)]);

        let bids: Vec<_> = mm
            .exchange()
            .placed()
            .iter()
            .filter(|o| o.side == Side::Buy)
            .map(|o| o.price)
            .collect();
        assert_eq!(bids, vec![dec!(49.5), dec!(49.995), dec!(50.49), dec!(50.985)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_precedes_balance_check_and_orders() {
        let ex = funded(&prices(&[dec!(90)]));
        let mut mm = maker(config(), ex);
        mm.tick().await.unwrap();

        assert_eq!(
            mm.exchange().calls(),
            vec![
                "price",
                "cancel",
                "balance:BTC",
                "balance:USDT",
                "place:BUY",
                "place:SELL"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_buy_skipped_on_quote_shortfall() {
        let ex = FakeExchange::new(&prices(&[dec!(2.5)]))
            .with_balance("USDT", dec!(5))
            .with_balance("BTC", dec!(10));
        let cfg = MarketMakerConfig {
            spread: dec!(0.2),
            ..config()
        };
        let mut mm = maker(cfg, ex);

        let TickOutcome::Quoted(report) = mm.tick().await.unwrap() else {
            panic!("expected a quoted tick");
        };
        assert_eq!(report.quote.bid, dec!(2));
        assert_eq!(
            report.buy,
            SideResult::Skipped(SideCheck::Insufficient {
                have: dec!(5),
                need: dec!(6)
            })
        );
        assert!(matches!(report.sell, SideResult::Submitted(ref o) if o.is_placed()));

        assert_eq!(
            mm.exchange().placed(),
            vec![PlacedOrder {
                side: Side::Sell,
                price: dec!(3),
                quantity: dec!(3)
            }]
        );
        let warnings: Vec<_> = mm
            .notifier()
            .messages()
            .into_iter()
            .filter(|m| m.starts_with("Not enough"))
            .collect();
        assert_eq!(warnings, vec!["Not enough USDT to BUY: have 5, need 6"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_buy_placed_when_balance_exactly_covers() {
        let ex = FakeExchange::new(&prices(&[dec!(2.5)]))
            .with_balance("USDT", dec!(6))
            .with_balance("BTC", dec!(0));
        let cfg = MarketMakerConfig {
            spread: dec!(0.2),
            ..config()
        };
        let mut mm = maker(cfg, ex);

        let TickOutcome::Quoted(report) = mm.tick().await.unwrap() else {
            panic!("expected a quoted tick");
        };
        assert!(matches!(report.buy, SideResult::Submitted(_)));
        assert!(matches!(
            report.sell,
            SideResult::Skipped(SideCheck::Insufficient { .. })
        ));
        assert_eq!(mm.notifier().count_containing("Not enough BTC to SELL"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_price_falls_back_to_reference() {
        let ex = funded(&[Some(dec!(90)), None]);
        let mut mm = maker(config(), ex);

        mm.tick().await.unwrap();
        let TickOutcome::Quoted(report) = mm.tick().await.unwrap() else {
            panic!("expected a quoted tick");
        };
        assert_eq!(report.quote.bid, dec!(90.09));
        assert_eq!(mm.state().unwrap().reference_price, dec!(92));
        assert!(!mm.state().unwrap().target_reached());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_price_never_reaches_target() {
        let ex = funded(&[Some(dec!(99)), None, Some(dec!(50))]);
        let mut mm = maker(config(), ex);

        assert!(matches!(mm.tick().await.unwrap(), TickOutcome::Quoted(_)));
        assert_eq!(mm.state().unwrap().reference_price, dec!(100));

        let TickOutcome::Quoted(report) = mm.tick().await.unwrap() else {
            panic!("expected a quoted tick");
        };
        assert_eq!(report.quote.bid, dec!(99));
        assert!(!mm.state().unwrap().target_reached());
        assert_eq!(mm.notifier().count_containing("Target reached"), 0);

        assert!(matches!(mm.tick().await.unwrap(), TickOutcome::Quoted(_)));
        assert_eq!(mm.exchange().placed().len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_first_price_before_seeding() {
        let ex = funded(&[None, Some(dec!(90))]);
        let mut mm = maker(config(), ex);

        assert_eq!(mm.tick().await.unwrap(), TickOutcome::AwaitingPrice);
        assert!(mm.state().is_none());
        assert!(mm.exchange().placed().is_empty());

        assert!(matches!(mm.tick().await.unwrap(), TickOutcome::Quoted(_)));
        assert_eq!(mm.notifier().count_containing("Market maker started"), 1);
        assert_eq!(mm.exchange().placed()[0].price, dec!(89.1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_quote_fails_tick_without_side_effects() {
        let ex = funded(&prices(&[dec!(0.000001)]));
        let cfg = MarketMakerConfig {
            spread: dec!(0.0001),
            ..config()
        };
        let mut mm = maker(cfg, ex);

        let err = mm.tick().await.unwrap_err();
        assert!(matches!(err, LadderError::InvalidQuote(_)));
        assert_eq!(mm.exchange().cancel_passes(), 0);
        assert!(mm.exchange().placed().is_empty());
        assert_eq!(mm.state().unwrap().reference_price, dec!(0.000001));
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_only_is_terminal_without_resume_level() {
        let ex = funded(&prices(&[dec!(100), dec!(50), dec!(10)]));
        let mut mm = maker(config(), ex);

        assert!(matches!(
            mm.tick().await.unwrap(),
            TickOutcome::TargetReached { .. }
        ));
        for _ in 0..2 {
            assert!(matches!(
                mm.tick().await.unwrap(),
                TickOutcome::Monitoring { .. }
            ));
        }
        assert!(mm.exchange().placed().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_below_reactivates_quoting() {
        let ex = funded(&prices(&[
            dec!(95),
            dec!(101),
            dec!(92),
            dec!(85),
            dec!(86),
        ]));
        let cfg = MarketMakerConfig {
            resume_below: Some(dec!(90)),
            ..config()
        };
        let mut mm = maker(cfg, ex);

        assert!(matches!(mm.tick().await.unwrap(), TickOutcome::Quoted(_)));
        assert!(matches!(
            mm.tick().await.unwrap(),
            TickOutcome::TargetReached { .. }
        ));
        let frozen = mm.state().unwrap().reference_price;
        assert_eq!(
            mm.tick().await.unwrap(),
            TickOutcome::Monitoring {
                price: Some(dec!(92))
            }
        );
        assert_eq!(
            mm.tick().await.unwrap(),
            TickOutcome::Resumed { price: dec!(85) }
        );
        assert_eq!(mm.state().unwrap().reference_price, frozen);
        assert_eq!(mm.notifier().count_containing("Quoting resumed"), 1);

        let TickOutcome::Quoted(report) = mm.tick().await.unwrap() else {
            panic!("expected a quoted tick");
        };
        assert_eq!(report.quote.bid, (frozen * dec!(0.99)).round_dp(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_size_decays_to_minimum() {
        let ex = funded(&prices(&[dec!(10), dec!(10), dec!(10), dec!(10)]));
        let cfg = MarketMakerConfig {
            order_size: dec!(4),
            min_order_size: dec!(1),
            order_size_decay: dec!(0.5),
            increment_step: dec!(0),
            ..config()
        };
        let mut mm = maker(cfg, ex);
        for _ in 0..4 {
            mm.tick().await.unwrap();
        }

        let sizes: Vec<_> = mm
            .exchange()
            .placed()
            .iter()
            .filter(|o| o.side == Side::Buy)
            .map(|o| o.quantity)
            .collect();
        assert_eq!(sizes, vec![dec!(4), dec!(2), dec!(1), dec!(1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decayed_quantities_keep_six_decimals() {
        let ex = funded(&vec![Some(dec!(10)); 40]);
        let cfg = MarketMakerConfig {
            order_size: dec!(3),
            min_order_size: dec!(0.1),
            order_size_decay: dec!(0.97),
            increment_step: dec!(0),
            ..config()
        };
        let mut mm = maker(cfg, ex);
        for _ in 0..40 {
            mm.tick().await.unwrap();
        }

        let placed = mm.exchange().placed();
        assert_eq!(placed.len(), 80);
        assert!(placed.iter().all(|o| o.quantity.scale() <= 6));
        assert_eq!(mm.state().unwrap().order_size, dec!(0.887125));
    }

    #[tokio::test(start_paused = true)]
    async fn test_side_outside_band_is_skipped() {
        let ex = funded(&prices(&[dec!(10)]));
        let cfg = MarketMakerConfig {
            price_ceiling: dec!(10.05),
            ..config()
        };
        let mut mm = maker(cfg, ex);

        let TickOutcome::Quoted(report) = mm.tick().await.unwrap() else {
            panic!("expected a quoted tick");
        };
        assert!(matches!(report.buy, SideResult::Submitted(_)));
        assert_eq!(
            report.sell,
            SideResult::Skipped(SideCheck::OutOfBand { price: dec!(10.1) })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_price_updates_broadcast_when_enabled() {
        let ex = funded(&prices(&[dec!(90), dec!(91)]));
        let cfg = MarketMakerConfig {
            notify_price_updates: true,
            ..config()
        };
        let mut mm = maker(cfg, ex);
        mm.tick().await.unwrap();
        mm.tick().await.unwrap();
        assert_eq!(mm.notifier().count_containing("price update"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_cancelled_then_reports() {
        let cancel = CancellationToken::new();
        let ex = funded(&prices(&[dec!(90), dec!(95), dec!(101)])).stop_when_drained(cancel.clone());
        let mut mm = maker(config(), ex);

        mm.run(cancel).await;

        let msgs = mm.notifier().messages();
        assert!(msgs[0].starts_with("Market maker started"));
        assert_eq!(mm.notifier().count_containing("Target reached"), 1);
        assert!(msgs.last().unwrap().starts_with("Market maker stopped"));
        assert!(msgs.last().unwrap().contains("monitor-only"));
        // two active ticks, the target pass, and the shutdown pass
        assert_eq!(mm.exchange().cancel_passes(), 4);
        assert_eq!(mm.exchange().placed().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_reports_failed_tick_and_continues() {
        let cancel = CancellationToken::new();
        let ex = funded(&prices(&[dec!(0.000001), dec!(0.000001)]))
            .stop_when_drained(cancel.clone());
        let cfg = MarketMakerConfig {
            spread: dec!(0.0001),
            cancel_on_shutdown: false,
            ..config()
        };
        let mut mm = maker(cfg, ex);

        mm.run(cancel).await;

        assert_eq!(mm.notifier().count_containing("Bot error: invalid quote"), 2);
        assert_eq!(mm.exchange().cancel_passes(), 0);
    }

    #[tokio::test]
    async fn test_run_cancelled_before_first_price() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut mm = maker(config(), funded(&[]));
        mm.run(cancel).await;
        assert!(mm.notifier().messages().is_empty());
        assert!(mm.exchange().calls().is_empty());
    }
}
