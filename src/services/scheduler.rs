use crate::config::{AssetConfig, SchedulerConfig};
use crate::database::PriceStore;
use crate::services::alert_evaluator::AlertEvaluator;
use crate::services::notifier::Notifier;
use crate::services::price_source::PriceSource;
use crate::types::{AlertMessage, AssetQuote, NewPriceSample};
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Drives the fetch -> persist -> evaluate -> notify pipeline on a fixed
/// cadence. One cycle runs at a time; a tick landing mid-cycle is deferred
/// until the cycle finishes (`MissedTickBehavior::Delay`), never run
/// concurrently with it.
pub struct Scheduler {
    store: Arc<dyn PriceStore>,
    source: Arc<dyn PriceSource>,
    notifier: Arc<dyn Notifier>,
    evaluator: AlertEvaluator,
    assets: Vec<AssetConfig>,
    interval: Duration,
    call_timeout: Duration,
}

impl Scheduler {
    pub fn new(
        store: Arc<dyn PriceStore>,
        source: Arc<dyn PriceSource>,
        notifier: Arc<dyn Notifier>,
        evaluator: AlertEvaluator,
        assets: Vec<AssetConfig>,
        config: &SchedulerConfig,
    ) -> Self {
        Self {
            store,
            source,
            notifier,
            evaluator,
            assets,
            interval: Duration::from_secs(config.interval_secs),
            call_timeout: Duration::from_secs(config.call_timeout_secs),
        }
    }

    pub async fn run(&self) {
        info!(
            "Starting sampling scheduler, interval: {:?}, assets: {:?}",
            self.interval,
            self.assets.iter().map(|a| &a.symbol).collect::<Vec<_>>()
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.run_cycle().await;
        }
    }

    /// One full pipeline pass. Failures for one asset, rule, or recipient
    /// are logged here and never abort the rest of the cycle.
    pub async fn run_cycle(&self) {
        info!("Sampling cycle started");

        let quotes: Vec<AssetQuote> =
            join_all(self.assets.iter().map(|asset| self.fetch_quote(asset)))
                .await
                .into_iter()
                .flatten()
                .collect();

        let samples: Vec<NewPriceSample> = quotes
            .iter()
            .map(|quote| NewPriceSample {
                symbol: quote.symbol.clone(),
                name: quote.name.clone(),
                usd_price: quote.usd_price,
                usd_price_24hr_percent_change: quote.usd_price_24hr_percent_change,
                usd_price_24hr_usd_change: quote.usd_price_24hr_usd_change,
                usd_value_24hr_usd_change: quote.usd_value_24hr_usd_change,
            })
            .collect();

        if let Err(e) = self.store.write_samples(&samples).await {
            error!("Failed to persist price samples: {}", e);
        }

        join_all(quotes.iter().map(|quote| self.evaluate_asset(quote))).await;

        info!("Sampling cycle finished, {} assets sampled", quotes.len());
    }

    /// Bounded fetch for one asset; a failure or timeout drops the asset
    /// from this cycle without affecting the others.
    async fn fetch_quote(&self, asset: &AssetConfig) -> Option<AssetQuote> {
        match tokio::time::timeout(self.call_timeout, self.source.fetch_price(asset)).await {
            Ok(Ok(quote)) => {
                info!("Fetched {} price: ${}", asset.symbol, quote.usd_price);
                Some(quote)
            }
            Ok(Err(e)) => {
                error!("Price fetch failed for {}: {}", asset.symbol, e);
                None
            }
            Err(_) => {
                error!(
                    "Price fetch for {} timed out after {:?}",
                    asset.symbol, self.call_timeout
                );
                None
            }
        }
    }

    async fn evaluate_asset(&self, quote: &AssetQuote) {
        let mut messages: Vec<AlertMessage> = Vec::new();

        match self
            .evaluator
            .volatility_check(&quote.symbol, quote.usd_price)
            .await
        {
            Ok(Some(message)) => messages.push(message),
            Ok(None) => {}
            Err(e) => error!("Volatility check failed for {}: {}", quote.symbol, e),
        }

        match self
            .evaluator
            .threshold_check(&quote.symbol, quote.usd_price)
            .await
        {
            Ok(mut rule_messages) => messages.append(&mut rule_messages),
            Err(e) => error!("Threshold check failed for {}: {}", quote.symbol, e),
        }

        join_all(messages.iter().map(|message| self.dispatch(message))).await;
    }

    async fn dispatch(&self, message: &AlertMessage) {
        if let Err(e) = self
            .notifier
            .send(&message.to, &message.subject, &message.body)
            .await
        {
            error!("Failed to send alert email to {}: {}", message.to, e);
        }
    }
}
