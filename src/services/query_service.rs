use crate::config::{AssetConfig, SwapConfig};
use crate::database::PriceStore;
use crate::error::{ServiceError, ServiceResult};
use crate::services::aggregator::group_by_hour;
use crate::services::price_source::PriceSource;
use crate::types::{HourBucket, NewAlertRule, SwapQuote};
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Fee taken on a swap, as a fraction of the source amount.
pub const FEE_RATE: f64 = 0.03;

/// Read-side service behind the HTTP handlers: hourly aggregates, alert
/// registration, and the cross-asset swap quote.
pub struct QueryService {
    store: Arc<dyn PriceStore>,
    source: Arc<dyn PriceSource>,
    swap: SwapConfig,
    swap_source_asset: Option<AssetConfig>,
}

impl QueryService {
    pub fn new(
        store: Arc<dyn PriceStore>,
        source: Arc<dyn PriceSource>,
        swap: SwapConfig,
        assets: &[AssetConfig],
    ) -> Self {
        let swap_source_asset = assets
            .iter()
            .find(|a| a.symbol == swap.source_symbol)
            .cloned();

        Self {
            store,
            source,
            swap,
            swap_source_asset,
        }
    }

    /// Hour-of-day aggregates over the trailing 24 hours of samples. An
    /// asset with no samples in the window yields an empty list.
    pub async fn get_hourly_prices(&self, symbol: &str) -> ServiceResult<Vec<HourBucket>> {
        let now = Utc::now();
        let one_day_ago = now - Duration::hours(24);

        let samples = self.store.samples_in_range(symbol, one_day_ago, now).await?;

        Ok(group_by_hour(&samples, |s| s.usd_price))
    }

    /// Registers a threshold alert. Validation failures persist nothing.
    pub async fn set_alert(
        &self,
        symbol: &str,
        target_price: f64,
        email: &str,
    ) -> ServiceResult<()> {
        if !(target_price > 0.0) {
            return Err(ServiceError::InvalidArgument(format!(
                "target price must be positive, got {target_price}"
            )));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(ServiceError::InvalidArgument(
                "a valid email address is required".to_string(),
            ));
        }

        self.store
            .create_rule(&NewAlertRule {
                symbol: symbol.to_string(),
                target_price,
                email: email.to_string(),
            })
            .await
    }

    /// Quotes a swap of `source_amount` of the configured source asset into
    /// the quote asset, net of the fee. Any upstream failure is returned as
    /// an error; no partial quote is ever produced.
    pub async fn get_swap_rate(&self, source_amount: f64) -> ServiceResult<SwapQuote> {
        if !(source_amount > 0.0) {
            return Err(ServiceError::InvalidArgument(format!(
                "swap amount must be positive, got {source_amount}"
            )));
        }

        let source_asset = self.swap_source_asset.as_ref().ok_or_else(|| {
            ServiceError::Upstream(format!(
                "swap source asset {} is not configured",
                self.swap.source_symbol
            ))
        })?;

        let exchange_rate = self
            .source
            .fetch_exchange_rate(&self.swap.source_symbol, &self.swap.quote_symbol)
            .await?;
        let source_usd_price = self.source.fetch_price(source_asset).await?.usd_price;

        let fee_in_source_asset = source_amount * FEE_RATE;
        let fee_in_usd = fee_in_source_asset * source_usd_price;
        let output_amount = (source_amount - fee_in_source_asset) * exchange_rate;

        Ok(SwapQuote {
            output_amount,
            fee_in_source_asset,
            fee_in_usd,
        })
    }
}
