use crate::config::{AssetConfig, PriceSourceConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::types::AssetQuote;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Upstream market-data seam: latest per-asset quote and cross-asset rate.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self, asset: &AssetConfig) -> ServiceResult<AssetQuote>;

    /// Exchange rate expressed as quote units per one base unit.
    async fn fetch_exchange_rate(&self, base_symbol: &str, quote_symbol: &str)
        -> ServiceResult<f64>;
}

#[derive(Debug, Deserialize)]
struct WalletTokensResponse {
    result: Vec<WalletTokenEntry>,
}

#[derive(Debug, Deserialize)]
struct WalletTokenEntry {
    name: Option<String>,
    symbol: Option<String>,
    usd_price: Option<f64>,
    usd_price_24hr_percent_change: Option<f64>,
    usd_price_24hr_usd_change: Option<f64>,
    usd_value_24hr_usd_change: Option<f64>,
}

/// Moralis-backed price source; cross rates come from the CoinGecko
/// simple-price endpoint.
pub struct MoralisClient {
    client: reqwest::Client,
    config: PriceSourceConfig,
}

impl MoralisClient {
    pub fn new(config: PriceSourceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// CoinGecko coin id for the symbols this service trades in.
    fn coin_id(symbol: &str) -> ServiceResult<&'static str> {
        match symbol.to_ascii_uppercase().as_str() {
            "ETH" => Ok("ethereum"),
            "BTC" => Ok("bitcoin"),
            "POL" | "MATIC" => Ok("polygon-ecosystem-token"),
            other => Err(ServiceError::Upstream(format!(
                "no rate mapping for symbol: {other}"
            ))),
        }
    }
}

#[async_trait]
impl PriceSource for MoralisClient {
    async fn fetch_price(&self, asset: &AssetConfig) -> ServiceResult<AssetQuote> {
        let url = format!(
            "{}/wallets/{}/tokens?chain={}&limit=1",
            self.config.api_url, asset.address, asset.chain
        );

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.config.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Upstream(format!(
                "price request for {} failed: {}",
                asset.symbol,
                response.status()
            )));
        }

        let payload: WalletTokensResponse = response.json().await?;
        let entry = payload.result.into_iter().next().ok_or_else(|| {
            ServiceError::Upstream(format!("empty price result for {}", asset.symbol))
        })?;

        let usd_price = entry
            .usd_price
            .ok_or_else(|| ServiceError::Upstream(format!("missing price for {}", asset.symbol)))?;

        if usd_price < 0.0 {
            return Err(ServiceError::Upstream(format!(
                "negative price for {}: {}",
                asset.symbol, usd_price
            )));
        }

        Ok(AssetQuote {
            symbol: entry.symbol.unwrap_or_else(|| asset.symbol.clone()),
            name: entry.name.unwrap_or_else(|| asset.symbol.clone()),
            usd_price,
            usd_price_24hr_percent_change: entry.usd_price_24hr_percent_change.unwrap_or(0.0),
            usd_price_24hr_usd_change: entry.usd_price_24hr_usd_change.unwrap_or(0.0),
            usd_value_24hr_usd_change: entry.usd_value_24hr_usd_change.unwrap_or(0.0),
        })
    }

    async fn fetch_exchange_rate(
        &self,
        base_symbol: &str,
        quote_symbol: &str,
    ) -> ServiceResult<f64> {
        let base_id = Self::coin_id(base_symbol)?;
        let quote_id = Self::coin_id(quote_symbol)?;
        let vs_currency = quote_symbol.to_ascii_lowercase();

        let url = format!(
            "{}/simple/price?ids={},{}&vs_currencies={}",
            self.config.rates_api_url, base_id, quote_id, vs_currency
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ServiceError::Upstream(format!(
                "rate request {base_symbol}->{quote_symbol} failed: {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        payload
            .get(base_id)
            .and_then(|entry| entry.get(&vs_currency))
            .and_then(|rate| rate.as_f64())
            .ok_or_else(|| {
                ServiceError::Upstream(format!(
                    "rate {base_symbol}->{quote_symbol} missing from response"
                ))
            })
    }
}
