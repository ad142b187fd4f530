//! In-memory fakes for the collaborator seams, used by unit tests only.

use crate::config::AssetConfig;
use crate::database::PriceStore;
use crate::error::{ServiceError, ServiceResult};
use crate::services::notifier::Notifier;
use crate::services::price_source::PriceSource;
use crate::types::{AlertRule, AssetQuote, NewAlertRule, NewPriceSample, PriceSample};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// `PriceStore` backed by vectors. `fail_writes` turns every write into a
/// persistence error without touching stored state.
#[derive(Default)]
pub struct MemoryStore {
    pub samples: Mutex<Vec<PriceSample>>,
    pub rules: Mutex<Vec<AlertRule>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn push_sample(&self, symbol: &str, usd_price: f64, timestamp: DateTime<Utc>) {
        self.samples.lock().unwrap().push(PriceSample {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            name: format!("{symbol} asset"),
            usd_price,
            usd_price_24hr_percent_change: 0.0,
            usd_price_24hr_usd_change: 0.0,
            usd_value_24hr_usd_change: 0.0,
            timestamp,
        });
    }

    pub fn push_rule(&self, symbol: &str, target_price: f64, email: &str) {
        self.rules.lock().unwrap().push(AlertRule {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            target_price,
            email: email.to_string(),
            created_at: Utc::now(),
        });
    }

    pub fn sample_count(&self) -> usize {
        self.samples.lock().unwrap().len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.lock().unwrap().len()
    }

    fn write_error() -> ServiceError {
        ServiceError::Persistence(sqlx::Error::PoolClosed)
    }
}

#[async_trait]
impl PriceStore for MemoryStore {
    async fn write_samples(&self, samples: &[NewPriceSample]) -> ServiceResult<()> {
        if self.fail_writes {
            return Err(Self::write_error());
        }

        let now = Utc::now();
        let mut stored = self.samples.lock().unwrap();
        for sample in samples {
            stored.push(PriceSample {
                id: Uuid::new_v4(),
                symbol: sample.symbol.clone(),
                name: sample.name.clone(),
                usd_price: sample.usd_price,
                usd_price_24hr_percent_change: sample.usd_price_24hr_percent_change,
                usd_price_24hr_usd_change: sample.usd_price_24hr_usd_change,
                usd_value_24hr_usd_change: sample.usd_value_24hr_usd_change,
                timestamp: now,
            });
        }
        Ok(())
    }

    async fn latest_before(
        &self,
        symbol: &str,
        cutoff: DateTime<Utc>,
    ) -> ServiceResult<Option<PriceSample>> {
        let stored = self.samples.lock().unwrap();
        Ok(stored
            .iter()
            .filter(|s| s.symbol == symbol && s.timestamp <= cutoff)
            .max_by_key(|s| s.timestamp)
            .cloned())
    }

    async fn samples_in_range(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<PriceSample>> {
        let stored = self.samples.lock().unwrap();
        let mut matching: Vec<PriceSample> = stored
            .iter()
            .filter(|s| s.symbol == symbol && s.timestamp >= start && s.timestamp <= end)
            .cloned()
            .collect();
        matching.sort_by_key(|s| s.timestamp);
        Ok(matching)
    }

    async fn rules_below(&self, symbol: &str, price: f64) -> ServiceResult<Vec<AlertRule>> {
        let stored = self.rules.lock().unwrap();
        Ok(stored
            .iter()
            .filter(|r| r.symbol == symbol && r.target_price < price)
            .cloned()
            .collect())
    }

    async fn create_rule(&self, rule: &NewAlertRule) -> ServiceResult<()> {
        if self.fail_writes {
            return Err(Self::write_error());
        }

        self.rules.lock().unwrap().push(AlertRule {
            id: Uuid::new_v4(),
            symbol: rule.symbol.clone(),
            target_price: rule.target_price,
            email: rule.email.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }
}

/// `PriceSource` returning scripted quotes per symbol; symbols without a
/// script fail as an upstream error.
#[derive(Default)]
pub struct StubSource {
    pub quotes: HashMap<String, AssetQuote>,
    pub exchange_rate: Option<f64>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: &str, usd_price: f64) -> Self {
        self.quotes.insert(
            symbol.to_string(),
            AssetQuote {
                symbol: symbol.to_string(),
                name: format!("{symbol} asset"),
                usd_price,
                usd_price_24hr_percent_change: 0.0,
                usd_price_24hr_usd_change: 0.0,
                usd_value_24hr_usd_change: 0.0,
            },
        );
        self
    }

    pub fn with_exchange_rate(mut self, rate: f64) -> Self {
        self.exchange_rate = Some(rate);
        self
    }
}

#[async_trait]
impl PriceSource for StubSource {
    async fn fetch_price(&self, asset: &AssetConfig) -> ServiceResult<AssetQuote> {
        self.quotes
            .get(&asset.symbol)
            .cloned()
            .ok_or_else(|| ServiceError::Upstream(format!("no quote for {}", asset.symbol)))
    }

    async fn fetch_exchange_rate(
        &self,
        base_symbol: &str,
        quote_symbol: &str,
    ) -> ServiceResult<f64> {
        self.exchange_rate.ok_or_else(|| {
            ServiceError::Upstream(format!("no rate for {base_symbol}->{quote_symbol}"))
        })
    }
}

/// `Notifier` capturing every send; recipients listed in `fail_for` error
/// out instead.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String, String)>>,
    pub fail_for: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(recipient: &str) -> Self {
        Self {
            fail_for: vec![recipient.to_string()],
            ..Self::default()
        }
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(to, _, _)| to.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> ServiceResult<()> {
        if self.fail_for.iter().any(|r| r == to) {
            return Err(ServiceError::Upstream(format!("delivery to {to} refused")));
        }

        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

pub fn asset(symbol: &str) -> AssetConfig {
    AssetConfig {
        symbol: symbol.to_string(),
        chain: "eth".to_string(),
        address: "0x0000000000000000000000000000000000000000".to_string(),
    }
}

/// Float comparison helper for test assertions.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
