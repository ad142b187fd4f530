pub mod operations;

use crate::error::ServiceResult;
use crate::types::{AlertRule, NewAlertRule, NewPriceSample, PriceSample};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Persistence seam for price samples and alert rules. The production
/// implementation is [`Database`]; tests substitute an in-memory fake.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Appends all samples in one batch write (all-or-nothing per call).
    async fn write_samples(&self, samples: &[NewPriceSample]) -> ServiceResult<()>;

    /// Most recent sample for `symbol` with `timestamp <= cutoff`, if any.
    async fn latest_before(
        &self,
        symbol: &str,
        cutoff: DateTime<Utc>,
    ) -> ServiceResult<Option<PriceSample>>;

    /// Samples for `symbol` in `[start, end]`, ascending by timestamp.
    async fn samples_in_range(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<PriceSample>>;

    /// Alert rules for `symbol` whose target price is strictly below `price`.
    async fn rules_below(&self, symbol: &str, price: f64) -> ServiceResult<Vec<AlertRule>>;

    async fn create_rule(&self, rule: &NewAlertRule) -> ServiceResult<()>;
}

pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn create_tables(&self) -> anyhow::Result<()> {
        operations::create_tables(&self.pool).await
    }
}

#[async_trait]
impl PriceStore for Database {
    async fn write_samples(&self, samples: &[NewPriceSample]) -> ServiceResult<()> {
        operations::PriceOperations::insert_samples(&self.pool, samples).await
    }

    async fn latest_before(
        &self,
        symbol: &str,
        cutoff: DateTime<Utc>,
    ) -> ServiceResult<Option<PriceSample>> {
        operations::PriceOperations::latest_before(&self.pool, symbol, cutoff).await
    }

    async fn samples_in_range(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<PriceSample>> {
        operations::PriceOperations::samples_in_range(&self.pool, symbol, start, end).await
    }

    async fn rules_below(&self, symbol: &str, price: f64) -> ServiceResult<Vec<AlertRule>> {
        operations::AlertOperations::rules_below(&self.pool, symbol, price).await
    }

    async fn create_rule(&self, rule: &NewAlertRule) -> ServiceResult<()> {
        operations::AlertOperations::create_rule(&self.pool, rule).await
    }
}
