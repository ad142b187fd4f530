use crate::error::ServiceResult;
use crate::types::{NewPriceSample, PriceSample};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PriceOperations;

impl PriceOperations {
    /// Inserts a batch of samples in a single statement. All rows in the
    /// batch share one write timestamp, so insertion order equals temporal
    /// order per asset.
    pub async fn insert_samples(pool: &PgPool, samples: &[NewPriceSample]) -> ServiceResult<()> {
        if samples.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let mut builder = sqlx::QueryBuilder::new(
            r#"
            INSERT INTO price_samples (
                id, symbol, name, usd_price, usd_price_24hr_percent_change,
                usd_price_24hr_usd_change, usd_value_24hr_usd_change, timestamp
            ) "#,
        );

        builder.push_values(samples, |mut row, sample| {
            row.push_bind(Uuid::new_v4())
                .push_bind(&sample.symbol)
                .push_bind(&sample.name)
                .push_bind(sample.usd_price)
                .push_bind(sample.usd_price_24hr_percent_change)
                .push_bind(sample.usd_price_24hr_usd_change)
                .push_bind(sample.usd_value_24hr_usd_change)
                .push_bind(now);
        });

        builder.build().execute(pool).await?;

        Ok(())
    }

    /// Most recent sample for the symbol at or before the cutoff.
    pub async fn latest_before(
        pool: &PgPool,
        symbol: &str,
        cutoff: DateTime<Utc>,
    ) -> ServiceResult<Option<PriceSample>> {
        let sample = sqlx::query_as::<_, PriceSample>(
            r#"
            SELECT id, symbol, name, usd_price, usd_price_24hr_percent_change,
                   usd_price_24hr_usd_change, usd_value_24hr_usd_change, timestamp
            FROM price_samples
            WHERE symbol = $1 AND timestamp <= $2
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(symbol)
        .bind(cutoff)
        .fetch_optional(pool)
        .await?;

        Ok(sample)
    }

    /// Samples for the symbol within `[start, end]`, oldest first.
    pub async fn samples_in_range(
        pool: &PgPool,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<PriceSample>> {
        let samples = sqlx::query_as::<_, PriceSample>(
            r#"
            SELECT id, symbol, name, usd_price, usd_price_24hr_percent_change,
                   usd_price_24hr_usd_change, usd_value_24hr_usd_change, timestamp
            FROM price_samples
            WHERE symbol = $1 AND timestamp >= $2 AND timestamp <= $3
            ORDER BY timestamp ASC
            "#,
        )
        .bind(symbol)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(samples)
    }
}
