pub mod alert_operations;
pub mod price_operations;

pub use alert_operations::*;
pub use price_operations::*;

use anyhow::Result;
use sqlx::PgPool;

pub async fn create_tables(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS price_samples (
            id UUID PRIMARY KEY,
            symbol VARCHAR(20) NOT NULL,
            name VARCHAR(100) NOT NULL,
            usd_price DOUBLE PRECISION NOT NULL,
            usd_price_24hr_percent_change DOUBLE PRECISION NOT NULL,
            usd_price_24hr_usd_change DOUBLE PRECISION NOT NULL,
            usd_value_24hr_usd_change DOUBLE PRECISION NOT NULL,
            timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_price_samples_symbol_timestamp
        ON price_samples (symbol, timestamp)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS alert_rules (
            id UUID PRIMARY KEY,
            symbol VARCHAR(20) NOT NULL,
            target_price DOUBLE PRECISION NOT NULL,
            email VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_alert_rules_symbol_target
        ON alert_rules (symbol, target_price)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
