use crate::error::ServiceResult;
use crate::types::{AlertRule, NewAlertRule};
use sqlx::PgPool;
use uuid::Uuid;

pub struct AlertOperations;

impl AlertOperations {
    /// Rules for the symbol whose stored target price is strictly below the
    /// given price, i.e. rules the current price has risen past.
    pub async fn rules_below(
        pool: &PgPool,
        symbol: &str,
        price: f64,
    ) -> ServiceResult<Vec<AlertRule>> {
        let rules = sqlx::query_as::<_, AlertRule>(
            r#"
            SELECT id, symbol, target_price, email, created_at
            FROM alert_rules
            WHERE symbol = $1 AND target_price < $2
            "#,
        )
        .bind(symbol)
        .bind(price)
        .fetch_all(pool)
        .await?;

        Ok(rules)
    }

    pub async fn create_rule(pool: &PgPool, rule: &NewAlertRule) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO alert_rules (id, symbol, target_price, email)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&rule.symbol)
        .bind(rule.target_price)
        .bind(&rule.email)
        .execute(pool)
        .await?;

        Ok(())
    }
}
