// PriceSample, NewPriceSample, AlertRule, NewAlertRule
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted price observation for an asset. Immutable once written.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PriceSample {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub usd_price: f64,
    pub usd_price_24hr_percent_change: f64,
    pub usd_price_24hr_usd_change: f64,
    pub usd_value_24hr_usd_change: f64,
    pub timestamp: DateTime<Utc>,
}

/// Insert shape for a price sample; id and timestamp are assigned at write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPriceSample {
    pub symbol: String,
    pub name: String,
    pub usd_price: f64,
    pub usd_price_24hr_percent_change: f64,
    pub usd_price_24hr_usd_change: f64,
    pub usd_value_24hr_usd_change: f64,
}

/// A user-registered threshold alert. Read-only after creation; rules are
/// never deactivated, so a rule fires on every cycle its condition holds.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: Uuid,
    pub symbol: String,
    pub target_price: f64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlertRule {
    pub symbol: String,
    pub target_price: f64,
    pub email: String,
}
