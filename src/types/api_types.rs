use serde::{Deserialize, Serialize};

/// Per-hour statistics over a 24h window of samples. Derived, not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: String,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

/// Result of a swap-rate calculation. Derived, not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapQuote {
    pub output_amount: f64,
    pub fee_in_source_asset: f64,
    pub fee_in_usd: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetAlertRequest {
    pub symbol: String,
    pub target_price: f64,
    pub email: String,
}

/// A notification payload produced by alert evaluation; the notifier owns
/// actually delivering it.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Latest upstream quote for one asset, before persistence.
#[derive(Debug, Clone)]
pub struct AssetQuote {
    pub symbol: String,
    pub name: String,
    pub usd_price: f64,
    pub usd_price_24hr_percent_change: f64,
    pub usd_price_24hr_usd_change: f64,
    pub usd_value_24hr_usd_change: f64,
}
