use crate::database::PriceStore;
use crate::error::ServiceResult;
use crate::types::AlertMessage;
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Percentage increase over the trailing hour that triggers a volatility alert.
pub const VOLATILITY_THRESHOLD_PCT: f64 = 3.0;

/// Lookback for the volatility reference sample, in seconds.
pub const VOLATILITY_WINDOW_SECS: i64 = 60 * 60;

/// Decides, for a freshly fetched price, whether the volatility rule or any
/// user-registered threshold rule fires, and builds the notification
/// payloads. Evaluation never sends anything itself.
pub struct AlertEvaluator {
    store: Arc<dyn PriceStore>,
    volatility_recipient: String,
}

impl AlertEvaluator {
    pub fn new(store: Arc<dyn PriceStore>, volatility_recipient: String) -> Self {
        Self {
            store,
            volatility_recipient,
        }
    }

    /// Compares the current price against the most recent sample at least
    /// one hour old. With no reference sample (insufficient history) or a
    /// zero current price this is a normal skip, not an error.
    pub async fn volatility_check(
        &self,
        symbol: &str,
        current_price: f64,
    ) -> ServiceResult<Option<AlertMessage>> {
        if current_price == 0.0 {
            return Ok(None);
        }

        let cutoff = Utc::now() - Duration::seconds(VOLATILITY_WINDOW_SECS);
        let reference = match self.store.latest_before(symbol, cutoff).await? {
            Some(sample) => sample,
            None => return Ok(None),
        };

        let change_pct = (current_price - reference.usd_price) / current_price * 100.0;
        if change_pct <= VOLATILITY_THRESHOLD_PCT {
            return Ok(None);
        }

        Ok(Some(AlertMessage {
            to: self.volatility_recipient.clone(),
            subject: format!(
                "Price Alert: {} price increased by more than 3%",
                reference.name
            ),
            body: format!(
                "The price of {} has increased by more than 3%. Old price: ${}, New price: ${}.",
                reference.name, reference.usd_price, current_price
            ),
        }))
    }

    /// One message per rule whose target price the current price has risen
    /// strictly past. Rules are never deactivated, so a matching rule
    /// produces a message again on every future evaluation.
    pub async fn threshold_check(
        &self,
        symbol: &str,
        current_price: f64,
    ) -> ServiceResult<Vec<AlertMessage>> {
        let rules = self.store.rules_below(symbol, current_price).await?;

        Ok(rules
            .into_iter()
            .map(|rule| AlertMessage {
                to: rule.email,
                subject: format!(
                    "Price Alert: {} price exceeded ${}",
                    rule.symbol, rule.target_price
                ),
                body: format!(
                    "The price of {} has exceeded your set limit of ${}. Current price: ${}.",
                    rule.symbol, rule.target_price, current_price
                ),
            })
            .collect())
    }
}
