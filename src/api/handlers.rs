use super::ApiState;
use crate::error::ServiceError;
use crate::types::{HourBucket, SetAlertRequest, SwapQuote};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct HourlyPricesQuery {
    pub symbol: String,
}

#[derive(Debug, Deserialize)]
pub struct SwapRateQuery {
    pub amount: f64,
}

fn error_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        ServiceError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn get_hourly_prices(
    Query(params): Query<HourlyPricesQuery>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<HourBucket>>, StatusCode> {
    match state.query.get_hourly_prices(&params.symbol).await {
        Ok(buckets) => Ok(Json(buckets)),
        Err(e) => {
            tracing::error!("Failed to get hourly prices for {}: {}", params.symbol, e);
            Err(error_status(&e))
        }
    }
}

pub async fn set_alert(
    State(state): State<ApiState>,
    Json(request): Json<SetAlertRequest>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    match state
        .query
        .set_alert(&request.symbol, request.target_price, &request.email)
        .await
    {
        Ok(()) => Ok((StatusCode::CREATED, Json(json!({ "message": "success" })))),
        Err(e @ ServiceError::InvalidArgument(_)) => {
            tracing::warn!("Rejected alert registration: {}", e);
            Err(error_status(&e))
        }
        Err(e) => {
            tracing::error!("Failed to create alert rule: {}", e);
            Err(error_status(&e))
        }
    }
}

pub async fn get_swap_rate(
    Query(params): Query<SwapRateQuery>,
    State(state): State<ApiState>,
) -> Result<Json<SwapQuote>, StatusCode> {
    match state.query.get_swap_rate(params.amount).await {
        Ok(quote) => Ok(Json(quote)),
        Err(e @ ServiceError::InvalidArgument(_)) => Err(error_status(&e)),
        Err(e) => {
            tracing::error!("Failed to calculate swap rate: {}", e);
            Err(error_status(&e))
        }
    }
}
