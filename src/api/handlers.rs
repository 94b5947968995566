use super::AppState;
use super::framing::Framed;
use crate::change::rate_change;
use crate::core::rates::find_rate;
use crate::core::{CurrencyId, DateKey, RateSet, RatesError};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct RateQuery {
    pub date: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub date: String,
    pub status: &'static str,
    pub message: &'static str,
    pub data: RateSet,
}

/// GET /check — Confirm rates are available for a date.
#[instrument(skip_all, fields(date = %query.date))]
pub async fn check(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckQuery>,
) -> Result<Framed<CheckResponse>, RatesError> {
    let data = state.loader.load_rates(&query.date).await?;
    info!(count = data.len(), "Rates available");

    Ok(Framed(CheckResponse {
        date: query.date,
        status: "Success",
        message: "Exchange rates loaded successfully.",
        data,
    }))
}

/// GET /get_rate — One currency's rate with its day-over-day change.
#[instrument(skip_all, fields(date = %query.date, code = %query.code))]
pub async fn get_rate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RateQuery>,
) -> Result<Framed<Map<String, Value>>, RatesError> {
    let date = DateKey::parse(&query.date)?;
    let rates = state.loader.load(&date).await?;

    let code = CurrencyId::parse(&query.code);
    let record = find_rate(&rates, &code).ok_or_else(|| RatesError::CurrencyCodeNotFound {
        date: date.to_string(),
        code: query.code.clone(),
    })?;

    let change = rate_change(&state.loader, &date, record).await?;
    Ok(Framed(record.with_change(change)))
}

/// GET /health: liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
