//! JSON chart feeds.
//!
//! Every endpoint returns an array of `[label, total]` pairs; the in-browser
//! charts consume them as-is.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    ServerError,
    server::{MonthQuery, ServerState},
};
use engine::month;

pub async fn category_spend(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<(String, f64)>>, ServerError> {
    let month = month::resolve(query.month.as_deref());
    Ok(Json(state.ledger.spend_by_category(&month).await?))
}

pub async fn daily_trend(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<(String, f64)>>, ServerError> {
    let month = month::resolve(query.month.as_deref());
    Ok(Json(state.ledger.spend_by_day(&month).await?))
}

pub async fn payment_methods(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<(String, f64)>>, ServerError> {
    let month = month::resolve(query.month.as_deref());
    Ok(Json(state.ledger.spend_by_payment_method(&month).await?))
}

/// Aggregates across all months, never scoped to the selected one.
pub async fn monthly_trend(
    State(state): State<ServerState>,
) -> Result<Json<Vec<(String, f64)>>, ServerError> {
    Ok(Json(state.ledger.spend_by_month().await?))
}
