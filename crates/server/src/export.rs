//! CSV download of one month's expenses.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

use crate::{
    ServerError,
    server::{MonthQuery, ServerState},
};
use engine::month;

pub async fn download(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let month = month::resolve(query.month.as_deref());
    let bytes = state.ledger.export_csv(&month).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"expenses_{month}.csv\""),
        ),
    ];

    Ok((headers, bytes))
}
