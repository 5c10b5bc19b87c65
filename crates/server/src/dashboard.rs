//! Dashboard page: income, total spend, savings and budget-vs-actual.

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};

use crate::{
    ServerError, pages,
    server::{MonthQuery, ServerState},
};
use engine::month;

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn show(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, ServerError> {
    let month = month::resolve(query.month.as_deref());

    let income = state.ledger.monthly_income(&month).await?;
    let total = state.ledger.total_spend(&month).await?;
    let savings = income - total;
    let overview = state.ledger.budget_overview(&month).await?;

    Ok(Html(pages::dashboard(
        &month, income, total, savings, &overview,
    )))
}
