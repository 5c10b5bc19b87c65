//! Expense list page and the create/delete form endpoints.

use api_types::expense::ExpenseNew;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;

use crate::{
    ServerError, pages,
    server::{MonthQuery, ServerState},
};
use engine::month;

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, ServerError> {
    let month = month::resolve(query.month.as_deref());
    let expenses = state.ledger.expenses_for_month(&month).await?;
    Ok(Html(pages::expenses(&month, &expenses)))
}

pub async fn create(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
    Form(payload): Form<ExpenseNew>,
) -> Result<Redirect, ServerError> {
    let month = month::resolve(query.month.as_deref());

    state
        .ledger
        .add_expense(
            &payload.date,
            &payload.category,
            payload.amount,
            &payload.payment_method,
            &payload.note,
        )
        .await?;

    Ok(Redirect::to(&format!("/expenses?month={month}")))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(query): Query<MonthQuery>,
) -> Result<Redirect, ServerError> {
    let month = month::resolve(query.month.as_deref());

    state.ledger.delete_expense(id).await?;

    Ok(Redirect::to(&format!("/expenses?month={month}")))
}
