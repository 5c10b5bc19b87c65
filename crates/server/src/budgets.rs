//! Budgets page and the income / category-cap upsert endpoint.

use api_types::budget::BudgetForm;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;

use crate::{
    ServerError, pages,
    server::{MonthQuery, ServerState},
};
use engine::month;

pub async fn show(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, ServerError> {
    let month = month::resolve(query.month.as_deref());

    let income = state.ledger.monthly_income(&month).await?;
    let budgets = state.ledger.category_budgets_for_month(&month).await?;

    Ok(Html(pages::budgets(&month, income, &budgets)))
}

pub async fn save(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
    Form(payload): Form<BudgetForm>,
) -> Result<Redirect, ServerError> {
    let month = month::resolve(query.month.as_deref());

    // category[] and amount[] rows are zipped positionally; an empty amount
    // cell means 0. Parsing happens before either upsert so a rejected form
    // leaves no state behind.
    let pairs = payload
        .categories
        .iter()
        .zip(payload.amounts.iter())
        .map(|(category, amount)| {
            let amount = if amount.trim().is_empty() {
                0.0
            } else {
                amount.trim().parse::<f64>().map_err(|_| {
                    ServerError::Generic(format!("invalid amount for category {category:?}"))
                })?
            };
            Ok((category.clone(), amount))
        })
        .collect::<Result<Vec<_>, ServerError>>()?;

    state
        .ledger
        .set_monthly_income(&month, payload.income)
        .await?;
    state.ledger.set_category_budgets(&month, &pairs).await?;

    Ok(Redirect::to(&format!("/budgets?month={month}")))
}
