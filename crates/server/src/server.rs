use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use std::sync::Arc;

use crate::{budgets, dashboard, expenses, export, reports};
use engine::Ledger;

#[derive(Clone)]
pub struct ServerState {
    pub ledger: Arc<Ledger>,
}

/// Optional `?month=YYYY-MM` query, shared by almost every route.
#[derive(Debug, Deserialize)]
pub(crate) struct MonthQuery {
    pub month: Option<String>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/dashboard", get(dashboard::show))
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/delete/{id}", post(expenses::delete))
        .route("/budgets", get(budgets::show).post(budgets::save))
        .route("/api/category_spend", get(reports::category_spend))
        .route("/api/daily_trend", get(reports::daily_trend))
        .route("/api/payment_methods", get(reports::payment_methods))
        .route("/api/monthly_trend", get(reports::monthly_trend))
        .route("/export", get(export::download))
        .with_state(state)
}

pub async fn run_with_listener(
    ledger: Ledger,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        ledger: Arc::new(ledger),
    };

    axum::serve(listener, router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use tower::ServiceExt;

    async fn app_with_ledger() -> (Router, Arc<Ledger>) {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let ledger = Arc::new(Ledger::builder().database(db).build());
        let app = router(ServerState {
            ledger: ledger.clone(),
        });
        (app, ledger)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let (app, _) = app_with_ledger().await;

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn dashboard_shows_savings_for_the_month() {
        let (app, ledger) = app_with_ledger().await;
        ledger.set_monthly_income("2024-01", 1000.0).await.unwrap();
        ledger
            .add_expense("2024-01-05", "Food", 25.5, "Cash", "")
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::get("/dashboard?month=2024-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("2024-01"));
        assert!(body.contains("974.5"));
    }

    #[tokio::test]
    async fn posting_an_expense_redirects_and_persists() {
        let (app, ledger) = app_with_ledger().await;

        let response = app
            .oneshot(form_post(
                "/expenses?month=2024-01",
                "date=2024-01-05&category=Food&amount=20&payment_method=Cash&note=weekly+shop",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/expenses?month=2024-01"
        );

        let expenses = ledger.expenses_for_month("2024-01").await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].note, "weekly shop");
    }

    #[tokio::test]
    async fn non_numeric_amount_is_a_client_error() {
        let (app, ledger) = app_with_ledger().await;

        let response = app
            .oneshot(form_post(
                "/expenses",
                "date=2024-01-05&category=Food&amount=lots&payment_method=Cash&note=",
            ))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert!(ledger.expenses_for_month("2024-01").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_an_expense_redirects_back() {
        let (app, ledger) = app_with_ledger().await;
        let id = ledger
            .add_expense("2024-01-05", "Food", 20.0, "Cash", "")
            .await
            .unwrap();

        let response = app
            .oneshot(form_post(
                &format!("/expenses/delete/{id}?month=2024-01"),
                "",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(ledger.expenses_for_month("2024-01").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn budgets_post_upserts_income_and_categories() {
        let (app, ledger) = app_with_ledger().await;

        let response = app
            .oneshot(form_post(
                "/budgets?month=2024-01",
                "income=1000&category%5B%5D=Food&amount%5B%5D=100&category%5B%5D=&amount%5B%5D=50",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(ledger.monthly_income("2024-01").await.unwrap(), 1000.0);
        assert_eq!(
            ledger.category_budgets_for_month("2024-01").await.unwrap(),
            vec![("Food".to_string(), 100.0)]
        );
    }

    #[tokio::test]
    async fn rejected_budget_form_persists_nothing() {
        let (app, ledger) = app_with_ledger().await;

        let response = app
            .oneshot(form_post(
                "/budgets?month=2024-01",
                "income=500&category%5B%5D=Food&amount%5B%5D=junk",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ledger.monthly_income("2024-01").await.unwrap(), 0.0);
        assert!(
            ledger
                .category_budgets_for_month("2024-01")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn empty_budget_amount_coerces_to_zero() {
        let (app, ledger) = app_with_ledger().await;

        let response = app
            .oneshot(form_post(
                "/budgets?month=2024-01",
                "income=0&category%5B%5D=Food&amount%5B%5D=",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            ledger.category_budgets_for_month("2024-01").await.unwrap(),
            vec![("Food".to_string(), 0.0)]
        );
    }

    #[tokio::test]
    async fn category_spend_returns_label_total_pairs() {
        let (app, ledger) = app_with_ledger().await;
        ledger
            .add_expense("2024-01-05", "Food", 20.0, "Cash", "")
            .await
            .unwrap();
        ledger
            .add_expense("2024-01-07", "Food", 5.5, "Card", "")
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::get("/api/category_spend?month=2024-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        let data: Vec<(String, f64)> = serde_json::from_str(&body).unwrap();
        assert_eq!(data, vec![("Food".to_string(), 25.5)]);
    }

    #[tokio::test]
    async fn monthly_trend_ignores_selected_month() {
        let (app, ledger) = app_with_ledger().await;
        ledger
            .add_expense("2023-12-31", "Gifts", 40.0, "Card", "")
            .await
            .unwrap();
        ledger
            .add_expense("2024-01-05", "Food", 20.0, "Cash", "")
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::get("/api/monthly_trend")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_string(response).await;
        let data: Vec<(String, f64)> = serde_json::from_str(&body).unwrap();
        assert_eq!(
            data,
            vec![("2023-12".to_string(), 40.0), ("2024-01".to_string(), 20.0)]
        );
    }

    #[tokio::test]
    async fn export_is_a_csv_attachment() {
        let (app, _) = app_with_ledger().await;

        let response = app
            .oneshot(
                Request::get("/export?month=2024-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"expenses_2024-01.csv\""
        );
        let body = body_string(response).await;
        assert_eq!(
            body.trim_end(),
            "ID,Date,Category,Amount,Payment Method,Note"
        );
    }
}
