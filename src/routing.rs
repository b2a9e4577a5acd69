//! Application router configuration.
//!
//! Route protection happens through the [crate::auth::AuthenticatedUser]
//! extractor rather than middleware, so handlers that take the extractor are
//! protected and the rest are open.

use axum::{
    Json, Router,
    routing::{delete, get, patch, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    analytics::{get_monthly_trend_endpoint, get_summary_endpoint},
    auth::issue_token_endpoint,
    bill::{create_bill_endpoint, get_bills_endpoint, pay_bill_endpoint},
    category::{create_category_endpoint, delete_category_endpoint, get_categories_endpoint},
    endpoints,
    loan::{
        create_loan_endpoint, delete_loan_endpoint, extra_payment_endpoint, get_loans_endpoint,
    },
    transaction::{create_transaction_endpoint, get_transactions_endpoint},
    user::{get_current_user_endpoint, register_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_welcome))
        .route(endpoints::REGISTER, post(register_endpoint))
        .route(endpoints::TOKEN, post(issue_token_endpoint))
        .route(endpoints::USERS_ME, get(get_current_user_endpoint))
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(endpoints::CATEGORY, delete(delete_category_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::BILLS,
            get(get_bills_endpoint).post(create_bill_endpoint),
        )
        .route(endpoints::PAY_BILL, patch(pay_bill_endpoint))
        .route(
            endpoints::LOANS,
            get(get_loans_endpoint).post(create_loan_endpoint),
        )
        .route(endpoints::LOAN, delete(delete_loan_endpoint))
        .route(endpoints::EXTRA_PAYMENT, post(extra_payment_endpoint))
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route(endpoints::MONTHLY_TREND, get(get_monthly_trend_endpoint))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to App Finance API - Obsidian Gold Edition" }))
}

#[cfg(test)]
mod routing_tests {
    use serde_json::Value;

    use crate::test_utils::new_test_server;

    #[tokio::test]
    async fn root_reports_the_api_is_up() {
        let server = new_test_server();

        let response = server.get("/").await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["message"],
            "Welcome to App Finance API - Obsidian Gold Edition"
        );
    }
}
