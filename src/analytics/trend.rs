//! The monthly income/expense trend.
//!
//! The trend endpoint currently serves fixed sample data. Deriving it from
//! stored transactions needs month bucketing over the transaction table.
// TODO: compute the trend from the "transaction" table instead of sample data.

use axum::Json;
use serde_json::{Value, json};

use crate::auth::AuthenticatedUser;

/// Handler that returns the monthly income/expense trend.
pub async fn get_monthly_trend_endpoint(AuthenticatedUser(_user): AuthenticatedUser) -> Json<Value> {
    Json(json!([
        { "month": "Jan", "income": 4500, "expenses": 3200 },
        { "month": "Feb", "income": 4800, "expenses": 3100 },
        { "month": "Mar", "income": 5000, "expenses": 3400 },
    ]))
}

#[cfg(test)]
mod monthly_trend_tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::test_utils::{new_test_server, register_and_sign_in};

    #[tokio::test]
    async fn trend_requires_authentication() {
        let server = new_test_server();

        server
            .get("/analytics/monthly-trend")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn trend_lists_three_months() {
        let server = new_test_server();
        let token = register_and_sign_in(&server).await;

        let response = server
            .get("/analytics/monthly-trend")
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();

        let months = response.json::<Vec<Value>>();
        assert_eq!(months.len(), 3);
        assert_eq!(months[0]["month"], "Jan");
        assert_eq!(months[1]["income"], 4800);
    }
}
