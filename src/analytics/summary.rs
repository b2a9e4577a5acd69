//! The financial summary: income and expense totals, the savings rate, and a
//! per-category expense breakdown.

use std::cmp::Ordering;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::AuthenticatedUser,
    category::{Category, get_categories_by_user},
    transaction::{Transaction, TransactionType, get_transactions_by_user},
};

/// The share of total expenses spent in a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// The category name.
    pub name: String,
    /// The total spent in this category.
    pub amount: f64,
    /// The category's icon.
    pub icon: String,
    /// The category's display colour.
    pub color: String,
    /// This category's share of total expenses, as a percentage rounded to
    /// two decimal places.
    pub percentage: f64,
}

/// A snapshot of the user's overall financial position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all income transactions.
    pub total_income: f64,
    /// The sum of all expense transactions.
    pub total_expenses: f64,
    /// Income minus expenses.
    pub savings: f64,
    /// Savings as a percentage of income, rounded to two decimal places.
    /// Zero when there is no income.
    pub savings_rate: f64,
    /// Expenses grouped by category, largest first.
    pub category_breakdown: Vec<CategoryBreakdown>,
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the financial summary over a user's transactions.
///
/// Only expense transactions with a category appear in the breakdown, and
/// only categories with something spent in them. Uncategorised spending still
/// counts towards `total_expenses`.
pub fn summarize(transactions: &[Transaction], categories: &[Category]) -> Summary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => total_income += transaction.amount,
            TransactionType::Expense => total_expenses += transaction.amount,
        }
    }

    let mut category_breakdown: Vec<CategoryBreakdown> = categories
        .iter()
        .filter_map(|category| {
            let amount: f64 = transactions
                .iter()
                .filter(|transaction| {
                    transaction.transaction_type == TransactionType::Expense
                        && transaction.category_id == Some(category.id)
                })
                .map(|transaction| transaction.amount)
                .sum();

            if amount <= 0.0 {
                return None;
            }

            Some(CategoryBreakdown {
                name: category.name.clone(),
                amount,
                icon: category.icon.clone(),
                color: category.color.clone(),
                percentage: round_to_cents(amount / total_expenses * 100.0),
            })
        })
        .collect();

    category_breakdown.sort_by(|left, right| {
        right
            .amount
            .partial_cmp(&left.amount)
            .unwrap_or(Ordering::Equal)
    });

    let savings = total_income - total_expenses;
    let savings_rate = if total_income > 0.0 {
        round_to_cents(savings / total_income * 100.0)
    } else {
        0.0
    };

    Summary {
        total_income,
        total_expenses,
        savings,
        savings_rate,
        category_breakdown,
    }
}

/// Handler that returns the authenticated user's financial summary.
pub async fn get_summary_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Summary>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    let transactions = get_transactions_by_user(user.id, &connection)?;
    let categories = get_categories_by_user(user.id, &connection)?;

    Ok(Json(summarize(&transactions, &categories)))
}

#[cfg(test)]
mod summary_tests {
    use time::macros::date;

    use crate::{
        UserID,
        category::Category,
        transaction::{Transaction, TransactionType},
    };

    use super::summarize;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            icon: "shopping_cart".to_string(),
            color: "#00FF00".to_string(),
            user_id: UserID::new(1),
        }
    }

    fn transaction(
        amount: f64,
        transaction_type: TransactionType,
        category_id: Option<i64>,
    ) -> Transaction {
        Transaction {
            id: 0,
            amount,
            description: "".to_string(),
            date: date!(2024 - 03 - 01),
            transaction_type,
            category_id,
            user_id: UserID::new(1),
            is_bill: false,
        }
    }

    #[test]
    fn breakdown_splits_expenses_by_category() {
        let categories = vec![category(1, "Groceries"), category(2, "Transport")];
        let transactions = vec![
            transaction(1_000.0, TransactionType::Income, None),
            transaction(400.0, TransactionType::Expense, Some(1)),
            transaction(200.0, TransactionType::Expense, Some(2)),
        ];

        let summary = summarize(&transactions, &categories);

        assert_eq!(summary.total_income, 1_000.0);
        assert_eq!(summary.total_expenses, 600.0);
        assert_eq!(summary.savings, 400.0);
        assert_eq!(summary.savings_rate, 40.0);

        assert_eq!(summary.category_breakdown.len(), 2);
        assert_eq!(summary.category_breakdown[0].name, "Groceries");
        assert_eq!(summary.category_breakdown[0].amount, 400.0);
        assert_eq!(summary.category_breakdown[0].percentage, 66.67);
        assert_eq!(summary.category_breakdown[1].name, "Transport");
        assert_eq!(summary.category_breakdown[1].percentage, 33.33);
    }

    #[test]
    fn breakdown_is_sorted_largest_first() {
        let categories = vec![category(1, "Small"), category(2, "Large")];
        let transactions = vec![
            transaction(10.0, TransactionType::Expense, Some(1)),
            transaction(90.0, TransactionType::Expense, Some(2)),
        ];

        let summary = summarize(&transactions, &categories);

        assert_eq!(summary.category_breakdown[0].name, "Large");
        assert_eq!(summary.category_breakdown[1].name, "Small");
    }

    #[test]
    fn zero_income_gives_zero_savings_rate() {
        let summary = summarize(
            &[transaction(50.0, TransactionType::Expense, None)],
            &[],
        );

        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.savings, -50.0);
        assert_eq!(summary.savings_rate, 0.0);
    }

    #[test]
    fn empty_categories_are_left_out_of_the_breakdown() {
        let categories = vec![category(1, "Groceries"), category(2, "Unused")];
        let transactions = vec![transaction(25.0, TransactionType::Expense, Some(1))];

        let summary = summarize(&transactions, &categories);

        assert_eq!(summary.category_breakdown.len(), 1);
        assert_eq!(summary.category_breakdown[0].name, "Groceries");
        assert_eq!(summary.category_breakdown[0].percentage, 100.0);
    }

    #[test]
    fn uncategorised_spending_counts_towards_the_total() {
        let categories = vec![category(1, "Groceries")];
        let transactions = vec![
            transaction(75.0, TransactionType::Expense, Some(1)),
            transaction(25.0, TransactionType::Expense, None),
        ];

        let summary = summarize(&transactions, &categories);

        assert_eq!(summary.total_expenses, 100.0);
        assert_eq!(summary.category_breakdown[0].percentage, 75.0);
    }
}

#[cfg(test)]
mod summary_endpoint_tests {
    use serde_json::json;

    use crate::{
        analytics::Summary,
        category::Category,
        test_utils::{new_test_server, register_and_sign_in, sign_up_user},
    };

    #[tokio::test]
    async fn summary_only_covers_the_callers_data() {
        let server = new_test_server();
        let token = register_and_sign_in(&server).await;
        let other_token = sign_up_user(&server, "other@test.com", "hunter2").await;

        let category = server
            .post("/categories/")
            .authorization_bearer(&token)
            .json(&json!({ "name": "Groceries", "icon": "shopping_cart", "color": "#00FF00" }))
            .await
            .json::<Category>();

        for (amount, transaction_type, category_id) in [
            (1000.0, "income", None),
            (400.0, "expense", Some(category.id)),
        ] {
            server
                .post("/transactions/")
                .authorization_bearer(&token)
                .json(&json!({
                    "amount": amount,
                    "description": "test",
                    "date": "2024-03-01",
                    "type": transaction_type,
                    "category_id": category_id,
                }))
                .await
                .assert_status_ok();
        }

        // Another user's spending must not leak into the summary.
        server
            .post("/transactions/")
            .authorization_bearer(&other_token)
            .json(&json!({
                "amount": 9999.0,
                "description": "other",
                "date": "2024-03-01",
                "type": "expense",
            }))
            .await
            .assert_status_ok();

        let summary = server
            .get("/analytics/summary")
            .authorization_bearer(&token)
            .await
            .json::<Summary>();

        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expenses, 400.0);
        assert_eq!(summary.savings_rate, 60.0);
        assert_eq!(summary.category_breakdown.len(), 1);
        assert_eq!(summary.category_breakdown[0].percentage, 100.0);
    }
}
