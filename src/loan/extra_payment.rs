//! The extra-payment workflow: pay down a loan and record the payment as an
//! expense transaction in one step.

use axum::{
    Json,
    extract::{Path, State},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, DatabaseID, Error, UserID,
    auth::AuthenticatedUser,
    category::{Category, NewCategory, create_category, get_category_by_name},
    transaction::{TransactionData, TransactionType, create_transaction},
};

use super::{
    db::{get_loan, update_loan_balance},
    domain::{Loan, LoanStatus},
};

/// The category that extra payments are filed under, created on demand for
/// each user.
const PAYMENT_CATEGORY_NAME: &str = "Debt Payment";
const PAYMENT_CATEGORY_ICON: &str = "payments";
const PAYMENT_CATEGORY_COLOR: &str = "#D4AF37";

/// The body of an extra-payment request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtraPaymentRequest {
    /// The amount to pay. Must be strictly positive.
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Apply an extra payment of `amount` to the loan with `loan_id`.
///
/// The loan's remaining balance is reduced by `amount`, clamped at zero. A
/// loan whose balance reaches exactly zero is marked paid. An expense
/// transaction for the full payment amount is recorded under the user's
/// "Debt Payment" category, which is created if it does not exist yet. The
/// balance update and the transaction insert happen atomically.
///
/// The loan is resolved before the amount is inspected, so a request that
/// is wrong on both counts fails with not-found.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the loan does not exist or belongs to another user,
/// - [Error::InvalidAmount] if `amount` is missing or not strictly positive,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn apply_extra_payment(
    loan_id: DatabaseID,
    amount: Option<f64>,
    user_id: UserID,
    connection: &mut Connection,
) -> Result<Loan, Error> {
    let loan = get_loan(loan_id, user_id, connection)?;

    let amount = match amount {
        Some(amount) if amount > 0.0 => amount,
        _ => return Err(Error::InvalidAmount),
    };

    let remaining_balance = (loan.remaining_balance - amount).max(0.0);
    let status = if remaining_balance == 0.0 {
        LoanStatus::Paid
    } else {
        loan.status
    };

    let category = ensure_payment_category(user_id, connection)?;

    let sql_transaction = connection.transaction()?;
    update_loan_balance(loan_id, user_id, remaining_balance, status, &sql_transaction)?;
    create_transaction(
        TransactionData {
            amount,
            description: format!("Extra payment to {}", loan.lender),
            date: OffsetDateTime::now_utc().date(),
            transaction_type: TransactionType::Expense,
            category_id: Some(category.id),
            is_bill: false,
        },
        user_id,
        &sql_transaction,
    )?;
    sql_transaction.commit()?;

    Ok(Loan {
        remaining_balance,
        status,
        ..loan
    })
}

fn ensure_payment_category(
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    match get_category_by_name(PAYMENT_CATEGORY_NAME, user_id, connection) {
        Err(Error::NotFound) => create_category(
            NewCategory {
                name: PAYMENT_CATEGORY_NAME.to_string(),
                icon: PAYMENT_CATEGORY_ICON.to_string(),
                color: PAYMENT_CATEGORY_COLOR.to_string(),
            },
            user_id,
            connection,
        ),
        result => result,
    }
}

/// Handler that applies an extra payment to one of the authenticated user's
/// loans and returns the updated loan.
pub async fn extra_payment_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(loan_id): Path<DatabaseID>,
    Json(request): Json<ExtraPaymentRequest>,
) -> Result<Json<Loan>, Error> {
    let mut connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    apply_extra_payment(loan_id, request.amount, user.id, &mut connection).map(Json)
}
