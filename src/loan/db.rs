//! Database operations for loans.

use rusqlite::{Connection, Row};

use crate::{DatabaseID, Error, UserID};

use super::domain::{Loan, LoanData, LoanStatus};

const LOAN_COLUMNS: &str = "id, lender, amount, remaining_balance, due_date, interest_rate, \
    user_id, status, debt_type, term_months, min_payment";

/// Insert a loan owned by `user_id` and return it with its generated ID.
///
/// New loans are always stored as active regardless of what the client sent.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn create_loan(data: LoanData, user_id: UserID, connection: &Connection) -> Result<Loan, Error> {
    let status = LoanStatus::Active;

    connection.execute(
        "INSERT INTO loan (lender, amount, remaining_balance, due_date, interest_rate, user_id, \
        status, debt_type, term_months, min_payment)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        (
            &data.lender,
            data.amount,
            data.remaining_balance,
            data.due_date,
            data.interest_rate,
            user_id.as_i64(),
            status,
            data.debt_type,
            data.term_months,
            data.min_payment,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Loan {
        id,
        lender: data.lender,
        amount: data.amount,
        remaining_balance: data.remaining_balance,
        due_date: data.due_date,
        interest_rate: data.interest_rate,
        user_id,
        status,
        debt_type: data.debt_type,
        term_months: data.term_months,
        min_payment: data.min_payment,
    })
}

/// Retrieve all loans owned by `user_id` in storage order.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_loans_by_user(user_id: UserID, connection: &Connection) -> Result<Vec<Loan>, Error> {
    connection
        .prepare(&format!(
            "SELECT {LOAN_COLUMNS} FROM loan WHERE user_id = :user_id"
        ))?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_loan| maybe_loan.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the loan with `loan_id`, but only if `user_id` owns it.
///
/// # Errors
/// This function will return a [Error::NotFound] if the loan does not exist
/// or belongs to another user.
pub fn get_loan(
    loan_id: DatabaseID,
    user_id: UserID,
    connection: &Connection,
) -> Result<Loan, Error> {
    connection
        .prepare(&format!(
            "SELECT {LOAN_COLUMNS} FROM loan WHERE id = :id AND user_id = :user_id"
        ))?
        .query_row(
            rusqlite::named_params! {":id": loan_id, ":user_id": user_id.as_i64()},
            map_row,
        )
        .map_err(|error| error.into())
}

/// Delete the loan with `loan_id`, but only if `user_id` owns it.
///
/// # Errors
/// This function will return a [Error::NotFound] if the loan does not exist
/// or belongs to another user.
pub fn delete_loan(
    loan_id: DatabaseID,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM loan WHERE id = ?1 AND user_id = ?2",
        (loan_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Set the remaining balance and status of the loan with `loan_id`, but only
/// if `user_id` owns it.
///
/// # Errors
/// This function will return a [Error::NotFound] if the loan does not exist
/// or belongs to another user.
pub(crate) fn update_loan_balance(
    loan_id: DatabaseID,
    user_id: UserID,
    remaining_balance: f64,
    status: LoanStatus,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE loan SET remaining_balance = ?1, status = ?2 WHERE id = ?3 AND user_id = ?4",
        (remaining_balance, status, loan_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Loan, rusqlite::Error> {
    Ok(Loan {
        id: row.get(0)?,
        lender: row.get(1)?,
        amount: row.get(2)?,
        remaining_balance: row.get(3)?,
        due_date: row.get(4)?,
        interest_rate: row.get(5)?,
        user_id: UserID::new(row.get(6)?),
        status: row.get(7)?,
        debt_type: row.get(8)?,
        term_months: row.get(9)?,
        min_payment: row.get(10)?,
    })
}
