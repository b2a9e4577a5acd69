//! Database operations for bills.

use rusqlite::{Connection, Row};

use crate::{DatabaseID, Error, UserID};

use super::domain::{Bill, BillData};

/// Insert a bill owned by `user_id` and return it with its generated ID.
///
/// New bills always start unpaid.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn create_bill(
    data: BillData,
    user_id: UserID,
    connection: &Connection,
) -> Result<Bill, Error> {
    connection.execute(
        "INSERT INTO bill (name, amount, due_date, category_id, user_id, is_paid, frequency)
        VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
        (
            &data.name,
            data.amount,
            data.due_date,
            data.category_id,
            user_id.as_i64(),
            data.frequency,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Bill {
        id,
        name: data.name,
        amount: data.amount,
        due_date: data.due_date,
        category_id: data.category_id,
        user_id,
        is_paid: false,
        frequency: data.frequency,
    })
}

/// Retrieve all bills owned by `user_id` in storage order.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_bills_by_user(user_id: UserID, connection: &Connection) -> Result<Vec<Bill>, Error> {
    connection
        .prepare(
            "SELECT id, name, amount, due_date, category_id, user_id, is_paid, frequency
            FROM bill WHERE user_id = :user_id",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_bill| maybe_bill.map_err(|error| error.into()))
        .collect()
}

/// Mark the bill with `bill_id` as paid if it is owned by `user_id`.
///
/// Paying an already paid bill is a no-op success; the paid flag only ever
/// transitions from false to true.
///
/// # Errors
/// Returns [Error::NotFound] if the bill does not exist or belongs to a
/// different user. The two cases are deliberately indistinguishable.
pub fn pay_bill(
    bill_id: DatabaseID,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE bill SET is_paid = 1 WHERE id = ?1 AND user_id = ?2",
        (bill_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Bill, rusqlite::Error> {
    Ok(Bill {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: row.get(2)?,
        due_date: row.get(3)?,
        category_id: row.get(4)?,
        user_id: UserID::new(row.get(5)?),
        is_paid: row.get(6)?,
        frequency: row.get(7)?,
    })
}
