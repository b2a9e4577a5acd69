//! Database operations for transactions.

use rusqlite::{Connection, Row};

use crate::{Error, UserID};

use super::domain::{Transaction, TransactionData};

/// Insert a transaction owned by `user_id` and return it with its generated
/// ID.
///
/// # Errors
/// This function will return an error if `category_id` does not refer to a
/// valid category or if there is some other SQL error.
pub fn create_transaction(
    data: TransactionData,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (amount, description, date, type, category_id, user_id, is_bill)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        (
            data.amount,
            &data.description,
            data.date,
            data.transaction_type,
            data.category_id,
            user_id.as_i64(),
            data.is_bill,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        amount: data.amount,
        description: data.description,
        date: data.date,
        transaction_type: data.transaction_type,
        category_id: data.category_id,
        user_id,
        is_bill: data.is_bill,
    })
}

/// Retrieve all transactions owned by `user_id` in storage order.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_transactions_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, description, date, type, category_id, user_id, is_bill
            FROM \"transaction\" WHERE user_id = :user_id",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        date: row.get(3)?,
        transaction_type: row.get(4)?,
        category_id: row.get(5)?,
        user_id: UserID::new(row.get(6)?),
        is_bill: row.get(7)?,
    })
}

#[cfg(test)]
mod transaction_query_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{PasswordHash, UserID, db::initialize, user::create_user};

    use super::{
        super::domain::{TransactionData, TransactionType},
        create_transaction, get_transactions_by_user,
    };

    fn get_test_connection_with_users() -> (Connection, UserID, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let first = create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("hash"),
            None,
            &connection,
        )
        .unwrap();
        let second = create_user(
            "baz@bar.foo",
            PasswordHash::new_unchecked("hash"),
            None,
            &connection,
        )
        .unwrap();

        (connection, first.id, second.id)
    }

    fn expense(amount: f64) -> TransactionData {
        TransactionData {
            amount,
            description: "A thingymajig".to_string(),
            date: date!(2024 - 03 - 01),
            transaction_type: TransactionType::Expense,
            category_id: None,
            is_bill: false,
        }
    }

    #[test]
    fn create_then_list_round_trips() {
        let (connection, user_id, _) = get_test_connection_with_users();

        let inserted = create_transaction(expense(12.5), user_id, &connection).unwrap();
        let transactions = get_transactions_by_user(user_id, &connection).unwrap();

        assert_eq!(transactions, vec![inserted]);
        assert_eq!(transactions[0].date, date!(2024 - 03 - 01));
        assert_eq!(transactions[0].transaction_type, TransactionType::Expense);
    }

    #[test]
    fn list_is_scoped_to_the_owner() {
        let (connection, first_user, second_user) = get_test_connection_with_users();

        create_transaction(expense(10.0), second_user, &connection).unwrap();

        assert_eq!(
            get_transactions_by_user(first_user, &connection).unwrap(),
            vec![]
        );
    }
}
