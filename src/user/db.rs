//! Database operations for user accounts.

use rusqlite::Connection;

use crate::{Error, PasswordHash};

use super::domain::{User, UserID};

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns [Error::DuplicateEmail] if `email` is already registered, or
/// [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(
    email: &str,
    password_hash: PasswordHash,
    full_name: Option<&str>,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (email, password_hash, full_name) VALUES (?1, ?2, ?3)",
        (email, password_hash.as_ref(), full_name),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        email: email.to_string(),
        password_hash,
        full_name: full_name.map(str::to_string),
    })
}

/// Get the user from the database with an email equal to `email`.
///
/// # Errors
///
/// This function will return an error if:
/// - `email` does not belong to a registered user,
/// - or there was an error trying to access the database.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, email, password_hash, full_name FROM user WHERE email = :email")?
        .query_row(&[(":email", email)], |row| {
            let raw_id = row.get(0)?;
            let email: String = row.get(1)?;
            let raw_password_hash: String = row.get(2)?;
            let full_name: Option<String> = row.get(3)?;

            Ok(User {
                id: UserID::new(raw_id),
                email,
                password_hash: PasswordHash::new_unchecked(&raw_password_hash),
                full_name,
            })
        })
        .map_err(|error| error.into())
}

#[cfg(test)]
mod user_query_tests {
    use rusqlite::Connection;

    use crate::{Error, PasswordHash, db::initialize};

    use super::{create_user, get_user_by_email};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    #[test]
    fn create_then_select_round_trips() {
        let connection = get_test_connection();
        let password_hash = PasswordHash::new_unchecked("hash");

        let inserted = create_user(
            "foo@bar.baz",
            password_hash,
            Some("Foo Bar"),
            &connection,
        )
        .unwrap();
        let selected = get_user_by_email("foo@bar.baz", &connection).unwrap();

        assert_eq!(inserted, selected);
        assert_eq!(selected.full_name.as_deref(), Some("Foo Bar"));
    }

    #[test]
    fn create_fails_on_duplicate_email() {
        let connection = get_test_connection();

        create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("hash"),
            None,
            &connection,
        )
        .unwrap();
        let result = create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("another hash"),
            None,
            &connection,
        );

        assert_eq!(result, Err(Error::DuplicateEmail));
    }

    #[test]
    fn select_missing_user_returns_not_found() {
        let connection = get_test_connection();

        let result = get_user_by_email("nobody@nowhere.com", &connection);

        assert_eq!(result, Err(Error::NotFound));
    }
}
