//! Schema creation and versioned migrations for the application's SQLite
//! database, plus shared helpers for SQL-adjacent parsing.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The ordered list of schema migrations.
///
/// `PRAGMA user_version` records how many entries have been applied, so
/// entries must only ever be appended, never edited or reordered.
const MIGRATIONS: &[&str] = &[
    // v1: the base schema.
    "CREATE TABLE user (
        id INTEGER PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        full_name TEXT
    );

    CREATE TABLE category (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        icon TEXT NOT NULL,
        color TEXT NOT NULL,
        user_id INTEGER NOT NULL,
        FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
    );

    CREATE TABLE \"transaction\" (
        id INTEGER PRIMARY KEY,
        amount REAL NOT NULL,
        description TEXT NOT NULL,
        date TEXT NOT NULL,
        type TEXT NOT NULL,
        category_id INTEGER,
        user_id INTEGER NOT NULL,
        is_bill INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL,
        FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
    );

    CREATE TABLE bill (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        amount REAL NOT NULL,
        due_date TEXT NOT NULL,
        category_id INTEGER,
        user_id INTEGER NOT NULL,
        is_paid INTEGER NOT NULL DEFAULT 0,
        frequency TEXT NOT NULL DEFAULT 'monthly',
        FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL,
        FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
    );

    CREATE TABLE loan (
        id INTEGER PRIMARY KEY,
        lender TEXT NOT NULL,
        amount REAL NOT NULL,
        remaining_balance REAL NOT NULL,
        due_date TEXT NOT NULL,
        interest_rate REAL NOT NULL DEFAULT 0.0,
        user_id INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'active',
        FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
    );

    CREATE INDEX idx_transaction_user ON \"transaction\"(user_id);
    CREATE INDEX idx_category_user ON category(user_id);",
    // v2: debt tracking fields on the loan table. Existing rows keep working
    // with the defaults.
    "ALTER TABLE loan ADD COLUMN debt_type TEXT NOT NULL DEFAULT 'loan';
    ALTER TABLE loan ADD COLUMN term_months INTEGER;
    ALTER TABLE loan ADD COLUMN min_payment REAL NOT NULL DEFAULT 0.0;",
];

/// Initialize the database, applying any schema migrations that have not run
/// yet.
///
/// Migrations are applied in a single exclusive transaction: either the
/// database ends up at the latest schema version or it is left untouched.
///
/// # Errors
/// Returns an error if a migration fails or if there is some other SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    let version: i64 = transaction.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    for (migration_number, migration) in MIGRATIONS.iter().enumerate().skip(version as usize) {
        tracing::debug!("applying schema migration {}", migration_number + 1);
        transaction.execute_batch(migration)?;
    }

    transaction.pragma_update(None, "user_version", MIGRATIONS.len() as i64)?;
    transaction.commit()?;

    Ok(())
}

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse an ISO-8601 calendar date (e.g. "2024-03-01") submitted as text.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid date.
pub(crate) fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_string()))
}
