//! Domain types for transactions.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{DatabaseID, Error, UserID, db::parse_date};

/// Whether a transaction adds to or subtracts from the user's funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The lowercase text stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    fn from_str(text: &str) -> Option<Self> {
        match text {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|text| Self::from_str(text).ok_or(FromSqlError::InvalidType))
    }
}

/// A single income or expense record.
///
/// The amount is a non-negative magnitude; its sign is implied by the
/// transaction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// The amount of money involved.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category this transaction belongs to, if any.
    pub category_id: Option<DatabaseID>,
    /// The user who owns this transaction.
    pub user_id: UserID,
    /// Whether this transaction was recorded for a bill.
    pub is_bill: bool,
}

/// The JSON body for creating a transaction.
///
/// The date arrives as ISO-8601 text and is validated server-side. The
/// record's ID and owner are assigned server-side; any `id` or `user_id` the
/// client sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    /// The amount of money involved.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened, as an ISO-8601 date string.
    pub date: String,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category this transaction belongs to, if any.
    #[serde(default)]
    pub category_id: Option<DatabaseID>,
    /// Whether this transaction was recorded for a bill.
    #[serde(default)]
    pub is_bill: bool,
}

impl NewTransaction {
    /// Validate the payload, parsing the date text into a calendar date.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if the date text cannot be parsed.
    pub fn parse(self) -> Result<TransactionData, Error> {
        Ok(TransactionData {
            amount: self.amount,
            description: self.description,
            date: parse_date(&self.date)?,
            transaction_type: self.transaction_type,
            category_id: self.category_id,
            is_bill: self.is_bill,
        })
    }
}

/// A validated transaction that has not been inserted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionData {
    /// The amount of money involved.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// Whether this is income or an expense.
    pub transaction_type: TransactionType,
    /// The category this transaction belongs to, if any.
    pub category_id: Option<DatabaseID>,
    /// Whether this transaction was recorded for a bill.
    pub is_bill: bool,
}

#[cfg(test)]
mod new_transaction_tests {
    use time::macros::date;

    use crate::Error;

    use super::{NewTransaction, TransactionType};

    fn new_transaction(date: &str) -> NewTransaction {
        NewTransaction {
            amount: 12.5,
            description: "A thingymajig".to_string(),
            date: date.to_string(),
            transaction_type: TransactionType::Expense,
            category_id: None,
            is_bill: false,
        }
    }

    #[test]
    fn parse_accepts_iso_8601_date() {
        let data = new_transaction("2024-03-01").parse().unwrap();

        assert_eq!(data.date, date!(2024 - 03 - 01));
    }

    #[test]
    fn parse_rejects_malformed_date() {
        let result = new_transaction("03/01/2024").parse();

        assert_eq!(result, Err(Error::InvalidDate("03/01/2024".to_string())));
    }
}
