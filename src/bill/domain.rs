//! Domain types for bills.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{DatabaseID, Error, UserID, db::parse_date};

/// How often a bill recurs.
///
/// Informational only, there is no recurrence engine that re-creates bills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Due every month.
    #[default]
    Monthly,
    /// Due every week.
    Weekly,
    /// Due every year.
    Yearly,
}

impl Frequency {
    /// The lowercase text stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Weekly => "weekly",
            Frequency::Yearly => "yearly",
        }
    }

    fn from_str(text: &str) -> Option<Self> {
        match text {
            "monthly" => Some(Frequency::Monthly),
            "weekly" => Some(Frequency::Weekly),
            "yearly" => Some(Frequency::Yearly),
            _ => None,
        }
    }
}

impl ToSql for Frequency {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Frequency {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|text| Self::from_str(text).ok_or(FromSqlError::InvalidType))
    }
}

/// A bill the user expects to pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// The ID of the bill.
    pub id: DatabaseID,
    /// What the bill is for, e.g. 'Electricity'.
    pub name: String,
    /// The amount due.
    pub amount: f64,
    /// When the bill is due.
    pub due_date: Date,
    /// The category this bill belongs to, if any.
    pub category_id: Option<DatabaseID>,
    /// The user who owns this bill.
    pub user_id: UserID,
    /// Whether the bill has been paid. Transitions false to true only.
    pub is_paid: bool,
    /// How often the bill recurs.
    pub frequency: Frequency,
}

/// The JSON body for creating a bill.
///
/// The due date arrives as ISO-8601 text and is validated server-side. The
/// record's ID and owner are assigned server-side; any `id` or `user_id` the
/// client sends is ignored. New bills always start unpaid.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBill {
    /// What the bill is for.
    pub name: String,
    /// The amount due.
    pub amount: f64,
    /// When the bill is due, as an ISO-8601 date string.
    pub due_date: String,
    /// The category this bill belongs to, if any.
    #[serde(default)]
    pub category_id: Option<DatabaseID>,
    /// How often the bill recurs.
    #[serde(default)]
    pub frequency: Frequency,
}

impl NewBill {
    /// Validate the payload, parsing the due date text into a calendar date.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if the due date text cannot be parsed.
    pub fn parse(self) -> Result<BillData, Error> {
        Ok(BillData {
            name: self.name,
            amount: self.amount,
            due_date: parse_date(&self.due_date)?,
            category_id: self.category_id,
            frequency: self.frequency,
        })
    }
}

/// A validated bill that has not been inserted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct BillData {
    /// What the bill is for.
    pub name: String,
    /// The amount due.
    pub amount: f64,
    /// When the bill is due.
    pub due_date: Date,
    /// The category this bill belongs to, if any.
    pub category_id: Option<DatabaseID>,
    /// How often the bill recurs.
    pub frequency: Frequency,
}
