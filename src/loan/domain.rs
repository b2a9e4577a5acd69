//! Domain types for loans.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{db::parse_date, DatabaseID, Error, UserID};

/// Whether a loan is still being paid down or has been settled in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// The loan still has an outstanding balance.
    Active,
    /// The remaining balance has reached zero.
    Paid,
}

impl LoanStatus {
    fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Paid => "paid",
        }
    }
}

impl ToSql for LoanStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for LoanStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "active" => Ok(LoanStatus::Active),
            "paid" => Ok(LoanStatus::Paid),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// The kind of debt a loan row represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtType {
    /// A regular instalment loan (personal, auto, mortgage).
    #[default]
    Loan,
    /// Revolving credit card debt.
    Card,
}

impl DebtType {
    fn as_str(&self) -> &'static str {
        match self {
            DebtType::Loan => "loan",
            DebtType::Card => "card",
        }
    }
}

impl ToSql for DebtType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for DebtType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "loan" => Ok(DebtType::Loan),
            "card" => Ok(DebtType::Card),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// A debt owed by a user, tracked down to zero via payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// The ID of the loan.
    pub id: DatabaseID,
    /// Who the money is owed to.
    pub lender: String,
    /// The original principal.
    pub amount: f64,
    /// How much is still owed.
    pub remaining_balance: f64,
    /// When the next payment is due.
    pub due_date: Date,
    /// Annual interest rate as a percentage.
    pub interest_rate: f64,
    /// The ID of the user that owes the loan.
    pub user_id: UserID,
    /// Whether the loan is active or fully paid.
    pub status: LoanStatus,
    /// The kind of debt.
    pub debt_type: DebtType,
    /// Loan term in months, if fixed.
    pub term_months: Option<i64>,
    /// The minimum payment per period.
    pub min_payment: f64,
}

/// The client's description of a loan to create.
///
/// `due_date` is taken as a string so that a malformed date surfaces as a
/// [crate::Error::InvalidDate] rather than a serde rejection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewLoan {
    /// Who the money is owed to.
    pub lender: String,
    /// The original principal.
    pub amount: f64,
    /// How much is still owed. Defaults to `amount` when omitted.
    #[serde(default)]
    pub remaining_balance: Option<f64>,
    /// When the next payment is due, in ISO-8601 format (e.g. "2024-03-01").
    pub due_date: String,
    /// Annual interest rate as a percentage.
    #[serde(default)]
    pub interest_rate: f64,
    /// The kind of debt. Defaults to a regular loan.
    #[serde(default)]
    pub debt_type: DebtType,
    /// Loan term in months, if fixed.
    #[serde(default)]
    pub term_months: Option<i64>,
    /// The minimum payment per period.
    #[serde(default)]
    pub min_payment: f64,
}

impl NewLoan {
    /// Validate the due date and resolve defaults.
    pub fn parse(self) -> Result<LoanData, Error> {
        let due_date = parse_date(&self.due_date)?;

        Ok(LoanData {
            lender: self.lender,
            amount: self.amount,
            remaining_balance: self.remaining_balance.unwrap_or(self.amount),
            due_date,
            interest_rate: self.interest_rate,
            debt_type: self.debt_type,
            term_months: self.term_months,
            min_payment: self.min_payment,
        })
    }
}

/// A validated loan ready to be inserted into the database.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanData {
    /// Who the money is owed to.
    pub lender: String,
    /// The original principal.
    pub amount: f64,
    /// How much is still owed.
    pub remaining_balance: f64,
    /// When the next payment is due.
    pub due_date: Date,
    /// Annual interest rate as a percentage.
    pub interest_rate: f64,
    /// The kind of debt.
    pub debt_type: DebtType,
    /// Loan term in months, if fixed.
    pub term_months: Option<i64>,
    /// The minimum payment per period.
    pub min_payment: f64,
}
