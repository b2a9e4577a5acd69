//! Loans, debt tracking, and the extra-payment workflow.

mod db;
mod domain;
mod endpoints;
mod extra_payment;

pub use db::{create_loan, delete_loan, get_loan, get_loans_by_user};
pub use domain::{DebtType, Loan, LoanData, LoanStatus, NewLoan};
pub use endpoints::{create_loan_endpoint, delete_loan_endpoint, get_loans_endpoint};
pub use extra_payment::{ExtraPaymentRequest, apply_extra_payment, extra_payment_endpoint};
