//! Recurring bills and the pay action.

mod db;
mod domain;
mod endpoints;

pub use db::{create_bill, get_bills_by_user, pay_bill};
pub use domain::{Bill, BillData, Frequency, NewBill};
pub use endpoints::{create_bill_endpoint, get_bills_endpoint, pay_bill_endpoint};
