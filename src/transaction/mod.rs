//! Income and expense transactions.

mod db;
mod domain;
mod endpoints;

pub use db::{create_transaction, get_transactions_by_user};
pub use domain::{NewTransaction, Transaction, TransactionData, TransactionType};
pub use endpoints::{create_transaction_endpoint, get_transactions_endpoint};
