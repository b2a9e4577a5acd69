//! Spending categories for transactions.

mod db;
mod domain;
mod endpoints;

pub use db::{create_category, delete_category, get_categories_by_user, get_category_by_name};
pub use domain::{Category, NewCategory};
pub use endpoints::{create_category_endpoint, delete_category_endpoint, get_categories_endpoint};
