//! Domain types for spending categories.

use serde::{Deserialize, Serialize};

use crate::{DatabaseID, UserID};

/// A category for expenses and income, e.g. 'Groceries', 'Eating Out',
/// 'Wages'.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: DatabaseID,
    /// The display name of the category.
    pub name: String,
    /// The icon token the client renders for this category.
    pub icon: String,
    /// The color token the client renders for this category.
    pub color: String,
    /// The user who owns this category.
    pub user_id: UserID,
}

/// The JSON body for creating a category.
///
/// The record's ID and owner are assigned server-side; any `id` or `user_id`
/// the client sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    /// The display name of the category.
    pub name: String,
    /// The icon token the client renders for this category.
    pub icon: String,
    /// The color token the client renders for this category.
    pub color: String,
}
