//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{DatabaseID, Error, UserID};

use super::domain::{Category, NewCategory};

/// Create a category owned by `user_id` and return it with its generated ID.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn create_category(
    new_category: NewCategory,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, icon, color, user_id) VALUES (?1, ?2, ?3, ?4)",
        (
            &new_category.name,
            &new_category.icon,
            &new_category.color,
            user_id.as_i64(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name: new_category.name,
        icon: new_category.icon,
        color: new_category.color,
        user_id,
    })
}

/// Retrieve all categories owned by `user_id`.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_categories_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, icon, color, user_id FROM category WHERE user_id = :user_id")?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the category owned by `user_id` with the given name.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the user has no category called `name`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_category_by_name(
    name: &str,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, name, icon, color, user_id FROM category
            WHERE name = :name AND user_id = :user_id",
        )?
        .query_row(
            rusqlite::named_params! {":name": name, ":user_id": user_id.as_i64()},
            map_row,
        )
        .map_err(|error| error.into())
}

/// Delete the category with `category_id` if it is owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist or belongs to a
/// different user. The two cases are deliberately indistinguishable.
pub fn delete_category(
    category_id: DatabaseID,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
        (category_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
        user_id: UserID::new(row.get(4)?),
    })
}
