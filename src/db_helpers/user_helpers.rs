use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::User};

pub async fn list_users_in_db(pool: &SqlitePool) -> Result<Vec<User>, RequestError> {
    let result = sqlx::query_as::<Sqlite, User>("SELECT username, name, avatar_url FROM users")
        .fetch_all(pool)
        .await?;
    Ok(result)
}

pub async fn get_user_by_username_in_db(
    pool: &SqlitePool,
    username: &str,
) -> Result<User, RequestError> {
    let result = sqlx::query_as::<Sqlite, User>(
        "SELECT username, name, avatar_url FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    match result {
        Some(user) => Ok(user),
        None => Err(RequestError::NotFound("User not found")),
    }
}
