use sqlx::{Sqlite, SqlitePool};

use crate::{data_formats::CreateTopicRequest, errors::RequestError, models::Topic};

pub async fn list_topics_in_db(pool: &SqlitePool) -> Result<Vec<Topic>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Topic>("SELECT slug, description FROM topics")
        .fetch_all(pool)
        .await?;
    Ok(result)
}

// The live topic whitelist handed to the validation layer
pub async fn get_topic_slugs(pool: &SqlitePool) -> Result<Vec<String>, RequestError> {
    let result = sqlx::query_scalar::<Sqlite, String>("SELECT slug FROM topics")
        .fetch_all(pool)
        .await?;
    Ok(result)
}

pub async fn insert_topic_in_db(
    pool: &SqlitePool,
    CreateTopicRequest { slug, description }: CreateTopicRequest,
) -> Result<Topic, RequestError> {
    let (Some(slug), Some(description)) = (slug, description) else {
        return Err(RequestError::BadRequest("Bad Request"));
    };

    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Topic>(
        r#"
        INSERT INTO topics (slug, description)
        VALUES ($1, $2)
        RETURNING slug, description
        "#,
    )
    .bind(slug)
    .bind(description)
    .fetch_one(&mut tx)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_error) = &e {
            if db_error.message().contains("UNIQUE constraint failed") {
                return RequestError::Conflict("Conflict - Topic with this slug already exists");
            }
        }
        RequestError::DatabaseError(e)
    })?;
    tx.commit().await?;
    Ok(result)
}
