use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::CreateCommentRequest;
use crate::errors::RequestError;
use crate::models::Comment;
use crate::validation::Pagination;

const COMMENTS_BY_ARTICLE_QUERY: &str = r#"
        SELECT comment_id,
               article_id,
               author,
               body,
               votes,
               created_at,
               COUNT(*) OVER () AS "total_count"
        FROM   comments
        WHERE  article_id = $1
        ORDER  BY created_at DESC
        LIMIT  $2 OFFSET $3
"#;

pub async fn list_comments_by_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
    params: &HashMap<String, String>,
) -> Result<Vec<Comment>, RequestError> {
    let pagination = Pagination::parse(
        params.get("limit").map(String::as_str),
        params.get("page").map(String::as_str),
    )?;

    let result = sqlx::query_as::<Sqlite, Comment>(COMMENTS_BY_ARTICLE_QUERY)
        .bind(article_id)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(pool)
        .await?;

    // An empty page is a 404, whether the article is missing or just has
    // no comments. Kept for client compatibility with the original API.
    if result.is_empty() {
        return Err(RequestError::NotFound("Not Found"));
    }
    Ok(result)
}

pub async fn insert_comment_in_db(
    pool: &SqlitePool,
    article_id: i64,
    CreateCommentRequest { username, body }: CreateCommentRequest,
) -> Result<Comment, RequestError> {
    let (Some(username), Some(body)) = (username, body) else {
        return Err(RequestError::BadRequest("Bad Request"));
    };

    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Comment>(
        r#"
        INSERT INTO comments (author, body, article_id)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(body)
    .bind(article_id)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;

    Ok(result)
}

pub async fn update_comment_votes_in_db(
    pool: &SqlitePool,
    comment_id: i64,
    inc_votes: i64,
) -> Result<Comment, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Comment>(
        r#"
        UPDATE comments
        SET votes = votes + $1
        WHERE comment_id = $2
        RETURNING *
        "#,
    )
    .bind(inc_votes)
    .bind(comment_id)
    .fetch_optional(&mut tx)
    .await?;
    tx.commit().await?;

    match result {
        Some(comment) => Ok(comment),
        None => Err(RequestError::NotFound("Comment Not Found")),
    }
}

pub async fn delete_comment_in_db(pool: &SqlitePool, comment_id: i64) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
        .bind(comment_id)
        .execute(&mut tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Comment not found"));
    }

    tx.commit().await?;
    Ok(())
}
