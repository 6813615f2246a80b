use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::CreateArticleRequest;
use crate::errors::RequestError;
use crate::models::{Article, ArticlePreview};
use crate::validation::ArticleQuery;

use super::get_topic_slugs;

pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

const SINGLE_ARTICLE_QUERY: &str = r#"
        SELECT articles.article_id,
               articles.author,
               articles.title,
               articles.body,
               articles.topic,
               articles.created_at,
               articles.votes,
               articles.article_img_url,
               (SELECT COUNT(*)
                FROM   comments
                WHERE  comments.article_id = articles.article_id) AS "comment_count"
        FROM   articles
        WHERE  articles.article_id = $1
"#;

// total_count is the size of the filtered set, taken before LIMIT/OFFSET
// and repeated on every row of the page
const ARTICLE_PREVIEW_QUERY: &str = r#"
        SELECT articles.article_id,
               articles.author,
               articles.title,
               articles.topic,
               articles.created_at,
               articles.votes,
               articles.article_img_url,
               (SELECT COUNT(*)
                FROM   comments
                WHERE  comments.article_id = articles.article_id) AS "comment_count",
               COUNT(*) OVER ()                                   AS "total_count"
        FROM   articles
        WHERE  ( articles.topic = $1
                  OR $1 IS NULL )
"#;

pub async fn list_articles_in_db(
    pool: &SqlitePool,
    params: &HashMap<String, String>,
) -> Result<Vec<ArticlePreview>, RequestError> {
    let topic_slugs = get_topic_slugs(pool).await?;
    let spec = ArticleQuery::parse(params, &topic_slugs)?;

    // Sort column and direction come from the whitelist enums, never from
    // the raw parameters
    let query = format!(
        "{ARTICLE_PREVIEW_QUERY} ORDER BY {} {} LIMIT $2 OFFSET $3",
        spec.sort.as_sql(),
        spec.order.as_sql()
    );

    let result = sqlx::query_as::<Sqlite, ArticlePreview>(&query)
        .bind(spec.topic)
        .bind(spec.pagination.limit)
        .bind(spec.pagination.offset())
        .fetch_all(pool)
        .await?;

    Ok(result)
}

pub async fn get_article_by_id_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Article, RequestError> {
    let result = sqlx::query_as::<Sqlite, Article>(SINGLE_ARTICLE_QUERY)
        .bind(article_id)
        .fetch_optional(pool)
        .await?;

    match result {
        Some(article) => Ok(article),
        None => Err(RequestError::NotFound("Not Found")),
    }
}

pub async fn insert_article_in_db(
    pool: &SqlitePool,
    CreateArticleRequest {
        author,
        title,
        body,
        topic,
        article_img_url,
    }: CreateArticleRequest,
) -> Result<Article, RequestError> {
    let (Some(author), Some(title), Some(body), Some(topic)) = (author, title, body, topic) else {
        return Err(RequestError::BadRequest("Bad Request"));
    };
    let article_img_url = article_img_url.unwrap_or_else(|| DEFAULT_ARTICLE_IMG_URL.to_owned());

    let mut tx = pool.begin().await?;
    let article_id = sqlx::query_scalar::<Sqlite, i64>(
        r#"
        INSERT INTO articles (author, title, body, topic, article_img_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING article_id
        "#,
    )
    .bind(author)
    .bind(title)
    .bind(body)
    .bind(topic)
    .bind(article_img_url)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;

    // Re-read through the aggregate query so the created article is shaped
    // exactly like any other single-article read
    get_article_by_id_in_db(pool, article_id).await
}

pub async fn update_article_votes_in_db(
    pool: &SqlitePool,
    article_id: i64,
    inc_votes: i64,
) -> Result<Article, RequestError> {
    let mut tx = pool.begin().await?;
    // The addition happens store-side in one statement so concurrent
    // increments cannot lose updates
    let result = sqlx::query_as::<Sqlite, Article>(
        r#"
        UPDATE articles
        SET votes = votes + $1
        WHERE article_id = $2
        RETURNING *
        "#,
    )
    .bind(inc_votes)
    .bind(article_id)
    .fetch_optional(&mut tx)
    .await?;
    tx.commit().await?;

    match result {
        Some(article) => Ok(article),
        None => Err(RequestError::NotFound("Article Not Found")),
    }
}

pub async fn delete_article_in_db(pool: &SqlitePool, article_id: i64) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    // Dependent comments go with the article via the FK cascade
    let result = sqlx::query("DELETE FROM articles WHERE article_id = $1")
        .bind(article_id)
        .execute(&mut tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Not Found"));
    }

    tx.commit().await?;
    Ok(())
}
