use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Article {
    pub article_id: i64,
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub created_at: NaiveDateTime,
    pub votes: i64,
    pub article_img_url: String,
    // Only present on reads that go through the aggregate query
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i64>,
}

// List rows leave out the body and carry the pagination total alongside
// the per-article comment count
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ArticlePreview {
    pub article_id: i64,
    pub author: String,
    pub title: String,
    pub topic: String,
    pub created_at: NaiveDateTime,
    pub votes: i64,
    pub article_img_url: String,
    pub comment_count: i64,
    pub total_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Comment {
    pub comment_id: i64,
    pub article_id: i64,
    pub author: String,
    pub body: String,
    pub votes: i64,
    pub created_at: NaiveDateTime,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}
