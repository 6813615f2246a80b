use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    data_formats::{
        AddedVotesWrapper, ArticleWrapper, CommentWrapper, CommentsWrapper, CreateArticleRequest,
        CreateCommentRequest, CreateTopicRequest, EndpointsWrapper, TopicWrapper, TopicsWrapper,
        UserWrapper, UsersWrapper,
    },
    db_helpers::{
        delete_article_in_db, delete_comment_in_db, get_article_by_id_in_db,
        get_user_by_username_in_db, insert_article_in_db, insert_comment_in_db,
        insert_topic_in_db, list_articles_in_db, list_comments_by_article_in_db,
        list_topics_in_db, list_users_in_db, update_article_votes_in_db,
        update_comment_votes_in_db,
    },
    errors::RequestError,
    models::{Article, ArticlePreview},
    JsonResponse,
};

type JsonResult<T> = Result<JsonResponse<T>, RequestError>;

const ENDPOINTS_JSON: &str = include_str!("../endpoints.json");

// Path parameters arrive as raw strings; a non-numeric id is the generic
// bad request, matching what the original got from the store's coercion
fn parse_id(raw: &str) -> Result<i64, RequestError> {
    raw.parse::<i64>()
        .map_err(|_| RequestError::BadRequest("Bad Request"))
}

// ----------------- Meta Handlers -----------------

pub async fn get_api_endpoints() -> JsonResult<EndpointsWrapper> {
    let endpoints =
        serde_json::from_str::<Value>(ENDPOINTS_JSON).map_err(|_| RequestError::ServerError)?;
    Ok((StatusCode::OK, Json(EndpointsWrapper { endpoints })))
}

pub async fn endpoint_not_found() -> JsonResponse<Value> {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Endpoint not found" })),
    )
}

// ----------------- Topic Handlers -----------------

pub async fn get_topics(Extension(pool): Extension<Arc<SqlitePool>>) -> JsonResult<TopicsWrapper> {
    let topics = list_topics_in_db(&pool).await?;
    Ok((StatusCode::OK, Json(TopicsWrapper { topics })))
}

pub async fn post_topic(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<CreateTopicRequest>,
) -> JsonResult<TopicWrapper> {
    let topic = insert_topic_in_db(&pool, request).await?;
    Ok((StatusCode::CREATED, Json(TopicWrapper { topic })))
}

// ----------------- Article Handlers -----------------

pub async fn get_articles(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Query(params): Query<HashMap<String, String>>,
) -> JsonResult<ArticleWrapper<Vec<ArticlePreview>>> {
    let articles = list_articles_in_db(&pool, &params).await?;
    Ok((StatusCode::OK, Json(ArticleWrapper { article: articles })))
}

pub async fn get_article_by_id(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
) -> JsonResult<ArticleWrapper<Article>> {
    let article_id = parse_id(&article_id)?;
    let article = get_article_by_id_in_db(&pool, article_id).await?;
    Ok((StatusCode::OK, Json(ArticleWrapper { article })))
}

pub async fn post_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<CreateArticleRequest>,
) -> JsonResult<ArticleWrapper<Article>> {
    let article = insert_article_in_db(&pool, request).await?;
    Ok((StatusCode::CREATED, Json(ArticleWrapper { article })))
}

pub async fn patch_article_votes(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
    Json(body): Json<Value>,
) -> JsonResult<AddedVotesWrapper> {
    let article_id = parse_id(&article_id)?;
    let inc_votes = match body.get("inc_votes").and_then(Value::as_i64) {
        Some(inc_votes) => inc_votes,
        None => return Err(RequestError::BadRequest("Bad Request")),
    };
    let added_votes = update_article_votes_in_db(&pool, article_id, inc_votes).await?;
    Ok((StatusCode::OK, Json(AddedVotesWrapper { added_votes })))
}

pub async fn delete_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
) -> Result<StatusCode, RequestError> {
    let article_id = parse_id(&article_id)?;
    delete_article_in_db(&pool, article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- Comment Handlers -----------------

pub async fn get_comments_by_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> JsonResult<CommentsWrapper> {
    let article_id = parse_id(&article_id)?;
    let comments = list_comments_by_article_in_db(&pool, article_id, &params).await?;
    Ok((StatusCode::OK, Json(CommentsWrapper { comments })))
}

pub async fn post_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> JsonResult<CommentWrapper> {
    let article_id = parse_id(&article_id)?;
    let comment = insert_comment_in_db(&pool, article_id, request).await?;
    Ok((StatusCode::CREATED, Json(CommentWrapper { comment })))
}

pub async fn patch_comment_votes(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(comment_id): Path<String>,
    Json(body): Json<Value>,
) -> JsonResult<CommentWrapper> {
    let comment_id = parse_id(&comment_id)?;
    let inc_votes = match body.get("inc_votes") {
        None | Some(Value::Null) => return Err(RequestError::BadRequest("inc_votes is required")),
        Some(value) => value
            .as_i64()
            .ok_or(RequestError::BadRequest("inc_votes must be a number"))?,
    };
    let comment = update_comment_votes_in_db(&pool, comment_id, inc_votes).await?;
    Ok((StatusCode::OK, Json(CommentWrapper { comment })))
}

pub async fn delete_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, RequestError> {
    let comment_id = parse_id(&comment_id)?;
    delete_comment_in_db(&pool, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- User Handlers -----------------

pub async fn get_users(Extension(pool): Extension<Arc<SqlitePool>>) -> JsonResult<UsersWrapper> {
    let users = list_users_in_db(&pool).await?;
    Ok((StatusCode::OK, Json(UsersWrapper { users })))
}

pub async fn get_user_by_username(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(username): Path<String>,
) -> JsonResult<UserWrapper> {
    let user = get_user_by_username_in_db(&pool, &username).await?;
    Ok((StatusCode::OK, Json(UserWrapper { user })))
}
