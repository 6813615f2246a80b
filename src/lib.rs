mod data_formats;
mod db_helpers;
mod errors;
mod handlers;
mod models;
mod validation;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
use handlers::*;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::str::FromStr;
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(app: Router, pool: SqlitePool, address: SocketAddr) -> Result<()> {
    let app = app
        .layer(Extension(Arc::new(pool)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!("creating database {}", db_url);
        Sqlite::create_database(db_url)
            .await
            .context("Failed to create database")?;
    }
    // Foreign keys are off by default in SQLite; the referential errors and
    // the article -> comments cascade depend on them
    let options = SqliteConnectOptions::from_str(db_url)?.foreign_keys(true);
    let pool = SqlitePool::connect_with(options).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    Ok(pool)
}

pub fn get_random_free_port() -> (u16, SocketAddr) {
    let listener = TcpListener::bind("localhost:0").unwrap();
    match listener.local_addr() {
        Ok(addr) => (addr.port(), addr),
        Err(_) => panic!("Could not get a free port"),
    }
}

pub fn make_router() -> Router {
    Router::new()
        .route("/api", get(get_api_endpoints))
        .route("/api/topics", get(get_topics).post(post_topic))
        .route("/api/articles", get(get_articles).post(post_article))
        .route(
            "/api/articles/:article_id",
            get(get_article_by_id)
                .patch(patch_article_votes)
                .delete(delete_article),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(get_comments_by_article).post(post_comment),
        )
        .route(
            "/api/comments/:comment_id",
            patch(patch_comment_votes).delete(delete_comment),
        )
        .route("/api/users", get(get_users))
        .route("/api/users/:username", get(get_user_by_username))
        .fallback(endpoint_not_found)
}
