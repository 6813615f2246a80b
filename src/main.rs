use std::net::SocketAddr;

use anyhow::Context;
use nc_news::{init_db, make_router, run_app};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
    let router = make_router();
    let result = async {
        let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let pool = init_db(&db_url).await?;
        tracing::info!("server started on {}", addr);
        run_app(router, pool, addr).await
    }
    .await;
    if let Err(error) = result {
        tracing::error!(%error, "server exited");
    }
}
