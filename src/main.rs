use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing::info;

use storyhub::bootstrap::app_context::{AppContext, AppServices};
use storyhub::bootstrap::config::Config;
use storyhub::infrastructure::db;
use storyhub::infrastructure::db::repositories::session_repository_sqlx::SqlxSessionRepository;
use storyhub::infrastructure::db::repositories::story_repository_sqlx::SqlxStoryRepository;
use storyhub::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "storyhub=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting Storyhub");

    // Database
    let pool = db::connect_pool(&cfg.database_url, cfg.db_max_connections).await?;
    db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let story_repo = Arc::new(SqlxStoryRepository::new(pool.clone()));
    let session_repo = Arc::new(SqlxSessionRepository::new(pool.clone()));

    let services = AppServices::new(user_repo, story_repo, session_repo);
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .merge(storyhub::presentation::http::pages::routes(ctx.clone()))
        .merge(storyhub::presentation::http::auth::routes(ctx.clone()))
        .merge(storyhub::presentation::http::stories::routes(ctx.clone()))
        .merge(storyhub::presentation::http::health::routes(pool.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.http_port));
    info!(%addr, "HTTP listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
