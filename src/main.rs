use axum::{http::HeaderValue, response::Json, routing::get, Router};
use dotenv::dotenv;
use serde_json::{json, Value};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod db;
mod errors;
mod routes;
mod services;
mod utils;

use db::{init_db, run_migrations};
use services::{llm::LlmService, mailer::Mailer};
use utils::config::AppState;

const FRONTEND_ORIGIN: &str = "http://localhost:5173";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenv().ok();

    // Setup tracing/logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting chat backend...");

    // The grounding context is mandatory - refuse to serve without it.
    let knowledge = utils::knowledge::load_context()?;
    tracing::info!("✅ Loaded knowledge context ({} bytes)", knowledge.len());

    // No insecure default here: the admin secret must be configured.
    let admin_secret = std::env::var("ADMIN_SECRET")
        .map_err(|_| anyhow::anyhow!("ADMIN_SECRET must be set in .env"))?;

    tracing::info!("Connecting to database...");
    let pool = init_db().await?;
    tracing::info!("✅ Database connected successfully");

    run_migrations(&pool).await?;

    let llm = LlmService::new()?;
    let mailer = Mailer::from_env();

    // Shared application state
    let app_state = AppState {
        db: Arc::new(pool),
        knowledge: Arc::new(knowledge),
        llm: Arc::new(llm),
        mailer: Arc::new(mailer),
        admin_secret: Arc::new(admin_secret),
    };

    // Health check handler
    async fn health_handler() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "message": "Chat backend is running",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    let cors = CorsLayer::new()
        .allow_origin(FRONTEND_ORIGIN.parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);

    // Define routes
    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(routes::chat::create_chat_router())
        .merge(routes::admin::create_admin_router())
        .merge(routes::feedback::create_feedback_router())
        .layer(cors)
        .with_state(app_state);

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("🌐 Server running on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
