//! Wine Discovery Platform - Backend Server
//!
//! Stateless HTTP front for the pairing, taste quiz and menu reconciliation
//! engines. Callers send the wine lists; nothing is persisted here.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use error::AppResult;
use services::{MatchingService, MenuService, QuizService};
use shared::QuizCatalog;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub matching: MatchingService,
    pub quiz: QuizService,
    pub menu: MenuService,
}

impl AppState {
    /// Build the engines once from configuration. A bad quiz table or
    /// compared field surfaces as a configuration error.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let catalog = QuizCatalog::standard()?;
        let reconcile_config = config.reconcile_config()?;

        Ok(Self {
            matching: MatchingService::new(
                config.matching_config(),
                config.matching.max_catalog_size as usize,
            ),
            quiz: QuizService::new(Arc::new(catalog), config.quiz_price_range()),
            menu: MenuService::new(
                reconcile_config,
                Arc::new(config.flavor_vocabulary()),
                config.menu.max_wines as usize,
            ),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sommelier_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Wine Discovery Server");
    tracing::info!("Environment: {}", config.environment);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::from_config(config)?;
    tracing::info!(
        "Loaded {} quiz profiles and {} questions",
        state.quiz.profiles().len(),
        state.quiz.questions().len()
    );

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Wine Discovery Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
