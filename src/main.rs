//! Moderation Dashboard Backend
//!
//! A small web dashboard for community moderators: topic and strike tables
//! behind Discord OAuth, with bar-chart report views.

mod auth;
mod charts;
mod config;
mod db;
mod discord;
mod errors;
mod models;
mod routes;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::SessionStore;
use config::Config;
use db::Repository;
use discord::DiscordClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub sessions: Arc<SessionStore>,
    pub discord: Arc<DiscordClient>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Moderation Dashboard Backend");
    tracing::info!("Database: {}@{}/{}", config.db_user, config.db_host, config.db_name);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the OAuth application is not configured
    if config.client_id.is_empty() || config.client_secret.is_empty() {
        tracing::warn!(
            "Discord OAuth credentials not configured (MODBOARD_CLIENT_ID / MODBOARD_CLIENT_SECRET). Logins will fail!"
        );
    }
    if config.bot_token.is_empty() {
        tracing::warn!("No bot token configured (MODBOARD_BOT_TOKEN). Welcome DMs will fail.");
    }

    // Initialize database
    let pool = db::init_database(&config.database_url()).await?;
    let repo = Arc::new(Repository::new(pool));

    // Session store and identity provider client
    let sessions = Arc::new(SessionStore::new());
    let discord = Arc::new(DiscordClient::new(&config));

    // Create application state
    let state = AppState {
        repo,
        sessions,
        discord,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Routes that require an administrator session
    let admin_routes = Router::new()
        .route(
            "/addTopic/",
            get(routes::add_topic_form).post(routes::add_topic_submit),
        )
        .route(
            "/deleteTopic/",
            get(routes::delete_topic_form).post(routes::delete_topic_submit),
        )
        .route("/displayTopics/", get(routes::display_topics))
        .route("/displayStrikes/", get(routes::display_strikes))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/", get(routes::index))
        .route("/login/", get(routes::login))
        .route("/callback/", get(routes::callback))
        .route("/logout/", get(routes::logout))
        .merge(admin_routes)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
