use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use roomkeeper_api::api::{self, AppState};
use roomkeeper_api::config::Config;
use roomkeeper_api::coordinator::RoomStore;
use roomkeeper_api::infrastructure::stores::{InMemoryRoomStore, PostgresRoomStore};
use roomkeeper_api::webhook::WebhookReceiver;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Select the room store backend
    let store: Arc<dyn RoomStore> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connected successfully");
            Arc::new(PostgresRoomStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory room store");
            Arc::new(InMemoryRoomStore::new())
        }
    };

    // Shutdown signal shared with every held-open wait
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let state = AppState {
        store,
        receiver: Arc::new(WebhookReceiver::new(
            config.api_key.clone(),
            config.api_secret.clone(),
        )),
        poll_interval: config.poll_interval,
        max_wait: config.max_wait,
        shutdown: shutdown_rx,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, cancelling open waits");
            let _ = shutdown_tx.send(true);
        })
        .await
        .expect("Server failed");
}
