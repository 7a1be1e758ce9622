use std::sync::Arc;

use monuments_api::config;
use monuments_api::database::{self, PgStore};
use monuments_api::notify::BroadcastPublisher;
use monuments_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting monuments API in {:?} mode", config.environment);

    let pool = database::connect(config.database.max_connections)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    sqlx::migrate!()
        .run(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to run migrations: {}", e));

    let publisher = BroadcastPublisher::new(64);
    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        Some(Arc::new(publisher)),
        config.security.jwt_secret.clone(),
    );

    let app = monuments_api::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("monuments API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
