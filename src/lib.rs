pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod state;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the full application router over the given state.
///
/// Monument creation is public; the favorites routes sit behind the JWT
/// middleware, which injects an [`middleware::AuthUser`] extension.
pub fn app(state: AppState) -> Router {
    use axum::routing::post;

    let favorites = Router::new()
        .route(
            "/api/favorites/:monument_id",
            post(handlers::favorites::add_favorite).delete(handlers::favorites::remove_favorite),
        )
        .route("/api/favorites", get(handlers::favorites::list_favorites))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::jwt_auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/monuments", post(handlers::monuments::create_monument))
        .merge(favorites)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
