pub mod auth;
pub mod error;
pub mod favorites;
pub mod health;
pub mod movies;
pub mod session;
pub mod stats;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::infrastructure::AppState;

/// Form endpoints for the session lifecycle plus the JSON API under `/api`
pub fn router(state: AppState) -> Router {
    Router::new()
        // Session lifecycle
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .nest("/api", api_router())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/me", get(auth::me))
        // Catalog
        .route("/movies/search", get(movies::search))
        .route("/movies/popular", get(movies::popular))
        .route("/movies/trending", get(movies::trending))
        .route("/movies/:id", get(movies::detail))
        // Favorites ledger
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route(
            "/favorites/:id",
            get(favorites::get_favorite).delete(favorites::delete_favorite),
        )
        .route("/favorites/:id/status", patch(favorites::update_status))
        .route("/favorites/:id/rating", patch(favorites::update_rating))
        .route("/favorites/:id/notes", patch(favorites::update_notes))
        .route("/stats", get(stats::get_stats))
}
