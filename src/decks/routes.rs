use super::handlers;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates the decks router with all deck composition routes
pub fn decks_routes() -> Router {
    Router::new()
        .route(
            "/decks/:deck_id/players/:player_id",
            get(handlers::get_deck).put(handlers::update_deck),
        )
        .route("/decks/players/:player_id", post(handlers::create_deck))
}
