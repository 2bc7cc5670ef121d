use super::handlers;
use axum::{routing::get, Router};

/// Creates the cards router with all card CRUD routes
pub fn cards_routes() -> Router {
    Router::new()
        .route(
            "/cards",
            get(handlers::get_cards).post(handlers::create_card),
        )
        .route(
            "/cards/:id",
            get(handlers::get_card_by_id).put(handlers::update_card),
        )
}
