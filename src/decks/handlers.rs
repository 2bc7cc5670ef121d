use super::models::SaveDeckRequest;
use super::services::DecksService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Envelope};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /decks/:deck_id/players/:player_id - Fetch one deck as an expanded view
pub async fn get_deck(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Path((deck_id, player_id)): Path<(i64, i64)>,
) -> Result<Envelope, ApiError> {
    let app_state = state.read().await;
    let decks_service = DecksService::new(app_state.db.clone());

    let deck = decks_service.get_deck(player_id, deck_id).await?;

    Ok(Envelope::success(StatusCode::OK, "Deck fetched successfully").field("deck", deck))
}

/// POST /decks/players/:player_id - Create a deck for a player
pub async fn create_deck(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Path(player_id): Path<i64>,
    Json(request): Json<SaveDeckRequest>,
) -> Result<Envelope, ApiError> {
    let app_state = state.read().await;
    let decks_service = DecksService::new(app_state.db.clone());

    decks_service.create_deck(player_id, request).await?;

    Ok(Envelope::success(
        StatusCode::CREATED,
        "Deck created successfully",
    ))
}

/// PUT /decks/:deck_id/players/:player_id - Replace an existing deck
pub async fn update_deck(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Path((deck_id, player_id)): Path<(i64, i64)>,
    Json(request): Json<SaveDeckRequest>,
) -> Result<Envelope, ApiError> {
    let app_state = state.read().await;
    let decks_service = DecksService::new(app_state.db.clone());

    decks_service.update_deck(player_id, deck_id, request).await?;

    Ok(Envelope::success(StatusCode::OK, "Deck updated successfully"))
}
