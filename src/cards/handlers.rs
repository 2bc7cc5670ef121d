use super::models::CardPayload;
use super::services::CardsService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Envelope};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /cards - Get all cards
pub async fn get_cards(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
) -> Result<Envelope, ApiError> {
    let app_state = state.read().await;
    let cards_service = CardsService::new(app_state.db.clone());

    let cards = cards_service.get_all_cards().await?;

    Ok(Envelope::success(StatusCode::OK, "Cards fetched successfully").field("cards", cards))
}

/// POST /cards - Create a new card
pub async fn create_card(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Json(payload): Json<CardPayload>,
) -> Result<Envelope, ApiError> {
    let app_state = state.read().await;
    let cards_service = CardsService::new(app_state.db.clone());

    let card = cards_service.create_card(payload).await?;

    Ok(Envelope::success(StatusCode::CREATED, "Card created successfully").field("card", card))
}

/// GET /cards/:id - Get card by ID
pub async fn get_card_by_id(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Path(card_id): Path<i64>,
) -> Result<Envelope, ApiError> {
    let app_state = state.read().await;
    let cards_service = CardsService::new(app_state.db.clone());

    let card = cards_service.get_card_by_id(card_id).await?;

    Ok(Envelope::success(StatusCode::OK, "Card fetched successfully").field("card", card))
}

/// PUT /cards/:id - Update card
pub async fn update_card(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Path(card_id): Path<i64>,
    Json(payload): Json<CardPayload>,
) -> Result<Envelope, ApiError> {
    let app_state = state.read().await;
    let cards_service = CardsService::new(app_state.db.clone());

    let card = cards_service.update_card(card_id, payload).await?;

    Ok(Envelope::success(StatusCode::OK, "Card updated successfully").field("card", card))
}
