use super::models::{Deck, DeckView, SaveDeckRequest};
use crate::cards::Card;
use crate::common::{ApiError, ValidationResult, Validator};
use sqlx::SqlitePool;
use tracing::info;

/// Maximum number of decks a single player may own
pub const MAX_DECKS_PER_PLAYER: i64 = 4;

pub struct DecksService {
    db: SqlitePool,
}

impl DecksService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get the deck owned by `player_id` with label `deck_id`, expanded into a
    /// view. Slot resolution is tolerant: a slot holding no reference, or a
    /// reference to a card that no longer exists, becomes an empty entry
    /// rather than failing the fetch.
    pub async fn get_deck(&self, player_id: i64, deck_id: i64) -> Result<DeckView, ApiError> {
        let deck = self
            .find_deck(player_id, deck_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Deck not found".to_string()))?;

        let mut cards = Vec::with_capacity(deck.slots().len());
        for slot in deck.slots() {
            let card = match slot {
                Some(card_id) => sqlx::query_as::<_, Card>(
                    "SELECT id, name, description, stroke, defense FROM cards WHERE id = ?",
                )
                .bind(card_id)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::DatabaseError)?,
                None => None,
            };
            cards.push(card);
        }

        Ok(DeckView {
            id: deck.id,
            user_id: deck.user_id,
            id_deck_player: deck.id_deck_player,
            cards,
            created_at: deck.created_at,
            updated_at: deck.updated_at,
        })
    }

    /// Create a deck for `player_id`. The four-deck cap is enforced by a
    /// conditional insert: the count check and the write happen in one
    /// statement, so concurrent creations cannot race past the cap and a
    /// rejected creation writes nothing.
    pub async fn create_deck(
        &self,
        player_id: i64,
        request: SaveDeckRequest,
    ) -> Result<(), ApiError> {
        let mut result = request.validate(&request);
        result.merge(self.check_slot_references(&request).await?);
        if !result.is_valid {
            return Err(ApiError::from(result));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO decks (
                user_id, id_card_1, id_card_2, id_card_3, id_card_4,
                id_card_5, id_card_6, id_card_7, id_card_8, id_deck_player,
                created_at, updated_at
            )
            SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'), datetime('now')
            WHERE (SELECT COUNT(*) FROM decks WHERE user_id = ?) < ?
            "#,
        )
        .bind(player_id)
        .bind(request.id_card_1)
        .bind(request.id_card_2)
        .bind(request.id_card_3)
        .bind(request.id_card_4)
        .bind(request.id_card_5)
        .bind(request.id_card_6)
        .bind(request.id_card_7)
        .bind(request.id_card_8)
        .bind(request.id_deck_player)
        .bind(player_id)
        .bind(MAX_DECKS_PER_PLAYER)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if inserted.rows_affected() == 0 {
            return Err(ApiError::LimitExceeded(
                "El jugador ya tiene el máximo de 4 mazos.".to_string(),
            ));
        }

        info!(player_id = player_id, "Created deck");

        Ok(())
    }

    /// Replace all eight slots, the label and the owner of the deck located by
    /// `(player_id, deck_id)`
    pub async fn update_deck(
        &self,
        player_id: i64,
        deck_id: i64,
        request: SaveDeckRequest,
    ) -> Result<(), ApiError> {
        let mut result = request.validate(&request);
        result.merge(self.check_slot_references(&request).await?);
        if !result.is_valid {
            return Err(ApiError::from(result));
        }

        let deck = self
            .find_deck(player_id, deck_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("El mazo no se encontró.".to_string()))?;

        sqlx::query(
            r#"
            UPDATE decks
            SET user_id = ?, id_card_1 = ?, id_card_2 = ?, id_card_3 = ?,
                id_card_4 = ?, id_card_5 = ?, id_card_6 = ?, id_card_7 = ?,
                id_card_8 = ?, id_deck_player = ?, updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(request.user_id)
        .bind(request.id_card_1)
        .bind(request.id_card_2)
        .bind(request.id_card_3)
        .bind(request.id_card_4)
        .bind(request.id_card_5)
        .bind(request.id_card_6)
        .bind(request.id_card_7)
        .bind(request.id_card_8)
        .bind(request.id_deck_player)
        .bind(deck.id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(player_id = player_id, deck_id = deck.id, "Updated deck");

        Ok(())
    }

    async fn find_deck(&self, player_id: i64, deck_id: i64) -> Result<Option<Deck>, ApiError> {
        sqlx::query_as::<_, Deck>(
            "SELECT * FROM decks WHERE user_id = ? AND id_deck_player = ?",
        )
        .bind(player_id)
        .bind(deck_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Slot references must point at existing cards before any write. There
    /// is no FK on the slot columns, so integrity is enforced here. Duplicate
    /// cards across slots are allowed.
    async fn check_slot_references(
        &self,
        request: &SaveDeckRequest,
    ) -> Result<ValidationResult, ApiError> {
        let mut result = ValidationResult::new();

        for (field, slot) in request.slots() {
            if let Some(card_id) = slot {
                let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards WHERE id = ?")
                    .bind(card_id)
                    .fetch_one(&self.db)
                    .await
                    .map_err(ApiError::DatabaseError)?;
                if exists == 0 {
                    result.add_error(field, "La carta referenciada no existe.");
                }
            }
        }

        Ok(result)
    }
}
