use super::models::{Card, CardPayload};
use crate::common::{ApiError, Validator};
use sqlx::SqlitePool;
use tracing::info;

pub struct CardsService {
    db: SqlitePool,
}

impl CardsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get all cards
    pub async fn get_all_cards(&self) -> Result<Vec<Card>, ApiError> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, name, description, stroke, defense
            FROM cards
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(cards)
    }

    /// Get card by ID
    pub async fn get_card_by_id(&self, card_id: i64) -> Result<Card, ApiError> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, name, description, stroke, defense
            FROM cards
            WHERE id = ?
            "#,
        )
        .bind(card_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

        Ok(card)
    }

    /// Create a new card
    pub async fn create_card(&self, payload: CardPayload) -> Result<Card, ApiError> {
        let result = payload.validate(&payload);
        if !result.is_valid {
            return Err(ApiError::from(result));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO cards (name, description, stroke, defense, created_at, updated_at)
            VALUES (?, ?, ?, ?, datetime('now'), datetime('now'))
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.stroke)
        .bind(payload.defense)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let card_id = inserted.last_insert_rowid();
        info!(card_id = card_id, "Created card");

        self.get_card_by_id(card_id).await
    }

    /// Update an existing card, replacing all four fields
    pub async fn update_card(&self, card_id: i64, payload: CardPayload) -> Result<Card, ApiError> {
        let result = payload.validate(&payload);
        if !result.is_valid {
            return Err(ApiError::from(result));
        }

        // 404 before touching the row
        self.get_card_by_id(card_id).await?;

        sqlx::query(
            r#"
            UPDATE cards
            SET name = ?, description = ?, stroke = ?, defense = ?, updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.stroke)
        .bind(payload.defense)
        .bind(card_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(card_id = card_id, "Updated card");

        self.get_card_by_id(card_id).await
    }
}
