use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::cards::Card;

/// Number of card slots in every deck
pub const DECK_SLOTS: usize = 8;

/// Deck database row. Slot columns are nullable card references.
#[derive(Debug, Clone, FromRow)]
pub struct Deck {
    pub id: i64,
    pub user_id: i64,
    pub id_card_1: Option<i64>,
    pub id_card_2: Option<i64>,
    pub id_card_3: Option<i64>,
    pub id_card_4: Option<i64>,
    pub id_card_5: Option<i64>,
    pub id_card_6: Option<i64>,
    pub id_card_7: Option<i64>,
    pub id_card_8: Option<i64>,
    pub id_deck_player: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Deck {
    /// Slot references in position order
    pub fn slots(&self) -> [Option<i64>; DECK_SLOTS] {
        [
            self.id_card_1,
            self.id_card_2,
            self.id_card_3,
            self.id_card_4,
            self.id_card_5,
            self.id_card_6,
            self.id_card_7,
            self.id_card_8,
        ]
    }
}

/// Read-time expansion of a deck: slots resolved into cards, raw slot
/// reference columns hidden from the API surface. A slot whose card no longer
/// exists resolves to null.
#[derive(Debug, Serialize)]
pub struct DeckView {
    pub id: i64,
    pub user_id: i64,
    pub id_deck_player: i64,
    pub cards: Vec<Option<Card>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Request body for deck create and update: eight slot references, the deck
/// label and the owner. All fields are required; optionality here only feeds
/// per-field validation errors.
#[derive(Debug, Deserialize)]
pub struct SaveDeckRequest {
    pub id_card_1: Option<i64>,
    pub id_card_2: Option<i64>,
    pub id_card_3: Option<i64>,
    pub id_card_4: Option<i64>,
    pub id_card_5: Option<i64>,
    pub id_card_6: Option<i64>,
    pub id_card_7: Option<i64>,
    pub id_card_8: Option<i64>,
    pub id_deck_player: Option<i64>,
    pub user_id: Option<i64>,
}

impl SaveDeckRequest {
    /// Slot field names and values in position order
    pub fn slots(&self) -> [(&'static str, Option<i64>); DECK_SLOTS] {
        [
            ("id_card_1", self.id_card_1),
            ("id_card_2", self.id_card_2),
            ("id_card_3", self.id_card_3),
            ("id_card_4", self.id_card_4),
            ("id_card_5", self.id_card_5),
            ("id_card_6", self.id_card_6),
            ("id_card_7", self.id_card_7),
            ("id_card_8", self.id_card_8),
        ]
    }
}
