//! # Decks Module
//!
//! Deck composition and validation: each deck belongs to one player, carries
//! exactly eight card slots and a player-chosen label, and a player may own at
//! most four decks. Reads expand slots into full cards; writes validate slot
//! references and enforce the deck cap atomically.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use models::{Deck, DeckView};
pub use routes::decks_routes;
