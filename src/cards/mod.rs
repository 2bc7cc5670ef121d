//! # Cards Module
//!
//! CRUD endpoints for battle cards (name, description, attack and defense
//! stats). All routes require a bearer token.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::Card;
pub use routes::cards_routes;
