use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Card database model. `stroke` is the attack stat.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub stroke: i64,
    pub defense: i64,
}

/// Request body for card create and update. All four fields are required;
/// they are optional here so absence surfaces as a field error.
#[derive(Debug, Deserialize)]
pub struct CardPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub stroke: Option<i64>,
    pub defense: Option<i64>,
}
