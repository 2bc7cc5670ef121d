//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// User database model. Password hash and Google token never leave the server.
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub google_id: Option<String>,
    #[serde(skip_serializing)]
    pub google_token: Option<String>,
    pub level: Option<i64>,
    pub trophies: Option<i64>,
    pub clan_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// POST /register-user request body. Fields are optional so that missing
/// values surface as per-field validation errors instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// POST /login-user request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /login-google request body
#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub google_id: Option<String>,
    pub google_token: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}
