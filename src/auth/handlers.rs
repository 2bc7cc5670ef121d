//! Identity and session handlers

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::extractors::AuthedUser;
use super::models::{Claims, GoogleLoginRequest, LoginRequest, RegisterRequest, User};
use super::password::{hash_password, verify_password};
use crate::common::{safe_email_log, ApiError, AppState, Envelope, Validator};

/// Session token lifetime
const TOKEN_TTL_HOURS: i64 = 24;

/// POST /register-user
/// Registers a new user with an argon2-hashed password.
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Envelope, ApiError> {
    let state = state_lock.read().await.clone();

    let mut result = payload.validate(&payload);

    // Email uniqueness is a store-level check, surfaced as a field error
    if let Some(email) = &payload.email {
        if !email.trim().is_empty() {
            let existing: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
                    .bind(email)
                    .fetch_one(&state.db)
                    .await
                    .map_err(ApiError::DatabaseError)?;
            if existing > 0 {
                result.add_error("email", "El campo email ya ha sido registrado.");
            }
        }
    }

    if !result.is_valid {
        return Err(ApiError::validation("Error al registrar usuario", result));
    }

    // Presence was validated above; the raw password is hashed and dropped,
    // never stored or logged
    let name = payload.name.unwrap_or_default();
    let email = payload.email.unwrap_or_default();
    let password_hash = hash_password(&payload.password.unwrap_or_default())?;

    sqlx::query(
        r#"
        INSERT INTO users (name, email, password, created_at, updated_at)
        VALUES (?, ?, ?, datetime('now'), datetime('now'))
        "#,
    )
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, email = %safe_email_log(&email), "Database error registering user");
        ApiError::InternalServer("Error al registrar usuario".to_string())
    })?;

    info!(email = %safe_email_log(&email), "User registered");

    Ok(Envelope::success(
        StatusCode::CREATED,
        "Usuario registrado correctamente",
    ))
}

/// POST /login-user
/// Authenticates by email and password and issues a session token.
/// The failure message never reveals whether the email exists.
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Envelope, ApiError> {
    let state = state_lock.read().await.clone();

    let result = payload.validate(&payload);
    if !result.is_valid {
        return Err(ApiError::validation("Error al iniciar sesión", result));
    }

    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let user = match user {
        Some(u) => u,
        None => {
            warn!(email = %safe_email_log(&email), "Login failed: unknown email");
            return Err(ApiError::Unauthorized("Credenciales inválidas".to_string()));
        }
    };

    let credentials_ok = user
        .password
        .as_deref()
        .map(|hash| verify_password(&password, hash))
        .unwrap_or(false);

    if !credentials_ok {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(ApiError::Unauthorized("Credenciales inválidas".to_string()));
    }

    let token = issue_token(&state.jwt_secret, user.id)?;

    info!(user_id = user.id, email = %safe_email_log(&user.email), "Login successful");

    Ok(Envelope::success(StatusCode::OK, "Inicio de sesión correcto")
        .field("token", token)
        .field("token_type", "bearer")
        .field("expires_in", TOKEN_TTL_HOURS * 3600)
        .field("name", user.name.to_uppercase()))
}

/// POST /login-google
/// Federated login. Links the Google identity to an existing account matched
/// by email, or creates a password-less user. Validation failures use 422
/// here, unlike the 400 used by the other endpoints.
pub async fn login_google(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<GoogleLoginRequest>,
) -> Result<Envelope, ApiError> {
    let state = state_lock.read().await.clone();

    let result = payload.validate(&payload);
    if !result.is_valid {
        return Err(ApiError::UnprocessableEntity {
            errors: result.errors,
        });
    }

    let google_id = payload.google_id.unwrap_or_default();
    let google_token = payload.google_token.unwrap_or_default();
    let email = payload.email.unwrap_or_default();
    let name = payload.name.unwrap_or_default();

    let existing: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let user = match existing {
        Some(user) => {
            // Account linking by email match: refresh the stored Google
            // identity and token on every federated login
            sqlx::query(
                r#"
                UPDATE users
                SET google_id = ?, google_token = ?, updated_at = datetime('now')
                WHERE id = ?
                "#,
            )
            .bind(&google_id)
            .bind(&google_token)
            .bind(user.id)
            .execute(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

            info!(user_id = user.id, "Linked Google identity to existing account");
            user
        }
        None => {
            let inserted = sqlx::query(
                r#"
                INSERT INTO users (name, email, google_id, google_token, created_at, updated_at)
                VALUES (?, ?, ?, ?, datetime('now'), datetime('now'))
                "#,
            )
            .bind(&name)
            .bind(&email)
            .bind(&google_id)
            .bind(&google_token)
            .execute(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

            let user_id = inserted.last_insert_rowid();
            info!(
                user_id = user_id,
                email = %safe_email_log(&email),
                "Created new user via Google login"
            );

            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_one(&state.db)
                .await
                .map_err(ApiError::DatabaseError)?
        }
    };

    let token = issue_token(&state.jwt_secret, user.id)?;

    Ok(Envelope::success(StatusCode::OK, "Login successful")
        .field("token", token)
        .field("name", user.name.to_uppercase()))
}

/// GET /user-profile
/// Returns the authenticated user's profile. The extractor handles the 401
/// envelope for missing or invalid tokens.
pub async fn profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Envelope, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(authed.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Envelope::success(StatusCode::OK, "Perfil de usuario").field("data", user))
}

/// Creates an HS256 session token for the given user id
fn issue_token(jwt_secret: &str, user_id: i64) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, user_id = user_id, "JWT encoding error");
        ApiError::InternalServer("No se pudo crear el token".to_string())
    })
}
