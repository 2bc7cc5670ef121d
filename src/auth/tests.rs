//! Tests for auth module
//!
//! These tests verify core identity functionality including:
//! - JWT token validation
//! - Request validation for register, login and Google login
//! - Password hashing
//! - Registration uniqueness and Google account linking

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::{migrations, ApiError, AppState, Validator};
    use axum::extract::{Extension, Json};
    use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    async fn test_state() -> Arc<RwLock<AppState>> {
        let pool: SqlitePool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        migrations::run_migrations(&pool).await.expect("migrations");
        Arc::new(RwLock::new(AppState {
            db: pool,
            jwt_secret: "test_secret_key".to_string(),
        }))
    }

    fn register_request(email: &str) -> models::RegisterRequest {
        models::RegisterRequest {
            name: Some("John Doe".to_string()),
            email: Some(email.to_string()),
            password: Some("password123".to_string()),
            password_confirmation: Some("password123".to_string()),
        }
    }

    fn google_request(email: &str, token: &str) -> models::GoogleLoginRequest {
        models::GoogleLoginRequest {
            google_id: Some("1234567890".to_string()),
            google_token: Some(token.to_string()),
            email: Some(email.to_string()),
            name: Some("John Doe".to_string()),
        }
    }

    #[test]
    fn test_jwt_encoding_and_decoding() {
        let secret = "test_secret_key";
        let claims = models::Claims {
            sub: "17".to_string(),
            exp: 9999999999, // Far future
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let decoded = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .expect("Failed to decode token");

        assert_eq!(decoded.claims.sub, "17");
    }

    #[test]
    fn test_jwt_validation_fails_with_wrong_secret() {
        let claims = models::Claims {
            sub: "17".to_string(),
            exp: 9999999999,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key"),
        )
        .expect("Failed to encode token");

        let result = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(b"wrong_secret_key"),
            &Validation::new(Algorithm::HS256),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_register_validation_success() {
        let request = register_request("johndoe@example.com");
        let result = request.validate(&request);
        assert!(result.is_valid);
    }

    #[test]
    fn test_register_validation_missing_and_malformed_fields() {
        let request = models::RegisterRequest {
            name: None,
            email: Some("not-an-email".to_string()),
            password: Some("short".to_string()),
            password_confirmation: Some("short".to_string()),
        };

        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "name"));
        assert!(result.errors.iter().any(|e| e.field == "email"));
        assert!(result.errors.iter().any(|e| e.field == "password"));
    }

    #[test]
    fn test_register_validation_confirmation_mismatch() {
        let request = models::RegisterRequest {
            name: Some("John Doe".to_string()),
            email: Some("johndoe@example.com".to_string()),
            password: Some("password123".to_string()),
            password_confirmation: Some("password456".to_string()),
        };

        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "password"));
    }

    #[test]
    fn test_google_login_validation_requires_all_fields() {
        let request = models::GoogleLoginRequest {
            google_id: None,
            google_token: Some("ya29.a0AfH6SMA".to_string()),
            email: Some("user@example.com".to_string()),
            name: None,
        };

        let result = request.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "google_id"));
        assert!(result.errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = password::hash_password("password123").expect("hash");
        assert_ne!(hash, "password123");
        assert!(password::verify_password("password123", &hash));
        assert!(!password::verify_password("password124", &hash));
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(!password::verify_password("password123", "not-a-hash"));
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let state = test_state().await;

        handlers::register(
            Extension(state.clone()),
            Json(register_request("johndoe@example.com")),
        )
        .await
        .expect("register");

        let db = state.read().await.db.clone();
        let stored: Option<String> =
            sqlx::query_scalar("SELECT password FROM users WHERE email = ?")
                .bind("johndoe@example.com")
                .fetch_one(&db)
                .await
                .expect("stored user");

        let hash = stored.expect("password present");
        assert_ne!(hash, "password123");
        assert!(password::verify_password("password123", &hash));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_rejected_without_write() {
        let state = test_state().await;

        handlers::register(
            Extension(state.clone()),
            Json(register_request("johndoe@example.com")),
        )
        .await
        .expect("first registration");

        let err = handlers::register(
            Extension(state.clone()),
            Json(register_request("johndoe@example.com")),
        )
        .await
        .expect_err("duplicate email must be rejected");

        match err {
            ApiError::Validation { errors, .. } => {
                assert!(errors.iter().any(|e| e.field == "email"));
            }
            other => panic!("expected Validation, got {other}"),
        }

        let db = state.read().await.db.clone();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&db)
            .await
            .expect("count");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_login_issues_token_for_valid_credentials() {
        let state = test_state().await;

        handlers::register(
            Extension(state.clone()),
            Json(register_request("johndoe@example.com")),
        )
        .await
        .expect("register");

        let envelope = handlers::login(
            Extension(state.clone()),
            Json(models::LoginRequest {
                email: Some("johndoe@example.com".to_string()),
                password: Some("password123".to_string()),
            }),
        )
        .await
        .expect("login");

        let body = envelope.body();
        assert!(body["token"].as_str().is_some());
        assert_eq!(body["token_type"], serde_json::json!("bearer"));
        assert_eq!(body["name"], serde_json::json!("JOHN DOE"));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_generic_unauthorized() {
        let state = test_state().await;

        handlers::register(
            Extension(state.clone()),
            Json(register_request("johndoe@example.com")),
        )
        .await
        .expect("register");

        let wrong_password = handlers::login(
            Extension(state.clone()),
            Json(models::LoginRequest {
                email: Some("johndoe@example.com".to_string()),
                password: Some("password999".to_string()),
            }),
        )
        .await
        .expect_err("wrong password");

        let unknown_email = handlers::login(
            Extension(state.clone()),
            Json(models::LoginRequest {
                email: Some("nobody@example.com".to_string()),
                password: Some("password123".to_string()),
            }),
        )
        .await
        .expect_err("unknown email");

        // Same message either way, nothing leaks about which part was wrong
        for err in [wrong_password, unknown_email] {
            match err {
                ApiError::Unauthorized(message) => {
                    assert_eq!(message, "Credenciales inválidas");
                }
                other => panic!("expected Unauthorized, got {other}"),
            }
        }
    }

    #[tokio::test]
    async fn test_google_login_twice_updates_token_without_duplicate_user() {
        let state = test_state().await;

        handlers::login_google(
            Extension(state.clone()),
            Json(google_request("user@example.com", "token-one")),
        )
        .await
        .expect("first google login");

        handlers::login_google(
            Extension(state.clone()),
            Json(google_request("user@example.com", "token-two")),
        )
        .await
        .expect("second google login");

        let db = state.read().await.db.clone();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind("user@example.com")
            .fetch_one(&db)
            .await
            .expect("count");
        assert_eq!(count, 1);

        let token: Option<String> =
            sqlx::query_scalar("SELECT google_token FROM users WHERE email = ?")
                .bind("user@example.com")
                .fetch_one(&db)
                .await
                .expect("token");
        assert_eq!(token.as_deref(), Some("token-two"));
    }

    #[tokio::test]
    async fn test_google_login_links_existing_password_account() {
        let state = test_state().await;

        handlers::register(
            Extension(state.clone()),
            Json(register_request("johndoe@example.com")),
        )
        .await
        .expect("register");

        handlers::login_google(
            Extension(state.clone()),
            Json(google_request("johndoe@example.com", "ya29.a0AfH6SMA")),
        )
        .await
        .expect("google login against existing account");

        let db = state.read().await.db.clone();
        let (count, google_id, password): (i64, Option<String>, Option<String>) = (
            sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(&db)
                .await
                .expect("count"),
            sqlx::query_scalar("SELECT google_id FROM users WHERE email = ?")
                .bind("johndoe@example.com")
                .fetch_one(&db)
                .await
                .expect("google_id"),
            sqlx::query_scalar("SELECT password FROM users WHERE email = ?")
                .bind("johndoe@example.com")
                .fetch_one(&db)
                .await
                .expect("password"),
        );

        assert_eq!(count, 1);
        assert_eq!(google_id.as_deref(), Some("1234567890"));
        assert!(password.is_some(), "linking keeps the local password");
    }

    #[tokio::test]
    async fn test_google_login_validation_uses_422() {
        let state = test_state().await;

        let err = handlers::login_google(
            Extension(state.clone()),
            Json(models::GoogleLoginRequest {
                google_id: None,
                google_token: None,
                email: None,
                name: None,
            }),
        )
        .await
        .expect_err("empty payload");

        assert!(matches!(err, ApiError::UnprocessableEntity { .. }));
    }
}
