//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /register-user` - Register with email and password
/// - `POST /login-user` - Password login, issues a JWT
/// - `POST /login-google` - Google federated login, issues a JWT
/// - `GET /user-profile` - Current user's profile (bearer token)
pub fn auth_routes() -> Router {
    Router::new()
        .route("/register-user", post(handlers::register))
        .route("/login-user", post(handlers::login))
        .route("/login-google", post(handlers::login_google))
        .route("/user-profile", get(handlers::profile))
}
