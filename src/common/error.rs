// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Map, Value};
use std::fmt;
use tracing::error;

use super::validation::{ValidationError, ValidationResult};

/// API error types
///
/// Every variant maps onto the uniform `{status, message, statusCode}` envelope;
/// validation variants additionally carry a per-field `errors` map.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    LimitExceeded(String),
    Validation {
        message: String,
        errors: Vec<ValidationError>,
    },
    // Google login reports validation failures as 422 instead of the 400 used
    // everywhere else. Kept as-is for wire compatibility.
    UnprocessableEntity {
        errors: Vec<ValidationError>,
    },
    InternalServer(String),
    DatabaseError(sqlx::Error),
}

impl ApiError {
    /// Builds a validation error with an endpoint-specific top-level message.
    pub fn validation(message: &str, result: ValidationResult) -> Self {
        ApiError::Validation {
            message: message.to_string(),
            errors: result.errors,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::LimitExceeded(msg) => write!(f, "Limit Exceeded: {}", msg),
            ApiError::Validation { message, .. } => write!(f, "Validation Error: {}", message),
            ApiError::UnprocessableEntity { .. } => write!(f, "Validation Error"),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
        }
    }
}

/// Groups field errors into the `{field: [messages]}` map used on the wire
fn field_error_map(errors: &[ValidationError]) -> Value {
    let mut map: Map<String, Value> = Map::new();
    for e in errors {
        let entry = map
            .entry(e.field.clone())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(messages) = entry {
            messages.push(json!(e.message));
        }
    }
    Value::Object(map)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, errors) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::LimitExceeded(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Validation { message, errors } => {
                (StatusCode::BAD_REQUEST, message, Some(errors))
            }
            ApiError::UnprocessableEntity { errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error".to_string(),
                Some(errors),
            ),
            ApiError::InternalServer(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    None,
                )
            }
        };

        let mut body = Map::new();
        body.insert("status".to_string(), json!("error"));
        body.insert("message".to_string(), json!(message));
        body.insert("statusCode".to_string(), json!(status.as_u16()));
        if let Some(errors) = errors {
            body.insert("errors".to_string(), field_error_map(&errors));
        }

        (status, Json(Value::Object(body))).into_response()
    }
}

/// Helper conversion for the common "Validation error" case
impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        ApiError::validation("Validation error", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_map_groups_by_field() {
        let errors = vec![
            ValidationError {
                field: "email".to_string(),
                message: "El campo email es obligatorio.".to_string(),
            },
            ValidationError {
                field: "email".to_string(),
                message: "El campo email debe ser un correo electrónico válido.".to_string(),
            },
            ValidationError {
                field: "password".to_string(),
                message: "El campo password es obligatorio.".to_string(),
            },
        ];

        let map = field_error_map(&errors);
        assert_eq!(map["email"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(map["password"].as_array().map(|a| a.len()), Some(1));
    }
}
