// Uniform success-response envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Builder for the uniform `{status, message, statusCode, ...}` response body.
/// Every successful handler outcome goes through this; errors take the same
/// shape via `ApiError`.
#[derive(Debug)]
pub struct Envelope {
    code: StatusCode,
    body: Map<String, Value>,
}

impl Envelope {
    pub fn success(code: StatusCode, message: &str) -> Self {
        let mut body = Map::new();
        body.insert("status".to_string(), json!("success"));
        body.insert("message".to_string(), json!(message));
        body.insert("statusCode".to_string(), json!(code.as_u16()));
        Self { code, body }
    }

    /// Attaches a domain field to the envelope body.
    pub fn field(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.body.insert(key.to_string(), value);
        self
    }

    #[cfg(test)]
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    #[cfg(test)]
    pub fn status_code(&self) -> StatusCode {
        self.code
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.code, Json(Value::Object(self.body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_carries_status_fields() {
        let envelope = Envelope::success(StatusCode::CREATED, "Card created successfully");
        assert_eq!(envelope.body()["status"], json!("success"));
        assert_eq!(envelope.body()["statusCode"], json!(201));
        assert_eq!(envelope.body()["message"], json!("Card created successfully"));
    }

    #[test]
    fn test_envelope_domain_field() {
        let envelope =
            Envelope::success(StatusCode::OK, "Deck fetched successfully").field("deck", json!([]));
        assert!(envelope.body().contains_key("deck"));
    }
}
