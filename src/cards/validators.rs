use super::models::CardPayload;
use crate::common::{ValidationResult, Validator};

impl Validator<CardPayload> for CardPayload {
    fn validate(&self, data: &CardPayload) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require_str("name", &data.name);
        result.require_str("description", &data.description);
        result.require_int("stroke", &data.stroke);
        result.require_int("defense", &data.defense);

        result
    }
}
