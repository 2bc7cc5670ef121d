use super::models::SaveDeckRequest;
use crate::common::{ValidationResult, Validator};

impl Validator<SaveDeckRequest> for SaveDeckRequest {
    fn validate(&self, data: &SaveDeckRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (field, value) in data.slots() {
            result.require_int(field, &value);
        }
        result.require_int("id_deck_player", &data.id_deck_player);
        result.require_int("user_id", &data.user_id);

        result
    }
}
