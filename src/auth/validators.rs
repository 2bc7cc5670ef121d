use super::models::{GoogleLoginRequest, LoginRequest, RegisterRequest};
use crate::common::{validation::is_valid_email, ValidationResult, Validator};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_NAME_LENGTH: usize = 255;

fn check_email_shape(result: &mut ValidationResult, email: &Option<String>) {
    if let Some(email) = email {
        if !email.trim().is_empty() && !is_valid_email(email) {
            result.add_error(
                "email",
                "El campo email debe ser un correo electrónico válido.",
            );
        }
    }
}

fn check_password_length(result: &mut ValidationResult, password: &Option<String>) {
    if let Some(password) = password {
        if !password.is_empty() && password.len() < MIN_PASSWORD_LENGTH {
            result.add_error(
                "password",
                &format!(
                    "El campo password debe contener al menos {} caracteres.",
                    MIN_PASSWORD_LENGTH
                ),
            );
        }
    }
}

impl Validator<RegisterRequest> for RegisterRequest {
    fn validate(&self, data: &RegisterRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require_str("name", &data.name);
        if let Some(name) = &data.name {
            if name.len() > MAX_NAME_LENGTH {
                result.add_error(
                    "name",
                    &format!("El campo name no debe superar {} caracteres.", MAX_NAME_LENGTH),
                );
            }
        }

        result.require_str("email", &data.email);
        check_email_shape(&mut result, &data.email);

        result.require_str("password", &data.password);
        check_password_length(&mut result, &data.password);
        if data.password.is_some() && data.password != data.password_confirmation {
            result.add_error("password", "La confirmación de password no coincide.");
        }

        result
    }
}

impl Validator<LoginRequest> for LoginRequest {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require_str("email", &data.email);
        check_email_shape(&mut result, &data.email);

        result.require_str("password", &data.password);
        check_password_length(&mut result, &data.password);

        result
    }
}

impl Validator<GoogleLoginRequest> for GoogleLoginRequest {
    fn validate(&self, data: &GoogleLoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require_str("google_id", &data.google_id);
        result.require_str("google_token", &data.google_token);
        result.require_str("email", &data.email);
        check_email_shape(&mut result, &data.email);
        result.require_str("name", &data.name);

        result
    }
}
