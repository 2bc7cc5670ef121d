// Common validation types and traits

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Presence check for an optional string field. A field counts as missing
    /// when it is absent or blank.
    pub fn require_str(&mut self, field: &str, value: &Option<String>) {
        match value {
            Some(v) if !v.trim().is_empty() => {}
            _ => self.add_error(field, &format!("El campo {} es obligatorio.", field)),
        }
    }

    /// Presence check for an optional integer field.
    pub fn require_int(&mut self, field: &str, value: &Option<i64>) {
        if value.is_none() {
            self.add_error(field, &format!("El campo {} es obligatorio.", field));
        }
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
            self.errors.extend(other.errors);
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Checks the basic shape of an email address (local@domain.tld)
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
        .is_match(value)
}
