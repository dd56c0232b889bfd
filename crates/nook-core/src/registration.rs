//! Registration form and its local validation.
//!
//! Field errors found here are reported per field and never reach the
//! network.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// A field of the registration form.
///
/// Parses from the names the register endpoint uses in its `field` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RegistrationField {
    Username,
    Email,
    Password,
    #[strum(to_string = "confirm-password", serialize = "confirm_password")]
    ConfirmPassword,
}

impl RegistrationField {
    /// All fields, in form order.
    pub const ALL: [RegistrationField; 4] = [
        RegistrationField::Username,
        RegistrationField::Email,
        RegistrationField::Password,
        RegistrationField::ConfirmPassword,
    ];
}

/// A validation failure on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: RegistrationField,
    pub message: String,
}

impl FieldError {
    fn new(field: RegistrationField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Raw input of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Checks every field and returns all failures in form order.
    ///
    /// Username and email are trimmed before checking; passwords are taken
    /// as typed.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.username.trim().is_empty() {
            errors.push(FieldError::new(
                RegistrationField::Username,
                "Please enter a username.",
            ));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new(
                RegistrationField::Email,
                "Please enter an email address.",
            ));
        } else if !EMAIL_PATTERN.is_match(email) {
            errors.push(FieldError::new(
                RegistrationField::Email,
                "Please enter a valid email address.",
            ));
        }

        if self.password.is_empty() {
            errors.push(FieldError::new(
                RegistrationField::Password,
                "Please enter a password.",
            ));
        } else if self.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.push(FieldError::new(
                RegistrationField::Password,
                "Password must be at least 6 characters.",
            ));
        }

        if self.confirm_password.is_empty() {
            errors.push(FieldError::new(
                RegistrationField::ConfirmPassword,
                "Please confirm your password.",
            ));
        } else if self.confirm_password != self.password {
            errors.push(FieldError::new(
                RegistrationField::ConfirmPassword,
                "Passwords do not match.",
            ));
        }

        errors
    }

    /// Trimmed username as sent to the backend.
    pub fn username(&self) -> &str {
        self.username.trim()
    }

    /// Trimmed email as sent to the backend.
    pub fn email(&self) -> &str {
        self.email.trim()
    }
}
