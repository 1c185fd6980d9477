//! Pure field validators and the per-request aggregate.
//!
//! Each validator returns `Ok(())` or the message to show for that field.
//! [`ValidationReport`] runs every check it is given, so a response lists
//! every failing field at once.

pub mod image;

use std::collections::BTreeMap;

use validator::Validate;

use crate::error::ApiError;

pub use image::{image, ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES};

/// Field name to the messages raised for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub type FieldCheck = Result<(), String>;

#[derive(Debug, Default)]
pub struct ValidationReport {
    errors: FieldErrors,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(mut self, field: &str, result: FieldCheck) -> Self {
        if let Err(message) = result {
            self.errors.entry(field.to_string()).or_default().push(message);
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.is_valid() {
            Ok(())
        } else {
            tracing::debug!(fields = ?self.errors.keys().collect::<Vec<_>>(), "request failed validation");
            Err(ApiError::validation_error(self.errors))
        }
    }
}

fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(message.to_string()),
    }
}

fn length_between(value: &str, min: usize, max: usize, message: &str) -> FieldCheck {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(message.to_string());
    }
    Ok(())
}

pub fn name(value: Option<&str>) -> FieldCheck {
    let value = required(value, "Name is required")?;
    length_between(value, 2, 50, "Name must be between 2 and 50 characters")?;
    if !value.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err("Name can only contain letters and spaces".to_string());
    }
    Ok(())
}

#[derive(Validate)]
struct EmailShape {
    #[validate(email)]
    email: String,
}

pub fn email(value: Option<&str>) -> FieldCheck {
    let value = required(value, "Email is required")?;
    let shape = EmailShape { email: value.to_string() };
    if value.len() > 254 || shape.validate().is_err() {
        return Err("Invalid email address".to_string());
    }
    Ok(())
}

/// Strips the separators people type into phone numbers.
pub fn normalize_mobile(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

pub fn mobile(value: Option<&str>) -> FieldCheck {
    let value = required(value, "Mobile number is required")?;
    let normalized = normalize_mobile(value);
    let digits = normalized.strip_prefix("+91").unwrap_or(&normalized);

    let valid = digits.len() == 10
        && digits.chars().all(|c| c.is_ascii_digit())
        && matches!(digits.as_bytes()[0], b'6'..=b'9');

    if !valid {
        return Err("Invalid mobile number".to_string());
    }
    Ok(())
}

pub fn address(value: Option<&str>) -> FieldCheck {
    let value = required(value, "Address is required")?;
    length_between(value, 3, 200, "Address must be between 3 and 200 characters")
}

pub fn age(value: Option<&str>) -> FieldCheck {
    let value = required(value, "Age is required")?;
    let age: i32 = value.parse().map_err(|_| "Age must be a number".to_string())?;
    if !(15..=45).contains(&age) {
        return Err("Age must be between 15 and 45".to_string());
    }
    Ok(())
}

pub fn text(value: Option<&str>) -> FieldCheck {
    let value = required(value, "This field is required")?;
    length_between(value, 1, 5000, "Text must not exceed 5000 characters")
}

pub fn title(value: Option<&str>) -> FieldCheck {
    let value = required(value, "Title is required")?;
    length_between(value, 3, 150, "Title must be between 3 and 150 characters")
}

pub fn message(value: Option<&str>) -> FieldCheck {
    let value = required(value, "Message is required")?;
    length_between(value, 1, 1000, "Message must not exceed 1000 characters")
}

pub fn password(value: Option<&str>) -> FieldCheck {
    // Passwords are not trimmed; surrounding spaces are part of the secret.
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Err("Password is required".to_string()),
    };
    length_between(value, 8, 64, "Password must be between 8 and 64 characters")?;

    let has_upper = value.chars().any(|c| c.is_uppercase());
    let has_lower = value.chars().any(|c| c.is_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_symbol = value.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if !(has_upper && has_lower && has_digit && has_symbol) {
        return Err(
            "Password must contain an uppercase letter, a lowercase letter, a number and a special character"
                .to_string(),
        );
    }
    Ok(())
}

pub fn goals(value: Option<&str>) -> FieldCheck {
    let value = required(value, "Goals are required")?;
    match value.parse::<i32>() {
        Ok(n) if (0..=99).contains(&n) => Ok(()),
        _ => Err("Goals must be a whole number between 0 and 99".to_string()),
    }
}

/// Presence check for an identifier that travels as a form/body field.
pub fn present<T>(value: Option<T>, message: &str) -> FieldCheck {
    value.map(|_| ()).ok_or_else(|| message.to_string())
}
