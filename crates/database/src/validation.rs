//! Sign-up input checks for the built-in account backend.

use thiserror::Error;

/// Maximum stored length of an account email.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length accepted at sign-up.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Rejected sign-up input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("{field} is too long ({actual} chars, max {max})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Accept `local@domain.tld` shaped addresses.
///
/// Surrounding whitespace is ignored; deliverability is not checked.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    let invalid = |reason: &str| Err(ValidationError::InvalidEmail(reason.to_string()));

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email",
            max: MAX_EMAIL_LENGTH,
            actual: email.len(),
        });
    }

    let Some((local, domain)) = email.split_once('@') else {
        return invalid("missing @");
    };
    if local.is_empty() || domain.contains('@') {
        return invalid("expected one address before a single @");
    }
    if domain.split('.').count() < 2 || domain.split('.').any(str::is_empty) {
        return invalid("domain must look like example.com");
    }

    Ok(())
}

/// Check a sign-up password; length counts characters, not bytes.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    match password.chars().count() {
        n if n < MIN_PASSWORD_LENGTH => Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        }),
        n if n > MAX_PASSWORD_LENGTH => Err(ValidationError::TooLong {
            field: "password",
            max: MAX_PASSWORD_LENGTH,
            actual: n,
        }),
        _ => Ok(()),
    }
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
