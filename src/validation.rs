// Validation utilities module
// Account rules checked before any repository access

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::ValidationError;

pub const EMAIL_MIN_LENGTH: usize = 3;
pub const EMAIL_MAX_LENGTH: usize = 254;
pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 30;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Outcome of a single account rule check
pub type ValidationResult = Result<(), ValidationError>;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern compiles")
    })
}

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern compiles"))
}

fn reject(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Returns the trimmed value, or `None` when the field is absent or blank
fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validates an email address
/// Checks in order: present, 3..=254 characters, `local@domain.tld` shape
pub fn validate_email(email: Option<&str>) -> ValidationResult {
    let email = required(email).ok_or_else(|| reject("email_required", "Email is required"))?;

    let length = email.chars().count();
    if !(EMAIL_MIN_LENGTH..=EMAIL_MAX_LENGTH).contains(&length) {
        return Err(reject(
            "email_length",
            "Email must be between 3 and 254 characters",
        ));
    }

    if !email_pattern().is_match(email) {
        return Err(reject("email_format", "Invalid email format"));
    }

    Ok(())
}

/// Validates a username
/// Checks in order: present, 3..=30 characters, ASCII letters/digits/underscore
pub fn validate_username(username: Option<&str>) -> ValidationResult {
    let username =
        required(username).ok_or_else(|| reject("username_required", "Username is required"))?;

    let length = username.chars().count();
    if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
        return Err(reject(
            "username_length",
            "Username must be between 3 and 30 characters",
        ));
    }

    if !username_pattern().is_match(username) {
        return Err(reject(
            "username_characters",
            "Username may only contain letters, numbers, and underscores",
        ));
    }

    Ok(())
}

/// Validates password strength
///
/// The password itself is never trimmed; only a blank value counts as missing.
/// No special character is required.
pub fn validate_password(password: Option<&str>) -> ValidationResult {
    let password = match password {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Err(reject("password_required", "Password is required")),
    };

    let length = password.chars().count();
    if length < PASSWORD_MIN_LENGTH {
        return Err(reject(
            "password_too_short",
            "Password must be at least 8 characters",
        ));
    }
    if length > PASSWORD_MAX_LENGTH {
        return Err(reject(
            "password_too_long",
            "Password must be at most 128 characters",
        ));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(reject(
            "password_uppercase",
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(reject(
            "password_lowercase",
            "Password must contain at least one lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(reject(
            "password_digit",
            "Password must contain at least one digit",
        ));
    }

    Ok(())
}

/// Runs the email, username, and password rules in that order,
/// stopping at the first failure
pub fn validate_registration(
    email: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
) -> ValidationResult {
    validate_email(email)?;
    validate_username(username)?;
    validate_password(password)
}
