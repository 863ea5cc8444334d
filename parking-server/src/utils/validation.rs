//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so every write path
//! validates here before touching the pool.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// User display names
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;

/// Parking lot names (prime spot for marketing copy, allow a bit more)
pub const MAX_LOT_NAME_LEN: usize = 150;

/// Addresses and lot locations
pub const MAX_ADDRESS_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Phone numbers: digits after stripping separators
pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Vehicle registration numbers
pub const MAX_VEHICLE_LEN: usize = 20;

/// Spots per lot
pub const MIN_LOT_SPOTS: i64 = 1;
pub const MAX_LOT_SPOTS: i64 = 1000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
///
/// Limits are in characters, not bytes, so multi-byte names count fairly.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    let chars = value.chars().count();
    if chars > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({chars} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Validate a user display name (2..=100 chars, non-blank).
pub fn validate_name(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "name", MAX_NAME_LEN)?;
    if value.trim().chars().count() < MIN_NAME_LEN {
        return Err(AppError::validation(format!(
            "name must be at least {MIN_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Structural email check: one `@`, non-empty local part, domain with a dot.
///
/// 不做完整的 RFC 5322 解析，真实性由注册邮件确认 (未实现) 兜底。
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let Some((local, domain)) = value.split_once('@') else {
        return Err(AppError::validation("email must contain '@'"));
    };
    if local.is_empty()
        || domain.len() < 3
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || value.contains(char::is_whitespace)
    {
        return Err(AppError::validation("email format is invalid"));
    }
    Ok(())
}

/// Validate a phone number: 10-15 digits, separators `+ - ( ) space` allowed.
pub fn validate_phone(value: &str) -> Result<(), AppError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    let valid_chars = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
    if !valid_chars {
        return Err(AppError::validation("phone contains invalid characters"));
    }
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(AppError::validation(format!(
            "phone must contain {MIN_PHONE_DIGITS}-{MAX_PHONE_DIGITS} digits"
        )));
    }
    Ok(())
}

/// Validate a password (6..=128 chars).
pub fn validate_password(value: &str) -> Result<(), AppError> {
    let chars = value.chars().count();
    if chars < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if chars > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}

/// Validate a vehicle registration number after upper-casing
/// (letters, digits, `-` and spaces).
pub fn validate_vehicle_number(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "vehicle_number", MAX_VEHICLE_LEN)?;
    let valid = value
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == ' ');
    if !valid {
        return Err(AppError::validation(
            "vehicle_number may only contain letters, digits, '-' and spaces",
        ));
    }
    Ok(())
}

/// Validate a lot capacity (1..=1000 spots).
pub fn validate_lot_capacity(total_spots: i64) -> Result<(), AppError> {
    if !(MIN_LOT_SPOTS..=MAX_LOT_SPOTS).contains(&total_spots) {
        return Err(AppError::validation(format!(
            "total_spots must be between {MIN_LOT_SPOTS} and {MAX_LOT_SPOTS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("ok", "field", 10).is_ok());
        assert!(validate_required_text("   ", "field", 10).is_err());
        assert!(validate_required_text("toolongvalue", "field", 5).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "field", 5).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "field", 5).is_ok());
        assert!(validate_optional_text(&Some("toolong".into()), "field", 5).is_err());
    }

    #[test]
    fn test_name() {
        assert!(validate_name("John Doe").is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_limits_count_chars_not_bytes() {
        // 60 CJK chars are 180 bytes but still within the 100-char limit
        assert!(validate_name(&"张".repeat(60)).is_ok());
        assert!(validate_name(&"张".repeat(101)).is_err());
        assert!(validate_optional_text(&Some("停车场".into()), "field", 3).is_ok());
        assert!(validate_password(&"密".repeat(6)).is_ok());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("us er@example.com").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("1234567890123456").is_err());
        assert!(validate_phone("12345abcde").is_err());
    }

    #[test]
    fn test_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_vehicle_number() {
        assert!(validate_vehicle_number("KA-01-AB-1234").is_ok());
        assert!(validate_vehicle_number("ABC 123").is_ok());
        assert!(validate_vehicle_number("lowercase").is_err());
        assert!(validate_vehicle_number("BAD*CHARS").is_err());
        assert!(validate_vehicle_number("").is_err());
    }

    #[test]
    fn test_lot_capacity() {
        assert!(validate_lot_capacity(1).is_ok());
        assert!(validate_lot_capacity(1000).is_ok());
        assert!(validate_lot_capacity(0).is_err());
        assert!(validate_lot_capacity(1001).is_err());
    }
}
