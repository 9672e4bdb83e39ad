// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const NAME_MIN_LEN: usize = 2;

/// Required phone length. The admin panel issues local nine-digit numbers;
/// both the create and update paths validate against this one constant.
pub const PHONE_DIGIT_COUNT: usize = 9;

pub fn parse_name(input: &str) -> Result<String, ValidationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ValidationError("name must not be empty".to_string()));
    }
    if s.chars().count() < NAME_MIN_LEN {
        return Err(ValidationError(format!(
            "name must be at least {NAME_MIN_LEN} characters"
        )));
    }
    Ok(s.to_string())
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Normalizes to lowercase so uniqueness is case-insensitive.
pub fn normalize_email(input: &str) -> Result<String, ValidationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ValidationError("email must not be empty".to_string()));
    }
    if s.chars().any(char::is_whitespace) {
        return Err(ValidationError(
            "email must not contain whitespace".to_string(),
        ));
    }
    let (local, domain) = s
        .split_once('@')
        .ok_or_else(|| ValidationError("email must contain '@'".to_string()))?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ValidationError("email must be local@domain".to_string()));
    }
    let (host, tld) = domain
        .rsplit_once('.')
        .ok_or_else(|| ValidationError("email domain must contain '.'".to_string()))?;
    if host.is_empty() || tld.is_empty() || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError("email domain is malformed".to_string()));
    }
    Ok(s.to_ascii_lowercase())
}

pub fn parse_phone(input: &str) -> Result<String, ValidationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ValidationError("phone must not be empty".to_string()));
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError("phone must contain only digits".to_string()));
    }
    if s.len() != PHONE_DIGIT_COUNT {
        return Err(ValidationError(format!(
            "phone must be exactly {PHONE_DIGIT_COUNT} digits"
        )));
    }
    Ok(s.to_string())
}

pub fn parse_content(input: &str) -> Result<String, ValidationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ValidationError(
            "message content must not be empty".to_string(),
        ));
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_requires_two_characters_after_trim() {
        assert!(parse_name("  A  ").is_err());
        assert_eq!(parse_name(" Ana ").expect("valid name"), "Ana");
    }

    #[test]
    fn email_shape_is_enforced_and_lowercased() {
        assert_eq!(
            normalize_email("Ana@Example.COM").expect("valid email"),
            "ana@example.com"
        );
        for bad in ["", "ana", "ana@", "@x.com", "ana@com", "a na@x.com", "ana@x.com@y"] {
            assert!(normalize_email(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn phone_is_exactly_nine_digits() {
        assert!(parse_phone("123456789").is_ok());
        assert!(parse_phone("12345678").is_err());
        assert!(parse_phone("1234567890").is_err());
        assert!(parse_phone("12345678a").is_err());
    }

    #[test]
    fn content_rejects_whitespace_only() {
        assert!(parse_content("   ").is_err());
        assert_eq!(parse_content(" hi ").expect("valid content"), "hi");
    }
}
