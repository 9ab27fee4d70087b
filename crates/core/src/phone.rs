//! Phone number value object.
//!
//! Rough E.164: a leading `+`, 7 to 15 digits, with spaces/dashes/dots and
//! parentheses tolerated as grouping. Carrier-grade validation belongs to the
//! identity provider, not here.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A validated phone number, stored in normalized `+<digits>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if !trimmed.starts_with('+') {
            return Err(DomainError::validation(format!(
                "phone number '{trimmed}' must start with '+'"
            )));
        }

        let mut digits = String::new();
        for c in trimmed[1..].chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if !matches!(c, ' ' | '-' | '.' | '(' | ')') {
                return Err(DomainError::validation(format!(
                    "phone number '{trimmed}' contains invalid character '{c}'"
                )));
            }
        }

        if !(7..=15).contains(&digits.len()) {
            return Err(DomainError::validation(format!(
                "phone number '{trimmed}' has the wrong number of digits"
            )));
        }

        Ok(Self(format!("+{digits}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for PhoneNumber {}

impl core::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes() {
        let phone = PhoneNumber::parse(" +1 (305) 555-0133 ").unwrap();
        assert_eq!(phone.as_str(), "+13055550133");
    }

    #[test]
    fn rejects_missing_plus() {
        let err = PhoneNumber::parse("3055550133").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_wrong_digit_count() {
        assert!(PhoneNumber::parse("+123").is_err());
        assert!(PhoneNumber::parse("+1234567890123456").is_err());
    }

    #[test]
    fn rejects_letters() {
        let err = PhoneNumber::parse("+1305CALLNOW").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("invalid character")),
            _ => panic!("Expected Validation error"),
        }
    }
}
