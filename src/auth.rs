//! Guardian PIN gate for privileged operations.
//!
//! This is a household convenience lock, not a security boundary: the PIN is
//! a plain 4-digit string kept in the settings file.

use thiserror::Error;

pub const DEFAULT_GUARDIAN_PIN: &str = "1234";

/// Proof that the caller entered the guardian PIN. Only [`verify_guardian_pin`]
/// can create one.
#[must_use = "the guardian PIN must be checked before a privileged mutation"]
#[derive(Debug)]
pub struct GuardianPass {
    _private: (),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("guardian PIN does not match")]
    WrongPin,
}

pub fn verify_guardian_pin(expected: &str, candidate: &str) -> Result<GuardianPass, AuthError> {
    if candidate.trim() == expected {
        Ok(GuardianPass { _private: () })
    } else {
        log::warn!("event=guardian_check status=denied");
        Err(AuthError::WrongPin)
    }
}

pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_pin_grants_a_pass() {
        assert!(verify_guardian_pin("1234", "1234").is_ok());
        assert!(verify_guardian_pin("1234", " 1234 ").is_ok());
    }

    #[test]
    fn wrong_pin_is_denied() {
        assert_eq!(
            verify_guardian_pin("1234", "4321").unwrap_err(),
            AuthError::WrongPin
        );
        assert!(verify_guardian_pin("1234", "").is_err());
    }

    #[test]
    fn pins_are_exactly_four_digits() {
        assert!(is_valid_pin("0000"));
        assert!(!is_valid_pin("123"));
        assert!(!is_valid_pin("12a4"));
        assert!(!is_valid_pin("12345"));
    }
}
