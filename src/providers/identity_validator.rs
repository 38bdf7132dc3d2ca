use std::sync::LazyLock;
use regex::Regex;
use crate::errors::internal::ValidationError;

static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9!@#$%^&*+]{8,}$").expect("valid password regex"));
static USER_ID_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{3,18}$").expect("valid user id regex"));
static PRODUCT_NAME_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 ]{3,50}$").expect("valid product name regex"));

const SPECIAL_CHARS: &str = "!@#$%^&*+";

/// At least 8 characters from the allowed set, with a letter, a digit and a special character
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if !PASSWORD_CHARSET.is_match(password) {
        return Err(ValidationError::InvalidPassword(
            "must be at least 8 characters of letters, digits and !@#$%^&*+",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidPassword("must contain a letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPassword("must contain a digit"));
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(ValidationError::InvalidPassword("must contain one of !@#$%^&*+"));
    }
    Ok(())
}

/// 3 to 18 ASCII letters or digits
pub fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if USER_ID_FORMAT.is_match(user_id) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUserId)
    }
}

/// 3 to 50 ASCII letters, digits or spaces
pub fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    if PRODUCT_NAME_FORMAT.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidProductName)
    }
}

pub fn validate_price(price: i64) -> Result<(), ValidationError> {
    if price < 0 {
        return Err(ValidationError::NegativePrice(price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_passwords() {
        for password in ["Abc12345!", "pwmaster01++", "a1!a1!a1!", "ZZZZZZZ9^"] {
            assert!(validate_password(password).is_ok(), "{} should be valid", password);
        }
    }

    #[test]
    fn test_invalid_passwords() {
        let cases = [
            "Ab1!",           // too short
            "Abc12345",       // no special
            "Abcdefgh!",      // no digit
            "12345678!",      // no letter
            "Abc 12345!",     // space not allowed
            "Abc12345!?",     // '?' not allowed
            "",
        ];
        for password in cases {
            assert!(validate_password(password).is_err(), "{:?} should be rejected", password);
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        for input in ["Abc12345!", "short"] {
            assert_eq!(validate_password(input), validate_password(input));
            assert_eq!(validate_user_id(input), validate_user_id(input));
        }
    }

    #[test]
    fn test_user_id_format() {
        assert!(validate_user_id("u1x").is_ok());
        assert!(validate_user_id("master01").is_ok());
        assert!(validate_user_id("abcdefghijklmnopqr").is_ok());

        assert_eq!(validate_user_id("ab"), Err(ValidationError::InvalidUserId));
        assert_eq!(validate_user_id("abcdefghijklmnopqrs"), Err(ValidationError::InvalidUserId));
        assert_eq!(validate_user_id("user_1"), Err(ValidationError::InvalidUserId));
        assert_eq!(validate_user_id("user 1"), Err(ValidationError::InvalidUserId));
    }

    #[test]
    fn test_product_name_format() {
        assert!(validate_product_name("Desk Lamp 2").is_ok());
        assert!(validate_product_name("abc").is_ok());
        assert!(validate_product_name(&"x".repeat(50)).is_ok());

        assert!(validate_product_name("ab").is_err());
        assert!(validate_product_name(&"x".repeat(51)).is_err());
        assert!(validate_product_name("Lamp-2").is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(500).is_ok());
        assert_eq!(validate_price(-1), Err(ValidationError::NegativePrice(-1)));
    }
}
