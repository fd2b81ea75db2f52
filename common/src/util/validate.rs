use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidateEmail, ValidationError};

/// Password strength: at least 8 characters with letters and digits.
pub fn validate_password(pwd: &str) -> Result<(), ValidationError> {
    if pwd.chars().count() < 8 {
        return Err(ValidationError::new("password.too.short"));
    }
    let has_letter = pwd.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = pwd.chars().any(|c| c.is_ascii_digit());

    if has_letter && has_digit { Ok(()) } else { Err(ValidationError::new("password.needs.letter.and.digit")) }
}

/// Phone number, digits with optional `+` prefix and dashes (`010-1234-5678`).
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9][0-9-]{6,19}$").expect("phone regex");
    }

    if PHONE_RE.is_match(phone) { Ok(()) } else { Err(ValidationError::new("phone.format")) }
}

pub fn validate_email_str(email: &str) -> Result<(), ValidationError> {
    if email.validate_email() { Ok(()) } else { Err(ValidationError::new("email.format")) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abcd1234", true)]
    #[case("abcdefgh", false)]
    #[case("1234567", false)]
    fn password_rules(#[case] pwd: &str, #[case] ok: bool) {
        assert_eq!(validate_password(pwd).is_ok(), ok);
    }

    #[rstest]
    #[case("010-1234-5678", true)]
    #[case("+821012345678", true)]
    #[case("phone", false)]
    fn phone_rules(#[case] phone: &str, #[case] ok: bool) {
        assert_eq!(validate_phone(phone).is_ok(), ok);
    }
}
