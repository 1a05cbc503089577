use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref SECTION: Regex = Regex::new(r"^[A-Z]$").unwrap();
}

pub const MIN_YEAR: u8 = 1;
pub const MAX_YEAR: u8 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Year must be between 1 and 5")]
    InvalidYear,
    #[error("Section must be a single uppercase letter")]
    InvalidSection,
}

/// Returns an error for the first field that is empty or only whitespace
pub fn validate_required<'a, I>(fields: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'static str, &'a str)>,
{
    match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(ValidationError::Required(name)),
        None => Ok(()),
    }
}

pub fn is_valid_year(year: u8) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

pub fn is_valid_section(section: &str) -> bool {
    SECTION.is_match(section)
}

/// Validates the academic profile fields of a student
pub fn validate_profile(year: u8, section: &str) -> Result<(), ValidationError> {
    if !is_valid_year(year) {
        return Err(ValidationError::InvalidYear);
    }

    if !is_valid_section(section) {
        return Err(ValidationError::InvalidSection);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn required_fields() {
        assert_eq!(
            validate_required([("username", "alice"), ("rollNumber", "  ")]),
            Err(ValidationError::Required("rollNumber"))
        );
        assert_eq!(validate_required([("username", "alice")]), Ok(()));
    }

    #[test]
    fn profile() {
        assert!(validate_profile(2, "A").is_ok());
        assert_eq!(validate_profile(0, "A"), Err(ValidationError::InvalidYear));
        assert_eq!(validate_profile(6, "A"), Err(ValidationError::InvalidYear));
        assert_eq!(validate_profile(2, "a"), Err(ValidationError::InvalidSection));
        assert_eq!(validate_profile(2, "AB"), Err(ValidationError::InvalidSection));
    }
}
