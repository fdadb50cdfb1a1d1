//! Single-token parsers for indices and person field values.

use super::ParseError;
use crate::index::Index;
use crate::model::fields::{Address, Email, Name, Phone, Relationship, Tag};
use crate::model::policy::Premium;
use std::collections::BTreeSet;

/// Parses a one-based index; leading and trailing whitespace is ignored.
pub fn parse_index(value: &str) -> Result<Index, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidIndex);
    }
    trimmed
        .parse::<i32>()
        .ok()
        .and_then(|one_based| usize::try_from(one_based).ok())
        .and_then(Index::from_one_based)
        .ok_or(ParseError::InvalidIndex)
}

pub fn parse_name(value: &str) -> Result<Name, ParseError> {
    Ok(Name::parse(value)?)
}

pub fn parse_phone(value: &str) -> Result<Phone, ParseError> {
    Ok(Phone::parse(value)?)
}

pub fn parse_email(value: &str) -> Result<Email, ParseError> {
    Ok(Email::parse(value)?)
}

pub fn parse_address(value: &str) -> Result<Address, ParseError> {
    Ok(Address::parse(value)?)
}

pub fn parse_relationship(value: &str) -> Result<Relationship, ParseError> {
    Ok(Relationship::parse(value)?)
}

pub fn parse_tag(value: &str) -> Result<Tag, ParseError> {
    Ok(Tag::parse(value)?)
}

pub fn parse_tags<'a>(values: impl IntoIterator<Item = &'a str>) -> Result<BTreeSet<Tag>, ParseError> {
    values.into_iter().map(parse_tag).collect()
}

pub fn parse_premium(value: &str) -> Result<Premium, ParseError> {
    Ok(Premium::parse(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fields::ValidationError;

    const WHITESPACE: &str = " \t\r\n";

    #[test]
    fn parse_index_accepts_positive_integers() {
        assert_eq!(parse_index("1").unwrap(), Index::from_zero_based(0));
        assert_eq!(parse_index("  1  ").unwrap(), Index::from_zero_based(0));
    }

    #[test]
    fn parse_index_rejects_garbage_zero_and_overflow() {
        for raw in ["10 a", "0", "-1", "", "2147483648"] {
            assert_eq!(parse_index(raw).unwrap_err(), ParseError::InvalidIndex, "raw `{raw}`");
        }
    }

    #[test]
    fn field_parsers_trim_whitespace() {
        let padded = format!("{WHITESPACE}Rachel Walker{WHITESPACE}");
        assert_eq!(parse_name(&padded).unwrap().as_str(), "Rachel Walker");
        let padded = format!("{WHITESPACE}rachel@example.com{WHITESPACE}");
        assert_eq!(parse_email(&padded).unwrap().as_str(), "rachel@example.com");
        assert_eq!(parse_relationship(" client ").unwrap().as_str(), "client");
    }

    #[test]
    fn field_parsers_surface_validation_errors() {
        assert_eq!(
            parse_phone("+651234").unwrap_err(),
            ParseError::InvalidValue(ValidationError::InvalidPhone)
        );
        assert!(parse_address(" ").is_err());
        assert!(parse_email("example.com").is_err());
        assert!(parse_relationship("123").is_err());
    }

    #[test]
    fn parse_tags_collects_a_set() {
        assert!(parse_tags(Vec::<&str>::new()).unwrap().is_empty());
        let tags = parse_tags(["friend", "neighbour", "friend"]).unwrap();
        assert_eq!(tags.len(), 2);
        assert!(parse_tags(["friend", "#friend"]).is_err());
    }
}
