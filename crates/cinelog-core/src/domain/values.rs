//! Primitive value objects
//!
//! Immutable wrappers around raw scalars that validate exactly once, at
//! construction. A value that fails its rule never exists; there is no
//! partially-valid state to observe. The `from_json` constructors are the
//! untyped boundary with server payloads: they check the JSON kind first
//! (wrong kind is a [`DomainError::Type`]) and then run the same format
//! rules as the plain constructors.

use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use serde_json::Value;

use super::error::{DomainError, DomainResult};

fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\w\d]+(?:\s[\w\d]+)*$").expect("invalid token pattern"))
}

fn director_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z]+(?:\s[a-zA-Z]+'?[a-zA-Z]*)*$").expect("invalid director pattern")
    })
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\w\d.]+@\w+\.\w+$").expect("invalid email pattern"))
}

fn username_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\w\d_]+$").expect("invalid username pattern"))
}

fn image_url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https://image\.tmdb\.org/t/p/w500/[a-zA-Z\d]{27}\.jpg$")
            .expect("invalid image url pattern")
    })
}

/// Movie title: 1 to 50 characters of single-spaced word tokens
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let len = value.chars().count();
        if !(1..=50).contains(&len) {
            return Err(DomainError::format(
                "title",
                "must be between 1 and 50 characters long",
            ));
        }
        if !token_pattern().is_match(&value) {
            return Err(DomainError::format(
                "title",
                "must be single-spaced words without punctuation",
            ));
        }
        Ok(Self(value))
    }

    pub fn from_json(value: &Value) -> DomainResult<Self> {
        match value.as_str() {
            Some(s) => Self::new(s),
            None => Err(DomainError::type_failure("title", "a string")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Movie description: 1 to 200 characters, same token shape as [`Title`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let len = value.chars().count();
        if !(1..=200).contains(&len) {
            return Err(DomainError::format(
                "description",
                "must be between 1 and 200 characters long",
            ));
        }
        if !token_pattern().is_match(&value) {
            return Err(DomainError::format(
                "description",
                "must be single-spaced words without punctuation",
            ));
        }
        Ok(Self(value))
    }

    pub fn from_json(value: &Value) -> DomainResult<Self> {
        match value.as_str() {
            Some(s) => Self::new(s),
            None => Err(DomainError::type_failure("description", "a string")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Release year, 1900 through the current calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(i32);

impl Year {
    pub fn new(value: i32) -> DomainResult<Self> {
        let current = Utc::now().year();
        if value < 1900 || value > current {
            return Err(DomainError::format(
                "year",
                format!("must be between 1900 and {current}"),
            ));
        }
        Ok(Self(value))
    }

    /// Parse from text input, then range-check
    ///
    /// Non-numeric text is a wrong-kind input, not a range violation.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let value = input
            .trim()
            .parse::<i32>()
            .map_err(|_| DomainError::type_failure("year", "an integer"))?;
        Self::new(value)
    }

    pub fn from_json(value: &Value) -> DomainResult<Self> {
        match value.as_i64() {
            Some(n) => i32::try_from(n)
                .map_err(|_| {
                    DomainError::format("year", "must be between 1900 and the current year")
                })
                .and_then(Self::new),
            None => Err(DomainError::type_failure("year", "an integer")),
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog identifier, any non-negative integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(i64);

impl Id {
    pub fn new(value: i64) -> DomainResult<Self> {
        if value < 0 {
            return Err(DomainError::format(
                "id",
                "must be greater than or equal to 0",
            ));
        }
        Ok(Self(value))
    }

    pub fn parse(input: &str) -> DomainResult<Self> {
        let value = input
            .trim()
            .parse::<i64>()
            .map_err(|_| DomainError::type_failure("id", "an integer"))?;
        Self::new(value)
    }

    pub fn from_json(value: &Value) -> DomainResult<Self> {
        match value.as_i64() {
            Some(n) => Self::new(n),
            None => Err(DomainError::type_failure("id", "an integer")),
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Director name: 3 to 100 characters of letters with single internal
/// spaces; a name token may carry one apostrophe-joined suffix ("O'Brien").
/// No digits, no leading or trailing space, no other punctuation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Director(String);

impl Director {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let len = value.chars().count();
        if !(3..=100).contains(&len) {
            return Err(DomainError::format(
                "director",
                "must be between 3 and 100 characters long",
            ));
        }
        if !director_pattern().is_match(&value) {
            return Err(DomainError::format(
                "director",
                "can contain only letters, single spaces and an apostrophe",
            ));
        }
        Ok(Self(value))
    }

    pub fn from_json(value: &Value) -> DomainResult<Self> {
        match value.as_str() {
            Some(s) => Self::new(s),
            None => Err(DomainError::type_failure("director", "a string")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Director {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address, at most 200 characters
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.chars().count() > 200 || !email_pattern().is_match(&value) {
            return Err(DomainError::format(
                "email",
                "must be a valid email address",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account name: 1 to 30 characters of letters, digits and underscores
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let len = value.chars().count();
        if !(1..=30).contains(&len) || !username_pattern().is_match(&value) {
            return Err(DomainError::format(
                "username",
                "must be between 1 and 30 characters of letters, numbers and underscores",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login password
///
/// 8 to 30 characters with at least one lowercase letter, one uppercase
/// letter, one digit and one non-alphanumeric character. The four character
/// classes are separate predicates rather than one pattern, so rule-by-rule
/// feedback stays derivable; today a violation reports the whole rule.
/// `Debug` redacts the value; `Display` is the lossless raw form used on
/// the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

fn has_lowercase(value: &str) -> bool {
    value.chars().any(char::is_lowercase)
}

fn has_uppercase(value: &str) -> bool {
    value.chars().any(char::is_uppercase)
}

fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

fn has_special(value: &str) -> bool {
    value.chars().any(|c| !c.is_alphanumeric())
}

impl Password {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let len = value.chars().count();
        if !(8..=30).contains(&len)
            || !has_lowercase(&value)
            || !has_uppercase(&value)
            || !has_digit(&value)
            || !has_special(&value)
        {
            return Err(DomainError::format(
                "password",
                "must be 8 to 30 characters with at least one uppercase letter, \
                 one lowercase letter, one digit and one special character",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Poster URL on the TMDB CDN
///
/// At most 200 characters and bit-exact against the one external wire
/// format this layer depends on:
/// `https://image.tmdb.org/t/p/w500/<27 alphanumeric chars>.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.chars().count() > 200 || !image_url_pattern().is_match(&value) {
            return Err(DomainError::format(
                "image_url",
                "must be a TMDB poster URL like \
                 https://image.tmdb.org/t/p/w500/abcdefghiABCDEFGH0123456789.jpg",
            ));
        }
        Ok(Self(value))
    }

    pub fn from_json(value: &Value) -> DomainResult<Self> {
        match value.as_str() {
            Some(s) => Self::new(s),
            None => Err(DomainError::type_failure("image_url", "a string")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const POSTER: &str = "https://image.tmdb.org/t/p/w500/6KErczPBROQty7QoIsaa6wJYXZi.jpg";

    #[test]
    fn test_title_accepts_single_spaced_words() {
        let longest = "a".repeat(50);
        for value in ["A", "The Godfather", "Blade Runner 2049", longest.as_str()] {
            let title = Title::new(value).unwrap();
            assert_eq!(title.as_str(), value);
            assert_eq!(title.to_string(), value);
        }
    }

    #[test]
    fn test_title_rejects_bad_lengths_and_spacing() {
        let too_long = "a".repeat(51);
        for value in [
            "",
            too_long.as_str(),
            " leading",
            "trailing ",
            "double  space",
            "semi;colon",
        ] {
            let err = Title::new(value).unwrap_err();
            assert!(err.is_format_failure(), "{value:?} should be a format failure");
        }
    }

    #[test]
    fn test_title_rejects_wrong_json_kinds() {
        for value in [json!(5), json!(["list"]), json!(null), json!({"t": 1})] {
            let err = Title::from_json(&value).unwrap_err();
            assert!(err.is_type_failure(), "{value} should be a type failure");
        }
    }

    #[test]
    fn test_title_revalidates_its_own_canonical_form() {
        let first = Title::new("The Godfather").unwrap();
        let second = Title::new(first.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_description_bounds() {
        assert!(Description::new("d").is_ok());
        assert!(Description::new("a".repeat(200)).is_ok());
        assert!(Description::new("").unwrap_err().is_format_failure());
        assert!(Description::new("a".repeat(201)).unwrap_err().is_format_failure());
    }

    #[test]
    fn test_year_range() {
        let current = Utc::now().year();
        assert_eq!(Year::new(1900).unwrap().value(), 1900);
        assert_eq!(Year::new(current).unwrap().value(), current);
        assert!(Year::new(1899).unwrap_err().is_format_failure());
        assert!(Year::new(current + 1).unwrap_err().is_format_failure());
    }

    #[test]
    fn test_year_parse_distinguishes_kinds() {
        assert_eq!(Year::parse(" 1984 ").unwrap().value(), 1984);
        assert!(Year::parse("MCMLXXXIV").unwrap_err().is_type_failure());
        assert!(Year::parse("1800").unwrap_err().is_format_failure());
    }

    #[test]
    fn test_year_from_json() {
        assert_eq!(Year::from_json(&json!(2020)).unwrap().value(), 2020);
        assert!(Year::from_json(&json!("2020")).unwrap_err().is_type_failure());
        assert!(Year::from_json(&json!(10_000_000_000_i64)).unwrap_err().is_format_failure());
    }

    #[test]
    fn test_id_is_non_negative() {
        assert_eq!(Id::new(0).unwrap().value(), 0);
        assert_eq!(Id::new(42).unwrap().value(), 42);
        assert!(Id::new(-1).unwrap_err().is_format_failure());
        assert!(Id::parse("7").is_ok());
        assert!(Id::parse("seven").unwrap_err().is_type_failure());
    }

    #[test]
    fn test_director_names() {
        assert!(Director::new("A director").is_ok());
        assert!(Director::new("A director's").is_ok());
        assert!(Director::new("Bob").is_ok());
        assert!(Director::new("A dir3ctor").unwrap_err().is_format_failure());
        assert!(Director::new(" A director").unwrap_err().is_format_failure());
        assert!(Director::new("A director ").unwrap_err().is_format_failure());
        assert!(Director::new("A  director").unwrap_err().is_format_failure());
        assert!(Director::new("Jr").unwrap_err().is_format_failure());
    }

    #[test]
    fn test_email_shape() {
        assert!(Email::new("user.name@example.com").is_ok());
        assert!(Email::new("not-an-email").unwrap_err().is_format_failure());
        assert!(Email::new("two@at@signs.com").unwrap_err().is_format_failure());
        let long_local = format!("{}@example.com", "a".repeat(200));
        assert!(Email::new(long_local).unwrap_err().is_format_failure());
    }

    #[test]
    fn test_username_charset() {
        assert!(Username::new("movie_fan_99").is_ok());
        assert!(Username::new("").unwrap_err().is_format_failure());
        assert!(Username::new("a".repeat(31)).unwrap_err().is_format_failure());
        assert!(Username::new("spaced name").unwrap_err().is_format_failure());
    }

    #[test]
    fn test_password_requires_all_four_classes() {
        assert!(Password::new("aA1@bcdefgh").is_ok());
        assert!(Password::new("aA1bcdefgh").unwrap_err().is_format_failure());
        assert!(Password::new("AAA1@BCDEFGH").unwrap_err().is_format_failure());
        assert!(Password::new("aaa1@bcdefgh").unwrap_err().is_format_failure());
        assert!(Password::new("aAx@bcdefgh").unwrap_err().is_format_failure());
        assert!(Password::new("aA1@bcd").unwrap_err().is_format_failure());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("aA1@bcdefgh").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
        assert_eq!(password.to_string(), "aA1@bcdefgh");
    }

    #[test]
    fn test_image_url_hash_length_is_exact() {
        assert!(ImageUrl::new(POSTER).is_ok());

        let short = "https://image.tmdb.org/t/p/w500/6KErczPBROQty7QoIsaa6wJYXZ.jpg";
        let long = "https://image.tmdb.org/t/p/w500/6KErczPBROQty7QoIsaa6wJYXZii.jpg";
        assert!(ImageUrl::new(short).unwrap_err().is_format_failure());
        assert!(ImageUrl::new(long).unwrap_err().is_format_failure());
        assert!(ImageUrl::new("https://elsewhere.example/poster.jpg")
            .unwrap_err()
            .is_format_failure());
    }
}
