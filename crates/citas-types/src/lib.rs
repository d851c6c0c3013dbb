//! Validated text primitives shared across the Citas crates.
//!
//! These wrappers guarantee their invariant once constructed, so downstream code can accept a
//! `NonEmptyText` or an `EmailAddress` without re-checking it.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input is not a usable email address
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    /// The input is not a zero-padded 24-hour `HH:MM` time
    #[error("invalid time (expected HH:MM): {0}")]
    InvalidTime(String),
}

/// Text with at least one non-whitespace character, stored trimmed.
///
/// Required form fields are checked through this type, so "blank" means the same thing everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// # Errors
    ///
    /// `TextError::Empty` when nothing is left after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            kept => Ok(Self(kept.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An email address that passed the product's shape check.
///
/// The check is deliberately shallow: exactly one `@`, no whitespace anywhere, a non-empty local
/// part, and a domain containing a `.` with at least one character on each side of it. It says
/// nothing about deliverability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates `input` as-is (no trimming) and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for an empty input and `TextError::InvalidEmail` when the
    /// shape check fails.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let raw = input.as_ref();
        if raw.is_empty() {
            return Err(TextError::Empty);
        }
        if Self::is_well_formed(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(TextError::InvalidEmail(raw.to_owned()))
        }
    }

    /// Returns `true` if `raw` passes the shape check.
    pub fn is_well_formed(raw: &str) -> bool {
        if raw.chars().any(char::is_whitespace) {
            return false;
        }

        let mut parts = raw.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };
        if local.is_empty() {
            return false;
        }

        // Some dot with a character on both sides, e.g. `b.com` but not `b.` or `.com`.
        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + c.len_utf8() < domain.len())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A wall-clock time in zero-padded 24-hour `HH:MM` form.
///
/// Ordering follows the clock, which for this format is the same as comparing the strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl FromStr for ClockTime {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TextError::InvalidTime(s.to_owned());

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        if !bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit) {
            return Err(invalid());
        }

        let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(Self { hour, minute })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
