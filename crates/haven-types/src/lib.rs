//! Validated text types shared across the Haven workspace.
//!
//! Intake forms arrive as free-form JSON strings; these newtypes hold the
//! fields whose emptiness or shape would corrupt records downstream. Parsing
//! happens once at construction, so anything holding one of these types can
//! rely on the invariant.

/// Errors produced when constructing a validated text type.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input was empty or whitespace-only
    #[error("Text cannot be empty")]
    Empty,
    /// The input was not exactly one letter
    #[error("Expected a single letter")]
    NotALetter,
}

/// A trimmed string guaranteed to contain at least one visible character.
///
/// Used for the fields that must be present on every record: a referral's
/// first name and partner, a bed's display number and facility id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and wraps it, rejecting whitespace-only strings with
    /// `TextError::Empty`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A client's last initial: exactly one ASCII letter, stored uppercase.
///
/// Intake records keep only the initial of a client's last name. The input is
/// trimmed and upper-cased during construction, so `"d"` and `" D "` both
/// produce the initial `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastInitial(char);

impl LastInitial {
    /// Parses a single-letter string into an initial.
    ///
    /// Returns `TextError::Empty` for blank input and `TextError::NotALetter`
    /// when the trimmed input is more than one character or not an ASCII
    /// letter.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }

        let mut chars = trimmed.chars();
        let first = chars.next().ok_or(TextError::Empty)?;
        if chars.next().is_some() || !first.is_ascii_alphabetic() {
            return Err(TextError::NotALetter);
        }

        Ok(Self(first.to_ascii_uppercase()))
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl std::fmt::Display for LastInitial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for LastInitial {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for LastInitial {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LastInitial::new(&s).map_err(serde::de::Error::custom)
    }
}
