use crate::error::{CrResult, CrackError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The fixed alphabet. Its order defines the total order on [`Letter`].
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of symbols in the alphabet.
pub const ALPHABET_LEN: usize = 26;

/// One of the 26 alphabet symbols, stored as its index (`A` = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Letter(u8);

impl Letter {
    pub const A: Letter = Letter(0);

    /// Builds a letter from its alphabet index, wrapping modulo 26.
    #[inline(always)]
    pub const fn from_index(idx: usize) -> Self {
        Letter((idx % ALPHABET_LEN) as u8)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Accepts `a..z` and `A..Z`.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Letter(c.to_ascii_uppercase() as u8 - b'A'))
        } else {
            None
        }
    }

    pub fn parse(c: char) -> CrResult<Self> {
        Self::from_char(c)
            .ok_or_else(|| CrackError::Config(format!("'{}' is not a letter", c)))
    }

    #[inline(always)]
    pub const fn to_char(self) -> char {
        (self.0 + b'A') as char
    }

    /// All letters in alphabet order.
    pub fn all() -> impl Iterator<Item = Letter> + Clone {
        (0..ALPHABET_LEN).map(Letter::from_index)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.to_char())
    }
}

impl<'de> Deserialize<'de> for Letter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let c = char::deserialize(deserializer)?;
        Letter::from_char(c).ok_or_else(|| serde::de::Error::custom(format!("bad letter '{}'", c)))
    }
}

/// Upper-cases the input and drops everything outside `A..Z`.
pub fn sanitize(text: &str) -> Vec<Letter> {
    text.chars().filter_map(Letter::from_char).collect()
}

/// Parses a string that must consist only of letters (case-insensitive).
pub fn parse_letters(text: &str) -> CrResult<Vec<Letter>> {
    text.chars().map(Letter::parse).collect()
}

pub fn to_string(text: &[Letter]) -> String {
    text.iter().map(|l| l.to_char()).collect()
}
