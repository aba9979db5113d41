use crate::alphabet::{Letter, ALPHABET_LEN};
use crate::error::{CrResult, CrackError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most pairs a plugboard mapping may hold.
pub const MAX_PLUGBOARD_PAIRS: usize = 10;

/// An unordered pair of distinct letters, stored with the smaller letter first.
///
/// The derived ordering (first letter, then second) is the canonical
/// enumeration order used by the plugboard search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LetterPair {
    lo: Letter,
    hi: Letter,
}

impl LetterPair {
    pub fn new(a: Letter, b: Letter) -> CrResult<Self> {
        if a == b {
            return Err(CrackError::InvalidConfiguration(format!(
                "plug pair cannot connect '{}' to itself",
                a
            )));
        }
        Ok(if a < b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        })
    }

    /// Parses a two letter key such as `"AB"` (order irrelevant).
    pub fn parse(s: &str) -> CrResult<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => Self::new(Letter::parse(a)?, Letter::parse(b)?),
            _ => Err(CrackError::InvalidConfiguration(format!(
                "plug pair '{}' must be exactly two letters",
                s
            ))),
        }
    }

    /// Every pair of distinct letters, in canonical order (325 pairs).
    pub fn all() -> Vec<LetterPair> {
        let mut pairs = Vec::with_capacity(ALPHABET_LEN * (ALPHABET_LEN - 1) / 2);
        for a in 0..ALPHABET_LEN {
            for b in (a + 1)..ALPHABET_LEN {
                pairs.push(LetterPair {
                    lo: Letter::from_index(a),
                    hi: Letter::from_index(b),
                });
            }
        }
        pairs
    }

    #[inline(always)]
    pub fn first(&self) -> Letter {
        self.lo
    }

    #[inline(always)]
    pub fn second(&self) -> Letter {
        self.hi
    }

    #[inline(always)]
    pub fn contains(&self, l: Letter) -> bool {
        self.lo == l || self.hi == l
    }

    pub fn shares_letter(&self, other: &LetterPair) -> bool {
        self.contains(other.lo) || self.contains(other.hi)
    }

    /// Canonical key: both letters in sorted order, concatenated.
    pub fn key(&self) -> String {
        format!("{}{}", self.lo, self.hi)
    }
}

impl fmt::Display for LetterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.lo, self.hi)
    }
}

impl TryFrom<String> for LetterPair {
    type Error = CrackError;
    fn try_from(s: String) -> CrResult<Self> {
        Self::parse(&s)
    }
}

impl From<LetterPair> for String {
    fn from(p: LetterPair) -> Self {
        p.key()
    }
}

/// An ordered collection of disjoint letter pairs.
///
/// Every mutator refuses to create a state in which a letter appears twice or
/// the mapping exceeds [`MAX_PLUGBOARD_PAIRS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LetterPair>", into = "Vec<LetterPair>")]
pub struct Plugboard {
    pairs: Vec<LetterPair>,
}

impl Plugboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I: IntoIterator<Item = LetterPair>>(pairs: I) -> CrResult<Self> {
        let mut board = Self::new();
        for p in pairs {
            board.try_insert(p)?;
        }
        Ok(board)
    }

    /// Parses `"AB CD"` or `"AB,CD"`; an empty string is an empty board.
    pub fn parse(s: &str) -> CrResult<Self> {
        let pairs = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(LetterPair::parse)
            .collect::<CrResult<Vec<_>>>()?;
        Self::from_pairs(pairs)
    }

    pub fn pairs(&self) -> &[LetterPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.pairs.len() >= MAX_PLUGBOARD_PAIRS
    }

    /// Position of the pair that uses `l`, if any.
    pub fn position_of(&self, l: Letter) -> Option<usize> {
        self.pairs.iter().position(|p| p.contains(l))
    }

    pub fn uses(&self, l: Letter) -> bool {
        self.position_of(l).is_some()
    }

    fn check_free(&self, pair: LetterPair, ignore: &[usize]) -> CrResult<()> {
        for (i, p) in self.pairs.iter().enumerate() {
            if !ignore.contains(&i) && p.shares_letter(&pair) {
                return Err(CrackError::InvalidConfiguration(format!(
                    "plug pair {} conflicts with {}",
                    pair, p
                )));
            }
        }
        Ok(())
    }

    pub fn try_insert(&mut self, pair: LetterPair) -> CrResult<()> {
        self.try_insert_at(self.pairs.len(), pair)
    }

    pub fn try_insert_at(&mut self, idx: usize, pair: LetterPair) -> CrResult<()> {
        if self.is_full() {
            return Err(CrackError::InvalidConfiguration(format!(
                "plugboard already holds {} pairs",
                MAX_PLUGBOARD_PAIRS
            )));
        }
        self.check_free(pair, &[])?;
        self.pairs.insert(idx.min(self.pairs.len()), pair);
        Ok(())
    }

    /// Swaps the pair at `idx` for `pair`, returning the displaced pair.
    pub fn try_replace(&mut self, idx: usize, pair: LetterPair) -> CrResult<LetterPair> {
        if idx >= self.pairs.len() {
            return Err(CrackError::InvalidConfiguration(format!(
                "no plug pair at position {}",
                idx
            )));
        }
        self.check_free(pair, &[idx])?;
        Ok(std::mem::replace(&mut self.pairs[idx], pair))
    }

    pub fn remove(&mut self, idx: usize) -> Option<LetterPair> {
        (idx < self.pairs.len()).then(|| self.pairs.remove(idx))
    }

    /// Keeps the first `len` pairs.
    pub fn truncate(&mut self, len: usize) {
        self.pairs.truncate(len);
    }

    /// The letter substitution this board applies, indexed by letter.
    pub fn substitution(&self) -> [u8; ALPHABET_LEN] {
        let mut table = [0u8; ALPHABET_LEN];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for p in &self.pairs {
            table[p.first().index()] = p.second().index() as u8;
            table[p.second().index()] = p.first().index() as u8;
        }
        table
    }
}

impl TryFrom<Vec<LetterPair>> for Plugboard {
    type Error = CrackError;
    fn try_from(pairs: Vec<LetterPair>) -> CrResult<Self> {
        Self::from_pairs(pairs)
    }
}

impl From<Plugboard> for Vec<LetterPair> {
    fn from(board: Plugboard) -> Self {
        board.pairs
    }
}

impl fmt::Display for Plugboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.pairs.iter().map(|p| p.key()).collect();
        write!(f, "{}", keys.join(" "))
    }
}
