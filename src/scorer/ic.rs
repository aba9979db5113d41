use crate::alphabet::{Letter, ALPHABET_LEN};
use crate::error::{CrResult, CrackError};

/// IC of English prose, measured once over "The Count of Monte Cristo".
pub const ENGLISH_IC: f64 = 0.06577359255736807;

/// IC of uniformly random text over 26 symbols.
pub const RANDOM_IC: f64 = 1.0 / ALPHABET_LEN as f64;

#[inline(always)]
pub fn letter_frequencies(text: &[Letter]) -> [u64; ALPHABET_LEN] {
    let mut counts = [0u64; ALPHABET_LEN];
    for l in text {
        counts[l.index()] += 1;
    }
    counts
}

/// Probability that two letters drawn without replacement from `text` match.
///
/// Fails with [`CrackError::InsufficientText`] below two letters instead of
/// returning NaN.
pub fn index_of_coincidence(text: &[Letter]) -> CrResult<f64> {
    let n = text.len();
    if n < 2 {
        return Err(CrackError::InsufficientText { len: n });
    }
    let sum: u64 = letter_frequencies(text)
        .iter()
        .map(|&f| f * f.saturating_sub(1))
        .sum();
    let n = n as f64;
    Ok(sum as f64 / (n * (n - 1.0)))
}
