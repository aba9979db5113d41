pub mod ic;
pub mod loader;
pub mod trigrams;

pub use self::ic::{index_of_coincidence, letter_frequencies, ENGLISH_IC, RANDOM_IC};
pub use self::trigrams::{trigram_score, TrigramTable};

use crate::alphabet::Letter;
use crate::error::CrResult;
use serde::Serialize;

/// Both statistics for one text, as shown by the reports.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TextStats {
    pub letters: usize,
    pub ic: f64,
    pub trigram_score: u64,
}

impl TextStats {
    pub fn measure(text: &[Letter], table: &TrigramTable) -> CrResult<Self> {
        Ok(Self {
            letters: text.len(),
            ic: index_of_coincidence(text)?,
            trigram_score: trigram_score(text, table),
        })
    }
}
