use crate::alphabet::{Letter, ALPHABET_LEN};

const TABLE_SIZE: usize = ALPHABET_LEN * ALPHABET_LEN * ALPHABET_LEN;

#[inline(always)]
fn slot(a: Letter, b: Letter, c: Letter) -> usize {
    (a.index() * ALPHABET_LEN + b.index()) * ALPHABET_LEN + c.index()
}

/// Weights for 3-letter sequences. Read-only once built.
///
/// Stored densely (26^3 entries) so that scoring is a single pass over the
/// text regardless of how many trigrams the corpus lists.
#[derive(Clone)]
pub struct TrigramTable {
    weights: Vec<u64>,
    // Listed keys, so a zero weight still counts as an entry.
    listed: Vec<bool>,
    entries: usize,
}

impl Default for TrigramTable {
    fn default() -> Self {
        Self {
            weights: vec![0; TABLE_SIZE],
            listed: vec![false; TABLE_SIZE],
            entries: 0,
        }
    }
}

impl std::fmt::Debug for TrigramTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrigramTable")
            .field("entries", &self.entries)
            .finish()
    }
}

impl TrigramTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight of `trigram`; a repeated key overwrites the earlier one.
    pub fn insert(&mut self, trigram: [Letter; 3], weight: u64) {
        let idx = slot(trigram[0], trigram[1], trigram[2]);
        if !self.listed[idx] {
            self.listed[idx] = true;
            self.entries += 1;
        }
        self.weights[idx] = weight;
    }

    pub fn get(&self, trigram: [Letter; 3]) -> Option<u64> {
        let idx = slot(trigram[0], trigram[1], trigram[2]);
        self.listed[idx].then(|| self.weights[idx])
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    #[inline(always)]
    fn weight_at(&self, idx: usize) -> u64 {
        self.weights[idx]
    }
}

impl FromIterator<([Letter; 3], u64)> for TrigramTable {
    fn from_iter<I: IntoIterator<Item = ([Letter; 3], u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (k, w) in iter {
            table.insert(k, w);
        }
        table
    }
}

/// Sum over every listed trigram of (overlapping occurrences in `text`) × weight.
/// Saturates at `u64::MAX`.
pub fn trigram_score(text: &[Letter], table: &TrigramTable) -> u64 {
    if table.is_empty() {
        return 0;
    }
    text.windows(3)
        .map(|w| table.weight_at(slot(w[0], w[1], w[2])))
        .fold(0u64, u64::saturating_add)
}
