use crate::machine::LetterPair;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Score per canonical plug pair. Iterates in canonical pair order.
pub type ScoreMap<S> = BTreeMap<LetterPair, S>;

/// Orders records best first: score descending, then pair key ascending.
fn sort_by_score_desc<S: PartialOrd>(entries: &mut [(LetterPair, S)]) {
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
}

pub fn ranked<S: PartialOrd + Copy>(scores: &ScoreMap<S>) -> Vec<(LetterPair, S)> {
    let mut entries: Vec<(LetterPair, S)> = scores.iter().map(|(k, v)| (*k, *v)).collect();
    sort_by_score_desc(&mut entries);
    entries
}

/// Pairs scoring at or above the mean, in canonical order.
pub fn at_or_above_mean(scores: &ScoreMap<f64>) -> Vec<LetterPair> {
    if scores.is_empty() {
        return Vec::new();
    }
    let mean = scores.values().sum::<f64>() / scores.len() as f64;
    scores
        .iter()
        .filter(|(_, &v)| v >= mean)
        .map(|(k, _)| *k)
        .collect()
}
