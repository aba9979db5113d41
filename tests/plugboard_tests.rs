mod common;

use common::{any_key, english, ScriptedOracle};
use rotorcrack::machine::{LetterPair, Plugboard, MAX_PLUGBOARD_PAIRS};
use rotorcrack::optimizer::plugboard::Move;
use rotorcrack::optimizer::{PlugboardSearch, SearchContext};
use rotorcrack::scorer::TrigramTable;
use rstest::rstest;
use std::collections::HashSet;

fn pair(s: &str) -> LetterPair {
    LetterPair::parse(s).unwrap()
}

fn board(s: &str) -> Plugboard {
    Plugboard::parse(s).unwrap()
}

/// Weight of a board: sum of the listed per-pair bonuses.
fn bonus(table: &'static [(&'static str, usize)]) -> impl Fn(&Plugboard) -> usize + Sync {
    move |b: &Plugboard| {
        b.pairs()
            .iter()
            .map(|p| {
                table
                    .iter()
                    .find(|(k, _)| *k == p.key())
                    .map_or(0, |(_, w)| *w)
            })
            .sum()
    }
}

/// Runs one step against `start` and returns the move and resulting board.
fn step_with(
    weight: impl Fn(&Plugboard) -> usize + Sync,
    start: &str,
    candidate: &str,
    capacity: usize,
) -> (Move, String) {
    let oracle = ScriptedOracle { weight };
    let text = english(200);
    let ctx = SearchContext::new(&oracle, &text).unwrap();
    let base = any_key();
    let search = PlugboardSearch::new(&ctx, &base, capacity);

    let mut b = board(start);
    let mut current = ctx.ic_of(&base.with_plugboard(b.clone())).unwrap();
    let mv = search.step(&mut b, &mut current, pair(candidate)).unwrap();
    (mv, b.to_string())
}

#[test]
fn test_empty_board_is_seeded() {
    let (mv, b) = step_with(|_: &Plugboard| 0, "", "AB", 10);
    assert_eq!(mv, Move::Seed);
    assert_eq!(b, "AB");
}

#[test]
fn test_free_pair_is_appended_even_if_worse() {
    let (mv, b) = step_with(bonus(&[("AB", 9)]), "AB", "CD", 10);
    assert_eq!(mv, Move::Append);
    assert_eq!(b, "AB CD");
}

#[rstest]
#[case::tie_is_accepted(&[], Some("AB"), "AC EF")]
#[case::better_is_accepted(&[("AC", 3)], Some("AB"), "AC EF")]
#[case::worse_is_rejected(&[("AB", 3)], None, "AB EF")]
fn test_single_conflict_replaces_in_place(
    #[case] weights: &'static [(&'static str, usize)],
    #[case] displaced: Option<&str>,
    #[case] expected: &str,
) {
    let (mv, b) = step_with(bonus(weights), "AB EF", "AC", 10);
    match displaced {
        Some(d) => assert_eq!(mv, Move::Replace { displaced: pair(d) }),
        None => assert_eq!(mv, Move::Rejected),
    }
    assert_eq!(b, expected);
}

#[test]
fn test_double_conflict_needs_strict_gain() {
    let (mv, b) = step_with(|_: &Plugboard| 0, "AB CD", "AC", 10);
    assert_eq!(mv, Move::Rejected);
    assert_eq!(b, "AB CD");
}

#[test]
fn test_double_conflict_merges_at_earlier_slot() {
    let (mv, b) = step_with(bonus(&[("BC", 7)]), "EF AB GH CD", "BC", 10);
    assert_eq!(
        mv,
        Move::Merge {
            displaced: (pair("AB"), pair("CD"))
        }
    );
    assert_eq!(b, "EF BC GH");
}

#[test]
fn test_full_board_discards_free_pairs() {
    let (mv, b) = step_with(bonus(&[("EF", 50)]), "AB CD", "EF", 2);
    assert_eq!(mv, Move::Skipped);
    assert_eq!(b, "AB CD");
}

#[test]
fn test_existing_pair_is_skipped() {
    let (mv, b) = step_with(|_: &Plugboard| 0, "AB CD", "CD", 10);
    assert_eq!(mv, Move::Skipped);
    assert_eq!(b, "AB CD");
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(10)]
#[case(25)]
fn test_climb_yields_disjoint_bounded_board(#[case] capacity: usize) {
    let oracle = ScriptedOracle {
        weight: bonus(&[("AQ", 4), ("BW", 3), ("CE", 5), ("QZ", 2), ("EW", 6)]),
    };
    let text = english(300);
    let ctx = SearchContext::new(&oracle, &text).unwrap();
    let base = any_key();
    let outcome = PlugboardSearch::new(&ctx, &base, capacity)
        .hill_climb(&LetterPair::all())
        .unwrap();

    let pairs = outcome.plugboard.pairs();
    assert!(pairs.len() <= capacity.min(MAX_PLUGBOARD_PAIRS));
    let mut seen = HashSet::new();
    for p in pairs {
        assert!(seen.insert(p.first()), "letter reused in {}", outcome.plugboard);
        assert!(seen.insert(p.second()), "letter reused in {}", outcome.plugboard);
    }
    if capacity > 0 {
        assert_eq!(outcome.accepted + outcome.rejected, 325);
    }
}

#[test]
fn test_prefilter_keeps_pairs_above_mean() {
    // Only pairs touching Z carry weight, so only they beat the mean.
    let oracle = ScriptedOracle {
        weight: |b: &Plugboard| b.pairs().iter().filter(|p| p.key().contains('Z')).count(),
    };
    let text = english(200);
    let ctx = SearchContext::new(&oracle, &text).unwrap();
    let base = any_key();
    let search = PlugboardSearch::new(&ctx, &base, 10);

    let scores = search.single_swap_scores(&LetterPair::all()).unwrap();
    assert_eq!(scores.len(), 325);

    let kept = search.prefilter(&LetterPair::all()).unwrap();
    assert_eq!(kept.len(), 25);
    assert!(kept.iter().all(|p| p.second().to_char() == 'Z'));
}

fn aaa_table() -> TrigramTable {
    let a = rotorcrack::alphabet::Letter::A;
    [([a, a, a], 1u64)].into_iter().collect()
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_refinement_fills_with_best_trigram_pairs(#[case] parallel: bool) {
    let oracle = ScriptedOracle {
        weight: bonus(&[("XY", 10), ("WX", 9), ("UV", 5), ("CD", 1)]),
    };
    let text = english(200);
    let ctx = SearchContext::new(&oracle, &text).unwrap().parallel(parallel);
    let base = any_key();
    let search = PlugboardSearch::new(&ctx, &base, 3);

    let refined = search
        .refine_with_trigrams(&board("AB CD EF"), &aaa_table(), 1)
        .unwrap();
    // CD is free again once only AB is kept, but XY and UV outscore it;
    // WX loses X to XY.
    assert_eq!(refined.to_string(), "AB XY UV");
}

#[test]
fn test_refinement_with_empty_table_is_a_no_op() {
    let oracle = ScriptedOracle {
        weight: bonus(&[("XY", 10)]),
    };
    let text = english(200);
    let ctx = SearchContext::new(&oracle, &text).unwrap();
    let base = any_key();
    let search = PlugboardSearch::new(&ctx, &base, 10);

    let start = board("AB CD EF GH IJ KL MN OP QR ST");
    let refined = search
        .refine_with_trigrams(&start, &TrigramTable::new(), 7)
        .unwrap();
    assert_eq!(refined, start);
    assert_eq!(ctx.oracle_calls(), 0);
}

#[test]
fn test_refinement_keeping_everything_is_a_no_op() {
    let oracle = ScriptedOracle {
        weight: bonus(&[("XY", 10)]),
    };
    let text = english(200);
    let ctx = SearchContext::new(&oracle, &text).unwrap();
    let base = any_key();
    let search = PlugboardSearch::new(&ctx, &base, 3);

    let refined = search
        .refine_with_trigrams(&board("AB CD"), &aaa_table(), 3)
        .unwrap();
    assert_eq!(refined.to_string(), "AB CD");
}
