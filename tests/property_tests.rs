mod common;

use common::{any_key, ScriptedOracle};
use proptest::prelude::*;
use rotorcrack::alphabet::Letter;
use rotorcrack::machine::{
    CipherOracle, EnigmaMachine, LetterPair, MachineConfiguration, Plugboard, ReflectorId,
    RotorId, RotorSlotConfig,
};
use rotorcrack::optimizer::{PlugboardSearch, SearchContext};
use rotorcrack::scorer::index_of_coincidence;
use std::collections::HashSet;

// --- STRATEGIES ---

prop_compose! {
    fn arb_letters(min: usize, max: usize)(v in prop::collection::vec(0usize..26, min..max)) -> Vec<Letter> {
        v.into_iter().map(Letter::from_index).collect()
    }
}

prop_compose! {
    fn arb_slot(pool: &'static [RotorId])(
        id in prop::sample::select(pool),
        ring in 0u8..26,
        start in 0usize..26
    ) -> RotorSlotConfig {
        RotorSlotConfig::new(id, ring, Letter::from_index(start))
    }
}

prop_compose! {
    /// Up to ten disjoint pairs from a shuffled alphabet.
    fn arb_plugboard()(
        order in Just((0..26).collect::<Vec<usize>>()).prop_shuffle(),
        n in 0usize..=10
    ) -> Plugboard {
        let pairs = order
            .chunks_exact(2)
            .take(n)
            .map(|c| LetterPair::new(Letter::from_index(c[0]), Letter::from_index(c[1])).unwrap());
        Plugboard::from_pairs(pairs).unwrap()
    }
}

const GREEK: &[RotorId] = &[RotorId::Beta, RotorId::Gamma];
const STEPPING: &[RotorId] = &[
    RotorId::I,
    RotorId::II,
    RotorId::III,
    RotorId::IV,
    RotorId::V,
    RotorId::VI,
    RotorId::VII,
    RotorId::VIII,
];

prop_compose! {
    fn arb_config()(
        s1 in arb_slot(GREEK),
        s2 in arb_slot(STEPPING),
        s3 in arb_slot(STEPPING),
        s4 in arb_slot(STEPPING),
        thin_b in any::<bool>(),
        plugboard in arb_plugboard()
    ) -> MachineConfiguration {
        let reflector = if thin_b { ReflectorId::BThin } else { ReflectorId::CThin };
        MachineConfiguration::new([s1, s2, s3, s4], reflector).with_plugboard(plugboard)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ic_is_a_probability(text in arb_letters(2, 400)) {
        let ic = index_of_coincidence(&text).unwrap();
        prop_assert!((0.0..=1.0).contains(&ic));
    }

    #[test]
    fn prop_ic_ignores_letter_order(mut text in arb_letters(2, 200)) {
        let before = index_of_coincidence(&text).unwrap();
        text.reverse();
        prop_assert_eq!(before, index_of_coincidence(&text).unwrap());
    }

    #[test]
    fn prop_encoding_is_an_involution(config in arb_config(), text in arb_letters(0, 300)) {
        let m = EnigmaMachine::new();
        let cipher = m.encode(&config, &text).unwrap();
        prop_assert_eq!(cipher.len(), text.len());
        prop_assert_eq!(m.encode(&config, &cipher).unwrap(), text);
    }

    #[test]
    fn prop_plugboard_substitution_is_an_involution(board in arb_plugboard()) {
        let sub = board.substitution();
        for i in 0..26 {
            prop_assert_eq!(sub[sub[i] as usize] as usize, i);
        }
        let fixed = (0..26).filter(|&i| sub[i] as usize == i).count();
        prop_assert_eq!(fixed, 26 - 2 * board.len());
    }

    #[test]
    fn prop_climb_keeps_pairs_disjoint(
        favoured in prop::collection::vec(0usize..325, 0..12),
        capacity in 0usize..=10
    ) {
        let all = LetterPair::all();
        let favoured: HashSet<LetterPair> = favoured.into_iter().map(|i| all[i]).collect();
        let oracle = ScriptedOracle {
            weight: move |b: &Plugboard| b.pairs().iter().filter(|p| favoured.contains(p)).count() * 3,
        };
        let text = vec![Letter::A; 200];
        let ctx = SearchContext::new(&oracle, &text).unwrap();
        let base = any_key();
        let outcome = PlugboardSearch::new(&ctx, &base, capacity).hill_climb(&all).unwrap();

        prop_assert!(outcome.plugboard.len() <= capacity);
        let mut used = HashSet::new();
        for p in outcome.plugboard.pairs() {
            prop_assert!(used.insert(p.first()));
            prop_assert!(used.insert(p.second()));
        }
    }
}
