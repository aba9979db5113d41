#![allow(dead_code)]

use rotorcrack::alphabet::{self, Letter};
use rotorcrack::error::CrResult;
use rotorcrack::machine::{
    CipherOracle, EnigmaMachine, MachineConfiguration, Plugboard, ReflectorId, RotorSlotConfig,
};
use rotorcrack::scorer::{loader, TrigramTable};

pub const PLAINTEXT: &str = include_str!("../data/plaintext.txt");

/// The first `n` letters of the English fixture.
pub fn english(n: usize) -> Vec<Letter> {
    let mut text = alphabet::sanitize(PLAINTEXT);
    assert!(text.len() >= n, "fixture holds only {} letters", text.len());
    text.truncate(n);
    text
}

pub fn trigrams() -> TrigramTable {
    loader::load_trigrams_from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/data/english_trigrams.txt"
    ))
    .unwrap()
}

pub fn slot(s: &str) -> RotorSlotConfig {
    s.parse().unwrap()
}

pub fn key(slots: [&str; 4], reflector: ReflectorId, plugboard: &str) -> MachineConfiguration {
    MachineConfiguration::new(slots.map(slot), reflector)
        .with_plugboard(Plugboard::parse(plugboard).unwrap())
}

/// A key whose free slots sit inside the default pools and whose slot 2 is
/// equivalent to the default baseline, so both rotor stages have a signal.
pub fn recoverable_key(plugboard: &str) -> MachineConfiguration {
    key(
        ["Gamma:K:5", "I:F:5", "IV:B:1", "III:Q:16"],
        ReflectorId::CThin,
        plugboard,
    )
}

pub fn encipher(config: &MachineConfiguration, text: &[Letter]) -> Vec<Letter> {
    EnigmaMachine::new().encode(config, text).unwrap()
}

/// Oracle whose decode IC is scripted by the plugboard alone: the output
/// starts with `SCRIPT_BASE + weight(board)` copies of `A` and cycles `B..Z`
/// after that. On 200+ letters IC then rises strictly with the weight.
pub const SCRIPT_BASE: usize = 40;

pub struct ScriptedOracle<F: Fn(&Plugboard) -> usize + Sync> {
    pub weight: F,
}

fn scripted_output(len: usize, weight: usize) -> Vec<Letter> {
    let a = (SCRIPT_BASE + weight).min(len);
    (0..len)
        .map(|i| {
            if i < a {
                Letter::A
            } else {
                Letter::from_index(1 + (i - a) % 25)
            }
        })
        .collect()
}

impl<F: Fn(&Plugboard) -> usize + Sync> CipherOracle for ScriptedOracle<F> {
    fn encode(&self, config: &MachineConfiguration, text: &[Letter]) -> CrResult<Vec<Letter>> {
        Ok(scripted_output(text.len(), (self.weight)(&config.plugboard)))
    }
}

/// Same output shape as [`ScriptedOracle`], weighted by the whole key.
pub struct KeyedOracle<F: Fn(&MachineConfiguration) -> usize + Sync> {
    pub weight: F,
}

impl<F: Fn(&MachineConfiguration) -> usize + Sync> CipherOracle for KeyedOracle<F> {
    fn encode(&self, config: &MachineConfiguration, text: &[Letter]) -> CrResult<Vec<Letter>> {
        Ok(scripted_output(text.len(), (self.weight)(config)))
    }
}

/// Baseline key for oracle tests that ignore the rotors.
pub fn any_key() -> MachineConfiguration {
    key(
        ["Beta:A:0", "I:B:1", "IV:B:1", "III:Q:16"],
        ReflectorId::CThin,
        "",
    )
}
