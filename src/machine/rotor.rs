use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Historic rotor identities. `Beta` and `Gamma` are the thin "greek" rotors
/// that only fit the leftmost, non-stepping slot of a four-rotor machine.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum RotorId {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
    Beta,
    Gamma,
}

impl RotorId {
    pub fn wiring(&self) -> &'static str {
        match self {
            Self::I => "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
            Self::II => "AJDKSIRUXBLHWTMCQGZNPYFVOE",
            Self::III => "BDFHJLCPRTXVZNYEIWGAKMUSQO",
            Self::IV => "ESOVPZJAYQUIRHXLNFTGKDCMWB",
            Self::V => "VZBRGITYUPSDNHLXAWMJQOFECK",
            Self::VI => "JPGVOUMFYQBENHZRDKASXLICTW",
            Self::VII => "NZJHGRCXMYSWBOUFAIVLPEKQDT",
            Self::VIII => "FKQHTLXOCBJSPDZRAMEWNIUYGV",
            Self::Beta => "LEYJVCNIXWPBQMDRTAKZGFUHOS",
            Self::Gamma => "FSOKANUERHMBTIYCWLQPZXVGJD",
        }
    }

    /// Window letters at which the rotor carries its left neighbour.
    pub fn notches(&self) -> &'static [u8] {
        match self {
            Self::I => &[16],                              // Q
            Self::II => &[4],                              // E
            Self::III => &[21],                            // V
            Self::IV => &[9],                              // J
            Self::V => &[25],                              // Z
            Self::VI | Self::VII | Self::VIII => &[25, 12], // Z, M
            Self::Beta | Self::Gamma => &[],
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum ReflectorId {
    #[strum(serialize = "B-thin")]
    #[serde(rename = "B-thin")]
    BThin,
    #[strum(serialize = "C-thin")]
    #[serde(rename = "C-thin")]
    CThin,
}

impl ReflectorId {
    pub fn wiring(&self) -> &'static str {
        match self {
            Self::BThin => "ENKQAUYWJICOPBLMDXZVFTHRGS",
            Self::CThin => "RDOBJNTKVEHMLFCWZAXGYIPSUQ",
        }
    }
}

pub(crate) fn wiring_table(wiring: &str) -> [u8; 26] {
    let mut table = [0u8; 26];
    for (slot, b) in table.iter_mut().zip(wiring.bytes()) {
        *slot = b - b'A';
    }
    table
}

pub(crate) fn inverse_table(forward: &[u8; 26]) -> [u8; 26] {
    let mut inverse = [0u8; 26];
    for (i, &out) in forward.iter().enumerate() {
        inverse[out as usize] = i as u8;
    }
    inverse
}
