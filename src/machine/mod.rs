pub mod enigma;
pub mod plugboard;
pub mod rotor;

pub use self::enigma::EnigmaMachine;
pub use self::plugboard::{LetterPair, Plugboard, MAX_PLUGBOARD_PAIRS};
pub use self::rotor::{ReflectorId, RotorId};

use crate::alphabet::{Letter, ALPHABET_LEN};
use crate::error::{CrResult, CrackError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of rotor slots in the machine.
pub const SLOT_COUNT: usize = 4;

/// One rotor mounted in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotorSlotConfig {
    pub identity: RotorId,
    /// Ring setting, 0-based (0..=25).
    pub ring: u8,
    pub start: Letter,
}

impl RotorSlotConfig {
    pub fn new(identity: RotorId, ring: u8, start: Letter) -> Self {
        Self {
            identity,
            ring,
            start,
        }
    }

    pub fn validate(&self) -> CrResult<()> {
        if self.ring as usize >= ALPHABET_LEN {
            return Err(CrackError::InvalidConfiguration(format!(
                "ring setting {} of rotor {} is outside 0..=25",
                self.ring, self.identity
            )));
        }
        Ok(())
    }
}

/// Parses `ID:START:RING`, e.g. `III:Q:16`.
impl FromStr for RotorSlotConfig {
    type Err = CrackError;

    fn from_str(s: &str) -> CrResult<Self> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(CrackError::Config(format!(
                "rotor slot '{}' must look like ID:START:RING",
                s
            )));
        }
        let identity = RotorId::from_str(parts[0])
            .map_err(|_| CrackError::Config(format!("unknown rotor '{}'", parts[0])))?;
        let mut start_chars = parts[1].chars();
        let start = match (start_chars.next(), start_chars.next()) {
            (Some(c), None) => Letter::parse(c)?,
            _ => {
                return Err(CrackError::Config(format!(
                    "start position '{}' must be a single letter",
                    parts[1]
                )))
            }
        };
        let ring: u8 = parts[2]
            .parse()
            .map_err(|_| CrackError::Config(format!("ring setting '{}' is not a number", parts[2])))?;
        let slot = Self::new(identity, ring, start);
        slot.validate()?;
        Ok(slot)
    }
}

impl fmt::Display for RotorSlotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.identity, self.start, self.ring)
    }
}

/// A complete key for the machine: four rotors (left to right), the reflector
/// and the plugboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfiguration {
    pub slots: [RotorSlotConfig; SLOT_COUNT],
    pub reflector: ReflectorId,
    pub plugboard: Plugboard,
}

impl MachineConfiguration {
    pub fn new(slots: [RotorSlotConfig; SLOT_COUNT], reflector: ReflectorId) -> Self {
        Self {
            slots,
            reflector,
            plugboard: Plugboard::new(),
        }
    }

    pub fn with_slot(&self, idx: usize, slot: RotorSlotConfig) -> Self {
        let mut next = self.clone();
        next.slots[idx] = slot;
        next
    }

    pub fn with_plugboard(&self, plugboard: Plugboard) -> Self {
        Self {
            slots: self.slots,
            reflector: self.reflector,
            plugboard,
        }
    }

    pub fn validate(&self) -> CrResult<()> {
        self.slots.iter().try_for_each(RotorSlotConfig::validate)
    }

    pub fn identities(&self) -> [RotorId; SLOT_COUNT] {
        self.slots.map(|s| s.identity)
    }

    pub fn starts(&self) -> [Letter; SLOT_COUNT] {
        self.slots.map(|s| s.start)
    }

    pub fn rings(&self) -> [u8; SLOT_COUNT] {
        self.slots.map(|s| s.ring)
    }
}

/// The cipher transform the search treats as a black box.
///
/// Implementations must return output of the same length as the input, be
/// deterministic for a fixed configuration, and be self-reciprocal:
/// `encode(c, encode(c, t)) == t`.
pub trait CipherOracle: Sync {
    fn encode(&self, config: &MachineConfiguration, text: &[Letter]) -> CrResult<Vec<Letter>>;
}
