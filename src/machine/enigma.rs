use super::rotor::{inverse_table, wiring_table};
use super::{CipherOracle, MachineConfiguration, RotorSlotConfig, SLOT_COUNT};
use crate::alphabet::{Letter, ALPHABET_LEN};
use crate::error::CrResult;

const N: u8 = ALPHABET_LEN as u8;

struct MountedRotor {
    forward: [u8; ALPHABET_LEN],
    backward: [u8; ALPHABET_LEN],
    notches: &'static [u8],
    position: u8,
    ring: u8,
}

impl MountedRotor {
    fn mount(slot: &RotorSlotConfig) -> Self {
        let forward = wiring_table(slot.identity.wiring());
        Self {
            backward: inverse_table(&forward),
            forward,
            notches: slot.identity.notches(),
            position: slot.start.index() as u8,
            ring: slot.ring,
        }
    }

    #[inline(always)]
    fn at_notch(&self) -> bool {
        self.notches.contains(&self.position)
    }

    #[inline(always)]
    fn advance(&mut self) {
        self.position = (self.position + 1) % N;
    }

    #[inline(always)]
    fn shift(&self) -> u8 {
        (N + self.position - self.ring) % N
    }

    #[inline(always)]
    fn forward(&self, c: u8) -> u8 {
        let shift = self.shift();
        (self.forward[((c + shift) % N) as usize] + N - shift) % N
    }

    #[inline(always)]
    fn backward(&self, c: u8) -> u8 {
        let shift = self.shift();
        (self.backward[((c + shift) % N) as usize] + N - shift) % N
    }
}

/// Four-rotor machine with a thin reflector.
///
/// Slot 1 (leftmost) never moves; the three rightmost rotors step like a
/// classic three-rotor machine, including the middle rotor's double step.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnigmaMachine;

impl EnigmaMachine {
    pub fn new() -> Self {
        Self
    }
}

impl CipherOracle for EnigmaMachine {
    fn encode(&self, config: &MachineConfiguration, text: &[Letter]) -> CrResult<Vec<Letter>> {
        config.validate()?;

        let mut rotors: [MountedRotor; SLOT_COUNT] = [
            MountedRotor::mount(&config.slots[0]),
            MountedRotor::mount(&config.slots[1]),
            MountedRotor::mount(&config.slots[2]),
            MountedRotor::mount(&config.slots[3]),
        ];
        let reflector = wiring_table(config.reflector.wiring());
        let plugs = config.plugboard.substitution();

        let mut out = Vec::with_capacity(text.len());
        for &letter in text {
            // Stepping happens before the key closes the circuit.
            if rotors[2].at_notch() {
                rotors[2].advance();
                rotors[1].advance();
            } else if rotors[3].at_notch() {
                rotors[2].advance();
            }
            rotors[3].advance();

            let mut c = plugs[letter.index()];
            for r in rotors.iter().rev() {
                c = r.forward(c);
            }
            c = reflector[c as usize];
            for r in rotors.iter() {
                c = r.backward(c);
            }
            c = plugs[c as usize];
            out.push(Letter::from_index(c as usize));
        }
        Ok(out)
    }
}
