pub mod plugboard;
pub mod ranking;
pub mod rotors;

pub use self::plugboard::{ClimbOutcome, PlugboardSearch};
pub use self::ranking::ScoreMap;
pub use self::rotors::{RotorPools, RotorSearch, RotorSearchOutcome};

use crate::alphabet::Letter;
use crate::error::{CrResult, CrackError};
use crate::machine::{CipherOracle, MachineConfiguration};
use crate::scorer::{index_of_coincidence, trigram_score, TrigramTable};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Everything a search step needs to turn a trial configuration into a score.
///
/// The ciphertext and oracle are borrowed read-only, so one context can be
/// shared across rayon workers.
pub struct SearchContext<'a, O: CipherOracle> {
    oracle: &'a O,
    ciphertext: &'a [Letter],
    parallel: bool,
    calls: AtomicUsize,
}

impl<'a, O: CipherOracle> SearchContext<'a, O> {
    pub fn new(oracle: &'a O, ciphertext: &'a [Letter]) -> CrResult<Self> {
        if ciphertext.len() < 2 {
            return Err(CrackError::InsufficientText {
                len: ciphertext.len(),
            });
        }
        Ok(Self {
            oracle,
            ciphertext,
            parallel: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn ciphertext(&self) -> &[Letter] {
        self.ciphertext
    }

    /// Number of oracle invocations so far.
    pub fn oracle_calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn decode(&self, config: &MachineConfiguration) -> CrResult<Vec<Letter>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.oracle.encode(config, self.ciphertext)
    }

    pub fn ic_of(&self, config: &MachineConfiguration) -> CrResult<f64> {
        index_of_coincidence(&self.decode(config)?)
    }

    pub fn trigrams_of(&self, config: &MachineConfiguration, table: &TrigramTable) -> CrResult<u64> {
        Ok(trigram_score(&self.decode(config)?, table))
    }
}
