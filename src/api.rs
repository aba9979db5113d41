use crate::alphabet::{self, Letter, ALPHABET_LEN};
use crate::config::Config;
use crate::error::{CrResult, CrackError};
use crate::machine::{
    CipherOracle, LetterPair, MachineConfiguration, Plugboard, RotorId, RotorSlotConfig,
    MAX_PLUGBOARD_PAIRS,
};
use crate::optimizer::{PlugboardSearch, RotorPools, RotorSearch, SearchContext};
use crate::scorer::{TextStats, TrigramTable};
use serde::Serialize;
use tracing::{info, warn};

/// Resolved knobs for one cracking run.
#[derive(Debug, Clone)]
pub struct CrackOptions {
    pub pools: RotorPools,
    /// Starting key. Slot 1 is overwritten by stage one.
    pub base: MachineConfiguration,
    pub plug_pairs: usize,
    pub refine_keep: usize,
    pub refine: bool,
    pub prefilter: bool,
    pub parallel: bool,
}

impl TryFrom<&Config> for CrackOptions {
    type Error = CrackError;

    fn try_from(cfg: &Config) -> CrResult<Self> {
        cfg.validate()?;
        let first = cfg.search.get_first_pool()?;
        let second = cfg.search.get_second_pool()?;
        let base = cfg.machine.baseline(first[0])?;
        Ok(Self {
            pools: RotorPools { first, second },
            base,
            plug_pairs: cfg.search.plug_pairs,
            refine_keep: cfg.search.refine_keep,
            refine: !cfg.search.no_refine,
            prefilter: cfg.search.prefilter,
            parallel: cfg.search.parallel,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CrackReport {
    pub configuration: MachineConfiguration,
    pub ciphertext: TextStats,
    pub plaintext_stats: TextStats,
    pub stage_one_ic: f64,
    pub stage_two_ic: f64,
    /// IC after the hill-climb, before trigram refinement.
    pub climb_ic: f64,
    /// Whether trigram refinement changed the plugboard.
    pub refined: bool,
    pub plaintext: String,
    pub evaluations: usize,
}

/// Recovers a key for `ciphertext` (already sanitized).
pub fn crack<O: CipherOracle>(
    oracle: &O,
    ciphertext: &[Letter],
    trigrams: &TrigramTable,
    opts: &CrackOptions,
) -> CrResult<CrackReport> {
    let ctx = SearchContext::new(oracle, ciphertext)?.parallel(opts.parallel);
    let cipher_stats = TextStats::measure(ciphertext, trigrams)?;
    info!(
        "🔐 Cracking {} letters (IC {:.5})",
        cipher_stats.letters, cipher_stats.ic
    );

    let rotor_outcome = RotorSearch::new(&ctx, &opts.pools)?.run(&opts.base)?;
    let rotors = rotor_outcome.config.with_plugboard(Plugboard::new());

    let plug_search = PlugboardSearch::new(&ctx, &rotors, opts.plug_pairs);
    let candidates = if opts.prefilter {
        plug_search.prefilter(&LetterPair::all())?
    } else {
        LetterPair::all()
    };
    let climb = plug_search.hill_climb(&candidates)?;

    if opts.refine && trigrams.is_empty() {
        warn!("⚠️  Trigram table is empty; keeping the IC-derived plugboard");
    }
    let plugboard = if opts.refine {
        plug_search.refine_with_trigrams(&climb.plugboard, trigrams, opts.refine_keep)?
    } else {
        climb.plugboard.clone()
    };
    let refined = plugboard != climb.plugboard;

    let configuration = rotors.with_plugboard(plugboard);
    let plaintext = ctx.decode(&configuration)?;
    let plaintext_stats = TextStats::measure(&plaintext, trigrams)?;
    info!(
        "✅ Decode IC {:.5}, trigram score {}",
        plaintext_stats.ic, plaintext_stats.trigram_score
    );

    Ok(CrackReport {
        configuration,
        ciphertext: cipher_stats,
        plaintext_stats,
        stage_one_ic: rotor_outcome.stage_one_ic,
        stage_two_ic: rotor_outcome.stage_two_ic,
        climb_ic: climb.ic,
        refined,
        plaintext: alphabet::to_string(&plaintext),
        evaluations: ctx.oracle_calls(),
    })
}

/// Sanitizes raw input, then runs [`crack`].
pub fn crack_text<O: CipherOracle>(
    oracle: &O,
    raw: &str,
    trigrams: &TrigramTable,
    opts: &CrackOptions,
) -> CrResult<CrackReport> {
    let letters = alphabet::sanitize(raw);
    if letters.len() < 2 {
        return Err(CrackError::InsufficientText { len: letters.len() });
    }
    crack(oracle, &letters, trigrams, opts)
}

fn random_slot(rng: &mut fastrand::Rng, pool: &[RotorId]) -> RotorSlotConfig {
    RotorSlotConfig::new(
        pool[rng.usize(..pool.len())],
        rng.u8(..ALPHABET_LEN as u8),
        Letter::from_index(rng.usize(..ALPHABET_LEN)),
    )
}

/// A key the search can in principle recover: slots 1 and 2 drawn from the
/// pools, slots 3 and 4 and the reflector taken from `opts.base`, and
/// `pairs` random disjoint plug pairs.
pub fn random_configuration(
    rng: &mut fastrand::Rng,
    opts: &CrackOptions,
    pairs: usize,
) -> CrResult<MachineConfiguration> {
    let mut config = opts
        .base
        .with_slot(0, random_slot(rng, &opts.pools.first))
        .with_slot(1, random_slot(rng, &opts.pools.second));

    let mut letters: Vec<Letter> = Letter::all().collect();
    rng.shuffle(&mut letters);
    let pairs = pairs.min(MAX_PLUGBOARD_PAIRS);
    let board = letters
        .chunks_exact(2)
        .take(pairs)
        .map(|c| LetterPair::new(c[0], c[1]))
        .collect::<CrResult<Vec<_>>>()?;
    config.plugboard = Plugboard::from_pairs(board)?;
    Ok(config)
}
