use super::SearchContext;
use crate::alphabet::{Letter, ALPHABET_LEN};
use crate::error::{CrResult, CrackError};
use crate::machine::{CipherOracle, MachineConfiguration, RotorId, RotorSlotConfig};
use crate::scorer::index_of_coincidence;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

const CELLS_PER_ROTOR: usize = ALPHABET_LEN * ALPHABET_LEN;

/// Candidate identities for the two free slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorPools {
    pub first: Vec<RotorId>,
    pub second: Vec<RotorId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RotorSearchOutcome {
    pub config: MachineConfiguration,
    /// IC of the ciphertext as received.
    pub baseline_ic: f64,
    pub stage_one_ic: f64,
    pub stage_two_ic: f64,
    pub evaluations: usize,
}

/// Two-stage exhaustive scan of slot 1, then slot 2, maximizing IC.
pub struct RotorSearch<'c, 'a, O: CipherOracle> {
    ctx: &'c SearchContext<'a, O>,
    pools: &'c RotorPools,
}

/// Grid cell `idx` in enumeration order: identity, then start, then ring.
fn grid_cell(pool: &[RotorId], idx: usize) -> RotorSlotConfig {
    let identity = pool[idx / CELLS_PER_ROTOR];
    let start = Letter::from_index((idx / ALPHABET_LEN) % ALPHABET_LEN);
    let ring = (idx % ALPHABET_LEN) as u8;
    RotorSlotConfig::new(identity, ring, start)
}

impl<'c, 'a, O: CipherOracle> RotorSearch<'c, 'a, O> {
    pub fn new(ctx: &'c SearchContext<'a, O>, pools: &'c RotorPools) -> CrResult<Self> {
        if pools.first.is_empty() || pools.second.is_empty() {
            return Err(CrackError::Config(
                "both rotor candidate pools need at least one identity".to_string(),
            ));
        }
        Ok(Self { ctx, pools })
    }

    /// Runs both stages from `base`. Slots 3 and 4 of `base` are never touched.
    pub fn run(&self, base: &MachineConfiguration) -> CrResult<RotorSearchOutcome> {
        let calls_before = self.ctx.oracle_calls();
        let baseline_ic = index_of_coincidence(self.ctx.ciphertext())?;

        info!(
            "🔩 Stage 1: slot 1 over {:?} ({} cells)",
            self.pools.first,
            self.pools.first.len() * CELLS_PER_ROTOR
        );
        let (stage_one, stage_one_ic) = self.scan_slot(base, 0, &self.pools.first, baseline_ic)?;
        info!(
            "   Slot 1 -> {} (IC {:.5}, raw {:.5})",
            stage_one.slots[0], stage_one_ic, baseline_ic
        );

        info!(
            "🔩 Stage 2: slot 2 over {:?} ({} cells)",
            self.pools.second,
            self.pools.second.len() * CELLS_PER_ROTOR
        );
        let (stage_two, stage_two_ic) =
            self.scan_slot(&stage_one, 1, &self.pools.second, stage_one_ic)?;
        info!("   Slot 2 -> {} (IC {:.5})", stage_two.slots[1], stage_two_ic);

        Ok(RotorSearchOutcome {
            config: stage_two,
            baseline_ic,
            stage_one_ic,
            stage_two_ic,
            evaluations: self.ctx.oracle_calls() - calls_before,
        })
    }

    /// Tries every cell of `pool` in `slot`. A cell replaces the incumbent only
    /// if it beats `floor` and every earlier cell strictly, so the first cell
    /// reaching the maximum wins.
    pub fn scan_slot(
        &self,
        base: &MachineConfiguration,
        slot: usize,
        pool: &[RotorId],
        floor: f64,
    ) -> CrResult<(MachineConfiguration, f64)> {
        let cells = pool.len() * CELLS_PER_ROTOR;
        let score = |idx: usize| self.ctx.ic_of(&base.with_slot(slot, grid_cell(pool, idx)));

        let scores: Vec<f64> = if self.ctx.is_parallel() {
            (0..cells)
                .into_par_iter()
                .map(score)
                .collect::<CrResult<Vec<_>>>()?
        } else {
            (0..cells).map(score).collect::<CrResult<Vec<_>>>()?
        };

        let mut best = base.clone();
        let mut max = floor;
        for (idx, &ic) in scores.iter().enumerate() {
            if ic > max {
                max = ic;
                best = base.with_slot(slot, grid_cell(pool, idx));
                debug!("      slot {} improved: {} IC {:.5}", slot + 1, best.slots[slot], ic);
            }
        }
        Ok((best, max))
    }
}
