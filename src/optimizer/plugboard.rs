use super::ranking::{self, ScoreMap};
use super::SearchContext;
use crate::error::CrResult;
use crate::machine::{CipherOracle, LetterPair, MachineConfiguration, Plugboard};
use crate::scorer::TrigramTable;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, trace};

/// What the climb did with one candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// First pair on an empty board.
    Seed,
    /// Both letters free, room left.
    Append,
    /// One letter was taken; its pair was swapped out for the candidate.
    Replace { displaced: LetterPair },
    /// Both letters were taken by two pairs; both gave way to the candidate.
    Merge {
        displaced: (LetterPair, LetterPair),
    },
    Rejected,
    /// Board full and nothing to swap.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClimbOutcome {
    pub plugboard: Plugboard,
    pub ic: f64,
    pub accepted: usize,
    pub rejected: usize,
}

/// Incremental plugboard builder: IC hill-climb, then optional trigram refill.
pub struct PlugboardSearch<'c, 'a, O: CipherOracle> {
    ctx: &'c SearchContext<'a, O>,
    base: &'c MachineConfiguration,
    capacity: usize,
}

impl<'c, 'a, O: CipherOracle> PlugboardSearch<'c, 'a, O> {
    /// `base` supplies the rotors and reflector; its plugboard is ignored.
    /// `capacity` is clamped to the plugboard maximum.
    pub fn new(
        ctx: &'c SearchContext<'a, O>,
        base: &'c MachineConfiguration,
        capacity: usize,
    ) -> Self {
        Self {
            ctx,
            base,
            capacity: capacity.min(crate::machine::MAX_PLUGBOARD_PAIRS),
        }
    }

    fn ic_with(&self, board: &Plugboard) -> CrResult<f64> {
        self.ctx.ic_of(&self.base.with_plugboard(board.clone()))
    }

    /// IC after applying each single pair on its own, for every candidate.
    pub fn single_swap_scores(&self, candidates: &[LetterPair]) -> CrResult<ScoreMap<f64>> {
        let score = |p: &LetterPair| -> CrResult<(LetterPair, f64)> {
            let board = Plugboard::from_pairs([*p])?;
            Ok((*p, self.ic_with(&board)?))
        };
        let scored: Vec<(LetterPair, f64)> = if self.ctx.is_parallel() {
            candidates.par_iter().map(score).collect::<CrResult<_>>()?
        } else {
            candidates.iter().map(score).collect::<CrResult<_>>()?
        };
        Ok(scored.into_iter().collect())
    }

    /// Keeps candidates whose single-swap IC is at least the mean.
    pub fn prefilter(&self, candidates: &[LetterPair]) -> CrResult<Vec<LetterPair>> {
        let scores = self.single_swap_scores(candidates)?;
        let kept = ranking::at_or_above_mean(&scores);
        info!(
            "🔌 Mean filter kept {} of {} plug pairs",
            kept.len(),
            candidates.len()
        );
        Ok(kept)
    }

    /// Decides and applies the move for one candidate against `board`, whose
    /// decode currently scores `current`.
    pub fn step(
        &self,
        board: &mut Plugboard,
        current: &mut f64,
        candidate: LetterPair,
    ) -> CrResult<Move> {
        if board.is_empty() {
            board.try_insert(candidate)?;
            *current = self.ic_with(board)?;
            return Ok(Move::Seed);
        }

        let first = board.position_of(candidate.first());
        let second = board.position_of(candidate.second());

        match (first, second) {
            (None, None) if board.len() < self.capacity => {
                board.try_insert(candidate)?;
                *current = self.ic_with(board)?;
                Ok(Move::Append)
            }
            (None, None) => Ok(Move::Skipped),
            (Some(idx), None) | (None, Some(idx)) => {
                let mut trial = board.clone();
                let displaced = trial.try_replace(idx, candidate)?;
                let ic = self.ic_with(&trial)?;
                // Replacing a single pair may keep a tie.
                if ic >= *current {
                    *board = trial;
                    *current = ic;
                    Ok(Move::Replace { displaced })
                } else {
                    Ok(Move::Rejected)
                }
            }
            (Some(i), Some(j)) if i != j => {
                let (lo, hi) = (i.min(j), i.max(j));
                let mut trial = board.clone();
                let later = trial.remove(hi);
                let earlier = trial.remove(lo);
                trial.try_insert_at(lo, candidate)?;
                let ic = self.ic_with(&trial)?;
                // Dropping two pairs for one must pay for itself.
                match (earlier, later) {
                    (Some(a), Some(b)) if ic > *current => {
                        *board = trial;
                        *current = ic;
                        Ok(Move::Merge { displaced: (a, b) })
                    }
                    _ => Ok(Move::Rejected),
                }
            }
            // Both letters in one existing pair means the candidate is already on the board.
            (Some(_), Some(_)) => Ok(Move::Skipped),
        }
    }

    /// Walks `candidates` once, in the order given, applying [`Self::step`].
    pub fn hill_climb(&self, candidates: &[LetterPair]) -> CrResult<ClimbOutcome> {
        let mut board = Plugboard::new();
        let mut current = self.ic_with(&board)?;
        let (mut accepted, mut rejected) = (0, 0);

        if self.capacity == 0 {
            return Ok(ClimbOutcome {
                plugboard: board,
                ic: current,
                accepted,
                rejected,
            });
        }

        for &candidate in candidates {
            let mv = self.step(&mut board, &mut current, candidate)?;
            match mv {
                Move::Rejected | Move::Skipped => rejected += 1,
                _ => {
                    accepted += 1;
                    trace!("   {:?} {} -> [{}] IC {:.5}", mv, candidate, board, current);
                }
            }
        }

        board.truncate(self.capacity);
        info!(
            "🔌 Hill-climb: [{}] IC {:.5} ({} accepted, {} rejected)",
            board, current, accepted, rejected
        );
        Ok(ClimbOutcome {
            plugboard: board,
            ic: current,
            accepted,
            rejected,
        })
    }

    /// Keeps the first `keep` pairs of `board` and refills the remaining
    /// capacity with the free pairs whose decode has the best trigram score.
    ///
    /// An empty table cannot rank anything, so the board comes back as is.
    pub fn refine_with_trigrams(
        &self,
        board: &Plugboard,
        table: &TrigramTable,
        keep: usize,
    ) -> CrResult<Plugboard> {
        if table.is_empty() || keep >= self.capacity {
            debug!("Trigram refinement skipped");
            return Ok(board.clone());
        }

        let mut fixed = board.clone();
        fixed.truncate(keep);

        let candidates: Vec<LetterPair> = LetterPair::all()
            .into_iter()
            .filter(|p| !fixed.uses(p.first()) && !fixed.uses(p.second()))
            .collect();

        let score = |p: &LetterPair| -> CrResult<(LetterPair, u64)> {
            let mut trial = fixed.clone();
            trial.try_insert(*p)?;
            let s = self
                .ctx
                .trigrams_of(&self.base.with_plugboard(trial), table)?;
            Ok((*p, s))
        };
        let scores: ScoreMap<u64> = if self.ctx.is_parallel() {
            candidates.par_iter().map(score).collect::<CrResult<_>>()?
        } else {
            candidates.iter().map(score).collect::<CrResult<_>>()?
        };

        let mut refined = fixed;
        for (pair, s) in ranking::ranked(&scores) {
            if refined.len() >= self.capacity {
                break;
            }
            if !refined.uses(pair.first()) && !refined.uses(pair.second()) {
                debug!("   trigram pick {} (score {})", pair, s);
                refined.try_insert(pair)?;
            }
        }

        info!("🔤 Trigram refinement: [{}] -> [{}]", board, refined);
        Ok(refined)
    }
}
