use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::cards::Card;
use crate::config::EngineConfig;
use crate::error::{BriscolaError, BriscolaResult};
use crate::evaluator::playout;
use crate::game_state::{GameState, HAND_SIZE};
use crate::sampler::random_choices;

/// Win counts bucketed by the slot played first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    wins: [u64; HAND_SIZE],
    trials: [u64; HAND_SIZE],
}

impl Tally {
    fn record(&mut self, first: u8, won: bool) {
        let k = first as usize;
        self.trials[k] += 1;
        if won {
            self.wins[k] += 1;
        }
    }

    fn merge(mut self, other: Tally) -> Tally {
        for k in 0..HAND_SIZE {
            self.wins[k] += other.wins[k];
            self.trials[k] += other.trials[k];
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub wins: [u64; HAND_SIZE],
    pub trials: [u64; HAND_SIZE],
    pub samples: usize,
    /// No decision left to simulate; every probability reads as zero.
    pub terminal: bool,
}

impl Estimate {
    pub fn terminal() -> Estimate {
        Estimate {
            wins: [0; HAND_SIZE],
            trials: [0; HAND_SIZE],
            samples: 0,
            terminal: true,
        }
    }

    fn from_tally(tally: Tally, samples: usize) -> Estimate {
        Estimate {
            wins: tally.wins,
            trials: tally.trials,
            samples,
            terminal: false,
        }
    }

    /// Win rate for `slot`, or `None` when the slot was never played first.
    pub fn probability(&self, slot: usize) -> Option<f64> {
        if slot >= HAND_SIZE {
            return None;
        }
        if self.terminal {
            return Some(0.0);
        }
        match self.trials.get(slot) {
            None | Some(0) => None,
            Some(&n) => Some(self.wins[slot] as f64 / n as f64),
        }
    }

    pub fn probabilities(&self) -> [Option<f64>; HAND_SIZE] {
        [0, 1, 2].map(|k| self.probability(k))
    }

    pub fn try_probabilities(&self) -> BriscolaResult<[f64; HAND_SIZE]> {
        let mut ps = [0.0; HAND_SIZE];
        for (slot, p) in ps.iter_mut().enumerate() {
            *p = self
                .probability(slot)
                .ok_or(BriscolaError::NumericEdgeCase { slot })?;
        }
        Ok(ps)
    }

    pub fn best_slot(&self) -> Option<usize> {
        self.probabilities()
            .iter()
            .enumerate()
            .filter_map(|(k, p)| p.map(|p| (k, p)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k)
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .probabilities()
            .iter()
            .enumerate()
            .map(|(k, p)| match p {
                Some(p) => format!("slot {}: {:.1}%", k, p * 100.0),
                None => format!("slot {}: n/a", k),
            })
            .collect();
        write!(f, "{} ({} samples)", parts.join(" | "), self.samples)
    }
}

/// Tricks to simulate, or `None` when too few remain for a decision.
fn simulated_tricks(state: &GameState) -> Option<usize> {
    let n_hands = state.n_hands_left();
    if n_hands <= 1 {
        debug!(n_hands, "no decision left to simulate");
        return None;
    }
    Some(n_hands)
}

pub struct MonteCarloEngine {
    config: EngineConfig,
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        MonteCarloEngine {
            config: EngineConfig::default(),
        }
    }
}

impl MonteCarloEngine {
    pub fn new(config: EngineConfig) -> BriscolaResult<MonteCarloEngine> {
        config.validate()?;
        Ok(MonteCarloEngine { config })
    }

    pub fn with_samples(samples: usize) -> BriscolaResult<MonteCarloEngine> {
        MonteCarloEngine::new(EngineConfig {
            samples,
            ..EngineConfig::default()
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs with the configured seed (or a fresh one) in the configured mode.
    pub fn estimate(&self, state: &GameState) -> BriscolaResult<Estimate> {
        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        debug!(seed, parallel = self.config.parallel, "engine seed");
        if self.config.parallel {
            self.run_parallel(state, seed)
        } else {
            self.run(state, &mut StdRng::seed_from_u64(seed))
        }
    }

    /// Sequential run drawing every trial from `rng`.
    pub fn run<R: Rng + ?Sized>(&self, state: &GameState, rng: &mut R) -> BriscolaResult<Estimate> {
        let Some(n_hands) = simulated_tricks(state) else {
            return Ok(Estimate::terminal());
        };
        debug!(n_hands, samples = self.config.samples, "sequential run");

        let mut deck = state.deck_cards();
        let tally = self.run_trials(state, &mut deck, self.config.samples, rng)?;
        let estimate = Estimate::from_tally(tally, self.config.samples);
        info!(%estimate, "run finished");
        Ok(estimate)
    }

    /// Parallel run. Batch `b` draws from `StdRng::seed_from_u64(seed + b)`,
    /// so the result depends on the seed and batch size only.
    pub fn run_parallel(&self, state: &GameState, seed: u64) -> BriscolaResult<Estimate> {
        let Some(n_hands) = simulated_tricks(state) else {
            return Ok(Estimate::terminal());
        };
        let samples = self.config.samples;
        let batch = self.config.batch_size;
        let n_batches = samples.div_ceil(batch);
        debug!(n_hands, samples, n_batches, "parallel run");

        let base_deck = state.deck_cards();
        let tally = (0..n_batches)
            .into_par_iter()
            .map(|b| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(b as u64));
                let mut deck = base_deck.clone();
                let count = batch.min(samples - b * batch);
                self.run_trials(state, &mut deck, count, &mut rng)
            })
            .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?;

        let estimate = Estimate::from_tally(tally, samples);
        info!(%estimate, "run finished");
        Ok(estimate)
    }

    fn run_trials<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        deck: &mut [Card],
        count: usize,
        rng: &mut R,
    ) -> BriscolaResult<Tally> {
        let n_hands = state.n_hands_left();
        // The trump card stays the last draw.
        let hidden = deck.len() - 1;
        let mut tally = Tally::default();
        for _ in 0..count {
            deck[..hidden].shuffle(rng);
            let own = random_choices(n_hands, rng);
            let opp = random_choices(n_hands, rng);
            let points = playout(state, deck, &own, &opp)?;
            tally.record(own[0], points >= self.config.win_threshold);
        }
        Ok(tally)
    }
}
