//! Spawn sequencer
//!
//! Each advance consumes one pattern and turns it into a batch of planned
//! spawns (immediate or delayed). Delays shrink multiplicatively with every
//! advance so the pace only ever rises.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pattern::{PatternQueue, SpawnPattern};
use super::spawner::ForceBomb;
use crate::tuning::Tuning;

/// One spawn the scene should perform `delay` seconds from now
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedSpawn {
    pub delay: f32,
    pub force: ForceBomb,
}

impl PlannedSpawn {
    fn now(force: ForceBomb) -> Self {
        Self { delay: 0.0, force }
    }
}

/// Spawns implied by one pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnBatch {
    pub pattern: SpawnPattern,
    pub spawns: Vec<PlannedSpawn>,
}

/// Pattern cursor plus the shrinking timing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequencer {
    queue: PatternQueue,
    /// Wait between an empty scene and the next pattern
    pub popup_delay: f32,
    /// Window a chain pattern is spread over
    pub chain_delay: f32,
    popup_decay: f32,
    chain_decay: f32,
    /// An advance is scheduled and has not fired yet
    pub pending_advance: bool,
}

impl Sequencer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            queue: PatternQueue::default(),
            popup_delay: tuning.popup_delay,
            chain_delay: tuning.chain_delay,
            popup_decay: tuning.popup_decay,
            chain_decay: tuning.chain_decay,
            pending_advance: false,
        }
    }

    /// Patterns consumed so far
    pub fn cursor(&self) -> usize {
        self.queue.cursor()
    }

    /// Tighten timing, consume the next pattern and plan its spawns
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> SpawnBatch {
        self.popup_delay *= self.popup_decay;
        self.chain_delay *= self.chain_decay;

        let pattern = self.queue.next_pattern(rng);
        let spawns = self.plan(pattern);
        self.pending_advance = false;

        log::debug!(
            "Pattern #{} {:?} (popup {:.3}s, chain {:.3}s)",
            self.queue.cursor(),
            pattern,
            self.popup_delay,
            self.chain_delay
        );
        SpawnBatch { pattern, spawns }
    }

    fn plan(&self, pattern: SpawnPattern) -> Vec<PlannedSpawn> {
        match pattern {
            SpawnPattern::SingleNoBomb => vec![PlannedSpawn::now(ForceBomb::Never)],
            SpawnPattern::PairWithBomb => vec![
                PlannedSpawn::now(ForceBomb::Random),
                PlannedSpawn::now(ForceBomb::Always),
            ],
            SpawnPattern::Chain | SpawnPattern::FastChain => {
                let divisor = pattern.chain_divisor().unwrap_or(5.0);
                let step = self.chain_delay / divisor;
                (0..pattern.spawn_count())
                    .map(|i| PlannedSpawn {
                        delay: step * i as f32,
                        force: ForceBomb::Random,
                    })
                    .collect()
            }
            _ => vec![PlannedSpawn::now(ForceBomb::Random); pattern.spawn_count()],
        }
    }

    /// Whether the scene should schedule the next advance
    pub fn needs_rearm(&self, registry_empty: bool) -> bool {
        registry_empty && !self.pending_advance
    }

    /// Mark an advance as pending; returns the delay to schedule it after
    pub fn arm(&mut self) -> f32 {
        self.pending_advance = true;
        self.popup_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_delays_shrink_geometrically() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seq = Sequencer::new(&Tuning::default());
        for n in 1..=500 {
            seq.advance(&mut rng);
            let popup = 0.9 * 0.991f64.powi(n);
            let chain = 3.0 * 0.99f64.powi(n);
            assert!((seq.popup_delay as f64 - popup).abs() < 1e-4, "popup at {n}");
            assert!((seq.chain_delay as f64 - chain).abs() < 1e-4, "chain at {n}");
            assert!(seq.popup_delay > 0.0);
        }
        assert_eq!(seq.cursor(), 500);
    }

    #[test]
    fn test_opening_batches() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut seq = Sequencer::new(&Tuning::default());

        let first = seq.advance(&mut rng);
        assert_eq!(first.pattern, SpawnPattern::SingleNoBomb);
        assert_eq!(first.spawns, vec![PlannedSpawn::now(ForceBomb::Never)]);

        seq.advance(&mut rng);
        let pair = seq.advance(&mut rng);
        assert_eq!(pair.pattern, SpawnPattern::PairWithBomb);
        assert_eq!(
            pair.spawns.iter().filter(|s| s.force == ForceBomb::Always).count(),
            1
        );
        assert!(pair.spawns.iter().all(|s| s.delay == 0.0));
    }

    #[test]
    fn test_chain_is_evenly_spaced() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut seq = Sequencer::new(&Tuning::default());
        let chain = loop {
            let batch = seq.advance(&mut rng);
            if batch.pattern == SpawnPattern::Chain {
                break batch;
            }
        };
        let step = seq.chain_delay / 5.0;
        let delays: Vec<f32> = chain.spawns.iter().map(|s| s.delay).collect();
        assert_eq!(delays.len(), 5);
        for (i, delay) in delays.iter().enumerate() {
            assert!((delay - step * i as f32).abs() < 1e-5);
        }
    }

    #[test]
    fn test_fast_chain_uses_half_window() {
        let seq = Sequencer::new(&Tuning::default());
        let spawns = seq.plan(SpawnPattern::FastChain);
        let last = spawns.last().unwrap().delay;
        assert!((last - 4.0 * 3.0 / 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_arm_and_advance_toggle_pending() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut seq = Sequencer::new(&Tuning::default());
        assert!(seq.needs_rearm(true));
        assert!(!seq.needs_rearm(false));

        let delay = seq.arm();
        assert_eq!(delay, seq.popup_delay);
        assert!(!seq.needs_rearm(true));

        seq.advance(&mut rng);
        assert!(!seq.pending_advance);
    }
}
