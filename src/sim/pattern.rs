//! Spawn patterns and the pattern queue
//!
//! A run opens with a fixed, gentle prefix and then draws every following
//! pattern uniformly at random, one per advance. Drawing on demand means the
//! queue can never run out.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One scripted spawn batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnPattern {
    /// One enemy, never a bomb
    SingleNoBomb,
    /// One random spawn
    Single,
    /// One random spawn plus one bomb
    PairWithBomb,
    Pair,
    Triple,
    Quad,
    Quint,
    /// Five spawns spread over the chain window
    Chain,
    /// Five spawns spread over half the chain window
    FastChain,
}

impl SpawnPattern {
    pub const ALL: [SpawnPattern; 9] = [
        SpawnPattern::SingleNoBomb,
        SpawnPattern::Single,
        SpawnPattern::PairWithBomb,
        SpawnPattern::Pair,
        SpawnPattern::Triple,
        SpawnPattern::Quad,
        SpawnPattern::Quint,
        SpawnPattern::Chain,
        SpawnPattern::FastChain,
    ];

    /// Opening patterns, played in order before random draws start
    pub const OPENING: [SpawnPattern; 7] = [
        SpawnPattern::SingleNoBomb,
        SpawnPattern::SingleNoBomb,
        SpawnPattern::PairWithBomb,
        SpawnPattern::PairWithBomb,
        SpawnPattern::Triple,
        SpawnPattern::Single,
        SpawnPattern::Chain,
    ];

    /// Total objects this pattern launches
    pub fn spawn_count(&self) -> usize {
        match self {
            SpawnPattern::SingleNoBomb | SpawnPattern::Single => 1,
            SpawnPattern::PairWithBomb | SpawnPattern::Pair => 2,
            SpawnPattern::Triple => 3,
            SpawnPattern::Quad => 4,
            SpawnPattern::Quint | SpawnPattern::Chain | SpawnPattern::FastChain => 5,
        }
    }

    /// Divisor applied to the chain window for staggered patterns
    pub fn chain_divisor(&self) -> Option<f32> {
        match self {
            SpawnPattern::Chain => Some(5.0),
            SpawnPattern::FastChain => Some(10.0),
            _ => None,
        }
    }

    /// Uniform draw over every pattern
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Opening prefix followed by an endless random tail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternQueue {
    prefix: Vec<SpawnPattern>,
    cursor: usize,
}

impl Default for PatternQueue {
    fn default() -> Self {
        Self::new(SpawnPattern::OPENING.to_vec())
    }
}

impl PatternQueue {
    pub fn new(prefix: Vec<SpawnPattern>) -> Self {
        Self { prefix, cursor: 0 }
    }

    /// Number of patterns consumed so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Take the pattern at the cursor and move past it
    pub fn next_pattern<R: Rng>(&mut self, rng: &mut R) -> SpawnPattern {
        let pattern = match self.prefix.get(self.cursor) {
            Some(&pattern) => pattern,
            None => SpawnPattern::random(rng),
        };
        self.cursor += 1;
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_opening_is_played_in_order() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut queue = PatternQueue::default();
        let opening: Vec<_> = (0..SpawnPattern::OPENING.len())
            .map(|_| queue.next_pattern(&mut rng))
            .collect();
        assert_eq!(opening, SpawnPattern::OPENING.to_vec());
        assert_eq!(queue.cursor(), SpawnPattern::OPENING.len());
    }

    #[test]
    fn test_tail_never_runs_out_and_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut queue = PatternQueue::new(Vec::new());
        let seen: HashSet<_> = (0..5000).map(|_| queue.next_pattern(&mut rng)).collect();
        assert_eq!(seen.len(), SpawnPattern::ALL.len());
        assert_eq!(queue.cursor(), 5000);
    }

    #[test]
    fn test_spawn_counts() {
        assert_eq!(SpawnPattern::PairWithBomb.spawn_count(), 2);
        assert_eq!(SpawnPattern::Quint.spawn_count(), 5);
        assert_eq!(SpawnPattern::FastChain.chain_divisor(), Some(10.0));
        assert_eq!(SpawnPattern::Quad.chain_divisor(), None);
    }
}
