//! Swipe path tracking
//!
//! Keeps the most recent pointer samples of the current drag, oldest first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bounded trail of recent pointer positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipePath {
    points: Vec<Vec2>,
    capacity: usize,
}

impl SwipePath {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Start a new swipe at `point`
    pub fn begin(&mut self, point: Vec2) {
        self.points.clear();
        self.points.push(point);
    }

    /// Append a sample, dropping the oldest past capacity
    pub fn push(&mut self, point: Vec2) {
        self.points.push(point);
        if self.points.len() > self.capacity {
            let excess = self.points.len() - self.capacity;
            self.points.drain(..excess);
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn latest(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
