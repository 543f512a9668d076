//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (registry order, by entity ID)
//! - Delays are scheduled against the scene clock, never slept
//! - No rendering or platform dependencies

pub mod hit;
pub mod pattern;
pub mod scene;
pub mod schedule;
pub mod sequencer;
pub mod spawner;
pub mod state;
pub mod swipe;
pub mod tick;

pub use hit::{HitTarget, targets_at};
pub use pattern::{PatternQueue, SpawnPattern};
pub use scene::{PointerInput, Scene};
pub use schedule::{Schedule, ScheduledAction};
pub use sequencer::{PlannedSpawn, Sequencer, SpawnBatch};
pub use spawner::{ForceBomb, Launch, roll_launch};
pub use state::{
    GameEvent, GamePhase, GameState, HitPart, HitRegion, LifeIndicator, ObjectKind, SpawnedObject,
};
pub use swipe::SwipePath;
pub use tick::{integrate, sweep_offscreen};
