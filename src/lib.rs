//! Slice Arcade - A swipe-to-slice arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, sequencing, hit resolution, game state)
//! - `audio`: Audio collaborator contract and sinks
//! - `tuning`: Data-driven game balance
//! - `autoplay`: Demo autopilot producing swipe input

pub mod audio;
pub mod autoplay;
pub mod sim;
pub mod tuning;

pub use audio::{AudioSink, LogAudio, NullAudio, SoundEffect, SoundHandle};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Scene dimensions (origin bottom-left, y up)
    pub const SCENE_WIDTH: f32 = 1024.0;
    pub const SCENE_HEIGHT: f32 = 768.0;

    /// Launch row, below the visible area
    pub const LAUNCH_Y: f32 = -128.0;
    /// Objects below this height are offscreen and get swept
    pub const OFFSCREEN_Y: f32 = -140.0;
    /// Abstract launch units to engine velocity (points/s)
    pub const VELOCITY_SCALE: f32 = 40.0;

    /// Gravity in points/s² (9.8 m/s² at 150 points per meter)
    pub const GRAVITY: f32 = -1470.0;

    pub const INITIAL_LIVES: u8 = 3;
    /// Swipe path keeps at most this many points
    pub const SWIPE_CAPACITY: usize = 12;
}

/// Squared distance test between a point and a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// Index of the horizontal quarter of the scene containing `x` (0..=3)
#[inline]
pub fn quarter_of(x: f32, width: f32) -> u8 {
    let q = (x / (width / 4.0)).floor();
    q.clamp(0.0, 3.0) as u8
}
