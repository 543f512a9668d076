//! Data-driven game balance
//!
//! Every constant the spawner, sequencer and reconciler read lives here so a
//! run can be re-balanced from a JSON file without rebuilding.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load or accept a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scene ===
    /// Scene width used for launch quarters
    pub scene_width: f32,
    /// Launch x range (inclusive, integer draw)
    pub launch_x_min: i32,
    pub launch_x_max: i32,
    /// Launch y (below visible area)
    pub launch_y: f32,
    /// Objects below this y are removed by the sweep
    pub offscreen_y: f32,

    // === Kinematics ===
    /// Abstract units to points/s
    pub velocity_scale: f32,
    /// Horizontal speed for launches from the outer quarters
    pub fast_x_speed: (i32, i32),
    /// Horizontal speed for launches from the inner quarters
    pub slow_x_speed: (i32, i32),
    /// Upward speed range
    pub y_speed: (i32, i32),
    /// Spin range is [-max_angular_speed, max_angular_speed]
    pub max_angular_speed: f32,
    /// Gravity (points/s², negative is down)
    pub gravity: f32,

    // === Spawning ===
    /// A random spawn is a bomb one time in `bomb_odds`
    pub bomb_odds: u32,
    /// Hit radius around an enemy
    pub enemy_hit_radius: f32,
    /// Hit radius around a bomb's fuse target
    pub bomb_hit_radius: f32,

    // === Sequencing ===
    /// Delay before the very first pattern
    pub first_advance_delay: f32,
    /// Initial delay between an empty scene and the next pattern
    pub popup_delay: f32,
    /// Initial time window a chain is spread over
    pub chain_delay: f32,
    /// Multiplier applied to `popup_delay` per advance
    pub popup_decay: f32,
    /// Multiplier applied to `chain_delay` per advance
    pub chain_decay: f32,
    /// Multiplier applied to simulation speed per advance
    pub speed_growth: f32,
    /// Simulation speed never grows past this
    pub max_physics_speed: f32,

    // === Player ===
    pub initial_lives: u8,
    pub swipe_capacity: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            launch_x_min: 64,
            launch_x_max: 960,
            launch_y: LAUNCH_Y,
            offscreen_y: OFFSCREEN_Y,

            velocity_scale: VELOCITY_SCALE,
            fast_x_speed: (8, 15),
            slow_x_speed: (3, 5),
            y_speed: (24, 32),
            max_angular_speed: 3.0,
            gravity: GRAVITY,

            bomb_odds: 7,
            enemy_hit_radius: 64.0,
            bomb_hit_radius: 48.0,

            first_advance_delay: 2.0,
            popup_delay: 0.9,
            chain_delay: 3.0,
            popup_decay: 0.991,
            chain_decay: 0.99,
            speed_growth: 1.02,
            max_physics_speed: 3.0,

            initial_lives: INITIAL_LIVES,
            swipe_capacity: SWIPE_CAPACITY,
        }
    }
}

impl Tuning {
    /// Check that the parameters describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if self.scene_width <= 0.0 {
            return invalid("scene_width must be positive");
        }
        if self.launch_x_min > self.launch_x_max {
            return invalid("launch_x_min exceeds launch_x_max");
        }
        for (name, (lo, hi)) in [
            ("fast_x_speed", self.fast_x_speed),
            ("slow_x_speed", self.slow_x_speed),
            ("y_speed", self.y_speed),
        ] {
            if lo > hi || lo < 0 {
                return Err(TuningError::Invalid(format!("{name} range is empty or negative")));
            }
        }
        if self.max_angular_speed < 0.0 {
            return invalid("max_angular_speed must not be negative");
        }
        if self.bomb_odds == 0 {
            return invalid("bomb_odds must be at least 1");
        }
        if self.popup_delay <= 0.0 || self.chain_delay <= 0.0 {
            return invalid("popup_delay and chain_delay must be positive");
        }
        for (name, factor) in [
            ("popup_decay", self.popup_decay),
            ("chain_decay", self.chain_decay),
        ] {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(TuningError::Invalid(format!("{name} must be in (0, 1]")));
            }
        }
        if self.speed_growth < 1.0 || self.max_physics_speed < 1.0 {
            return invalid("speed_growth and max_physics_speed must be at least 1");
        }
        if self.initial_lives == 0 {
            return invalid("initial_lives must be at least 1");
        }
        if self.swipe_capacity < 2 {
            return invalid("swipe_capacity must hold at least two points");
        }
        if self.offscreen_y >= self.launch_y {
            return invalid("offscreen_y must sit below launch_y");
        }
        Ok(())
    }

    /// Parse and validate tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "popup_delay": 1.5, "bomb_odds": 3 }"#).unwrap();
        assert_eq!(tuning.popup_delay, 1.5);
        assert_eq!(tuning.bomb_odds, 3);
        assert_eq!(tuning.chain_delay, 3.0);
        assert_eq!(tuning.scene_width, SCENE_WIDTH);
    }

    #[test]
    fn test_rejects_bad_width() {
        let err = Tuning::from_json(r#"{ "scene_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_growing_delay() {
        let err = Tuning::from_json(r#"{ "popup_decay": 1.1 }"#).unwrap_err();
        assert!(err.to_string().contains("popup_decay"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/nonexistent/slice-arcade-tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
