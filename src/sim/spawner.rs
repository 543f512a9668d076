//! Object spawner
//!
//! Rolls the kind and launch kinematics of a single object. Launches come
//! from below the scene and are thrown back toward the middle: the further
//! out the launch point, the harder the sideways throw.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{ObjectKind, SpawnedObject};
use crate::quarter_of;
use crate::tuning::Tuning;

/// Bomb selection for one spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceBomb {
    /// Always an enemy
    Never,
    /// Always a bomb
    Always,
    /// Bomb with odds 1 in `Tuning::bomb_odds`
    #[default]
    Random,
}

/// Rolled launch parameters, before an id is assigned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub kind: ObjectKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub angular_vel: f32,
}

impl Launch {
    /// Build the registry object for this launch
    pub fn into_object(self, id: u32, tuning: &Tuning) -> SpawnedObject {
        let radius = match self.kind {
            ObjectKind::Enemy => tuning.enemy_hit_radius,
            ObjectKind::BombContainer => tuning.bomb_hit_radius,
        };
        SpawnedObject::new(id, self.kind, self.pos, self.vel, self.angular_vel, radius)
    }
}

/// Roll one launch
pub fn roll_launch<R: Rng>(rng: &mut R, force: ForceBomb, tuning: &Tuning) -> Launch {
    // Always draw so forced spawns consume the same randomness as free ones
    let roll = rng.random_range(0..tuning.bomb_odds);
    let kind = match force {
        ForceBomb::Never => ObjectKind::Enemy,
        ForceBomb::Always => ObjectKind::BombContainer,
        ForceBomb::Random if roll == 0 => ObjectKind::BombContainer,
        ForceBomb::Random => ObjectKind::Enemy,
    };

    let x = rng.random_range(tuning.launch_x_min..=tuning.launch_x_max) as f32;
    let pos = Vec2::new(x, tuning.launch_y);

    let (fast_lo, fast_hi) = tuning.fast_x_speed;
    let (slow_lo, slow_hi) = tuning.slow_x_speed;
    let x_speed = match quarter_of(x, tuning.scene_width) {
        0 => rng.random_range(fast_lo..=fast_hi),
        1 => rng.random_range(slow_lo..=slow_hi),
        2 => -rng.random_range(slow_lo..=slow_hi),
        _ => -rng.random_range(fast_lo..=fast_hi),
    };
    let (y_lo, y_hi) = tuning.y_speed;
    let y_speed = rng.random_range(y_lo..=y_hi);
    let vel = Vec2::new(x_speed as f32, y_speed as f32) * tuning.velocity_scale;

    let spin = tuning.max_angular_speed;
    let angular_vel = if spin > 0.0 {
        rng.random_range(-spin..=spin)
    } else {
        0.0
    };

    Launch {
        kind,
        pos,
        vel,
        angular_vel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    proptest! {
        #[test]
        fn forced_kinds_hold_for_any_seed(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            prop_assert_eq!(roll_launch(&mut rng, ForceBomb::Always, &tuning).kind, ObjectKind::BombContainer);
            prop_assert_eq!(roll_launch(&mut rng, ForceBomb::Never, &tuning).kind, ObjectKind::Enemy);
        }

        #[test]
        fn horizontal_speed_follows_launch_quarter(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let launch = roll_launch(&mut rng, ForceBomb::Random, &tuning);
            let x = launch.pos.x;
            let vx = launch.vel.x;
            prop_assert!((64.0..=960.0).contains(&x));
            if x < 256.0 {
                prop_assert!((320.0..=600.0).contains(&vx));
            } else if x < 512.0 {
                prop_assert!((120.0..=200.0).contains(&vx));
            } else if x < 768.0 {
                prop_assert!((-200.0..=-120.0).contains(&vx));
            } else {
                prop_assert!((-600.0..=-320.0).contains(&vx));
            }
        }

        #[test]
        fn launches_upward_from_below(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let launch = roll_launch(&mut rng, ForceBomb::Random, &tuning);
            prop_assert_eq!(launch.pos.y, -128.0);
            prop_assert!((960.0..=1280.0).contains(&launch.vel.y));
            prop_assert!(launch.angular_vel.abs() <= 3.0);
        }
    }

    #[test]
    fn test_random_bombs_are_roughly_one_in_seven() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let bombs = (0..7000)
            .filter(|_| roll_launch(&mut rng, ForceBomb::Random, &tuning).kind == ObjectKind::BombContainer)
            .count();
        assert!((800..1200).contains(&bombs), "bombs = {bombs}");
    }

    #[test]
    fn test_bomb_target_uses_bomb_radius() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let object = roll_launch(&mut rng, ForceBomb::Always, &tuning).into_object(9, &tuning);
        assert_eq!(object.id, 9);
        assert_eq!(object.target.radius, tuning.bomb_hit_radius);
        assert_eq!(object.target.part, crate::sim::state::HitPart::Bomb);
    }
}
