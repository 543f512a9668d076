//! Demo autopilot
//!
//! Plays the game by emitting pointer input: goes after the enemy most in
//! danger of being missed and refuses any swipe that would pass a bomb.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::SCENE_HEIGHT;
use crate::point_in_circle;
use crate::sim::{GameState, ObjectKind, PointerInput};
use crate::tuning::Tuning;

/// Half-length of a planned swipe
const SWIPE_REACH: f32 = 90.0;
/// Extra clearance kept around bombs
const BOMB_MARGIN: f32 = 24.0;
/// Ticks between decisions
const DECISION_TICKS: u32 = 10;

/// Swipe-producing bot
#[derive(Debug)]
pub struct Autopilot {
    rng: Pcg32,
    /// Chance (0-1) of acting on a chosen target
    skill: f32,
    cooldown: u32,
}

impl Autopilot {
    pub fn new(seed: u64, skill: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            skill: skill.clamp(0.0, 1.0),
            cooldown: 0,
        }
    }

    /// Input for this frame (empty most frames)
    pub fn plan(&mut self, state: &GameState, tuning: &Tuning) -> Vec<PointerInput> {
        if state.is_ended() {
            return Vec::new();
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Vec::new();
        }
        self.cooldown = DECISION_TICKS;

        // Most dangerous: falling enemies nearest the bottom, then anything visible
        let mut candidates: Vec<_> = state
            .objects
            .iter()
            .filter(|o| o.alive && o.kind == ObjectKind::Enemy)
            .filter(|o| o.pos.y > 0.0 && o.pos.y < SCENE_HEIGHT)
            .collect();
        candidates.sort_by(|a, b| {
            let falling_a = a.vel.y <= 0.0;
            let falling_b = b.vel.y <= 0.0;
            falling_b
                .cmp(&falling_a)
                .then(a.pos.y.total_cmp(&b.pos.y))
                .then(a.id.cmp(&b.id))
        });

        for target in candidates {
            let center = target.target_center();
            let from = center - Vec2::new(SWIPE_REACH, 0.0);
            let to = center + Vec2::new(SWIPE_REACH, 0.0);
            if crosses_bomb(state, tuning, from, to) {
                continue;
            }
            if self.rng.random::<f32>() > self.skill {
                log::debug!("Autopilot hesitates on #{}", target.id);
                return Vec::new();
            }
            return swipe_inputs(from, to);
        }
        Vec::new()
    }
}

/// True if any sampled point of the swipe falls inside a bomb's clearance
fn crosses_bomb(state: &GameState, tuning: &Tuning, from: Vec2, to: Vec2) -> bool {
    let radius = tuning.bomb_hit_radius + BOMB_MARGIN;
    let bombs: Vec<Vec2> = state
        .objects
        .iter()
        .filter(|o| o.alive && o.kind == ObjectKind::BombContainer)
        .map(|o| o.target_center())
        .collect();
    sample_segment(from, to).any(|p| bombs.iter().any(|&b| point_in_circle(p, b, radius)))
}

/// Points every 10 units along `from..=to`
fn sample_segment(from: Vec2, to: Vec2) -> impl Iterator<Item = Vec2> {
    let steps = ((to - from).length() / 10.0).ceil().max(1.0) as usize;
    (0..=steps).map(move |i| from.lerp(to, i as f32 / steps as f32))
}

fn swipe_inputs(from: Vec2, to: Vec2) -> Vec<PointerInput> {
    let mut inputs = vec![PointerInput::Down(from)];
    inputs.extend(sample_segment(from, to).skip(1).map(PointerInput::Move));
    inputs.push(PointerInput::Up(to));
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SpawnedObject;

    fn place(state: &mut GameState, kind: ObjectKind, pos: Vec2, vy: f32) -> u32 {
        let id = state.next_entity_id();
        let radius = match kind {
            ObjectKind::Enemy => 64.0,
            ObjectKind::BombContainer => 48.0,
        };
        state.add_object(SpawnedObject::new(id, kind, pos, Vec2::new(0.0, vy), 0.0, radius));
        id
    }

    #[test]
    fn test_targets_lowest_falling_enemy() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, 3);
        place(&mut state, ObjectKind::Enemy, Vec2::new(200.0, 100.0), 300.0);
        place(&mut state, ObjectKind::Enemy, Vec2::new(600.0, 400.0), -100.0);
        place(&mut state, ObjectKind::Enemy, Vec2::new(800.0, 200.0), -100.0);

        let mut pilot = Autopilot::new(1, 1.0);
        let inputs = pilot.plan(&state, &tuning);
        assert_eq!(inputs.first(), Some(&PointerInput::Down(Vec2::new(710.0, 200.0))));
        assert_eq!(inputs.last(), Some(&PointerInput::Up(Vec2::new(890.0, 200.0))));

        // Waits before the next decision
        assert!(pilot.plan(&state, &tuning).is_empty());
    }

    #[test]
    fn test_avoids_swipes_through_bombs() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, 3);
        place(&mut state, ObjectKind::Enemy, Vec2::new(500.0, 300.0), -10.0);
        place(&mut state, ObjectKind::BombContainer, Vec2::new(560.0, 300.0), -10.0);

        let mut pilot = Autopilot::new(1, 1.0);
        assert!(pilot.plan(&state, &tuning).is_empty());
    }

    #[test]
    fn test_idle_when_ended() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, 3);
        place(&mut state, ObjectKind::Enemy, Vec2::new(500.0, 300.0), -10.0);
        state.end_game(false);
        let mut pilot = Autopilot::new(1, 1.0);
        assert!(pilot.plan(&state, &tuning).is_empty());
    }
}
