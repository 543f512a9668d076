//! Game state and core simulation types
//!
//! Owns the object registry, score, lives and the one-way end-of-game
//! transition. Everything here is deterministic and serializable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Objects are launched and the player can swipe
    Active,
    /// Run ended (terminal)
    Ended { by_bomb: bool },
}

/// What a spawned object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Slicing scores, missing costs a life
    Enemy,
    /// Container whose bomb child ends the run when sliced; missing is free
    BombContainer,
}

/// Which part of an object a hit landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitPart {
    /// The enemy itself
    Enemy,
    /// The bomb child of a bomb container
    Bomb,
}

/// Circular hit-sensitive region, relative to its object's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    pub part: HitPart,
    pub offset: Vec2,
    pub radius: f32,
}

/// A launched object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnedObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub angular_vel: f32,
    /// Current rotation (radians)
    pub rotation: f32,
    /// False once sliced: no longer hit-tested or integrated
    pub alive: bool,
    /// The single hit-sensitive region (the bomb child for containers)
    pub target: HitRegion,
}

impl SpawnedObject {
    pub fn new(id: u32, kind: ObjectKind, pos: Vec2, vel: Vec2, angular_vel: f32, hit_radius: f32) -> Self {
        let part = match kind {
            ObjectKind::Enemy => HitPart::Enemy,
            ObjectKind::BombContainer => HitPart::Bomb,
        };
        Self {
            id,
            kind,
            pos,
            vel,
            angular_vel,
            rotation: 0.0,
            alive: true,
            target: HitRegion {
                part,
                offset: Vec2::ZERO,
                radius: hit_radius,
            },
        }
    }

    /// World-space center of the hit region
    pub fn target_center(&self) -> Vec2 {
        self.pos + self.target.offset
    }

    /// Ballistic step under gravity
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;
        self.rotation += self.angular_vel * dt;
    }
}

/// Life icon shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeIndicator {
    Alive,
    Gone,
}

/// Things the host should react to (visuals, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: ObjectKind, pos: Vec2 },
    /// Sliced object: play destroy effect at `pos`
    Sliced { id: u32, kind: ObjectKind, pos: Vec2 },
    /// Object fell offscreen and was removed
    Expired { id: u32, kind: ObjectKind },
    /// Indicator `index` turned gone, pulse it
    LifeLost { index: usize },
    ScoreChanged { score: u64 },
    GameOver { by_bomb: bool },
    SwipeStarted,
    SwipeEnded,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Score (one per sliced enemy)
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// HUD life icons, left to right
    pub life_indicators: Vec<LifeIndicator>,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation rate multiplier (0 once ended)
    pub physics_speed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Live objects (sorted by id)
    pub objects: Vec<SpawnedObject>,
    /// Pending events for the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, lives: u8) -> Self {
        Self {
            seed,
            score: 0,
            lives,
            life_indicators: vec![LifeIndicator::Alive; lives as usize],
            phase: GamePhase::Active,
            physics_speed: 1.0,
            time_ticks: 0,
            objects: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, GamePhase::Ended { .. })
    }

    /// Register an object. Ignored once the run has ended.
    pub fn add_object(&mut self, object: SpawnedObject) -> bool {
        if self.is_ended() {
            return false;
        }
        self.events.push(GameEvent::Spawned {
            id: object.id,
            kind: object.kind,
            pos: object.pos,
        });
        self.objects.push(object);
        true
    }

    /// Remove an object by id. Removing an absent id returns `None`.
    pub fn remove_object(&mut self, id: u32) -> Option<SpawnedObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    pub fn object(&self, id: u32) -> Option<&SpawnedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// True if any bomb container is still live
    pub fn has_bomb(&self) -> bool {
        self.objects
            .iter()
            .any(|o| o.alive && o.kind == ObjectKind::BombContainer)
    }

    /// Count a sliced enemy
    pub fn award_slice(&mut self) {
        if self.is_ended() {
            return;
        }
        self.score += 1;
        self.events.push(GameEvent::ScoreChanged { score: self.score });
    }

    /// Lose one life, ending the run on the last one.
    ///
    /// Returns the lives left, or `None` if the run had already ended.
    pub fn subtract_life(&mut self) -> Option<u8> {
        if self.is_ended() || self.lives == 0 {
            return None;
        }
        self.lives -= 1;

        // The icons go out left to right: first loss dims the first icon
        let total = self.life_indicators.len();
        let index = total - self.lives as usize - 1;
        if let Some(icon) = self.life_indicators.get_mut(index) {
            *icon = LifeIndicator::Gone;
            self.events.push(GameEvent::LifeLost { index });
        }
        log::info!("Life lost, {} remaining", self.lives);

        if self.lives == 0 {
            self.end_game(false);
        }
        Some(self.lives)
    }

    /// One-way transition to `Ended`. Returns false if already ended.
    pub fn end_game(&mut self, by_bomb: bool) -> bool {
        if self.is_ended() {
            return false;
        }
        self.phase = GamePhase::Ended { by_bomb };
        self.physics_speed = 0.0;
        if by_bomb {
            for icon in &mut self.life_indicators {
                *icon = LifeIndicator::Gone;
            }
        }
        self.events.push(GameEvent::GameOver { by_bomb });
        log::info!(
            "Game over ({}), score {}",
            if by_bomb { "bomb" } else { "out of lives" },
            self.score
        );
        true
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
