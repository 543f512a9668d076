//! The game scene
//!
//! A single state machine driven by a thin host loop: `on_start` once, then
//! pointer events as they arrive and `on_tick` once per frame. Pointer
//! events for a frame are expected before that frame's tick.

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use super::hit::targets_at;
use super::schedule::{Schedule, ScheduledAction};
use super::sequencer::Sequencer;
use super::spawner::{ForceBomb, roll_launch};
use super::state::{GameEvent, GameState, HitPart, ObjectKind};
use super::swipe::SwipePath;
use super::tick;
use crate::audio::{AudioSink, SoundEffect, SoundHandle};
use crate::tuning::Tuning;

/// A pointer event from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// Game scene: registry, sequencer, swipe tracking and audio bookkeeping
pub struct Scene<A: AudioSink> {
    state: GameState,
    sequencer: Sequencer,
    tuning: Tuning,
    rng: Pcg32,
    audio: A,
    schedule: Schedule,
    swipe: SwipePath,
    /// Unscaled seconds since the scene was created
    clock: f64,
    started: bool,
    touching: bool,
    fuse_sound: Option<SoundHandle>,
    swipe_sound_active: bool,
}

impl<A: AudioSink> Scene<A> {
    pub fn new(seed: u64, tuning: Tuning, audio: A) -> Self {
        debug_assert!(tuning.validate().is_ok(), "invalid tuning: {tuning:?}");
        Self {
            state: GameState::new(seed, tuning.initial_lives),
            sequencer: Sequencer::new(&tuning),
            swipe: SwipePath::new(tuning.swipe_capacity),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            audio,
            schedule: Schedule::new(),
            clock: 0.0,
            started: false,
            touching: false,
            fuse_sound: None,
            swipe_sound_active: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn swipe(&self) -> &SwipePath {
        &self.swipe
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    pub fn swipe_sound_active(&self) -> bool {
        self.swipe_sound_active
    }

    pub fn fuse_playing(&self) -> bool {
        self.fuse_sound.is_some()
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Arm the first pattern. Later calls do nothing.
    pub fn on_start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        // Pending from the start so the empty opening frames don't arm a second advance
        self.sequencer.pending_advance = true;
        self.schedule
            .after(self.clock, self.tuning.first_advance_delay, ScheduledAction::Advance);
        log::info!("Scene started (seed {})", self.state.seed);
    }

    /// One simulation frame of `dt` unscaled seconds
    pub fn on_tick(&mut self, dt: f32) {
        self.clock += dt as f64;
        for action in self.schedule.take_due(self.clock) {
            self.run(action);
        }
        if self.state.is_ended() {
            return;
        }

        self.state.time_ticks += 1;
        tick::integrate(&mut self.state, self.tuning.gravity, dt);
        self.reconcile();
    }

    fn run(&mut self, action: ScheduledAction) {
        match action {
            ScheduledAction::Advance => self.advance(),
            ScheduledAction::Spawn(force) => {
                self.spawn(force);
            }
            ScheduledAction::SwipeSoundDone => self.swipe_sound_active = false,
        }
    }

    /// Consume the next pattern: launch its immediate spawns, schedule the rest
    pub fn advance(&mut self) {
        if self.state.is_ended() {
            return;
        }
        let batch = self.sequencer.advance(&mut self.rng);
        self.state.physics_speed =
            (self.state.physics_speed * self.tuning.speed_growth).min(self.tuning.max_physics_speed);

        for planned in batch.spawns {
            if planned.delay <= 0.0 {
                self.spawn(planned.force);
            } else {
                self.schedule
                    .after(self.clock, planned.delay, ScheduledAction::Spawn(planned.force));
            }
        }
        log::info!(
            "Pattern {} {:?}, speed x{:.2}",
            self.sequencer.cursor(),
            batch.pattern,
            self.state.physics_speed
        );
    }

    /// Launch one object; returns its id, or `None` once the game has ended
    pub fn spawn(&mut self, force: ForceBomb) -> Option<u32> {
        if self.state.is_ended() {
            return None;
        }
        let launch = roll_launch(&mut self.rng, force, &self.tuning);
        let id = self.state.next_entity_id();
        let object = launch.into_object(id, &self.tuning);

        match object.kind {
            ObjectKind::BombContainer => {
                self.stop_fuse();
                self.fuse_sound = self.play(SoundEffect::Fuse);
            }
            ObjectKind::Enemy => {
                self.play(SoundEffect::Launch);
            }
        }
        log::debug!("Spawned {:?} #{} at x={}", object.kind, id, object.pos.x);
        self.state.add_object(object);
        Some(id)
    }

    /// Frame reconciliation: offscreen sweep, fuse gating, sequencer re-arm
    pub fn reconcile(&mut self) {
        if self.state.is_ended() {
            return;
        }
        for object in tick::sweep_offscreen(&mut self.state, self.tuning.offscreen_y) {
            if object.kind == ObjectKind::Enemy {
                self.subtract_life();
            }
        }
        if !self.state.has_bomb() {
            self.stop_fuse();
        }

        if self.state.is_ended() {
            return;
        }
        if self.sequencer.needs_rearm(self.state.objects.is_empty()) {
            let delay = self.sequencer.arm();
            self.schedule.after(self.clock, delay, ScheduledAction::Advance);
        }
    }

    /// Lose a life (no-op once ended)
    pub fn subtract_life(&mut self) {
        if let Some(left) = self.state.subtract_life() {
            self.play(SoundEffect::Wrong);
            if left == 0 {
                self.on_game_ended();
            }
        }
    }

    /// End the run (no-op if already ended)
    pub fn end_game(&mut self, by_bomb: bool) {
        if self.state.end_game(by_bomb) {
            self.on_game_ended();
        }
    }

    fn on_game_ended(&mut self) {
        self.stop_fuse();
        self.touching = false;
    }

    pub fn apply(&mut self, input: PointerInput) {
        match input {
            PointerInput::Down(point) => self.on_pointer_down(point),
            PointerInput::Move(point) => self.on_pointer_move(point),
            PointerInput::Up(point) => self.on_pointer_up(point),
        }
    }

    pub fn on_pointer_down(&mut self, point: Vec2) {
        if self.state.is_ended() {
            return;
        }
        self.touching = true;
        self.swipe.begin(point);
        self.state.events.push(GameEvent::SwipeStarted);
    }

    pub fn on_pointer_move(&mut self, point: Vec2) {
        if self.state.is_ended() || !self.touching {
            return;
        }
        self.swipe.push(point);
        if !self.swipe_sound_active {
            self.play_swipe_sound();
        }
        self.resolve_hits(point);
    }

    pub fn on_pointer_up(&mut self, _point: Vec2) {
        if !self.touching {
            return;
        }
        self.touching = false;
        self.state.events.push(GameEvent::SwipeEnded);
    }

    /// Slice everything under `point`
    pub fn resolve_hits(&mut self, point: Vec2) {
        for target in targets_at(&self.state.objects, point) {
            if self.state.is_ended() {
                break;
            }
            // Already removed earlier in this sample
            let Some(mut object) = self.state.remove_object(target.object_id) else {
                continue;
            };
            object.alive = false;
            self.state.events.push(GameEvent::Sliced {
                id: object.id,
                kind: object.kind,
                pos: object.pos,
            });

            match target.part {
                HitPart::Enemy => {
                    self.state.award_slice();
                    self.play(SoundEffect::Whack);
                    log::debug!("Sliced enemy #{}, score {}", object.id, self.state.score);
                }
                HitPart::Bomb => {
                    self.play(SoundEffect::Explosion);
                    log::debug!("Sliced bomb #{}", object.id);
                    self.end_game(true);
                }
            }
        }
    }

    fn play_swipe_sound(&mut self) {
        let Some(&effect) = SoundEffect::SWIPES.choose(&mut self.rng) else {
            return;
        };
        if self.play(effect).is_some() {
            self.swipe_sound_active = true;
            self.schedule
                .after(self.clock, effect.duration(), ScheduledAction::SwipeSoundDone);
        }
    }

    fn stop_fuse(&mut self) {
        if let Some(handle) = self.fuse_sound.take() {
            self.audio.stop(handle);
        }
    }

    fn play(&mut self, effect: SoundEffect) -> Option<SoundHandle> {
        let handle = self.audio.play(effect);
        if handle.is_none() {
            log::warn!("Sound {} unavailable", effect.asset_name());
        }
        handle
    }
}
