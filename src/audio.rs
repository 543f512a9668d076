//! Audio collaborator
//!
//! The simulation never touches a sound device. It asks an [`AudioSink`] to
//! play or stop effects and keeps the returned handles to enforce its own
//! rules (one fuse at a time, no overlapping swipe sounds).

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Swipe whoosh variants
    Swipe1,
    Swipe2,
    Swipe3,
    /// Enemy launched
    Launch,
    /// Enemy sliced
    Whack,
    /// Bomb fuse hiss (one at a time)
    Fuse,
    /// Bomb sliced
    Explosion,
    /// Life lost
    Wrong,
}

impl SoundEffect {
    /// Swipe variants, picked at random per swipe sound
    pub const SWIPES: [SoundEffect; 3] = [SoundEffect::Swipe1, SoundEffect::Swipe2, SoundEffect::Swipe3];

    /// Asset name the host resolves to a file
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Swipe1 => "swoosh1",
            SoundEffect::Swipe2 => "swoosh2",
            SoundEffect::Swipe3 => "swoosh3",
            SoundEffect::Launch => "launch",
            SoundEffect::Whack => "whack",
            SoundEffect::Fuse => "sliceBombFuse",
            SoundEffect::Explosion => "explosion",
            SoundEffect::Wrong => "wrong",
        }
    }

    /// Playback length in seconds
    pub fn duration(&self) -> f32 {
        match self {
            SoundEffect::Swipe1 | SoundEffect::Swipe2 | SoundEffect::Swipe3 => 0.35,
            SoundEffect::Launch => 0.4,
            SoundEffect::Whack => 0.25,
            SoundEffect::Fuse => 4.0,
            SoundEffect::Explosion => 1.2,
            SoundEffect::Wrong => 0.5,
        }
    }
}

/// Opaque handle to a playing sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundHandle(pub u32);

/// Narrow audio contract consumed by the scene
pub trait AudioSink {
    /// Start playback. `None` means the sound could not be played (missing
    /// asset, no device); callers carry on silently.
    fn play(&mut self, effect: SoundEffect) -> Option<SoundHandle>;

    /// Stop a sound. Stopping a finished or unknown handle is a no-op.
    fn stop(&mut self, handle: SoundHandle);
}

/// Sink that plays nothing
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) -> Option<SoundHandle> {
        None
    }

    fn stop(&mut self, _handle: SoundHandle) {}
}

/// Sink that logs every request, for headless runs
#[derive(Debug)]
pub struct LogAudio {
    muted: bool,
    next_handle: u32,
    playing: Vec<(SoundHandle, SoundEffect)>,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            muted: false,
            next_handle: 1,
            playing: Vec::new(),
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Sounds started and not yet stopped
    pub fn active(&self) -> impl Iterator<Item = SoundEffect> + '_ {
        self.playing.iter().map(|&(_, effect)| effect)
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) -> Option<SoundHandle> {
        if self.muted {
            return None;
        }
        let handle = SoundHandle(self.next_handle);
        self.next_handle += 1;
        log::debug!("play {} ({:?})", effect.asset_name(), handle);
        self.playing.push((handle, effect));
        Some(handle)
    }

    fn stop(&mut self, handle: SoundHandle) {
        if let Some(i) = self.playing.iter().position(|&(h, _)| h == handle) {
            let (_, effect) = self.playing.remove(i);
            log::debug!("stop {} ({:?})", effect.asset_name(), handle);
        }
    }
}
