//! Slice Arcade entry point
//!
//! Headless host loop: runs one session at a fixed timestep with the
//! autopilot swiping, and logs the outcome.
//!
//! Usage: `slice-arcade [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use slice_arcade::autoplay::Autopilot;
    use slice_arcade::consts::SIM_DT;
    use slice_arcade::sim::{GameEvent, GamePhase, Scene};
    use slice_arcade::{LogAudio, Tuning};

    /// Longest session the demo will run (ten minutes at 60 Hz)
    const MAX_FRAMES: u64 = 10 * 60 * 60;
    const AUTOPILOT_SKILL: f32 = 0.9;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Seed '{arg}' is not a number, using 0");
            0
        }),
        None => 0x5eed,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    log::info!("Slice Arcade (headless) starting with seed {seed}");
    let mut scene = Scene::new(seed, tuning, LogAudio::new());
    let mut pilot = Autopilot::new(seed.wrapping_mul(2654435761), AUTOPILOT_SKILL);
    scene.on_start();

    let mut frames = 0;
    while frames < MAX_FRAMES && !scene.state().is_ended() {
        for input in pilot.plan(scene.state(), scene.tuning()) {
            scene.apply(input);
        }
        scene.on_tick(SIM_DT);
        frames += 1;

        for event in scene.drain_events() {
            match event {
                GameEvent::LifeLost { index } => log::info!("Life icon {index} gone"),
                GameEvent::ScoreChanged { score } if score % 25 == 0 => {
                    log::info!("Score {score}");
                }
                other => log::trace!("{other:?}"),
            }
        }
    }

    let state = scene.state();
    let reason = match state.phase {
        GamePhase::Ended { by_bomb: true } => "sliced a bomb",
        GamePhase::Ended { by_bomb: false } => "out of lives",
        GamePhase::Active => "time limit",
    };
    log::info!(
        "Session over after {:.1}s ({reason}): score {}, {} patterns",
        frames as f32 * SIM_DT,
        state.score,
        scene.sequencer().cursor()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds embed the library in a host page
}
