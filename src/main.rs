//! Minor Planets headless runner
//!
//! Plays a scripted session against the simulation at a synthetic 60 Hz and
//! prints a summary plus a JSON snapshot of the final state.
//!
//! Usage: `minor-planets [settings.json]`

use glam::Vec2;
use minor_planets::audio::LogBackend;
use minor_planets::platform::{Key, Keyboard};
use minor_planets::renderer::{Caption, Overlay, Surface};
use minor_planets::sim::GamePhase;
use minor_planets::sim::geometry::Outline;
use minor_planets::{Game, Settings};

/// Milliseconds per synthetic frame
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Surface that counts draw calls instead of painting
#[derive(Debug, Default)]
struct CountingSurface {
    frames: u64,
    outlines: u64,
    overlays: u64,
    last_score: u64,
}

impl Surface for CountingSurface {
    fn clear(&mut self, _color: [f32; 4]) {
        self.frames += 1;
    }

    fn draw_outline(&mut self, _outline: &[Vec2], _color: [f32; 4]) {
        self.outlines += 1;
    }

    fn draw_scoreboard(&mut self, _life_icons: &[Outline], score: u64) {
        self.last_score = score;
    }

    fn draw_overlay(&mut self, overlay: Overlay, captions: &[Caption]) {
        self.overlays += 1;
        if let Some(headline) = captions.first() {
            log::trace!("{:?}: {}", overlay, headline.text);
        }
    }
}

/// Controls for a given frame: start the game, then keep firing while
/// sweeping the ship around, with a burst of thrust every few seconds
fn scripted_keys(frame: u32, phase: GamePhase) -> Keyboard {
    let mut keys = Keyboard::new();
    match phase {
        GamePhase::TitleScreen | GamePhase::Paused => keys.press(Key::Confirm),
        GamePhase::GameOver => {}
        GamePhase::Playing => {
            keys.press(Key::Fire);
            let second = frame / 60;
            if second % 2 == 0 {
                keys.press(Key::SpinLeft);
            } else {
                keys.press(Key::SpinRight);
            }
            if second % 5 == 0 {
                keys.press(Key::Thrust);
            }
        }
    }
    keys
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Minor Planets (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(rand::random);

    let mut game = Game::new(seed, &settings, CountingSurface::default(), LogBackend::default());
    for frame in 0..settings.frames {
        let keys = scripted_keys(frame, game.state().phase);
        game.frame(f64::from(frame) * FRAME_MS, &keys.sample());
    }

    let state = game.state();
    let surface = game.surface();
    println!("Seed:        {seed}");
    println!("Frames:      {}", game.frames());
    println!("Phase:       {:?}", state.phase);
    println!("Level:       {}", state.level);
    println!("Score:       {}", surface.last_score);
    println!("Lives:       {}", state.lives);
    println!("Asteroids:   {}", state.asteroids.len());
    println!("Outlines:    {} ({} overlay frames)", surface.outlines, surface.overlays);
    println!("Sounds:      {}", game.audio().backend().played);

    match serde_json::to_string_pretty(state) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final state: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; hosts drive `Game` directly
}
