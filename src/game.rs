//! Frame driver
//!
//! [`Game`] owns the state and its collaborators. The host calls
//! [`Game::frame`] once per display frame with a timestamp and the held
//! controls; the game runs exactly one tick, plays the sounds the tick asked
//! for, and repaints.

use crate::audio::{AudioBackend, AudioManager};
use crate::platform::clock::FrameClock;
use crate::renderer::{Surface, render_frame};
use crate::settings::Settings;
use crate::sim::state::{GamePhase, GameState};
use crate::sim::tick::{TickInput, tick};

/// Game instance holding all state
pub struct Game<S: Surface, B: AudioBackend> {
    state: GameState,
    clock: FrameClock,
    audio: AudioManager<B>,
    surface: S,
    last_phase: GamePhase,
    frames: u64,
}

impl<S: Surface, B: AudioBackend> Game<S, B> {
    pub fn new(seed: u64, settings: &Settings, surface: S, backend: B) -> Self {
        let mut audio = AudioManager::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let state = GameState::new(seed, settings.playfield());
        log::info!(
            "Game ready: {} x {} playfield, seed {}",
            state.playfield.width,
            state.playfield.height,
            seed
        );
        Self {
            last_phase: state.phase,
            state,
            clock: FrameClock::new(),
            audio,
            surface,
            frames: 0,
        }
    }

    /// Run one frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) {
        let dt = self.clock.delta(now_ms);
        tick(&mut self.state, input, dt);

        let events = self.state.drain_events();
        self.audio.handle_events(&events);

        render_frame(&self.state, &mut self.surface);
        self.frames += 1;

        // Time spent in the previous phase (paused, on a menu) is not replayed
        if self.state.phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
            self.clock.reset();
        }
    }

    /// The host lost focus or hid the page
    pub fn suspend(&mut self) {
        if self.state.phase == GamePhase::Playing {
            log::debug!("Suspended, pausing");
            self.state.phase = GamePhase::Paused;
            self.last_phase = GamePhase::Paused;
        }
        self.clock.reset();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
