//! Sound effects
//!
//! The game only decides what to play and how loud; an [`AudioBackend`] makes
//! the noise. Playback is fire-and-forget.

use crate::sim::state::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Torpedo launched
    Torpedo,
    /// Small asteroid or ship blown apart
    Explosion,
}

impl SoundEffect {
    /// Sample file a backend can load for this effect
    pub fn asset(self) -> &'static str {
        match self {
            SoundEffect::Torpedo => "audio/torpedo.wav",
            SoundEffect::Explosion => "audio/explosion.wav",
        }
    }

    /// Sound cue for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::TorpedoFired => Some(SoundEffect::Torpedo),
            GameEvent::AsteroidExploded { .. } | GameEvent::ShipDestroyed { .. } => {
                Some(SoundEffect::Explosion)
            }
            _ => None,
        }
    }
}

/// Something that can play a sound effect at a volume in 0.0 - 1.0
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend for headless runs: logs each cue instead of playing it
#[derive(Debug, Default)]
pub struct LogBackend {
    pub played: usize,
}

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::trace!("Sound {:?} ({}) at volume {:.2}", effect, effect.asset(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect, unless silenced
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Play the cues for a batch of events, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
