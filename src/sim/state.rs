//! Game state and phase transitions
//!
//! Everything the loop owns lives in [`GameState`]: entity lists, lives, score,
//! level and the seeded RNG. Nothing else holds write access.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Asteroid, AsteroidSize, Fragment, Ship, Torpedo};
use super::geometry::Playfield;
use crate::consts::*;

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Asteroids drift behind the title, waiting for confirm
    TitleScreen,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; held for a while before returning to the title
    GameOver,
}

/// Something that happened during a tick, for audio and UI feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TorpedoFired,
    /// A big or medium asteroid broke into two pieces
    AsteroidSplit { size: AsteroidSize, position: Vec2 },
    /// A small asteroid was blown to fragments
    AsteroidExploded { position: Vec2 },
    ShipDestroyed { position: Vec2 },
    ExtraLife { lives: i32 },
    LifeStarted { lives: i32 },
    LevelStarted { level: u32 },
    GameOver { score: u64, level: u32 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub playfield: Playfield,
    pub phase: GamePhase,
    /// Spare lives; the game ends when a ship is lost with none left
    pub lives: i32,
    /// 0-based; each level adds one asteroid to the field
    pub level: u32,
    pub score: u64,
    /// Seconds left on the game-over screen
    pub game_over_time: f32,
    pub ship: Option<Ship>,
    pub asteroids: Vec<Asteroid>,
    pub torpedoes: Vec<Torpedo>,
    pub fragments: Vec<Fragment>,
    /// Events raised since the driver last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub rng: Pcg32,
}

impl GameState {
    /// A title screen over a drifting asteroid field
    pub fn new(seed: u64, playfield: Playfield) -> Self {
        let mut state = Self {
            seed,
            playfield,
            phase: GamePhase::TitleScreen,
            lives: STARTING_LIVES,
            level: 0,
            score: 0,
            game_over_time: 0.0,
            ship: None,
            asteroids: Vec::new(),
            torpedoes: Vec::new(),
            fragments: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.between_games();
        state
    }

    /// Clear the board down to a fresh attract-mode asteroid field
    fn between_games(&mut self) {
        self.ship = None;
        self.asteroids = Asteroid::generate(ASTEROID_BASE_QTY, &self.playfield, &mut self.rng);
        self.torpedoes.clear();
        self.fragments.clear();
    }

    pub fn start_game(&mut self) {
        log::info!("New game (seed {})", self.seed);
        self.lives = STARTING_LIVES;
        self.level = 0;
        self.score = 0;
        self.game_over_time = 0.0;
        self.start_life();
    }

    /// New ship at the center; the current level's field is dealt again
    pub fn start_life(&mut self) {
        log::info!("Starting life with {} spare", self.lives);
        self.ship = Some(Ship::new(&self.playfield));
        self.torpedoes.clear();
        self.events.push(GameEvent::LifeStarted { lives: self.lives });
        self.start_level();
    }

    pub fn start_level(&mut self) {
        let qty = ASTEROID_BASE_QTY + self.level;
        log::info!("Level {}: {} asteroids", self.level, qty);
        self.asteroids = Asteroid::generate(qty, &self.playfield, &mut self.rng);
        self.fragments.clear();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted { level: self.level });
    }

    pub fn game_over(&mut self) {
        log::info!("Game over: score {} on level {}", self.score, self.level);
        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.level,
        });
        self.game_over_time = GAME_OVER_DURATION;
        self.between_games();
        self.phase = GamePhase::GameOver;
    }

    /// Grant a life for every bonus threshold the score passed since `old_score`
    ///
    /// No bonus is granted while lives are already at the cap.
    pub fn award_new_lives(&mut self, old_score: u64) {
        let crossed = (self.score / NEW_LIFE_SCORE).saturating_sub(old_score / NEW_LIFE_SCORE);
        for _ in 0..crossed {
            if self.lives < MAX_LIVES {
                self.lives += 1;
                log::debug!("Extra life, now {}", self.lives);
                self.events.push(GameEvent::ExtraLife { lives: self.lives });
            }
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(42, Playfield::default())
    }

    #[test]
    fn test_new_is_title_screen() {
        let state = state();
        assert_eq!(state.phase, GamePhase::TitleScreen);
        assert!(state.ship.is_none());
        assert_eq!(state.asteroids.len(), ASTEROID_BASE_QTY as usize);
    }

    #[test]
    fn test_start_game_resets_counters() {
        let mut state = state();
        state.score = 999;
        state.lives = 0;
        state.level = 5;
        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 0);
        assert_eq!(state.score, 0);
        assert!(state.ship.is_some());
        assert_eq!(state.asteroids.len(), ASTEROID_BASE_QTY as usize);
    }

    #[test]
    fn test_level_adds_asteroids() {
        let mut state = state();
        state.start_game();
        state.level = 3;
        state.start_level();
        assert_eq!(state.asteroids.len(), (ASTEROID_BASE_QTY + 3) as usize);
    }

    #[test]
    fn test_new_life_once_per_threshold() {
        let mut state = state();
        state.start_game();
        state.score = 10_050;
        state.award_new_lives(9_990);
        assert_eq!(state.lives, STARTING_LIVES + 1);

        // Staying inside the same band grants nothing more
        state.score = 10_200;
        state.award_new_lives(10_050);
        assert_eq!(state.lives, STARTING_LIVES + 1);

        // Two thresholds in one step grant two lives
        state.score = 30_000;
        state.award_new_lives(10_200);
        assert_eq!(state.lives, STARTING_LIVES + 3);
    }

    #[test]
    fn test_new_life_capped() {
        let mut state = state();
        state.start_game();
        state.lives = MAX_LIVES;
        state.score = 20_000;
        state.award_new_lives(19_900);
        assert_eq!(state.lives, MAX_LIVES);

        state.lives = MAX_LIVES - 1;
        state.score = 50_000;
        state.award_new_lives(20_000);
        assert_eq!(state.lives, MAX_LIVES);
    }

    #[test]
    fn test_game_over_holds_then_clears_board() {
        let mut state = state();
        state.start_game();
        state.game_over();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_time, GAME_OVER_DURATION);
        assert!(state.ship.is_none());
        assert!(state.torpedoes.is_empty());
        assert!(state.fragments.is_empty());
    }

    #[test]
    fn test_drain_events() {
        let mut state = state();
        state.start_game();
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LevelStarted { level: 0 }));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = state();
        let b = state();
        for (x, y) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(x.body.position, y.body.position);
            assert_eq!(x.body.outline, y.body.outline);
        }
    }
}
