//! Per-frame simulation tick
//!
//! Advances the game state by one frame of elapsed time and decides the next
//! phase. Scheduling and timing belong to the caller.

use super::collision::check_collisions;
use super::state::{GameEvent, GamePhase, GameState};

/// Controls held during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub thrust: bool,
    pub spin_left: bool,
    pub spin_right: bool,
    pub fire: bool,
    /// Pause (while playing)
    pub pause: bool,
    /// Start a game, or resume from pause
    pub confirm: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::TitleScreen => {
            update_entities(state, input, dt);
            if input.confirm {
                state.start_game();
            }
        }

        GamePhase::GameOver => {
            update_entities(state, input, dt);
            state.game_over_time -= dt;
            if input.confirm {
                state.start_game();
            } else if state.game_over_time <= 0.0 {
                state.game_over_time = 0.0;
                state.phase = GamePhase::TitleScreen;
            }
        }

        GamePhase::Paused => {
            if input.confirm {
                log::debug!("Resumed");
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => play(state, input, dt),
    }
}

fn play(state: &mut GameState, input: &TickInput, dt: f32) {
    let old_score = state.score;

    update_entities(state, input, dt);
    check_collisions(state);
    state.award_new_lives(old_score);

    // Wait for the explosion to die away before moving on
    if state.ship.is_none() && state.fragments.is_empty() {
        if state.lives >= 0 {
            state.start_life();
        } else {
            state.game_over();
        }
    } else if state.asteroids.is_empty() && state.fragments.is_empty() {
        state.level += 1;
        state.start_level();
    } else if input.pause {
        log::debug!("Paused");
        state.phase = GamePhase::Paused;
    }
}

/// Move everything; expired torpedoes and fragments drop out
fn update_entities(state: &mut GameState, input: &TickInput, dt: f32) {
    let field = state.playfield;

    for asteroid in &mut state.asteroids {
        asteroid.body.advance(dt, &field);
    }
    state.fragments.retain_mut(|f| f.update(dt, &field));
    state.torpedoes.retain_mut(|t| t.update(dt, &field));

    if let Some(ship) = state.ship.as_mut()
        && let Some(torpedo) = ship.update(dt, input, &field)
    {
        state.torpedoes.push(torpedo);
        state.events.push(GameEvent::TorpedoFired);
    }
}
