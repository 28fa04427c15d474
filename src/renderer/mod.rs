//! Rendering front end
//!
//! The simulation draws through the [`Surface`] trait: stroked outlines on the
//! playfield, a scoreboard strip, and a text overlay per phase. Backends only
//! paint; every placement decision, including the extra copies of shapes that
//! straddle a wrapping edge, is made here.

pub mod shapes;

use glam::Vec2;

use crate::sim::entity::Sprite;
use crate::sim::geometry::{Outline, Playfield, translate};
use crate::sim::state::{GamePhase, GameState};

pub use shapes::{life_icon, life_icons, wrap_offsets};

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// GhostWhite
    pub const STROKE: [f32; 4] = [0.97, 0.97, 1.0, 1.0];
}

/// Height of the scoreboard strip
pub const SCOREBOARD_HEIGHT: f32 = 40.0;

/// Line height for overlay text
const LEAD: f32 = 24.0;

/// Drawing target
pub trait Surface {
    /// Wipe the playfield and the scoreboard
    fn clear(&mut self, color: [f32; 4]);

    /// Stroke a closed polygon on the playfield
    fn draw_outline(&mut self, outline: &[Vec2], color: [f32; 4]);

    /// Repaint the scoreboard: life icons in scoreboard coordinates, and the score
    fn draw_scoreboard(&mut self, life_icons: &[Outline], score: u64);

    /// Text drawn over the playfield
    fn draw_overlay(&mut self, overlay: Overlay, captions: &[Caption]);
}

/// Which screen of text covers the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Title,
    Paused,
    GameOver,
}

impl Overlay {
    pub fn for_phase(phase: GamePhase) -> Option<Overlay> {
        match phase {
            GamePhase::TitleScreen => Some(Overlay::Title),
            GamePhase::Paused => Some(Overlay::Paused),
            GamePhase::GameOver => Some(Overlay::GameOver),
            GamePhase::Playing => None,
        }
    }

    /// Text lines laid out on a playfield, centered on each anchor
    pub fn captions(self, field: &Playfield) -> Vec<Caption> {
        let mid = field.center();
        let col1 = field.width * 3.0 / 8.0;
        let col2 = field.width * 5.0 / 8.0;
        let at = |x: f32, lines: f32| Vec2::new(x, mid.y + LEAD * lines);

        match self {
            Overlay::Title => {
                let mut captions = vec![
                    Caption::new(48.0, "minor planets", at(mid.x, -7.0)),
                    Caption::new(18.0, "© 2015 d.g.h. franey", at(mid.x, -4.0)),
                    Caption::new(18.0, "sound effects by mike koening", at(mid.x, 5.0)),
                    Caption::new(24.0, "press enter to start", at(mid.x, 7.0)),
                ];
                let controls = [
                    ("thrust", "↑"),
                    ("spin left", "←"),
                    ("spin right", "→"),
                    ("fire", "space"),
                    ("pause", "p"),
                ];
                for (row, (action, key)) in controls.into_iter().enumerate() {
                    let line = row as f32 - 2.0;
                    captions.push(Caption::new(18.0, action, at(col1, line)));
                    captions.push(Caption::new(18.0, key, at(col2, line)));
                }
                captions
            }
            Overlay::Paused => vec![
                Caption::new(48.0, "paused", at(mid.x, -7.0)),
                Caption::new(24.0, "press enter to resume", at(mid.x, 7.0)),
            ],
            Overlay::GameOver => vec![
                Caption::new(48.0, "game over", at(mid.x, -7.0)),
                Caption::new(24.0, "press enter to play again", at(mid.x, 7.0)),
            ],
        }
    }
}

/// A line of overlay text
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    /// Font size in pixels
    pub size: f32,
    pub text: &'static str,
    pub anchor: Vec2,
}

impl Caption {
    fn new(size: f32, text: &'static str, anchor: Vec2) -> Self {
        Self { size, text, anchor }
    }
}

/// Draw one sprite, plus a copy on the far side of each edge it straddles
pub fn draw_sprite<S: Surface + ?Sized>(surface: &mut S, sprite: &impl Sprite, field: &Playfield) {
    let body = sprite.body();
    for offset in wrap_offsets(body.position, body.radius, field) {
        if offset == Vec2::ZERO {
            surface.draw_outline(&body.outline, colors::STROKE);
        } else {
            surface.draw_outline(&translate(&body.outline, offset), colors::STROKE);
        }
    }
}

/// Paint a full frame of the current state
pub fn render_frame<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    let field = &state.playfield;
    surface.clear(colors::BACKGROUND);

    for asteroid in &state.asteroids {
        draw_sprite(surface, asteroid, field);
    }
    for torpedo in &state.torpedoes {
        draw_sprite(surface, torpedo, field);
    }
    for fragment in &state.fragments {
        draw_sprite(surface, fragment, field);
    }
    if let Some(ship) = &state.ship {
        draw_sprite(surface, ship, field);
    }

    surface.draw_scoreboard(&life_icons(state.lives, SCOREBOARD_HEIGHT), state.score);

    if let Some(overlay) = Overlay::for_phase(state.phase) {
        surface.draw_overlay(overlay, &overlay.captions(field));
    }
}
