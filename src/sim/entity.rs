//! Ship, asteroid, torpedo and fragment entities
//!
//! Every entity embeds a [`Body`] holding the shared kinematic fields; the
//! per-kind behaviour lives on the kind's own type.

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Outline, Playfield, Velocity, rotate, scale, sum_angles, sum_velocities, translate};
use super::tick::TickInput;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Unit-radius ship model, nose along +x
pub const SHIP_MODEL: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(-std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2),
    Vec2::new(0.0, 0.0),
    Vec2::new(-std::f32::consts::FRAC_1_SQRT_2, -std::f32::consts::FRAC_1_SQRT_2),
];

/// Unit diamond shared by torpedoes and fragments
pub const DIAMOND_MODEL: [Vec2; 4] = [
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 0.0),
];

/// Shared state of every moving shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Velocity,
    /// Facing, radians in [0, 2π)
    pub orientation: f32,
    /// Radians per second, positive is clockwise on screen
    pub angular_speed: f32,
    /// Bounding circle used for collisions
    pub radius: f32,
    /// World-space outline, kept in step with position and orientation
    pub outline: Outline,
}

impl Body {
    /// Place a unit model at `position`, scaled to `radius` and turned to `orientation`
    pub fn from_model(
        model: &[Vec2],
        position: Vec2,
        radius: f32,
        orientation: f32,
        velocity: Velocity,
    ) -> Self {
        debug_assert!(radius > 0.0, "entity radius must be positive");
        debug_assert!(!model.is_empty(), "entity model must have vertices");
        let outline = translate(model, position);
        let outline = scale(&outline, radius, position);
        let outline = rotate(&outline, orientation, position);
        Self {
            position,
            velocity,
            orientation: crate::normalize_angle(orientation),
            angular_speed: 0.0,
            radius,
            outline,
        }
    }

    /// Move along the current velocity and spin, wrapping around the playfield
    pub fn advance(&mut self, dt: f32, field: &Playfield) {
        let step = polar_to_cartesian(self.velocity.speed * dt, self.velocity.angle);
        let wrapped = field.wrap(self.position + step);
        // The outline follows the wrapped delta so it stays glued to the position
        let delta = wrapped - self.position;
        self.rotate(self.angular_speed * dt);
        self.outline = translate(&self.outline, delta);
        self.position = wrapped;
    }

    pub fn rotate(&mut self, rotation: f32) {
        self.orientation = sum_angles(self.orientation, rotation);
        self.outline = rotate(&self.outline, rotation, self.position);
    }
}

/// Anything with a body that can be drawn or hit
pub trait Sprite {
    fn body(&self) -> &Body;
}

/// Spin direction requested by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Left,
    Right,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Seconds until the next torpedo may be fired
    pub time_to_next_torpedo: f32,
}

impl Ship {
    /// Spawn at the center of the playfield, at rest, pointing up
    pub fn new(field: &Playfield) -> Self {
        let velocity = Velocity::new(0.0, SHIP_INITIAL_ORIENTATION);
        Self {
            body: Body::from_model(
                &SHIP_MODEL,
                field.center(),
                SHIP_RADIUS,
                SHIP_INITIAL_ORIENTATION,
                velocity,
            ),
            time_to_next_torpedo: 0.0,
        }
    }

    /// Apply one tick of controls and motion; returns a torpedo if one was fired
    pub fn update(&mut self, dt: f32, input: &TickInput, field: &Playfield) -> Option<Torpedo> {
        self.time_to_next_torpedo = (self.time_to_next_torpedo - dt).max(0.0);

        let torpedo = if input.fire { self.fire(field) } else { None };

        if input.thrust {
            self.thrust(dt);
        } else {
            self.drag(dt);
        }

        match (input.spin_left, input.spin_right) {
            (true, false) => self.spin(dt, Spin::Left),
            (false, true) => self.spin(dt, Spin::Right),
            _ => self.angular_drag(dt),
        }

        self.body.advance(dt, field);
        torpedo
    }

    fn fire(&mut self, field: &Playfield) -> Option<Torpedo> {
        if self.time_to_next_torpedo > 0.0 {
            return None;
        }
        self.time_to_next_torpedo = SHIP_TORPEDO_COOLDOWN;
        Some(Torpedo::launch(self, field))
    }

    pub fn thrust(&mut self, dt: f32) {
        let push = Velocity::new(SHIP_ACCELERATION * dt, self.body.orientation);
        let mut velocity = sum_velocities(self.body.velocity, push);
        velocity.speed = velocity.speed.min(SHIP_MAX_SPEED);
        self.body.velocity = velocity;
    }

    pub fn drag(&mut self, dt: f32) {
        self.body.velocity.speed = (self.body.velocity.speed - SHIP_DRAG * dt).max(0.0);
    }

    pub fn spin(&mut self, dt: f32, direction: Spin) {
        let delta = SHIP_ANGULAR_ACCEL * dt;
        let speed = &mut self.body.angular_speed;
        *speed = match direction {
            Spin::Left => (*speed - delta).max(-SHIP_MAX_ANGULAR_SPEED),
            Spin::Right => (*speed + delta).min(SHIP_MAX_ANGULAR_SPEED),
        };
    }

    pub fn angular_drag(&mut self, dt: f32) {
        // Infinite drag times zero elapsed time is NaN
        if dt <= 0.0 {
            return;
        }
        let delta = SHIP_ANGULAR_DRAG * dt;
        let speed = &mut self.body.angular_speed;
        if *speed > 0.0 {
            *speed = (*speed - delta).max(0.0);
        } else if *speed < 0.0 {
            *speed = (*speed + delta).min(0.0);
        }
    }

    /// Debris burst left behind when the ship is destroyed
    pub fn explode<R: Rng>(&self, rng: &mut R) -> Vec<Fragment> {
        let count = rng.random_range(SHIP_MIN_FRAGMENTS..=SHIP_MAX_FRAGMENTS);
        Fragment::burst(self.body.position, count, rng)
    }
}

impl Sprite for Ship {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    Big,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Big => 64.0,
            AsteroidSize::Medium => 32.0,
            AsteroidSize::Small => 16.0,
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            AsteroidSize::Big => 64.0,
            AsteroidSize::Medium => 96.0,
            AsteroidSize::Small => 128.0,
        }
    }

    pub fn score(self) -> u64 {
        match self {
            AsteroidSize::Big => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Size of the pieces this size splits into, if any
    pub fn smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Big => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// What is left after an asteroid is destroyed
#[derive(Debug, Clone)]
pub enum Breakup {
    Split([Asteroid; 2]),
    Explode(Vec<Fragment>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
}

impl Asteroid {
    /// Create an asteroid with a random jagged outline and spin
    pub fn new<R: Rng>(size: AsteroidSize, position: Vec2, angle: f32, rng: &mut R) -> Self {
        let radius = size.radius();
        debug_assert!(radius > 0.0, "entity radius must be positive");
        let vertices = rng.random_range(ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES);
        let theta = TAU / vertices as f32;
        let outline = (0..vertices)
            .map(|i| {
                let i = i as f32;
                let distance = rng.random_range(radius / 2.0..=radius);
                let angle = theta * rng.random_range(i - 0.5..i + 0.5);
                position + polar_to_cartesian(distance, angle)
            })
            .collect();

        let body = Body {
            position,
            velocity: Velocity::new(size.speed(), angle),
            orientation: 0.0,
            angular_speed: rng
                .random_range(-ASTEROID_MAX_ANGULAR_SPEED..=ASTEROID_MAX_ANGULAR_SPEED),
            radius,
            outline,
        };
        Self { body, size }
    }

    /// A field of big asteroids entering from the left or top edge
    pub fn generate<R: Rng>(qty: u32, field: &Playfield, rng: &mut R) -> Vec<Asteroid> {
        (0..qty)
            .map(|_| {
                let position = if rng.random_bool(0.5) {
                    Vec2::new(0.0, rng.random_range(0.0..field.height))
                } else {
                    Vec2::new(rng.random_range(0.0..field.width), 0.0)
                };
                let angle = rng.random_range(0.0..TAU);
                Asteroid::new(AsteroidSize::Big, position, angle, rng)
            })
            .collect()
    }

    /// Break apart: two smaller pieces veering 45° either side, or debris if small
    pub fn destroy<R: Rng>(&self, rng: &mut R) -> Breakup {
        let position = self.body.position;
        match self.size.smaller() {
            Some(size) => {
                let heading = self.body.velocity.angle;
                Breakup::Split([
                    Asteroid::new(size, position, sum_angles(heading, -FRAC_PI_4), rng),
                    Asteroid::new(size, position, sum_angles(heading, FRAC_PI_4), rng),
                ])
            }
            None => {
                let count = rng.random_range(ASTEROID_MIN_FRAGMENTS..=ASTEROID_MAX_FRAGMENTS);
                Breakup::Explode(Fragment::burst(position, count, rng))
            }
        }
    }
}

impl Sprite for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Torpedo {
    pub body: Body,
    /// Seconds remaining before the torpedo fizzles out
    pub time_to_live: f32,
}

impl Torpedo {
    /// Fire from the ship's nose, inheriting the ship's velocity
    pub fn launch(ship: &Ship, field: &Playfield) -> Self {
        let orientation = ship.body.orientation;
        let muzzle = ship.body.position + polar_to_cartesian(ship.body.radius, orientation);
        let velocity = sum_velocities(ship.body.velocity, Velocity::new(TORPEDO_SPEED, orientation));
        Self {
            body: Body::from_model(
                &DIAMOND_MODEL,
                field.wrap(muzzle),
                TORPEDO_RADIUS,
                orientation,
                velocity,
            ),
            time_to_live: TORPEDO_TIME_TO_LIVE,
        }
    }

    /// Count down and move; returns false once expired
    pub fn update(&mut self, dt: f32, field: &Playfield) -> bool {
        self.time_to_live -= dt;
        if self.time_to_live <= 0.0 {
            return false;
        }
        self.body.advance(dt, field);
        true
    }
}

impl Sprite for Torpedo {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Decorative explosion debris
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub body: Body,
    pub time_to_live: f32,
}

impl Fragment {
    pub fn new(position: Vec2, orientation: f32) -> Self {
        Self {
            body: Body::from_model(
                &DIAMOND_MODEL,
                position,
                FRAGMENT_RADIUS,
                orientation,
                Velocity::new(FRAGMENT_SPEED, orientation),
            ),
            time_to_live: FRAGMENT_TIME_TO_LIVE,
        }
    }

    /// `count` fragments flying out from `position` in random directions
    pub fn burst<R: Rng>(position: Vec2, count: u32, rng: &mut R) -> Vec<Fragment> {
        (0..count)
            .map(|_| Fragment::new(position, rng.random_range(0.0..TAU)))
            .collect()
    }

    /// Count down and move; returns false once expired
    pub fn update(&mut self, dt: f32, field: &Playfield) -> bool {
        self.time_to_live -= dt;
        if self.time_to_live <= 0.0 {
            return false;
        }
        self.body.advance(dt, field);
        true
    }
}

impl Sprite for Fragment {
    fn body(&self) -> &Body {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    fn field() -> Playfield {
        Playfield::new(800.0, 600.0)
    }

    fn moving_body(position: Vec2, speed: f32, angle: f32) -> Body {
        Body::from_model(&DIAMOND_MODEL, position, 4.0, 0.0, Velocity::new(speed, angle))
    }

    #[test]
    fn test_advance_wraps_right_edge() {
        let mut body = moving_body(Vec2::new(790.0, 300.0), 100.0, 0.0);
        body.advance(0.2, &field());
        assert!((body.position.x - 10.0).abs() < 0.01);
        assert!((body.position.y - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_advance_wraps_top_edge() {
        let mut body = moving_body(Vec2::new(400.0, 5.0), 100.0, -PI / 2.0);
        body.advance(0.1, &field());
        assert!((body.position.y - 595.0).abs() < 0.01);
    }

    #[test]
    fn test_advance_wraps_left_edge() {
        let mut body = moving_body(Vec2::new(5.0, 300.0), 100.0, PI);
        body.advance(0.1, &field());
        assert!((body.position.x - 795.0).abs() < 0.01);
        assert!((body.position.y - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_advance_wraps_bottom_edge() {
        let mut body = moving_body(Vec2::new(400.0, 595.0), 100.0, PI / 2.0);
        body.advance(0.1, &field());
        assert!((body.position.x - 400.0).abs() < 0.01);
        assert!((body.position.y - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_outline_follows_wrapped_position() {
        let mut body = moving_body(Vec2::new(799.0, 300.0), 50.0, 0.0);
        let before: Vec<Vec2> = body.outline.iter().map(|p| *p - body.position).collect();
        body.advance(0.1, &field());
        for (p, offset) in body.outline.iter().zip(before) {
            assert!((*p - body.position - offset).length() < 0.01);
        }
    }

    #[test]
    fn test_advance_rotates_outline() {
        let mut body = moving_body(Vec2::new(100.0, 100.0), 0.0, 0.0);
        body.angular_speed = PI;
        body.advance(0.5, &field());
        assert!((body.orientation - PI / 2.0).abs() < 0.001);
        // (0,-1) model point rotates a quarter turn to (1,0)
        assert!((body.outline[0] - Vec2::new(104.0, 100.0)).length() < 0.01);
    }

    #[test]
    fn test_ship_spawns_centered() {
        let ship = Ship::new(&field());
        assert_eq!(ship.body.position, Vec2::new(400.0, 300.0));
        assert_eq!(ship.body.velocity.speed, 0.0);
        assert_eq!(ship.body.radius, SHIP_RADIUS);
    }

    #[test]
    fn test_ship_fire_respects_cooldown() {
        let mut ship = Ship::new(&field());
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        assert!(ship.update(0.016, &input, &field()).is_some());
        assert!(ship.update(0.016, &input, &field()).is_none());
        ship.update(SHIP_TORPEDO_COOLDOWN, &TickInput::default(), &field());
        assert!(ship.update(0.016, &input, &field()).is_some());
    }

    #[test]
    fn test_torpedo_inherits_ship_velocity() {
        let mut ship = Ship::new(&field());
        ship.body.orientation = 0.0;
        ship.body.velocity = Velocity::new(100.0, 0.0);
        let torpedo = Torpedo::launch(&ship, &field());
        assert!((torpedo.body.velocity.speed - 356.0).abs() < 0.001);
        assert!(torpedo.body.velocity.angle.abs() < 0.0001);
        assert!((torpedo.body.position - Vec2::new(416.0, 300.0)).length() < 0.01);
    }

    #[test]
    fn test_thrust_capped_at_max_speed() {
        let mut ship = Ship::new(&field());
        for _ in 0..100 {
            ship.thrust(0.1);
        }
        assert!((ship.body.velocity.speed - SHIP_MAX_SPEED).abs() < 0.01);
    }

    #[test]
    fn test_drag_never_negative() {
        let mut ship = Ship::new(&field());
        ship.body.velocity = Velocity::new(10.0, 0.0);
        ship.drag(1.0);
        assert_eq!(ship.body.velocity.speed, 0.0);
    }

    #[test]
    fn test_spin_clamped_and_stopped_by_drag() {
        let mut ship = Ship::new(&field());
        ship.spin(10.0, Spin::Right);
        assert_eq!(ship.body.angular_speed, SHIP_MAX_ANGULAR_SPEED);
        ship.angular_drag(0.0);
        assert_eq!(ship.body.angular_speed, SHIP_MAX_ANGULAR_SPEED);
        ship.angular_drag(0.016);
        assert_eq!(ship.body.angular_speed, 0.0);
        ship.spin(10.0, Spin::Left);
        assert_eq!(ship.body.angular_speed, -SHIP_MAX_ANGULAR_SPEED);
    }

    #[test]
    fn test_big_asteroid_splits_into_two_medium() {
        let mut rng = Pcg32::seed_from_u64(7);
        let big = Asteroid::new(AsteroidSize::Big, Vec2::new(100.0, 100.0), 0.0, &mut rng);
        let Breakup::Split([a, b]) = big.destroy(&mut rng) else {
            panic!("big asteroid should split");
        };
        for child in [&a, &b] {
            assert_eq!(child.size, AsteroidSize::Medium);
            assert_eq!(child.body.radius, 32.0);
            assert_eq!(child.body.position, Vec2::new(100.0, 100.0));
        }
        assert!((a.body.velocity.angle - sum_angles(0.0, -PI / 4.0)).abs() < 0.0001);
        assert!((b.body.velocity.angle - PI / 4.0).abs() < 0.0001);
    }

    #[test]
    fn test_asteroid_radius_follows_size() {
        let mut rng = Pcg32::seed_from_u64(5);
        for size in [AsteroidSize::Big, AsteroidSize::Medium, AsteroidSize::Small] {
            let asteroid = Asteroid::new(size, Vec2::new(200.0, 200.0), 0.0, &mut rng);
            assert!(asteroid.body.radius > 0.0);
            assert_eq!(asteroid.body.radius, size.radius());
        }
    }

    #[test]
    fn test_small_asteroid_explodes() {
        let mut rng = Pcg32::seed_from_u64(7);
        let small = Asteroid::new(AsteroidSize::Small, Vec2::new(50.0, 50.0), 1.0, &mut rng);
        let Breakup::Explode(fragments) = small.destroy(&mut rng) else {
            panic!("small asteroid should explode");
        };
        assert!(fragments.len() >= ASTEROID_MIN_FRAGMENTS as usize);
        assert!(fragments.len() <= ASTEROID_MAX_FRAGMENTS as usize);
        assert!(fragments.iter().all(|f| f.body.position == Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_ship_explosion_is_large() {
        let mut rng = Pcg32::seed_from_u64(3);
        let fragments = Ship::new(&field()).explode(&mut rng);
        assert!((50..=60).contains(&fragments.len()));
    }

    #[test]
    fn test_generated_asteroids_start_on_edges() {
        let mut rng = Pcg32::seed_from_u64(11);
        let asteroids = Asteroid::generate(6, &field(), &mut rng);
        assert_eq!(asteroids.len(), 6);
        for a in &asteroids {
            assert_eq!(a.size, AsteroidSize::Big);
            assert!(a.body.position.x == 0.0 || a.body.position.y == 0.0);
            let n = a.body.outline.len() as u32;
            assert!((ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES).contains(&n));
        }
    }

    #[test]
    fn test_torpedo_expires() {
        let ship = Ship::new(&field());
        let mut torpedo = Torpedo::launch(&ship, &field());
        assert!(torpedo.update(0.5, &field()));
        assert!(!torpedo.update(0.5, &field()));
    }

    #[test]
    fn test_fragment_expires() {
        let mut fragment = Fragment::new(Vec2::new(10.0, 10.0), 0.0);
        assert!(fragment.update(1.9, &field()));
        assert!(!fragment.update(0.2, &field()));
    }

    proptest! {
        #[test]
        fn advance_stays_in_bounds(
            x in 0.0f32..800.0, y in 0.0f32..600.0,
            speed in 0.0f32..2000.0, angle in 0.0f32..std::f32::consts::TAU,
            dt in 0.0f32..2.0,
        ) {
            let mut body = moving_body(Vec2::new(x, y), speed, angle);
            body.advance(dt, &field());
            prop_assert!(body.position.x >= 0.0 && body.position.x < 800.0);
            prop_assert!(body.position.y >= 0.0 && body.position.y < 600.0);
        }
    }
}
