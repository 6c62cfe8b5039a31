//! Asteroids - a fixed-tick arcade simulation on a toroidal playfield
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, physics, collisions, spawning, game state)
//! - `session`: Fixed-interval driver that publishes render snapshots
//! - `autopilot`: Demo pilot that plays the game through the input stream
//! - `settings`: Data-driven tuning and runtime configuration

pub mod autopilot;
pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{PoolExhausted, SettingsError};
pub use session::Session;
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation interval in milliseconds (~30 Hz)
    pub const TICK_INTERVAL_MS: u64 = 33;
    /// Maximum ticks run per `Session::advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield height in world units (width follows the viewport aspect ratio)
    pub const WORLD_HEIGHT: f64 = 100.0;
    /// Per-tick scale applied to every velocity when integrating position
    pub const MOTION_SCALE: f64 = 0.30;

    /// Default pool capacities
    pub const MAX_PHOTONS: usize = 8;
    pub const MAX_ASTEROIDS: usize = 30;
    pub const STAR_COUNT: usize = 30;
    /// Upper bound on stored polygon points per asteroid (closing point included)
    pub const MAX_VERTICES: usize = 16;

    /// Ship defaults
    pub const SHIP_RADIUS: f64 = 1.2;
    pub const SHIP_VELOCITY_MAX: f64 = 4.8;
    pub const SHIP_ACCELERATION: f64 = 0.6;
    /// Heading change per tick while a turn is held (radians)
    pub const SHIP_TURN_RATE: f64 = 0.08;

    /// Photon muzzle speed
    pub const PHOTON_SPEED: f64 = 9.0;

    /// Asteroid generation ranges
    pub const ASTEROID_SPEED_RANGE: f64 = 2.0;
    pub const ASTEROID_SPIN_RANGE: f64 = 0.2;
    pub const ASTEROID_MIN_VERTICES: usize = 6;
    pub const ASTEROID_RADIUS_MIN: f64 = 2.0;
    pub const ASTEROID_RADIUS_MAX: f64 = 3.0;
    /// Level-start size range
    pub const LEVEL_SIZE_MIN: f64 = 2.5;
    pub const LEVEL_SIZE_MAX: f64 = 3.8;

    /// Asteroids at or below this radius do not fragment
    pub const FRAGMENT_THRESHOLD: f64 = 3.0;
    /// Fragment count is floor(uniform(MIN, MAX))
    pub const FRAGMENT_COUNT_MIN: f64 = 2.0;
    pub const FRAGMENT_COUNT_MAX: f64 = 4.0;
    pub const FRAGMENT_SIZE: f64 = 1.0;

    /// Points per unit of destroyed asteroid radius
    pub const POINTS_PER_RADIUS: f64 = 40.0;

    /// Off-screen parking positions for released slots
    pub const PHOTON_PARK: (f64, f64) = (-5.0, -5.0);
    pub const ASTEROID_PARK: (f64, f64) = (-10.0, -10.0);
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Orientation whose heading points along `dir`
#[inline]
pub fn angle_of(dir: DVec2) -> f64 {
    (-dir.x).atan2(dir.y)
}

/// Unit heading vector for an orientation; `phi = 0` points up (+y)
#[inline]
pub fn heading(phi: f64) -> DVec2 {
    DVec2::new(-phi.sin(), phi.cos())
}

/// Toroidal wrap of one coordinate into `[0, bound)`
///
/// Crossing the far edge snaps to 0; crossing below 0 snaps to the far edge.
#[inline]
pub fn wrap_coordinate(value: f64, bound: f64) -> f64 {
    if value >= bound {
        0.0
    } else if value < 0.0 {
        // Largest representable value still inside the half-open range
        bound - bound * f64::EPSILON
    } else {
        value
    }
}

/// Shortest offset from `from` to `to` on a torus of the given size
pub fn toroidal_delta(from: DVec2, to: DVec2, width: f64, height: f64) -> DVec2 {
    let wrap_axis = |d: f64, size: f64| {
        if d > size / 2.0 {
            d - size
        } else if d < -size / 2.0 {
            d + size
        } else {
            d
        }
    };
    let d = to - from;
    DVec2::new(wrap_axis(d.x, width), wrap_axis(d.y, height))
}
