//! Circle-based collision detection
//!
//! Every collider is a circle (photons are points). Touching circles count as
//! a hit.

use glam::DVec2;

use super::pool::Pool;
use super::state::{Asteroid, Photon, Ship};

/// Circle overlap test, boundary inclusive
#[inline]
pub fn circles_overlap(a: DVec2, ra: f64, b: DVec2, rb: f64) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// First active asteroid (in slot order) that contains the photon
pub fn photon_target(photon: &Photon, asteroids: &Pool<Asteroid>) -> Option<usize> {
    asteroids
        .iter_active()
        .find(|(_, asteroid)| circles_overlap(photon.pos, 0.0, asteroid.pos, asteroid.r))
        .map(|(index, _)| index)
}

/// Whether any active asteroid overlaps the ship
pub fn ship_hit(ship: &Ship, asteroids: &Pool<Asteroid>) -> bool {
    asteroids
        .iter_active()
        .any(|(_, asteroid)| circles_overlap(ship.pos, ship.r, asteroid.pos, asteroid.r))
}
