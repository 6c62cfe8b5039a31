//! Asteroid generation, level spawning, fragmentation and photon firing
//!
//! All spawns go through the fixed-capacity pools; a full pool silently drops
//! the request.

use std::f64::consts::TAU;

use glam::DVec2;

use super::rng::RandomSource;
use super::state::{Asteroid, GameEvent, GameState, Photon, Star};
use crate::consts::*;

/// Generate an asteroid at `pos` with a random shape scaled by `size`
///
/// Velocity, spin and outline are random. The collision radius is the largest
/// sampled vertex radius.
pub fn build_asteroid<R: RandomSource + ?Sized>(rng: &mut R, pos: DVec2, size: f64) -> Asteroid {
    let vel = DVec2::new(
        rng.uniform(-ASTEROID_SPEED_RANGE, ASTEROID_SPEED_RANGE),
        rng.uniform(-ASTEROID_SPEED_RANGE, ASTEROID_SPEED_RANGE),
    );
    let dphi = rng.uniform(-ASTEROID_SPIN_RANGE, ASTEROID_SPIN_RANGE);
    let n_vertices = ASTEROID_MIN_VERTICES + rng.below(MAX_VERTICES - ASTEROID_MIN_VERTICES);

    let mut polygon = Vec::with_capacity(n_vertices + 1);
    let mut largest_r = 0.0_f64;
    for i in 0..n_vertices {
        let theta = TAU * i as f64 / n_vertices as f64;
        let r = size * rng.uniform(ASTEROID_RADIUS_MIN, ASTEROID_RADIUS_MAX);
        largest_r = largest_r.max(r);
        polygon.push(DVec2::new(-r * theta.sin(), r * theta.cos()));
    }
    // Close the loop
    polygon.push(polygon[0]);

    Asteroid {
        pos,
        phi: 0.0,
        dphi,
        vel,
        r: largest_r,
        size,
        n_vertices,
        polygon,
    }
}

/// Random point on one of the four playfield edges
fn edge_position<R: RandomSource + ?Sized>(rng: &mut R, width: f64, height: f64) -> DVec2 {
    match rng.below(4) {
        0 => DVec2::new(rng.uniform(0.0, width), 0.0),
        1 => DVec2::new(0.0, rng.uniform(0.0, height)),
        2 => DVec2::new(rng.uniform(0.0, width), height),
        _ => DVec2::new(width, rng.uniform(0.0, height)),
    }
}

/// Spawn the opening asteroid field: one third of the asteroid capacity
///
/// Returns how many asteroids were placed.
pub fn spawn_level<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) -> usize {
    let target = state.asteroids.capacity() / 3;
    let mut spawned = 0;
    for _ in 0..target {
        // The far edges coincide with 0 on the torus
        let pos = state.bounds.wrap(edge_position(rng, state.bounds.width, state.bounds.height));
        let size = rng.uniform(LEVEL_SIZE_MIN, LEVEL_SIZE_MAX);
        let asteroid = build_asteroid(rng, pos, size);
        if state.asteroids.spawn(asteroid).is_ok() {
            spawned += 1;
        }
    }
    spawned
}

/// Split a destroyed asteroid into small children at its position
///
/// Only asteroids with `r` above the threshold fragment. The child count is
/// capped by free slots. Returns how many children were spawned.
pub fn fragment<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    parent_pos: DVec2,
    parent_r: f64,
) -> usize {
    if parent_r <= FRAGMENT_THRESHOLD {
        return 0;
    }

    let target = rng.uniform(FRAGMENT_COUNT_MIN, FRAGMENT_COUNT_MAX).floor() as usize;
    let count = target.min(state.asteroids.free_count());
    if count == 0 {
        return 0;
    }
    for _ in 0..count {
        let child = build_asteroid(rng, parent_pos, FRAGMENT_SIZE);
        if state.asteroids.spawn(child).is_err() {
            break;
        }
    }

    log::debug!(
        "Asteroid r={:.2} fragmented into {} (wanted {})",
        parent_r,
        count,
        target
    );
    state.events.push(GameEvent::AsteroidFragmented {
        parent_radius: parent_r,
        children: count,
    });
    count
}

/// Fire a photon from the ship's nose along its heading
///
/// Returns the slot used, or `None` if every photon is in flight or the nose
/// is past the playfield edge.
pub fn fire_photon(state: &mut GameState) -> Option<usize> {
    let nose = state.ship.nose();
    // Such a shot would exit on its first move anyway
    if !state.bounds.contains(nose) {
        return None;
    }
    let photon = Photon {
        pos: nose,
        vel: state.ship.heading() * state.photon_speed,
    };
    let slot = state.photons.spawn(photon).ok()?;
    state.events.push(GameEvent::PhotonFired { slot });
    Some(slot)
}

/// Fill every inactive star slot with a random position on the playfield
pub fn seed_stars<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let (width, height) = (state.bounds.width, state.bounds.height);
    while state.stars.free_count() > 0 {
        let star = Star {
            pos: DVec2::new(rng.uniform(0.0, width), rng.uniform(0.0, height)),
        };
        if state.stars.spawn(star).is_err() {
            break;
        }
    }
}
