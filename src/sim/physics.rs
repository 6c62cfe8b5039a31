//! Per-tick motion integration and boundary handling

use glam::DVec2;

use super::input::HeldControls;
use super::pool::Pool;
use super::state::{Asteroid, Bounds, Photon, Ship};
use crate::consts::MOTION_SCALE;

/// Apply held steering, thrust and brake, then move and wrap the ship
pub fn advance_ship(ship: &mut Ship, held: &HeldControls, turn_rate: f64, bounds: &Bounds) {
    if held.turn_left {
        ship.phi += turn_rate;
    }
    if held.turn_right {
        ship.phi -= turn_rate;
    }

    let delta = ship.heading() * ship.acceleration * MOTION_SCALE;
    if held.thrust {
        apply_thrust(ship, delta);
    }
    if held.brake {
        apply_thrust(ship, -delta);
    }

    ship.pos = bounds.wrap(ship.pos + ship.vel * MOTION_SCALE);
}

/// Add `delta` to the ship velocity unless the result exceeds the speed cap
///
/// The delta is rejected outright rather than rescaled, so thrusting against
/// the current motion still works at full speed.
pub fn apply_thrust(ship: &mut Ship, delta: DVec2) {
    let candidate = ship.vel + delta;
    if candidate.length() <= ship.velocity_max {
        ship.vel = candidate;
    }
}

/// Move photons; any that leave the playfield are released on the same tick
///
/// Returns the slots that were released.
pub fn advance_photons(photons: &mut Pool<Photon>, bounds: &Bounds) -> Vec<usize> {
    let mut exited = Vec::new();
    for (index, photon) in photons.iter_active_mut() {
        photon.pos += photon.vel * MOTION_SCALE;
        if !bounds.contains(photon.pos) {
            exited.push(index);
        }
    }
    for &index in &exited {
        photons.release(index);
    }
    exited
}

/// Move and spin asteroids, wrapping at the edges
pub fn advance_asteroids(asteroids: &mut Pool<Asteroid>, bounds: &Bounds) {
    for (_, asteroid) in asteroids.iter_active_mut() {
        asteroid.pos = bounds.wrap(asteroid.pos + asteroid.vel * MOTION_SCALE);
        asteroid.phi += asteroid.dphi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PHOTON_PARK;
    use crate::settings::ShipTuning;
    use crate::sim::pool::Parked;

    fn bounds() -> Bounds {
        Bounds::from_viewport(800, 800).unwrap()
    }

    fn ship_at(x: f64, y: f64) -> Ship {
        Ship::new(DVec2::new(x, y), &ShipTuning::default())
    }

    #[test]
    fn test_turning() {
        let mut ship = ship_at(50.0, 50.0);
        let left = HeldControls {
            turn_left: true,
            ..Default::default()
        };
        advance_ship(&mut ship, &left, 0.08, &bounds());
        assert!((ship.phi - 0.08).abs() < 1e-12);

        let both = HeldControls {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        advance_ship(&mut ship, &both, 0.08, &bounds());
        assert!((ship.phi - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let mut ship = ship_at(50.0, 50.0);
        let thrust = HeldControls {
            thrust: true,
            ..Default::default()
        };
        advance_ship(&mut ship, &thrust, 0.08, &bounds());

        // 0.6 * 0.30 along +y, then moved by vel * 0.30
        assert!(ship.vel.x.abs() < 1e-12);
        assert!((ship.vel.y - 0.18).abs() < 1e-12);
        assert!((ship.pos.y - (50.0 + 0.18 * 0.30)).abs() < 1e-12);
    }

    #[test]
    fn test_thrust_rejected_at_cap_but_brake_allowed() {
        let mut ship = ship_at(50.0, 50.0);
        ship.vel = DVec2::new(0.0, 4.7);

        let delta = ship.heading() * ship.acceleration * MOTION_SCALE;
        apply_thrust(&mut ship, delta);
        // 4.7 + 0.18 > 4.8: the whole delta is rejected, not clamped to the cap
        assert_eq!(ship.vel, DVec2::new(0.0, 4.7));

        apply_thrust(&mut ship, -delta);
        assert!((ship.vel.y - 4.52).abs() < 1e-12);
    }

    #[test]
    fn test_ship_wraps_to_opposite_edge() {
        let mut ship = ship_at(99.9, 50.0);
        ship.vel = DVec2::new(1.0, 0.0);
        advance_ship(&mut ship, &HeldControls::default(), 0.08, &bounds());
        assert_eq!(ship.pos.x, 0.0);

        let mut ship = ship_at(50.0, 0.1);
        ship.vel = DVec2::new(0.0, -1.0);
        advance_ship(&mut ship, &HeldControls::default(), 0.08, &bounds());
        assert!(ship.pos.y < 100.0 && ship.pos.y > 99.99);
    }

    #[test]
    fn test_photon_exit_releases_slot() {
        let mut photons: Pool<Photon> = Pool::new(2);
        photons
            .spawn(Photon {
                pos: DVec2::new(99.0, 50.0),
                vel: DVec2::new(9.0, 0.0),
            })
            .unwrap();
        photons
            .spawn(Photon {
                pos: DVec2::new(50.0, 50.0),
                vel: DVec2::new(0.0, 9.0),
            })
            .unwrap();

        let exited = advance_photons(&mut photons, &bounds());
        assert_eq!(exited, vec![0]);
        assert!(!photons.is_active(0));
        assert_eq!(
            photons.slots()[0].entity.pos,
            DVec2::new(PHOTON_PARK.0, PHOTON_PARK.1)
        );
        assert!((photons.get(1).unwrap().pos.y - 52.7).abs() < 1e-12);
    }

    #[test]
    fn test_asteroid_spin_is_unscaled() {
        let mut asteroids: Pool<Asteroid> = Pool::new(1);
        let mut asteroid = Asteroid::parked();
        asteroid.pos = DVec2::new(10.0, 10.0);
        asteroid.vel = DVec2::new(-2.0, 1.0);
        asteroid.dphi = 0.15;
        asteroids.spawn(asteroid).unwrap();

        advance_asteroids(&mut asteroids, &bounds());
        let a = asteroids.get(0).unwrap();
        assert!((a.phi - 0.15).abs() < 1e-12);
        assert!((a.pos - DVec2::new(9.4, 10.3)).length() < 1e-12);
    }
}
