//! Fixed-interval simulation tick
//!
//! Core game loop step: applies one-shot commands, then (while playing)
//! advances motion, resolves collisions and checks for a crash.

use super::collision;
use super::input::{Command, TickInput};
use super::physics;
use super::rng::RandomSource;
use super::spawn;
use super::state::{GameEvent, GameState};
use crate::consts::POINTS_PER_RADIUS;

/// Advance the game state by one tick
///
/// `state.events` is cleared first, so afterwards it holds only this tick's
/// events.
pub fn tick<R: RandomSource + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    state.events.clear();
    state.time_ticks += 1;

    // A crash freezes the round for one published tick, then wipes it
    if state.crashed {
        state.reset(rng);
    }

    for &command in &input.commands {
        apply_command(state, command, rng);
    }

    // Don't advance unless playing
    if !state.is_advancing() {
        return;
    }

    let bounds = state.bounds;
    let turn_rate = state.ship_tuning.turn_rate;
    physics::advance_ship(&mut state.ship, &input.held, turn_rate, &bounds);
    physics::advance_photons(&mut state.photons, &bounds);
    physics::advance_asteroids(&mut state.asteroids, &bounds);

    resolve_photon_hits(state, rng);

    if collision::ship_hit(&state.ship, &state.asteroids) {
        state.crashed = true;
        state.events.push(GameEvent::ShipCrashed { score: state.score });
        log::info!("Ship crashed at score {}", state.score);
    }
}

/// Apply one edge-triggered command
fn apply_command<R: RandomSource + ?Sized>(state: &mut GameState, command: Command, rng: &mut R) {
    match command {
        // Firing is never gated on the round; only the pool limits it
        Command::Fire => {
            spawn::fire_photon(state);
        }
        Command::StartGame => {
            if !state.started {
                state.started = true;
                let asteroids = spawn::spawn_level(state, rng);
                state.events.push(GameEvent::RoundStarted { asteroids });
                log::info!("Round started with {} asteroids", asteroids);
            }
        }
        Command::TogglePause => {
            if state.started {
                state.pause_count += 1;
                let paused = state.is_paused();
                state.events.push(GameEvent::PauseToggled { paused });
                log::debug!("Pause count {} (paused: {})", state.pause_count, paused);
            }
        }
        Command::ToggleAsteroidRenderMode => {
            state.circular_asteroids = !state.circular_asteroids;
            state.events.push(GameEvent::RenderModeToggled {
                circular: state.circular_asteroids,
            });
            log::debug!("Circular asteroids: {}", state.circular_asteroids);
        }
    }
}

/// Test every active photon against every active asteroid
///
/// A hit scores `40 * r`, consumes the photon, fragments the asteroid and then
/// releases it. Fragments spawned here can be struck by later photons in the
/// same pass.
fn resolve_photon_hits<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let photon_slots: Vec<usize> = state.photons.iter_active().map(|(i, _)| i).collect();

    for photon_slot in photon_slots {
        let Some(photon) = state.photons.get(photon_slot) else {
            continue;
        };
        let Some(target) = collision::photon_target(photon, &state.asteroids) else {
            continue;
        };
        let Some((pos, r)) = state.asteroids.get(target).map(|a| (a.pos, a.r)) else {
            continue;
        };

        let before = state.score;
        // Real-valued increment truncated back into the integer score
        state.score = (state.score as f64 + POINTS_PER_RADIUS * r) as u64;
        state.photons.release(photon_slot);

        // Fragment before releasing so the parent's slot is not reused
        spawn::fragment(state, rng, pos, r);
        state.asteroids.release(target);

        state.events.push(GameEvent::AsteroidDestroyed {
            slot: target,
            radius: r,
            points: state.score - before,
        });
    }
}
