//! Whole-tick properties driven through the public API

use asteroids::Settings;
use asteroids::consts::PHOTON_PARK;
use asteroids::sim::{
    Asteroid, Command, GamePhase, GameState, HeldControls, Parked, Photon, SeededRng, TickInput,
    spawn, tick,
};
use glam::DVec2;
use proptest::prelude::*;

fn started(seed: u64, settings: &Settings) -> (GameState, SeededRng) {
    let mut rng = SeededRng::new(seed);
    let mut state = GameState::new(settings, &mut rng);
    tick(&mut state, &TickInput::command(Command::StartGame), &mut rng);
    (state, rng)
}

fn held_strategy() -> impl Strategy<Value = HeldControls> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(turn_left, turn_right, thrust, brake)| HeldControls {
            turn_left,
            turn_right,
            thrust,
            brake,
        },
    )
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (held_strategy(), any::<bool>(), prop::bool::weighted(0.1)).prop_map(
        |(held, fire, pause)| {
            let mut commands = Vec::new();
            if pause {
                commands.push(Command::TogglePause);
            }
            if fire {
                commands.push(Command::Fire);
            }
            TickInput { held, commands }
        },
    )
}

proptest! {
    #[test]
    fn prop_entities_stay_on_playfield(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..120),
    ) {
        let settings = Settings::default();
        let (mut state, mut rng) = started(seed, &settings);

        for input in &inputs {
            tick(&mut state, input, &mut rng);
            prop_assert!(state.bounds.contains(state.ship.pos), "ship at {:?}", state.ship.pos);
            for (_, a) in state.asteroids.iter_active() {
                prop_assert!(state.bounds.contains(a.pos), "asteroid at {:?}", a.pos);
            }
            for (_, p) in state.photons.iter_active() {
                prop_assert!(state.bounds.contains(p.pos), "photon at {:?}", p.pos);
            }
        }
    }

    #[test]
    fn prop_pools_never_exceed_capacity(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..200),
    ) {
        let settings = Settings::default();
        let (mut state, mut rng) = started(seed, &settings);
        for input in &inputs {
            tick(&mut state, input, &mut rng);
            prop_assert!(state.photons.active_count() <= settings.capacity.photons);
            prop_assert!(state.asteroids.active_count() <= settings.capacity.asteroids);
        }
    }

    #[test]
    fn prop_score_monotonic_while_playing(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..200),
    ) {
        let (mut state, mut rng) = started(seed, &Settings::default());
        let mut last = state.score;
        for input in &inputs {
            let was_crashed = state.crashed;
            tick(&mut state, input, &mut rng);
            if !was_crashed {
                prop_assert!(state.score >= last);
            }
            last = state.score;
        }
    }

    #[test]
    fn prop_pause_parity(presses in 0usize..16) {
        let (mut state, mut rng) = started(7, &Settings::default());
        state.asteroids.clear();
        for _ in 0..presses {
            tick(&mut state, &TickInput::command(Command::TogglePause), &mut rng);
        }
        let expected = if presses % 2 == 1 { GamePhase::Paused } else { GamePhase::Playing };
        prop_assert_eq!(state.phase(), expected);
    }

    #[test]
    fn prop_level_spawn_is_a_third_of_capacity(asteroids in 3usize..60, seed in any::<u64>()) {
        let mut settings = Settings::default();
        settings.capacity.asteroids = asteroids;
        let mut rng = SeededRng::new(seed);
        let mut state = GameState::new(&settings, &mut rng);
        prop_assert_eq!(spawn::spawn_level(&mut state, &mut rng), asteroids / 3);
        for (_, a) in state.asteroids.iter_active() {
            prop_assert!(a.size >= 2.5 && a.size <= 3.8);
            prop_assert!(a.r >= a.size * 2.0 && a.r <= a.size * 3.0);
        }
    }
}

#[test]
fn test_photon_exit_parks_at_sentinel() {
    let (mut state, mut rng) = started(3, &Settings::default());
    state.asteroids.clear();
    let slot = state
        .photons
        .spawn(Photon {
            pos: DVec2::new(1.0, 50.0),
            vel: DVec2::new(-9.0, 0.0),
        })
        .unwrap();

    tick(&mut state, &TickInput::default(), &mut rng);
    assert!(!state.photons.is_active(slot));
    assert_eq!(
        state.photons.slots()[slot].entity.pos,
        DVec2::new(PHOTON_PARK.0, PHOTON_PARK.1)
    );
}

#[test]
fn test_ship_crossing_right_edge_lands_on_zero() {
    let (mut state, mut rng) = started(3, &Settings::default());
    state.asteroids.clear();
    state.ship.pos = DVec2::new(99.95, 50.0);
    state.ship.vel = DVec2::new(1.0, 0.0);

    tick(&mut state, &TickInput::default(), &mut rng);
    assert_eq!(state.ship.pos.x, 0.0);
}

#[test]
fn test_reset_scenario() {
    let (mut state, mut rng) = started(3, &Settings::default());
    state.score = 3400;
    state.crashed = true;
    state
        .photons
        .spawn(Photon {
            pos: DVec2::new(10.0, 10.0),
            vel: DVec2::ZERO,
        })
        .unwrap();
    assert_eq!(state.phase(), GamePhase::Crashed);

    state.reset(&mut rng);
    assert_eq!(state.score, 0);
    assert_eq!(state.asteroids.active_count(), 0);
    assert_eq!(state.photons.active_count(), 0);
    assert_eq!(state.ship.pos, DVec2::new(50.0, 50.0));
    assert_eq!(state.ship.vel, DVec2::ZERO);
    assert_eq!(state.phase(), GamePhase::Idle);
}

#[test]
fn test_shrink_while_paused_keeps_entities_on_playfield() {
    let mut settings = Settings::default();
    settings.viewport_width = 1600;
    let (mut state, mut rng) = started(11, &settings);
    tick(&mut state, &TickInput::command(Command::TogglePause), &mut rng);
    state.ship.pos = DVec2::new(150.0, 50.0);

    state.resize(800, 800);
    tick(&mut state, &TickInput::command(Command::Fire), &mut rng);
    assert_eq!(state.phase(), GamePhase::Paused);
    assert!(state.bounds.contains(state.ship.pos));
    for (_, a) in state.asteroids.iter_active() {
        assert!(state.bounds.contains(a.pos));
    }
    for (_, p) in state.photons.iter_active() {
        assert!(state.bounds.contains(p.pos));
    }
}

#[test]
fn test_resize_mid_round_keeps_entities() {
    let (mut state, mut rng) = started(3, &Settings::default());
    let before: Vec<_> = state.asteroids.iter_active().map(|(i, a)| (i, a.pos)).collect();

    state.resize(1920, 1080);
    let after: Vec<_> = state.asteroids.iter_active().map(|(i, a)| (i, a.pos)).collect();
    assert_eq!(before, after);
    assert!((state.bounds.width - 177.777_777).abs() < 1e-3);

    tick(&mut state, &TickInput::default(), &mut rng);
    assert_eq!(state.phase(), GamePhase::Playing);
}

#[test]
fn test_fragment_children_can_be_hit_later_in_same_tick() {
    let (mut state, mut rng) = started(3, &Settings::default());
    state.asteroids.clear();
    state
        .asteroids
        .spawn(Asteroid {
            pos: DVec2::new(30.0, 70.0),
            r: 4.0,
            ..Asteroid::parked()
        })
        .unwrap();
    // Two photons in the same spot: the second one strikes a fragment
    for _ in 0..2 {
        state
            .photons
            .spawn(Photon {
                pos: DVec2::new(30.0, 70.0),
                vel: DVec2::ZERO,
            })
            .unwrap();
    }

    tick(&mut state, &TickInput::default(), &mut rng);
    assert_eq!(state.photons.active_count(), 0);
    assert!(state.score >= 160 + 80);
}
