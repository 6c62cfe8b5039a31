//! Demo pilot - plays the game through the input stream
//!
//! Reads only the published snapshot and emits `InputEvent`s, exactly like a
//! human at the keyboard would. Held controls are sent as press/release edges.

use crate::sim::{GamePhase, HeldControls, InputEvent, RenderSnapshot};
use crate::{angle_of, normalize_angle, toroidal_delta};

/// Heading error (radians) inside which the pilot stops turning
const AIM_TOLERANCE: f64 = 0.06;
/// Heading error inside which the pilot opens fire
const FIRE_CONE: f64 = 0.15;
/// Ticks between shots
const FIRE_COOLDOWN: u32 = 6;
/// Targets farther than this get a short thrust burst
const APPROACH_DISTANCE: f64 = 30.0;
/// Thrust burst length out of every `THRUST_PERIOD` ticks
const THRUST_BURST: u64 = 3;
const THRUST_PERIOD: u64 = 30;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    held: HeldControls,
    cooldown: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this tick's input events from the last published snapshot
    pub fn drive(&mut self, snapshot: &RenderSnapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();
        self.cooldown = self.cooldown.saturating_sub(1);

        let mut want = HeldControls::default();
        match snapshot.phase {
            GamePhase::Idle => events.push(InputEvent::StartGame),
            GamePhase::Playing => {
                if let Some(target) = self.nearest_target(snapshot) {
                    let distance = target.length();
                    let error = normalize_angle(angle_of(target) - snapshot.ship.phi);

                    want.turn_left = error > AIM_TOLERANCE;
                    want.turn_right = error < -AIM_TOLERANCE;
                    want.thrust = distance > APPROACH_DISTANCE
                        && error.abs() < FIRE_CONE
                        && snapshot.tick % THRUST_PERIOD < THRUST_BURST;

                    if error.abs() < FIRE_CONE && self.cooldown == 0 {
                        events.push(InputEvent::Fire);
                        self.cooldown = FIRE_COOLDOWN;
                    }
                }
            }
            GamePhase::Paused | GamePhase::Crashed => {}
        }

        self.update_held(want, &mut events);
        events
    }

    /// Offset from the ship to the closest asteroid, across the wrap
    fn nearest_target(&self, snapshot: &RenderSnapshot) -> Option<glam::DVec2> {
        snapshot
            .asteroids
            .iter()
            .map(|a| toroidal_delta(snapshot.ship.pos, a.pos, snapshot.width, snapshot.height))
            .min_by(|a, b| {
                a.length_squared()
                    .partial_cmp(&b.length_squared())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Emit press/release edges for controls that changed
    fn update_held(&mut self, want: HeldControls, events: &mut Vec<InputEvent>) {
        if want.turn_left != self.held.turn_left {
            events.push(InputEvent::TurnLeft(want.turn_left));
        }
        if want.turn_right != self.held.turn_right {
            events.push(InputEvent::TurnRight(want.turn_right));
        }
        if want.thrust != self.held.thrust {
            events.push(InputEvent::Thrust(want.thrust));
        }
        if want.brake != self.held.brake {
            events.push(InputEvent::Brake(want.brake));
        }
        self.held = want;
    }
}
