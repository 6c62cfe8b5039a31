//! Read-only view of the simulation for the rendering collaborator
//!
//! Built from a `GameState` after a tick completes. It carries poses and
//! local-space outlines only; drawing them is the renderer's job.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};

/// Which HUD text the renderer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HudMessage {
    StartPrompt,
    Score,
    Paused,
    GameOver,
}

impl HudMessage {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Idle => HudMessage::StartPrompt,
            GamePhase::Playing => HudMessage::Score,
            GamePhase::Paused => HudMessage::Paused,
            GamePhase::Crashed => HudMessage::GameOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: DVec2,
    pub phi: f64,
    pub hull: [DVec2; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub pos: DVec2,
    pub phi: f64,
    /// Radius for circular render mode
    pub r: f64,
    pub polygon: Vec<DVec2>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    pub phase: GamePhase,
    pub hud: HudMessage,
    pub score: u64,
    pub circular_asteroids: bool,
    pub ship: ShipView,
    pub photons: Vec<DVec2>,
    pub asteroids: Vec<AsteroidView>,
    pub stars: Vec<DVec2>,
}

impl RenderSnapshot {
    /// Capture the active entities of `state`
    pub fn capture(state: &GameState) -> Self {
        let phase = state.phase();
        Self {
            tick: state.time_ticks,
            width: state.bounds.width,
            height: state.bounds.height,
            phase,
            hud: HudMessage::for_phase(phase),
            score: state.score,
            circular_asteroids: state.circular_asteroids,
            ship: ShipView {
                pos: state.ship.pos,
                phi: state.ship.phi,
                hull: state.ship.hull,
            },
            photons: state.photons.iter_active().map(|(_, p)| p.pos).collect(),
            asteroids: state
                .asteroids
                .iter_active()
                .map(|(_, a)| AsteroidView {
                    pos: a.pos,
                    phi: a.phi,
                    r: a.r,
                    polygon: a.polygon.clone(),
                })
                .collect(),
            stars: state.stars.iter_active().map(|(_, s)| s.pos).collect(),
        }
    }
}
