//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Injected RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod physics;
pub mod pool;
pub mod rng;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, photon_target, ship_hit};
pub use input::{Command, HeldControls, InputEvent, InputLatch, TickInput};
pub use pool::{Parked, Pool, Slot};
pub use rng::{RandomSource, SeededRng};
pub use snapshot::{AsteroidView, HudMessage, RenderSnapshot, ShipView};
pub use state::{Asteroid, Bounds, GameEvent, GamePhase, GameState, Photon, Ship, Star};
pub use tick::tick;
