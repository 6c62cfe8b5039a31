//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here, apart from the RNG.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::pool::{Parked, Pool};
use super::rng::RandomSource;
use crate::consts::*;
use crate::settings::{Settings, ShipTuning};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start command
    Idle,
    /// Active gameplay
    Playing,
    /// Pause counter is odd
    Paused,
    /// Ship hit an asteroid; the round resets on the next tick
    Crashed,
}

/// Playfield size in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Bounds for a viewport; height is fixed and width follows the aspect ratio
    pub fn from_viewport(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width: WORLD_HEIGHT * width as f64 / height as f64,
            height: WORLD_HEIGHT,
        })
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies in `[0, width) x [0, height)`
    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width && pos.y >= 0.0 && pos.y < self.height
    }

    /// Toroidal wrap of a position
    pub fn wrap(&self, pos: DVec2) -> DVec2 {
        DVec2::new(
            crate::wrap_coordinate(pos.x, self.width),
            crate::wrap_coordinate(pos.y, self.height),
        )
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: DVec2,
    /// Heading (radians, 0 = up, positive = counter-clockwise)
    pub phi: f64,
    pub vel: DVec2,
    /// Collision radius
    pub r: f64,
    pub velocity_max: f64,
    pub acceleration: f64,
    /// Hull triangle in local space
    pub hull: [DVec2; 3],
}

impl Ship {
    /// A stationary ship at `pos`, pointing up
    pub fn new(pos: DVec2, tuning: &ShipTuning) -> Self {
        let r = tuning.radius;
        Self {
            pos,
            phi: 0.0,
            vel: DVec2::ZERO,
            r,
            velocity_max: tuning.velocity_max,
            acceleration: tuning.acceleration,
            hull: [
                DVec2::new(0.0, r),
                DVec2::new(r / 2.0, -r),
                DVec2::new(-r / 2.0, -r),
            ],
        }
    }

    pub fn heading(&self) -> DVec2 {
        crate::heading(self.phi)
    }

    /// Muzzle point at the nose of the hull
    pub fn nose(&self) -> DVec2 {
        self.pos + self.heading() * self.r
    }
}

/// A laser shot; collides as a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photon {
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Parked for Photon {
    fn parked() -> Self {
        Self {
            pos: DVec2::new(PHOTON_PARK.0, PHOTON_PARK.1),
            vel: DVec2::ZERO,
        }
    }
}

/// A free-floating polygonal asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: DVec2,
    pub phi: f64,
    /// Spin per tick (radians)
    pub dphi: f64,
    pub vel: DVec2,
    /// Largest vertex distance from center, fixed at creation
    pub r: f64,
    /// Scale parameter the shape was generated with
    pub size: f64,
    /// Distinct outline vertices (the polygon closes with one extra point)
    pub n_vertices: usize,
    /// Local-space outline, `n_vertices + 1` points with the last equal to the first
    pub polygon: Vec<DVec2>,
}

impl Parked for Asteroid {
    fn parked() -> Self {
        Self {
            pos: DVec2::new(ASTEROID_PARK.0, ASTEROID_PARK.1),
            phi: 0.0,
            dphi: 0.0,
            vel: DVec2::ZERO,
            r: 0.0,
            size: 0.0,
            n_vertices: 0,
            polygon: Vec::new(),
        }
    }
}

/// Background star (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: DVec2,
}

impl Parked for Star {
    fn parked() -> Self {
        Self { pos: DVec2::ZERO }
    }
}

/// Things that happened during a tick, for audio/log consumers
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted { asteroids: usize },
    PhotonFired { slot: usize },
    AsteroidDestroyed { slot: usize, radius: f64, points: u64 },
    AsteroidFragmented { parent_radius: f64, children: usize },
    ShipCrashed { score: u64 },
    RoundReset,
    PauseToggled { paused: bool },
    RenderModeToggled { circular: bool },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub bounds: Bounds,
    pub ship: Ship,
    pub photons: Pool<Photon>,
    pub asteroids: Pool<Asteroid>,
    pub stars: Pool<Star>,
    pub score: u64,
    /// A round is in progress (start command received)
    pub started: bool,
    /// Ship hit an asteroid this round
    pub crashed: bool,
    /// Pause presses this round; odd means paused
    pub pause_count: u32,
    /// Render asteroids as circles instead of outlines
    pub circular_asteroids: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ship tuning applied on every reset
    pub ship_tuning: ShipTuning,
    pub photon_speed: f64,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game with the star field seeded
    pub fn new<R: RandomSource + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        let bounds = Bounds::from_viewport(settings.viewport_width, settings.viewport_height)
            .unwrap_or(Bounds {
                width: WORLD_HEIGHT,
                height: WORLD_HEIGHT,
            });
        let mut state = Self {
            bounds,
            ship: Ship::new(bounds.center(), &settings.ship),
            photons: Pool::new(settings.capacity.photons),
            asteroids: Pool::new(settings.capacity.asteroids),
            stars: Pool::new(settings.capacity.stars),
            score: 0,
            started: false,
            crashed: false,
            pause_count: 0,
            circular_asteroids: settings.circular_asteroids,
            time_ticks: 0,
            ship_tuning: settings.ship,
            photon_speed: settings.photon_speed,
            events: Vec::new(),
        };
        super::spawn::seed_stars(&mut state, rng);
        state
    }

    /// Current phase derived from the round flags
    pub fn phase(&self) -> GamePhase {
        if !self.started {
            GamePhase::Idle
        } else if self.crashed {
            GamePhase::Crashed
        } else if self.is_paused() {
            GamePhase::Paused
        } else {
            GamePhase::Playing
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pause_count % 2 == 1
    }

    /// Whether ship, photons and asteroids advance this tick
    pub fn is_advancing(&self) -> bool {
        self.phase() == GamePhase::Playing
    }

    /// Full reset back to `Idle`
    ///
    /// Clears asteroids and photons, recenters the ship, zeroes the score and
    /// re-seeds any inactive star slots.
    pub fn reset<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.asteroids.clear();
        self.photons.clear();
        self.ship = Ship::new(self.bounds.center(), &self.ship_tuning);
        self.score = 0;
        self.started = false;
        self.crashed = false;
        self.pause_count = 0;
        super::spawn::seed_stars(self, rng);
        self.events.push(GameEvent::RoundReset);
        log::info!("Round reset");
    }

    /// Recompute the playfield width for a new viewport
    ///
    /// The round carries on. Entities left past a shrunken far edge wrap to 0
    /// and photons there are released, as if they had crossed it.
    pub fn resize(&mut self, viewport_width: u32, viewport_height: u32) {
        match Bounds::from_viewport(viewport_width, viewport_height) {
            Some(bounds) => {
                log::debug!(
                    "Viewport {}x{}: playfield {:.2} x {:.2}",
                    viewport_width,
                    viewport_height,
                    bounds.width,
                    bounds.height
                );
                self.bounds = bounds;
                self.confine_to_bounds();
            }
            None => log::warn!(
                "Ignoring degenerate viewport {}x{}",
                viewport_width,
                viewport_height
            ),
        }
    }

    fn confine_to_bounds(&mut self) {
        let bounds = self.bounds;
        self.ship.pos = bounds.wrap(self.ship.pos);
        for (_, asteroid) in self.asteroids.iter_active_mut() {
            asteroid.pos = bounds.wrap(asteroid.pos);
        }
        for (_, star) in self.stars.iter_active_mut() {
            star.pos = bounds.wrap(star.pos);
        }

        let outside: Vec<usize> = self
            .photons
            .iter_active()
            .filter(|(_, photon)| !bounds.contains(photon.pos))
            .map(|(index, _)| index)
            .collect();
        for &index in &outside {
            self.photons.release(index);
        }
        if !outside.is_empty() {
            log::debug!("Resize dropped {} photons", outside.len());
        }
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
