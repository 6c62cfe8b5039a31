//! Fixed-interval driver around the simulation
//!
//! Owns the game state, RNG and input latch. Input events are latched between
//! ticks; each tick consumes one input snapshot and the render snapshot is
//! only republished once the tick has finished. Game events are kept for the
//! latest `step`/`advance` call only.

use std::time::Duration;

use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, InputEvent, InputLatch, RandomSource, RenderSnapshot, SeededRng, tick};

pub struct Session<R: RandomSource = SeededRng> {
    state: GameState,
    rng: R,
    input: InputLatch,
    snapshot: RenderSnapshot,
    events: Vec<GameEvent>,
    accumulator: Duration,
    tick_interval: Duration,
    max_substeps: u32,
}

impl Session<SeededRng> {
    /// Seeded session; `seed` overrides `settings.seed`, falling back to 0
    pub fn new(settings: &Settings, seed: Option<u64>) -> Self {
        let seed = seed.or(settings.seed).unwrap_or(0);
        Self::with_rng(settings, SeededRng::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Session with a caller-provided random source
    pub fn with_rng(settings: &Settings, mut rng: R) -> Self {
        let state = GameState::new(settings, &mut rng);
        let snapshot = RenderSnapshot::capture(&state);
        Self {
            state,
            rng,
            input: InputLatch::new(),
            snapshot,
            events: Vec::new(),
            accumulator: Duration::ZERO,
            tick_interval: Duration::from_millis(settings.tick_interval_ms.max(1)),
            max_substeps: settings.max_substeps.max(1),
        }
    }

    /// Latch an input event for the next tick
    pub fn push(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    /// Run exactly one tick and publish its snapshot
    pub fn step(&mut self) -> &RenderSnapshot {
        self.events.clear();
        self.run_tick();
        &self.snapshot
    }

    fn run_tick(&mut self) {
        let input = self.input.take();
        tick(&mut self.state, &input, &mut self.rng);
        self.events.extend(self.state.drain_events());
        self.snapshot = RenderSnapshot::capture(&self.state);
    }

    /// Accumulate wall time and run every whole tick that fits
    ///
    /// Returns the number of ticks run. Time beyond `max_substeps` ticks is
    /// dropped so a stall can't snowball.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        self.events.clear();

        let mut substeps = 0;
        while self.accumulator >= self.tick_interval && substeps < self.max_substeps {
            self.run_tick();
            self.accumulator -= self.tick_interval;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.tick_interval {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        substeps
    }

    /// Last published snapshot
    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// New viewport; bounds change, entities don't
    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.resize(width, height);
        self.snapshot = RenderSnapshot::capture(&self.state);
    }

    /// Full game reset back to idle
    pub fn reset(&mut self) {
        self.state.reset(&mut self.rng);
        self.events.extend(self.state.drain_events());
        self.input.clear();
        self.snapshot = RenderSnapshot::capture(&self.state);
    }

    /// Take the events of the latest `step`/`advance` call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
