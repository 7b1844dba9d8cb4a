//! Simulation state machine: Stopped <-> Running.
//!
//! Owns the published grid, the run flag, the generation counter and the
//! tick interval. All transitions here are pure state changes; the timer
//! side effects (scheduling, cancellation) live in `lib.rs` so this module
//! unit-tests without a canister host.

use crate::grid::Grid;
use crate::rng::SeedRng;
use crate::types::LifeError;

/// Reference cadence: one generation every half second.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

#[derive(Clone, Debug)]
pub struct Simulation {
    grid: Grid,
    running: bool,
    generation: u64,
    interval_ms: u64,
    live_probability: f64,
}

impl Simulation {
    /// Fresh simulation: all-dead grid, stopped, generation 0, default
    /// interval.
    pub fn new(rows: usize, cols: usize, live_probability: f64) -> Self {
        Self {
            grid: Grid::empty(rows, cols),
            running: false,
            generation: 0,
            interval_ms: DEFAULT_TICK_INTERVAL_MS,
            live_probability,
        }
    }

    /// Stopped -> Running. Returns false (and does nothing) when already
    /// running; the caller schedules the first tick on a true return.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Running -> Stopped. Returns false when already stopped; the caller
    /// cancels the pending timer on a true return. A tick already in flight
    /// is discarded by the guard in `tick`.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Retarget the cadence. Valid in either state; only future scheduling
    /// reads it, so the currently pending tick keeps its delay. Zero is
    /// rejected and the prior interval retained.
    pub fn set_interval_ms(&mut self, ms: u64) -> Result<(), LifeError> {
        if ms == 0 {
            return Err(LifeError::InvalidInterval { ms });
        }
        self.interval_ms = ms;
        Ok(())
    }

    /// One scheduled tick. Re-checks `running` at fire time: a timer that
    /// outlives a stop call must not advance the simulation, so when
    /// stopped this returns false and changes nothing. Otherwise the grid
    /// is replaced with its next generation and the counter moves by
    /// exactly 1.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.grid = self.grid.step();
        self.generation += 1;
        true
    }

    /// Advance a single generation manually. Only meaningful while stopped;
    /// while running the clock owns stepping and this returns false.
    pub fn step_once(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.grid = self.grid.step();
        self.generation += 1;
        true
    }

    /// Invert one cell. Out of bounds is reported and leaves the grid
    /// untouched. Editing while running is accepted; the next tick may
    /// overwrite the edit (caller-level policy, not enforced here).
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), LifeError> {
        self.grid = self.grid.toggled(row, col)?;
        Ok(())
    }

    /// Reseed the whole board. Generation counter and interval are left
    /// alone; only `clear` resets those.
    pub fn randomize(&mut self, rng: &mut SeedRng) {
        self.grid = Grid::random(
            self.grid.rows(),
            self.grid.cols(),
            self.live_probability,
            rng,
        );
    }

    /// Back to an all-dead grid, generation 0 and the default interval.
    /// The run state is not touched.
    pub fn clear(&mut self) {
        self.grid = Grid::empty(self.grid.rows(), self.grid.cols());
        self.generation = 0;
        self.interval_ms = DEFAULT_TICK_INTERVAL_MS;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
