//! Life Backend - interactive Conway's Game of Life
//!
//! A 25x25 bounded (non-wrapping) grid stepped by a self-rescheduling
//! canister timer. The frontend toggles cells, seeds random soups, clears
//! the board and retargets the tick cadence; queries return immutable
//! snapshots of the published state.

mod grid;
mod rng;
mod sim;
mod types;

pub use grid::{Grid, NEIGHBOR_OFFSETS};
pub use rng::SeedRng;
pub use sim::{Simulation, DEFAULT_TICK_INTERVAL_MS};
pub use types::{GameState, LifeError, SimInfo};

use ic_cdk::{init, post_upgrade, query, update};
use ic_cdk_timers::TimerId;
use std::cell::RefCell;
use std::time::Duration;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Grid dimensions, fixed at construction
const GRID_ROWS: usize = 25;
const GRID_COLS: usize = 25;

/// Probability that `randomize_grid` makes a cell live
const LIVE_PROBABILITY: f64 = 0.3;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static SIM: RefCell<Simulation> =
        RefCell::new(Simulation::new(GRID_ROWS, GRID_COLS, LIVE_PROBABILITY));

    // Pending tick, if any. Taken when it fires, cleared on stop.
    static TIMER_ID: RefCell<Option<TimerId>> = const { RefCell::new(None) };
}

// =============================================================================
// TIMER
// =============================================================================

/// Schedule the next tick after the current interval. The interval is read
/// here, at scheduling time, so a speed change made while running takes
/// effect starting with the very next scheduled tick - never the one
/// already pending.
fn schedule_tick() {
    let delay = SIM.with(|s| s.borrow().interval_ms());
    let timer_id = ic_cdk_timers::set_timer(Duration::from_millis(delay), async {
        fire_tick();
    });
    TIMER_ID.with(|t| *t.borrow_mut() = Some(timer_id));
}

/// Timer callback: advance one generation, then reschedule if still
/// running. `Simulation::tick` re-reads the run flag at fire time, so a
/// timer that races a `stop_simulation` call is a no-op.
fn fire_tick() {
    TIMER_ID.with(|t| t.borrow_mut().take());

    let advanced = SIM.with(|s| s.borrow_mut().tick());
    if !advanced {
        return;
    }

    if SIM.with(|s| s.borrow().is_running()) {
        schedule_tick();
    }
}

/// Cancel a scheduled-but-not-yet-fired tick.
fn cancel_pending_tick() {
    TIMER_ID.with(|t| {
        if let Some(id) = t.borrow_mut().take() {
            ic_cdk_timers::clear_timer(id);
        }
    });
}

// =============================================================================
// CANISTER LIFECYCLE
// =============================================================================

#[init]
fn init() {
    ic_cdk::println!(
        "Life Backend initialized - {}x{} bounded grid, {} ms default tick",
        GRID_ROWS,
        GRID_COLS,
        DEFAULT_TICK_INTERVAL_MS
    );
}

/// Nothing is persisted across upgrades: the simulation always restarts
/// from an empty grid, generation 0, stopped.
#[post_upgrade]
fn post_upgrade() {
    SIM.with(|s| *s.borrow_mut() = Simulation::new(GRID_ROWS, GRID_COLS, LIVE_PROBABILITY));
    TIMER_ID.with(|t| *t.borrow_mut() = None);
    ic_cdk::println!("Life Backend upgraded - state reset to empty grid");
}

// =============================================================================
// UPDATE METHODS
// =============================================================================

/// Start the simulation clock. No-op if already running.
#[update]
fn start_simulation() -> SimInfo {
    let started = SIM.with(|s| s.borrow_mut().start());
    if started {
        schedule_tick();
        ic_cdk::println!("Simulation started");
    }
    build_sim_info()
}

/// Stop the simulation clock. Cancels the pending tick; a tick that fires
/// anyway is discarded by the run-flag guard in `Simulation::tick`.
#[update]
fn stop_simulation() -> SimInfo {
    let stopped = SIM.with(|s| s.borrow_mut().stop());
    if stopped {
        cancel_pending_tick();
        let generation = SIM.with(|s| s.borrow().generation());
        ic_cdk::println!("Simulation stopped at generation {}", generation);
    }
    build_sim_info()
}

/// Retarget the tick cadence, in milliseconds. Rejects zero; valid in
/// either state and picked up by the next scheduled tick.
#[update]
fn set_tick_interval(ms: u64) -> Result<SimInfo, String> {
    SIM.with(|s| s.borrow_mut().set_interval_ms(ms))
        .map_err(String::from)?;
    Ok(build_sim_info())
}

/// Invert one cell. Intended for use while the simulation is stopped: an
/// edit made while running is accepted, but the very next tick may
/// overwrite it.
#[update]
fn toggle_cell(row: u32, col: u32) -> Result<GameState, String> {
    SIM.with(|s| s.borrow_mut().toggle(row as usize, col as usize))
        .map_err(String::from)?;
    Ok(build_game_state())
}

/// Reseed the whole grid, each cell live with probability 0.3. Leaves the
/// generation counter and interval alone.
#[update]
fn randomize_grid() -> GameState {
    let mut rng = SeedRng::from_timestamp(ic_cdk::api::time());
    SIM.with(|s| s.borrow_mut().randomize(&mut rng));
    build_game_state()
}

/// Reset to an all-dead grid, generation 0 and the default interval. The
/// run state is unchanged.
#[update]
fn clear_grid() -> GameState {
    SIM.with(|s| s.borrow_mut().clear());
    build_game_state()
}

/// Advance exactly one generation while stopped. Rejected while running -
/// the clock owns stepping then.
#[update]
fn manual_step() -> Result<GameState, String> {
    let stepped = SIM.with(|s| s.borrow_mut().step_once());
    if !stepped {
        return Err("simulation is running; stop it to step manually".to_string());
    }
    Ok(build_game_state())
}

// =============================================================================
// QUERY METHODS
// =============================================================================

/// Full published snapshot, including all cells.
#[query]
fn get_state() -> GameState {
    build_game_state()
}

/// Lightweight metadata only (no cells) for cheap sync checks.
#[query]
fn get_metadata() -> SimInfo {
    build_sim_info()
}

#[query]
fn get_generation() -> u64 {
    SIM.with(|s| s.borrow().generation())
}

#[query]
fn is_running() -> bool {
    SIM.with(|s| s.borrow().is_running())
}

#[query]
fn get_live_count() -> u32 {
    SIM.with(|s| s.borrow().grid().live_count() as u32)
}

/// Simple greeting
#[query]
fn greet(name: String) -> String {
    format!(
        "Hello, {}! Welcome to the {}x{} Game of Life board.",
        name, GRID_ROWS, GRID_COLS
    )
}

// =============================================================================
// HELPERS
// =============================================================================

fn build_game_state() -> GameState {
    SIM.with(|s| {
        let sim = s.borrow();
        GameState {
            cells: sim.grid().cells().to_vec(),
            width: sim.grid().cols() as u32,
            height: sim.grid().rows() as u32,
            generation: sim.generation(),
            is_running: sim.is_running(),
            tick_interval_ms: sim.interval_ms(),
        }
    })
}

fn build_sim_info() -> SimInfo {
    SIM.with(|s| {
        let sim = s.borrow();
        SimInfo {
            generation: sim.generation(),
            is_running: sim.is_running(),
            tick_interval_ms: sim.interval_ms(),
            live_count: sim.grid().live_count() as u32,
        }
    })
}

// =============================================================================
// TESTS
// =============================================================================


// Export candid interface
ic_cdk::export_candid!();
