//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Each tick represents a
//! fixed number of elapsed milliseconds, held in `SimClock`:
//!
//!   elapsed_ms = tick * tick_ms
//!
//! Every speed and production cost in the engine is expressed "per
//! millisecond", so all per-tick arithmetic is linear in `tick_ms`.  The
//! default tick is 16 ms (≈ 60 ticks per simulated second).

use std::fmt;

use crate::{LgError, LgResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// `true` if this tick falls on a multiple of `interval`.
    ///
    /// An `interval` of 0 never matches, which is how periodic work is
    /// disabled in [`SimConfig`].
    #[inline]
    pub fn is_every(self, interval: u64) -> bool {
        interval > 0 && self.0.is_multiple_of(interval)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to elapsed milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Milliseconds of simulated time per tick.
    pub tick_ms: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_ms: u32) -> Self {
        Self {
            tick_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_ms as u64
    }

    /// How many ticks span `ms` milliseconds (rounds up).
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_ms.max(1) as u64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed_ms();
        write!(f, "{} ({}.{:03} s)", self.current_tick, ms / 1_000, ms % 1_000)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from JSON by the application crate and
/// passed to the simulation runner.  Call [`validate`](Self::validate) before
/// use; `SimBuilder` does so automatically.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Elapsed milliseconds handed to every system per tick.
    pub tick_ms: u32,

    /// Total ticks to simulate with `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  Only scene generation is random; the engine itself
    /// is fully deterministic.
    pub seed: u64,

    /// Carrier speed in world units per millisecond.
    pub carrier_speed: f32,

    /// Maximum number of orders produced by one matching pass.
    pub order_buffer_capacity: usize,

    /// Run a full matching pass every N ticks.  0 disables the periodic pass;
    /// bases still trigger one whenever the shared queue drains.
    pub rebuff_interval_ticks: u64,

    /// Hand a snapshot to the observer every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms:               16,
            total_ticks:           3_600,
            seed:                  0,
            carrier_speed:         0.05,
            order_buffer_capacity: 1_024,
            rebuff_interval_ticks: 60,
            output_interval_ticks: 60,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_ms)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> LgResult<()> {
        if self.tick_ms == 0 {
            return Err(LgError::Config("tick_ms must be positive".into()));
        }
        if !(self.carrier_speed.is_finite() && self.carrier_speed > 0.0) {
            return Err(LgError::Config(format!(
                "carrier_speed must be a positive finite number, got {}",
                self.carrier_speed
            )));
        }
        if self.order_buffer_capacity == 0 {
            return Err(LgError::Config("order_buffer_capacity must be positive".into()));
        }
        Ok(())
    }
}
