//! `lg-sim` — tick pipeline orchestrator for the rust_logi engine.
//!
//! # Tick pipeline
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Timers     — fill every Working ProductionTimer by tick_ms.
//!   ② Producers  — miners store mined units; assemblers run recipe cycles.
//!   ③ Dispatch   — each ready base spawns one carrier or pulls orders.
//!   ④ Carriers   — pickup / delivery / return state machine.
//!   ⑤ Movement   — straight-line step toward each carrier's target.
//!   ⑥ Rebuff     — full matching pass every rebuff_interval_ticks.
//!   ⑦ Events     — forward production then network events to the observer.
//! ```
//!
//! Everything runs on one thread in this fixed order; each system sees the
//! state left by the ones before it.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lg_core::SimConfig;
//! use lg_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).world(world).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
