//! `lg-production` — things that take time: miners, assemblers, and the
//! dispatch cadence of logistic bases.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`timer`]   | `ProductionTimer`, `ProductionState`                          |
//! | [`recipe`]  | `Recipe` (assembler component), `MiningTarget` (miner component) |
//! | [`event`]   | `ProductionEvent`                                             |
//! | [`systems`] | `advance_timers`, `run_miners`, `run_assemblers`              |
//!
//! # Per-tick order
//!
//! `advance_timers` first, then `run_miners` / `run_assemblers`.  A timer that
//! completes this tick is therefore acted on in the same tick.
//!
//! Every producer keeps its stock in the [`Inventory`][lg_inventory::Inventory]
//! component of its own entity; assemblers draw inputs from and store outputs
//! into that same container.

pub mod event;
pub mod recipe;
pub mod systems;
pub mod timer;

#[cfg(test)]
mod tests;

pub use event::ProductionEvent;
pub use recipe::{MiningTarget, Recipe};
pub use systems::{advance_timers, run_assemblers, run_miners};
pub use timer::{ProductionState, ProductionTimer};
