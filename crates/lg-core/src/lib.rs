//! `lg-core` — foundational types for the `rust_logi` logistics engine.
//!
//! This crate is a dependency of every other `lg-*` crate.  It has no `lg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ItemId`                                              |
//! | [`geo`]         | `Vec2` planar position, squared / straight distance   |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (scene generation)                           |
//! | [`error`]       | `LgError`, `LgResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{LgError, LgResult};
pub use geo::Vec2;
pub use ids::ItemId;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
