//! `lg-world` — the object store the logistics engine runs on.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`entity`]      | `Entity` — generation-counted handle                         |
//! | [`component`]   | `Component` marker, `ComponentVec`, `ComponentMap`           |
//! | [`world`]       | `World` — spawn / despawn / attach / detach / query          |
//! | [`prototype`]   | `Prototype` — reusable, typed list of components to attach   |
//! | [`events`]      | `Events<E>` — fire-and-forget publish queue                  |
//! | [`error`]       | `WorldError`, `WorldResult<T>`                               |
//!
//! # Handles
//!
//! Slots are recycled after `despawn`, but every reuse bumps the slot's
//! generation.  A handle kept past its entity's death therefore resolves to
//! "gone" (`None` / `WorldError::Dead`) instead of silently aliasing the
//! slot's next occupant.
//!
//! # Iteration order
//!
//! Queries return entities in ascending slot order.  As long as no entity
//! has been despawned this equals creation order; recycled slots are reused
//! most-recently-freed first.

pub mod component;
pub mod entity;
pub mod error;
pub mod events;
pub mod prototype;
pub mod world;


pub use component::{Component, ComponentMap, ComponentVec, TypedComponentVec};
pub use entity::Entity;
pub use error::{WorldError, WorldResult};
pub use events::Events;
pub use prototype::Prototype;
pub use world::World;
