//! `lg-inventory` — the item container used by every node and carrier.
//!
//! # Crate layout
//!
//! | Module        | Contents                                   |
//! |---------------|--------------------------------------------|
//! | [`stack`]     | `ItemStack` — `count` units of one item    |
//! | [`inventory`] | `Inventory` — fixed-capacity store         |
//! | [`error`]     | `InventoryError`, `InventoryResult<T>`     |
//!
//! # Invariants
//!
//! - `0 <= used() <= capacity()` after every operation.
//! - `used()` equals the sum of all stored counts.
//! - No item is ever stored with a count of zero or less.
//! - Batch operations are all-or-nothing.
//!
//! Quantities are signed at the API boundary so that a negative request can
//! be *rejected* as invalid input rather than being unrepresentable.

pub mod error;
pub mod inventory;
pub mod stack;


pub use error::{InventoryError, InventoryResult};
pub use inventory::Inventory;
pub use stack::ItemStack;
