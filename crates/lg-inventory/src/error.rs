use lg_core::ItemId;
use thiserror::Error;

/// Invalid input to an [`Inventory`][crate::Inventory] operation.
///
/// Running out of space is *not* an error; it is reported through the
/// `bool` / clamped return values of the store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("inventory capacity must be non-negative, got {0}")]
    NegativeCapacity(i32),

    #[error("cannot store or remove a negative quantity ({quantity}) of {item}")]
    NegativeQuantity { item: ItemId, quantity: i32 },

    #[error("{stored} items do not fit in an inventory of capacity {capacity}")]
    OverCapacity { stored: i64, capacity: i32 },
}

pub type InventoryResult<T> = Result<T, InventoryError>;
