use lg_inventory::InventoryError;
use lg_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("carrier speed must be finite and positive, got {0}")]
    InvalidSpeed(f32),

    #[error("order buffer capacity must be at least 1")]
    ZeroBufferCapacity,

    #[error("base carrier count must be non-negative, got {0}")]
    NegativeCarrierCount(i32),

    #[error("dispatch interval must be positive, got {0} ms")]
    InvalidDispatchInterval(i32),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
