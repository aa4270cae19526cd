use lg_core::LgError;
use lg_inventory::InventoryError;
use lg_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] LgError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("production error: {0}")]
    Production(#[from] InventoryError),
}

pub type SimResult<T> = Result<T, SimError>;
