use lg_core::ItemId;
use lg_inventory::ItemStack;

use crate::{ProductionState, ProductionTimer};

/// What an assembler turns into what, and how long it takes at speed 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub base_time_ms: i32,
    pub inputs:       Vec<ItemStack>,
    pub outputs:      Vec<ItemStack>,
}

impl Recipe {
    pub fn new(base_time_ms: i32, inputs: Vec<ItemStack>, outputs: Vec<ItemStack>) -> Self {
        Self { base_time_ms, inputs, outputs }
    }

    /// Timer for an assembler running this recipe at `speed`.
    ///
    /// Starts in `WaitingForResources`: the first cycle begins once the
    /// inputs have been pulled.
    pub fn timer(&self, speed: f32) -> ProductionTimer {
        ProductionTimer::with_state(self.base_time_ms, speed, ProductionState::WaitingForResources)
    }
}

/// The item a miner extracts, one unit per completed cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MiningTarget(pub ItemId);
