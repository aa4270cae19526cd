use lg_world::Entity;

use crate::ProductionState;

/// Notifications published by the production systems.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProductionEvent {
    /// An assembler stored the outputs of one recipe cycle.
    Completed { producer: Entity },
    /// A miner stored one unit of its target item.
    MiningCompleted { miner: Entity },
    StateChanged {
        producer: Entity,
        from:     ProductionState,
        to:       ProductionState,
    },
}

impl ProductionEvent {
    /// The producer that raised the event.
    pub fn source(&self) -> Entity {
        match *self {
            ProductionEvent::Completed { producer }
            | ProductionEvent::StateChanged { producer, .. } => producer,
            ProductionEvent::MiningCompleted { miner } => miner,
        }
    }

    /// Short machine-readable kind, used as the `kind` column in output.
    pub fn kind(&self) -> &'static str {
        match self {
            ProductionEvent::Completed { .. }       => "production_completed",
            ProductionEvent::MiningCompleted { .. } => "mining_completed",
            ProductionEvent::StateChanged { .. }    => "production_state_changed",
        }
    }
}
