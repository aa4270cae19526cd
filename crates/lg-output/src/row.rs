//! Plain data row types written by output backends.

use lg_network::NetworkEvent;
use lg_production::ProductionEvent;
use lg_world::Entity;

/// One published lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub tick:    u64,
    pub kind:    &'static str,
    /// The carrier, or the producer for production events.
    pub subject: Entity,
    /// The node on the other side (base, provider, requester), if any.
    pub node:    Option<Entity>,
    pub item:    Option<u32>,
    pub amount:  Option<i32>,
}

impl EventRow {
    pub fn from_network(tick: u64, event: &NetworkEvent) -> Self {
        let cargo = event.cargo();
        Self {
            tick,
            kind:    event.kind(),
            subject: event.carrier(),
            node:    Some(event.node()),
            item:    cargo.map(|(item, _)| item.0),
            amount:  cargo.map(|(_, amount)| amount),
        }
    }

    pub fn from_production(tick: u64, event: &ProductionEvent) -> Self {
        Self {
            tick,
            kind:    event.kind(),
            subject: event.source(),
            node:    None,
            item:    None,
            amount:  None,
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:               u64,
    pub elapsed_ms:         u64,
    pub carriers_in_flight: u32,
    pub buffered_orders:    u64,
    pub network_events:     u64,
    pub production_events:  u64,
    pub delivered_items:    u64,
    pub dropped_items:      u64,
    pub rebuffed:           bool,
}

/// Count of one item held by one node at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryRow {
    pub tick:   u64,
    pub node:   Entity,
    pub item:   u32,
    pub count:  i32,
}
