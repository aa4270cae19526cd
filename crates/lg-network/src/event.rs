use lg_core::ItemId;
use lg_world::Entity;

/// Lifecycle notifications published by the network systems.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NetworkEvent {
    CarrierCreated { carrier: Entity, base: Entity },
    PickedUp {
        carrier: Entity,
        source:  Entity,
        item:    ItemId,
        amount:  i32,
    },
    Delivered {
        carrier:     Entity,
        destination: Entity,
        item:        ItemId,
        amount:      i32,
    },
    /// Part (or all) of a delivery did not fit or had nowhere to go.
    DeliveryShortfall {
        carrier:     Entity,
        destination: Entity,
        item:        ItemId,
        dropped:     i32,
    },
    /// The carrier's order lost its provider or requester before pickup.
    CarrierAborted { carrier: Entity, source: Entity },
    CarrierReturned { carrier: Entity, base: Entity },
}

impl NetworkEvent {
    /// The carrier the event is about.
    pub fn carrier(&self) -> Entity {
        match *self {
            NetworkEvent::CarrierCreated { carrier, .. }
            | NetworkEvent::PickedUp { carrier, .. }
            | NetworkEvent::Delivered { carrier, .. }
            | NetworkEvent::DeliveryShortfall { carrier, .. }
            | NetworkEvent::CarrierAborted { carrier, .. }
            | NetworkEvent::CarrierReturned { carrier, .. } => carrier,
        }
    }

    /// The node on the other side of the event.
    pub fn node(&self) -> Entity {
        match *self {
            NetworkEvent::CarrierCreated { base, .. }
            | NetworkEvent::CarrierReturned { base, .. } => base,
            NetworkEvent::PickedUp { source, .. }
            | NetworkEvent::CarrierAborted { source, .. } => source,
            NetworkEvent::Delivered { destination, .. }
            | NetworkEvent::DeliveryShortfall { destination, .. } => destination,
        }
    }

    /// Short machine-readable kind, used as the `kind` column in output.
    pub fn kind(&self) -> &'static str {
        match self {
            NetworkEvent::CarrierCreated { .. }    => "carrier_created",
            NetworkEvent::PickedUp { .. }          => "picked_up",
            NetworkEvent::Delivered { .. }         => "delivered",
            NetworkEvent::DeliveryShortfall { .. } => "delivery_shortfall",
            NetworkEvent::CarrierAborted { .. }    => "carrier_aborted",
            NetworkEvent::CarrierReturned { .. }   => "carrier_returned",
        }
    }

    /// `(item, amount)` for events that move goods.
    pub fn cargo(&self) -> Option<(ItemId, i32)> {
        match *self {
            NetworkEvent::PickedUp { item, amount, .. }
            | NetworkEvent::Delivered { item, amount, .. } => Some((item, amount)),
            NetworkEvent::DeliveryShortfall { item, dropped, .. } => Some((item, dropped)),
            _ => None,
        }
    }
}
