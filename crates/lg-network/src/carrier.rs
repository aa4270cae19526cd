//! The carrier lifecycle: pickup, delivery, return.

use std::fmt;

use lg_inventory::{Inventory, ItemStack};
use lg_world::{Entity, Events, World};
use tracing::{trace, warn};

use crate::{
    BaseNode, Location, LogisticNetwork, MovingObject, NetworkEvent, NetworkResult, Order,
    ProvideLedger, RequestLedger,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CarrierState {
    /// Never entered by a spawned carrier.
    #[default]
    Idle,
    /// Heading to the order's source.
    Requesting,
    /// Heading to the order's destination with the cargo.
    Delivering,
    /// Heading to any base to be parked.
    Returning,
}

impl fmt::Display for CarrierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CarrierState::Idle       => "idle",
            CarrierState::Requesting => "requesting",
            CarrierState::Delivering => "delivering",
            CarrierState::Returning  => "returning",
        };
        f.write_str(s)
    }
}

/// A mobile agent carrying out one single-leg order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Carrier {
    pub content: ItemStack,
    pub order:   Order,
    pub state:   CarrierState,
}

/// Outcome of one carrier's update.
enum Step {
    Stay,
    Move(Carrier, Option<Entity>),
    Park(Entity),
}

/// Run the state machine of every carrier.
///
/// A carrier has arrived when its target is within `speed * elapsed_ms` of
/// its current position.  This runs before [`move_objects`][crate::move_objects]
/// in a tick, so the check sees the position from the end of the last tick.
pub fn run_carriers(
    network:    &mut LogisticNetwork,
    world:      &mut World,
    elapsed_ms: u32,
    events:     &mut Events<NetworkEvent>,
) -> NetworkResult<()> {
    for entity in world.entities_with3::<Carrier, Location, MovingObject>() {
        let (Some(&carrier), Some(&Location(pos)), Some(&mover)) = (
            world.get::<Carrier>(entity),
            world.get::<Location>(entity),
            world.get::<MovingObject>(entity),
        ) else {
            continue;
        };

        let target_pos = mover
            .target
            .and_then(|t| world.get::<Location>(t))
            .map(|&Location(p)| p);
        let arrived = target_pos.is_some_and(|p| pos.distance(p) <= mover.reach(elapsed_ms));

        let step = match carrier.state {
            CarrierState::Idle => Step::Stay,
            CarrierState::Requesting => match target_pos {
                None => abort(network, world, entity, carrier, events),
                Some(_) if !world.is_alive(carrier.order.destination) => {
                    abort(network, world, entity, carrier, events)
                }
                Some(_) if arrived => pick_up(network, world, entity, carrier, events),
                Some(_) => Step::Stay,
            },
            CarrierState::Delivering => match target_pos {
                None => lose_cargo(network, world, entity, carrier, events),
                Some(_) if arrived => deliver(network, world, entity, carrier, events)?,
                Some(_) => Step::Stay,
            },
            CarrierState::Returning => {
                let home = mover
                    .target
                    .filter(|&t| target_pos.is_some() && world.has::<BaseNode>(t));
                match home {
                    Some(base) if arrived => Step::Park(base),
                    Some(_) => Step::Stay,
                    None => {
                        let base = network.closest_base(world, pos, false);
                        if base.is_some() {
                            trace!(carrier = %entity, "return target re-picked");
                        }
                        Step::Move(carrier, base)
                    }
                }
            }
        };

        match step {
            Step::Stay => {}
            Step::Move(next, target) => {
                if let Some(c) = world.get_mut::<Carrier>(entity) {
                    *c = next;
                }
                if let Some(m) = world.get_mut::<MovingObject>(entity) {
                    m.target = target;
                }
            }
            Step::Park(base) => park(network, world, entity, base, events),
        }
    }
    Ok(())
}

/// Take the cargo from the source and head for the destination.
fn pick_up(
    network: &mut LogisticNetwork,
    world:   &mut World,
    entity:  Entity,
    mut carrier: Carrier,
    events:  &mut Events<NetworkEvent>,
) -> Step {
    let order = carrier.order;
    let taken = world
        .get_mut::<Inventory>(order.source)
        .map_or(ItemStack::empty(order.item), |inv| inv.take(order.item, order.amount));
    if let Some(ledger) = world.get_mut::<ProvideLedger>(order.source) {
        ledger.change_reservation(order.item, -order.amount);
    }
    if taken.count < order.amount {
        trace!(carrier = %entity, %order, got = taken.count, "short pickup");
    }

    network.stats.picked_up_items += taken.count as u64;
    events.publish(NetworkEvent::PickedUp {
        carrier: entity,
        source:  order.source,
        item:    order.item,
        amount:  taken.count,
    });

    carrier.content = taken;
    carrier.state = CarrierState::Delivering;
    trace!(carrier = %entity, "requesting -> delivering");
    Step::Move(carrier, Some(order.destination))
}

/// Store the cargo at the destination and head home.
///
/// Whatever does not fit is dropped and counted.
fn deliver(
    network: &mut LogisticNetwork,
    world:   &mut World,
    entity:  Entity,
    mut carrier: Carrier,
    events:  &mut Events<NetworkEvent>,
) -> NetworkResult<Step> {
    let order = carrier.order;
    let cargo = carrier.content;
    let stored = match world.get_mut::<Inventory>(order.destination) {
        Some(inv) => inv.try_store_as_much_as_possible(cargo.item, cargo.count.max(0))?,
        None => 0,
    };
    if let Some(ledger) = world.get_mut::<RequestLedger>(order.destination) {
        ledger.change_reservation(order.item, -order.amount);
    }

    network.stats.delivered_items += stored as u64;
    events.publish(NetworkEvent::Delivered {
        carrier:     entity,
        destination: order.destination,
        item:        cargo.item,
        amount:      stored,
    });
    let dropped = cargo.count - stored;
    if dropped > 0 {
        network.stats.dropped_items += dropped as u64;
        warn!(carrier = %entity, destination = %order.destination, dropped, "destination full, cargo dropped");
        events.publish(NetworkEvent::DeliveryShortfall {
            carrier:     entity,
            destination: order.destination,
            item:        cargo.item,
            dropped,
        });
    }

    carrier.content = ItemStack::empty(order.item);
    Ok(head_home(network, world, entity, carrier))
}

/// An endpoint vanished before pickup: release the survivor's reservation
/// and go home empty.
fn abort(
    network: &mut LogisticNetwork,
    world:   &mut World,
    entity:  Entity,
    carrier: Carrier,
    events:  &mut Events<NetworkEvent>,
) -> Step {
    let order = carrier.order;
    order.release_surviving(world);
    network.stats.carriers_aborted += 1;
    warn!(carrier = %entity, %order, "order endpoint vanished, carrier aborted");
    events.publish(NetworkEvent::CarrierAborted { carrier: entity, source: order.source });
    head_home(network, world, entity, carrier)
}

/// The destination vanished mid-delivery: the cargo is lost.
fn lose_cargo(
    network: &mut LogisticNetwork,
    world:   &mut World,
    entity:  Entity,
    mut carrier: Carrier,
    events:  &mut Events<NetworkEvent>,
) -> Step {
    let order = carrier.order;
    let dropped = carrier.content.count.max(0);
    network.stats.dropped_items += dropped as u64;
    warn!(carrier = %entity, destination = %order.destination, dropped, "destination vanished, cargo dropped");
    events.publish(NetworkEvent::DeliveryShortfall {
        carrier:     entity,
        destination: order.destination,
        item:        order.item,
        dropped,
    });
    carrier.content = ItemStack::empty(order.item);
    head_home(network, world, entity, carrier)
}

fn head_home(network: &LogisticNetwork, world: &World, entity: Entity, mut carrier: Carrier) -> Step {
    carrier.state = CarrierState::Returning;
    let pos = world.get::<Location>(entity).map(|&Location(p)| p).unwrap_or_default();
    let base = network.closest_base(world, pos, false);
    if base.is_none() {
        warn!(carrier = %entity, "no base to return to");
    }
    trace!(carrier = %entity, "-> returning");
    Step::Move(carrier, base)
}

/// Back at a base: free the carrier slot and remove the carrier.
fn park(
    network: &mut LogisticNetwork,
    world:   &mut World,
    entity:  Entity,
    base:    Entity,
    events:  &mut Events<NetworkEvent>,
) {
    if let Some(node) = world.get_mut::<BaseNode>(base) {
        node.carrier_count += 1;
    }
    world.despawn(entity);
    network.carriers_in_flight = network.carriers_in_flight.saturating_sub(1);
    network.stats.carriers_returned += 1;
    trace!(carrier = %entity, %base, "carrier parked");
    events.publish(NetworkEvent::CarrierReturned { carrier: entity, base });
}
