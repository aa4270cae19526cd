//! Bases: carrier pools with a local order queue and a throttled spawn.

use std::collections::VecDeque;

use lg_inventory::ItemStack;
use lg_production::ProductionTimer;
use lg_world::{Entity, Events, World};
use tracing::{trace, warn};

use crate::{
    Carrier, CarrierState, Location, LogisticNetwork, MovingObject, NetworkEvent, NetworkResult,
    Order,
};

/// A base's free carriers and the orders assigned to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseNode {
    /// Carriers parked here and ready to spawn.
    pub carrier_count: i32,
    pub pending:       VecDeque<Order>,
}

impl BaseNode {
    pub fn new(carrier_count: i32) -> Self {
        Self { carrier_count, pending: VecDeque::new() }
    }

    /// Split one unit off the head pending order.
    ///
    /// The head is dequeued when that was its last unit.
    pub fn split_unit(&mut self) -> Option<Order> {
        let head = self.pending.front_mut()?;
        let unit = head.with_amount(1);
        if head.amount <= 1 {
            self.pending.pop_front();
        } else {
            head.amount -= 1;
        }
        Some(unit)
    }

    /// Units across all pending orders.
    pub fn pending_units(&self) -> i32 {
        self.pending.iter().map(|o| o.amount).sum()
    }
}

/// Give every base whose timer has completed one unit of work.
///
/// A ready base with a free carrier spawns one carrier for one unit of its
/// head pending order, or, with nothing pending, asks the network to assign
/// orders.  The timer is reset on every completion, work or not, so the
/// check cadence stays fixed.
pub fn dispatch_carriers(
    network: &mut LogisticNetwork,
    world:   &mut World,
    events:  &mut Events<NetworkEvent>,
) -> NetworkResult<()> {
    for base in world.entities_with3::<BaseNode, ProductionTimer, Location>() {
        let ready = world
            .get::<ProductionTimer>(base)
            .is_some_and(ProductionTimer::is_completed);
        if !ready {
            continue;
        }
        drop_stale_pending(network, world, base);

        let work = match world.get_mut::<BaseNode>(base) {
            Some(node) if node.carrier_count > 0 => match node.split_unit() {
                Some(order) => {
                    node.carrier_count -= 1;
                    Work::Spawn(order)
                }
                None => Work::Assign,
            },
            _ => Work::Idle,
        };

        match work {
            Work::Spawn(order) => {
                spawn_carrier(network, world, base, order, events)?;
            }
            Work::Assign => {
                network.assign_orders(world);
            }
            Work::Idle => {}
        }

        if let Some(timer) = world.get_mut::<ProductionTimer>(base) {
            timer.reset();
        }
    }
    Ok(())
}

/// Release and discard pending orders whose provider or requester is gone.
fn drop_stale_pending(network: &mut LogisticNetwork, world: &mut World, base: Entity) {
    let stale: Vec<Order> = match world.get::<BaseNode>(base) {
        Some(node) => node
            .pending
            .iter()
            .filter(|o| !o.endpoints_alive(world))
            .copied()
            .collect(),
        None => return,
    };
    if stale.is_empty() {
        return;
    }
    if let Some(node) = world.get_mut::<BaseNode>(base) {
        node.pending.retain(|o| !stale.contains(o));
    }
    for order in &stale {
        order.release_surviving(world);
        warn!(%base, %order, "dropping pending order with vanished endpoint");
    }
    network.stats.stale_orders += stale.len() as u64;
}

enum Work {
    Spawn(Order),
    Assign,
    Idle,
}

fn spawn_carrier(
    network: &mut LogisticNetwork,
    world:   &mut World,
    base:    Entity,
    order:   Order,
    events:  &mut Events<NetworkEvent>,
) -> NetworkResult<Entity> {
    let at = world.try_get::<Location>(base).copied()?;
    let carrier = world.spawn();
    world.insert(carrier, at)?;
    world.insert(carrier, Carrier {
        content: ItemStack::empty(order.item),
        order,
        state:   CarrierState::Requesting,
    })?;
    world.insert(carrier, MovingObject {
        target: Some(order.source),
        speed:  network.carrier_speed,
    })?;

    network.carriers_in_flight += 1;
    network.stats.carriers_created += 1;
    trace!(%carrier, %base, %order, "carrier created");
    events.publish(NetworkEvent::CarrierCreated { carrier, base });
    Ok(carrier)
}
