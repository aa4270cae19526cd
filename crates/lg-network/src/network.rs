//! Network-wide matching and base assignment.

use lg_core::{ItemId, SimConfig, Vec2};
use lg_inventory::Inventory;
use lg_world::{Entity, World};
use tracing::{debug, warn};

use crate::{
    BaseNode, Location, NetworkError, NetworkResult, NetworkStats, Order, OrderBuffer,
    ProvideLedger, RequestLedger,
};

/// What one rebuff pass produced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuffOutcome {
    pub orders:    usize,
    /// Units reserved across all new orders.
    pub units:     i64,
    /// The buffer filled before every requester was visited.
    pub truncated: bool,
}

/// Owner of the shared order buffer and network-wide counters.
///
/// Holds no entity data of its own: nodes and carriers live in the
/// [`World`] passed to each call.
#[derive(Clone, Debug)]
pub struct LogisticNetwork {
    pub buffer:             OrderBuffer,
    pub stats:              NetworkStats,
    /// Speed given to newly spawned carriers, in units per millisecond.
    pub carrier_speed:      f32,
    /// Carriers spawned but not yet back at a base.
    pub carriers_in_flight: u32,
}

impl LogisticNetwork {
    /// # Errors
    ///
    /// [`NetworkError::ZeroBufferCapacity`] or [`NetworkError::InvalidSpeed`].
    pub fn new(buffer_capacity: usize, carrier_speed: f32) -> NetworkResult<Self> {
        if buffer_capacity == 0 {
            return Err(NetworkError::ZeroBufferCapacity);
        }
        if !carrier_speed.is_finite() || carrier_speed <= 0.0 {
            return Err(NetworkError::InvalidSpeed(carrier_speed));
        }
        Ok(Self {
            buffer: OrderBuffer::new(buffer_capacity),
            stats: NetworkStats::default(),
            carrier_speed,
            carriers_in_flight: 0,
        })
    }

    pub fn from_config(config: &SimConfig) -> NetworkResult<Self> {
        Self::new(config.order_buffer_capacity, config.carrier_speed)
    }

    // ── Rebuff ────────────────────────────────────────────────────────────

    /// Full matching pass: drop every unassigned order and rebuild the buffer.
    ///
    /// Greedy first fit.  Requesters are visited in world order, each of their
    /// requested items in `ItemId` order, and providers in world order; each
    /// provider with surplus gets an order for `min(gap, surplus)` until the
    /// gap closes.  A full buffer ends the pass; what is left unmatched is
    /// picked up by the next pass.
    pub fn rebuff(&mut self, world: &mut World) -> RebuffOutcome {
        let stale = self.buffer.clear_and_cancel(world);
        if stale > 0 {
            self.stats.stale_orders += stale as u64;
            warn!(stale, "released orders with a vanished endpoint");
        }
        self.stats.rebuff_passes += 1;

        let requesters = world.entities_with3::<RequestLedger, Location, Inventory>();
        let providers = world.entities_with3::<ProvideLedger, Location, Inventory>();
        let capacity = self.buffer.capacity();
        let mut outcome = RebuffOutcome::default();

        'pass: for &requester in &requesters {
            let items: Vec<_> = match world.get::<RequestLedger>(requester) {
                Some(ledger) => ledger.requested_items().collect(),
                None => continue,
            };
            for item in items {
                for &provider in &providers {
                    if provider == requester {
                        continue;
                    }
                    let gap = world
                        .get::<RequestLedger>(requester)
                        .map_or(0, |r| r.demand_gap(item));
                    if gap <= 0 {
                        break;
                    }
                    let surplus = surplus_of(world, provider, item);
                    if surplus <= 0 {
                        continue;
                    }
                    if outcome.orders == capacity {
                        outcome.truncated = true;
                        break 'pass;
                    }
                    let order = Order::new(provider, requester, item, gap.min(surplus));
                    order.reserve(world);
                    self.buffer.write(outcome.orders, order);
                    outcome.orders += 1;
                    outcome.units += order.amount as i64;
                }
            }
        }

        self.buffer.set_count(outcome.orders);
        if outcome.truncated {
            self.stats.truncated_passes += 1;
        }
        debug!(
            orders = outcome.orders,
            units = outcome.units,
            truncated = outcome.truncated,
            "rebuff"
        );
        outcome
    }

    // ── Assignment ────────────────────────────────────────────────────────

    /// Hand buffered orders to the closest base (to the order's provider)
    /// that still has a free carrier.
    ///
    /// Stops, leaving the rest queued, as soon as an order has no eligible
    /// base.  If the buffer drains completely a new rebuff refills it.
    /// Returns the number of orders assigned.
    pub fn assign_orders(&mut self, world: &mut World) -> usize {
        let mut assigned = 0;
        while let Some(&head) = self.buffer.peek() {
            let source = world
                .get::<Location>(head.source)
                .filter(|_| world.is_alive(head.destination));
            let Some(&Location(from)) = source else {
                // An endpoint is gone: the order can never be carried out.
                if let Some(order) = self.buffer.try_dequeue(i32::MAX) {
                    order.release_surviving(world);
                    self.stats.stale_orders += 1;
                    warn!(%order, "dropping order with vanished endpoint");
                }
                continue;
            };
            let Some(base) = self.closest_base(world, from, true) else {
                break;
            };
            let Some(order) = self.buffer.try_dequeue(i32::MAX) else {
                break;
            };
            match world.get_mut::<BaseNode>(base) {
                Some(node) => node.pending.push_back(order),
                None => break,
            }
            assigned += 1;
        }

        if assigned > 0 {
            debug!(assigned, remaining = self.buffer.len(), "assigned orders");
        }
        if self.buffer.is_empty() {
            self.rebuff(world);
        }
        assigned
    }

    /// Despawn `node`, first releasing every order still pending at it if
    /// it is a base.
    ///
    /// Bases must be removed through here: their pending orders hold
    /// reservations that nothing else can give back once the queue is gone.
    /// Returns `false` if the node was already gone.
    pub fn despawn_node(&mut self, world: &mut World, node: Entity) -> bool {
        let pending = world
            .get_mut::<BaseNode>(node)
            .map(|base| std::mem::take(&mut base.pending))
            .unwrap_or_default();
        for order in &pending {
            order.release_surviving(world);
        }
        if !pending.is_empty() {
            debug!(%node, released = pending.len(), "base removed with pending orders");
        }
        world.despawn(node)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Base nearest to `at` by squared distance, optionally only among bases
    /// with a free carrier.  Ties go to the base met first.
    pub fn closest_base(&self, world: &World, at: Vec2, require_capacity: bool) -> Option<Entity> {
        let mut best: Option<(Entity, f32)> = None;
        for base in world.entities_with2::<BaseNode, Location>() {
            let (Some(node), Some(&Location(pos))) =
                (world.get::<BaseNode>(base), world.get::<Location>(base))
            else {
                continue;
            };
            if require_capacity && node.carrier_count <= 0 {
                continue;
            }
            let d2 = at.distance_squared(pos);
            if best.is_none_or(|(_, min)| d2 < min) {
                best = Some((base, d2));
            }
        }
        best.map(|(base, _)| base)
    }

    /// Units still described by unassigned orders from `source` to
    /// `destination`.
    pub fn buffered_between(&self, source: Entity, destination: Entity) -> i32 {
        self.buffer
            .iter_active()
            .filter(|o| o.source == source && o.destination == destination)
            .map(|o| o.amount)
            .sum()
    }
}

fn surplus_of(world: &World, provider: Entity, item: ItemId) -> i32 {
    match (world.get::<ProvideLedger>(provider), world.get::<Inventory>(provider)) {
        (Some(ledger), Some(stock)) => ledger.available_surplus(stock, item),
        _ => 0,
    }
}
