use std::fmt;

use lg_core::ItemId;
use lg_world::{Entity, World};

use crate::{ProvideLedger, RequestLedger};

/// Move `amount` units of `item` from `source` (a provider) to `destination`
/// (a requester).
///
/// Orders refer to nodes by handle only; they never keep a node alive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub source:      Entity,
    pub destination: Entity,
    pub item:        ItemId,
    pub amount:      i32,
}

impl Order {
    pub fn new(source: Entity, destination: Entity, item: ItemId, amount: i32) -> Self {
        Self { source, destination, item, amount }
    }

    /// Same endpoints and item, different amount.
    #[inline]
    pub fn with_amount(self, amount: i32) -> Self {
        Self { amount, ..self }
    }

    /// Reserve `amount` on both ledgers.  Called by the matcher on creation.
    pub(crate) fn reserve(&self, world: &mut World) {
        if let Some(p) = world.get_mut::<ProvideLedger>(self.source) {
            p.change_reservation(self.item, self.amount);
        }
        if let Some(r) = world.get_mut::<RequestLedger>(self.destination) {
            r.change_reservation(self.item, self.amount);
        }
    }

    /// Give back both reservations of an order that will not be carried out.
    ///
    /// No-op (returns `false`) if either node is gone.
    pub fn cancel(&self, world: &mut World) -> bool {
        self.reverse(world)
    }

    /// Give back both reservations after the goods have actually moved.
    ///
    /// No-op (returns `false`) if either node is gone.
    pub fn complete(&self, world: &mut World) -> bool {
        self.reverse(world)
    }

    /// Release the reservation on whichever endpoints are still alive.
    ///
    /// Used when one side has vanished mid-flight; `cancel` would otherwise
    /// leave the survivor's ledger inflated forever.
    pub fn release_surviving(&self, world: &mut World) {
        self.reserve_delta(world, -self.amount);
    }

    /// Both the source and the destination still exist.
    pub fn endpoints_alive(&self, world: &World) -> bool {
        world.is_alive(self.source) && world.is_alive(self.destination)
    }

    fn reverse(&self, world: &mut World) -> bool {
        if !self.endpoints_alive(world) {
            return false;
        }
        self.reserve_delta(world, -self.amount);
        true
    }

    fn reserve_delta(&self, world: &mut World, delta: i32) {
        self.with_amount(delta).reserve(world);
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} : {}*{}", self.source, self.destination, self.amount, self.item)
    }
}
