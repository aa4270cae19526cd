//! Per-node "on the way" bookkeeping.
//!
//! Deltas are applied without clamping.  Callers only ever emit balanced
//! `+amount` / `-amount` pairs over an order's lifetime, so a ledger settles
//! back to its true value once every order touching it has finished.

use std::collections::{BTreeMap, BTreeSet};

use lg_core::ItemId;
use lg_inventory::Inventory;

/// Reservations against a provider's stock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProvideLedger {
    on_the_way: BTreeMap<ItemId, i32>,
    /// `None` offers every stocked item.
    offered:    Option<BTreeSet<ItemId>>,
}

impl ProvideLedger {
    /// A ledger offering whatever the node stocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger offering only `items`; other stock is never matched.
    ///
    /// Use this for nodes that are also requesters, so their inputs are not
    /// handed straight back out.
    pub fn offering(items: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            on_the_way: BTreeMap::new(),
            offered:    Some(items.into_iter().collect()),
        }
    }

    pub fn offers(&self, item: ItemId) -> bool {
        self.offered.as_ref().is_none_or(|set| set.contains(&item))
    }

    pub fn change_reservation(&mut self, item: ItemId, delta: i32) {
        *self.on_the_way.entry(item).or_insert(0) += delta;
    }

    #[inline]
    pub fn on_the_way(&self, item: ItemId) -> i32 {
        self.on_the_way.get(&item).copied().unwrap_or(0)
    }

    /// Stock not yet promised to any order; 0 for items not offered.
    pub fn available_surplus(&self, stock: &Inventory, item: ItemId) -> i32 {
        if !self.offers(item) {
            return 0;
        }
        stock.count_of(item) - self.on_the_way(item)
    }

    /// `(item, on_the_way)` for every item ever reserved.
    pub fn reservations(&self) -> impl Iterator<Item = (ItemId, i32)> + '_ {
        self.on_the_way.iter().map(|(&i, &n)| (i, n))
    }
}

/// A requester's desired quantities and the part of them already covered by
/// orders in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestLedger {
    on_the_way: BTreeMap<ItemId, i32>,
    requested:  BTreeMap<ItemId, i32>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger asking for each `(item, quantity)` pair.
    pub fn with_requests(requests: impl IntoIterator<Item = (ItemId, i32)>) -> Self {
        let mut ledger = Self::new();
        for (item, quantity) in requests {
            ledger.add_request(item, quantity);
        }
        ledger
    }

    /// Adjust the desired quantity of `item`.  The matcher never calls this.
    pub fn add_request(&mut self, item: ItemId, delta: i32) {
        *self.requested.entry(item).or_insert(0) += delta;
    }

    pub fn change_reservation(&mut self, item: ItemId, delta: i32) {
        *self.on_the_way.entry(item).or_insert(0) += delta;
    }

    #[inline]
    pub fn requested(&self, item: ItemId) -> i32 {
        self.requested.get(&item).copied().unwrap_or(0)
    }

    #[inline]
    pub fn on_the_way(&self, item: ItemId) -> i32 {
        self.on_the_way.get(&item).copied().unwrap_or(0)
    }

    /// Desired minus reserved.  `<= 0` means nothing more to match.
    #[inline]
    pub fn demand_gap(&self, item: ItemId) -> i32 {
        self.requested(item).saturating_sub(self.on_the_way(item))
    }

    /// Requested item types in ascending `ItemId` order.
    pub fn requested_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.requested.keys().copied()
    }

    /// `(item, on_the_way)` for every item ever reserved.
    pub fn reservations(&self) -> impl Iterator<Item = (ItemId, i32)> + '_ {
        self.on_the_way.iter().map(|(&i, &n)| (i, n))
    }
}
