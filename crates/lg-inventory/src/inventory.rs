//! Fixed-capacity, per-item-type storage.

use std::collections::BTreeMap;

use lg_core::ItemId;

use crate::{InventoryError, InventoryResult, ItemStack};

/// Capacity given to inventories built with `Inventory::default()`.
pub const DEFAULT_CAPACITY: i32 = 10;

/// A container holding up to `capacity` items across any number of types.
///
/// Contents are kept in a `BTreeMap` so iteration (and therefore display and
/// any matching pass that walks contents) is ordered by `ItemId`.
///
/// With the `serde` feature, deserialisation goes through
/// [`from_contents`](Inventory::from_contents), so a loaded inventory obeys
/// the same invariants as a built one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "InventoryData", into = "InventoryData"))]
pub struct Inventory {
    capacity: i32,
    used:     i32,
    contents: BTreeMap<ItemId, i32>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            used:     0,
            contents: BTreeMap::new(),
        }
    }
}

impl Inventory {
    /// Create an empty inventory.
    ///
    /// # Errors
    ///
    /// [`InventoryError::NegativeCapacity`] if `capacity < 0`.
    pub fn new(capacity: i32) -> InventoryResult<Self> {
        if capacity < 0 {
            return Err(InventoryError::NegativeCapacity(capacity));
        }
        Ok(Self {
            capacity,
            used: 0,
            contents: BTreeMap::new(),
        })
    }

    /// Create an inventory already holding `contents`.
    ///
    /// Duplicate items are summed and zero counts are skipped.
    ///
    /// # Errors
    ///
    /// [`InventoryError::NegativeCapacity`], [`InventoryError::NegativeQuantity`]
    /// for a negative count, or [`InventoryError::OverCapacity`] if the
    /// contents do not fit.
    pub fn from_contents(
        capacity: i32,
        contents: impl IntoIterator<Item = (ItemId, i32)>,
    ) -> InventoryResult<Self> {
        let mut inv = Self::new(capacity)?;
        let stacks: Vec<ItemStack> = contents
            .into_iter()
            .map(|(item, count)| ItemStack::new(item, count))
            .collect();
        let incoming = aggregate(&stacks)?;
        let stored: i64 = incoming.values().sum();
        if stored > capacity as i64 {
            return Err(InventoryError::OverCapacity { stored, capacity });
        }
        for (item, count) in incoming {
            inv.deposit(item, count as i32);
        }
        Ok(inv)
    }

    // ── Accounting ────────────────────────────────────────────────────────

    #[inline]
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    #[inline]
    pub fn used(&self) -> i32 {
        self.used
    }

    #[inline]
    pub fn free_capacity(&self) -> i32 {
        self.capacity - self.used
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Units of `item` currently stored; 0 if absent.
    #[inline]
    pub fn count_of(&self, item: ItemId) -> i32 {
        self.contents.get(&item).copied().unwrap_or(0)
    }

    /// Stored `(item, count)` pairs in ascending `ItemId` order.
    pub fn iter(&self) -> impl Iterator<Item = ItemStack> + '_ {
        self.contents.iter().map(|(&item, &count)| ItemStack::new(item, count))
    }

    /// One `"<item> x <count>"` line per stored item.
    pub fn display_content(&self) -> String {
        self.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Take up to `amount` units of `item`.
    ///
    /// The amount is clamped to what is stored.  If nothing can be taken the
    /// result is a zero-count stack; this never fails.
    pub fn take(&mut self, item: ItemId, amount: i32) -> ItemStack {
        let amount = amount.min(self.count_of(item));
        if amount <= 0 {
            return ItemStack::empty(item);
        }
        self.withdraw(item, amount);
        ItemStack::new(item, amount)
    }

    /// Remove every stack in `items`, or nothing at all.
    ///
    /// Duplicate items in the batch are summed before the stock check.
    /// Returns `Ok(false)` (with no mutation) if any item is short.
    pub fn try_remove_batch(&mut self, items: &[ItemStack]) -> InventoryResult<bool> {
        let wanted = aggregate(items)?;
        if wanted.iter().any(|(&item, &count)| (self.count_of(item) as i64) < count) {
            return Ok(false);
        }
        // Every count is now bounded by a stored `i32`.
        for (item, count) in wanted {
            if count > 0 {
                self.withdraw(item, count as i32);
            }
        }
        Ok(true)
    }

    // ── Storage ───────────────────────────────────────────────────────────

    /// Store `quantity` units of `item` if they all fit.
    ///
    /// Returns `Ok(false)` with no mutation when free capacity is short.
    ///
    /// # Errors
    ///
    /// [`InventoryError::NegativeQuantity`] if `quantity < 0`.
    pub fn try_store(&mut self, item: ItemId, quantity: i32) -> InventoryResult<bool> {
        if quantity < 0 {
            return Err(InventoryError::NegativeQuantity { item, quantity });
        }
        if quantity > self.free_capacity() {
            return Ok(false);
        }
        self.deposit(item, quantity);
        Ok(true)
    }

    #[inline]
    pub fn try_store_stack(&mut self, stack: ItemStack) -> InventoryResult<bool> {
        self.try_store(stack.item, stack.count)
    }

    /// Store every stack in `items`, or nothing at all.
    ///
    /// The total across the batch is checked against free capacity first, so
    /// a recipe's outputs are never left half-stocked.
    pub fn try_store_batch(&mut self, items: &[ItemStack]) -> InventoryResult<bool> {
        let incoming = aggregate(items)?;
        let total: i64 = incoming.values().sum();
        if total > self.free_capacity() as i64 {
            return Ok(false);
        }
        // Every count is now bounded by free capacity.
        for (item, count) in incoming {
            self.deposit(item, count as i32);
        }
        Ok(true)
    }

    /// Store as many of `quantity` units as fit and report how many did.
    ///
    /// # Errors
    ///
    /// [`InventoryError::NegativeQuantity`] if `quantity < 0`.
    pub fn try_store_as_much_as_possible(&mut self, item: ItemId, quantity: i32) -> InventoryResult<i32> {
        if quantity < 0 {
            return Err(InventoryError::NegativeQuantity { item, quantity });
        }
        let stored = quantity.min(self.free_capacity());
        self.deposit(item, stored);
        Ok(stored)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Caller guarantees `0 <= quantity <= free_capacity()`.
    fn deposit(&mut self, item: ItemId, quantity: i32) {
        if quantity == 0 {
            return;
        }
        *self.contents.entry(item).or_insert(0) += quantity;
        self.used += quantity;
    }

    /// Caller guarantees `0 < amount <= count_of(item)`.
    fn withdraw(&mut self, item: ItemId, amount: i32) {
        if let Some(count) = self.contents.get_mut(&item) {
            *count -= amount;
            if *count == 0 {
                self.contents.remove(&item);
            }
            self.used -= amount;
        }
    }
}

/// Sum a batch per item, rejecting negative entries.
///
/// Sums are `i64` so a batch can never overflow however its counts add up.
fn aggregate(items: &[ItemStack]) -> InventoryResult<BTreeMap<ItemId, i64>> {
    let mut total: BTreeMap<ItemId, i64> = BTreeMap::new();
    for stack in items {
        if stack.count < 0 {
            return Err(InventoryError::NegativeQuantity {
                item:     stack.item,
                quantity: stack.count,
            });
        }
        *total.entry(stack.item).or_insert(0) += stack.count as i64;
    }
    Ok(total)
}

// ── Serde shadow ──────────────────────────────────────────────────────────────

/// Wire form of an [`Inventory`]; `used` is derived, never trusted.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct InventoryData {
    capacity: i32,
    contents: BTreeMap<ItemId, i32>,
}

#[cfg(feature = "serde")]
impl TryFrom<InventoryData> for Inventory {
    type Error = InventoryError;

    fn try_from(data: InventoryData) -> InventoryResult<Self> {
        Inventory::from_contents(data.capacity, data.contents)
    }
}

#[cfg(feature = "serde")]
impl From<Inventory> for InventoryData {
    fn from(inv: Inventory) -> Self {
        Self { capacity: inv.capacity, contents: inv.contents }
    }
}
