//! A stack of items of a single type.

use std::fmt;

use lg_core::ItemId;

/// `count` units of `item`.
///
/// A zero-count stack is the "nothing" value returned when a take finds no
/// stock; it still remembers which item was asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item:  ItemId,
    pub count: i32,
}

impl ItemStack {
    #[inline]
    pub fn new(item: ItemId, count: i32) -> Self {
        Self { item, count }
    }

    /// A zero-count stack of `item`.
    #[inline]
    pub fn empty(item: ItemId) -> Self {
        Self { item, count: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count <= 0
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty(ItemId::INVALID)
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.item.0, self.count)
    }
}
