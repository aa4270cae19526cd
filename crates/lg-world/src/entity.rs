//! Generation-counted entity handle.

use std::fmt;

/// Handle to an object in a [`World`][crate::World].
///
/// `index` addresses the slot; `generation` distinguishes successive
/// occupants of that slot.  Handles are plain `Copy` data and never keep
/// their entity alive.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub index:      u32,
    pub generation: u32,
}

impl Entity {
    /// Handle that never resolves to a live entity.
    pub const INVALID: Entity = Entity { index: u32::MAX, generation: u32::MAX };

    /// Cast the slot index to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn slot(self) -> usize {
        self.index as usize
    }
}

impl Default for Entity {
    /// Returns the `INVALID` sentinel so uninitialized handles are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}
