/// Running counters kept by the [`LogisticNetwork`][crate::LogisticNetwork].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkStats {
    pub carriers_created:  u64,
    pub carriers_returned: u64,
    pub carriers_aborted:  u64,
    pub picked_up_items:   u64,
    pub delivered_items:   u64,
    /// Cargo lost to a full or vanished destination.
    pub dropped_items:     u64,
    pub rebuff_passes:     u64,
    /// Passes cut short by a full order buffer.
    pub truncated_passes:  u64,
    /// Unassigned orders discarded because their provider vanished.
    pub stale_orders:      u64,
}
