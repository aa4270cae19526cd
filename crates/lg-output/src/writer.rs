//! The `OutputWriter` trait implemented by backend writers.

use crate::{EventRow, InventoryRow, OutputResult, TickSummaryRow};

/// Sink for the three output tables.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when driven by the observer.
pub trait OutputWriter {
    /// Write a batch of lifecycle events.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write a batch of per-node inventory counts.
    fn write_inventories(&mut self, rows: &[InventoryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
