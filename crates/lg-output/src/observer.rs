//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use lg_core::{SimConfig, Tick};
use lg_inventory::Inventory;
use lg_network::{NetworkEvent, NetworkStats};
use lg_production::ProductionEvent;
use lg_sim::{SimObserver, TickSummary};
use lg_world::World;

use crate::row::{EventRow, InventoryRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes events, tick summaries, and inventory
/// snapshots to any [`OutputWriter`] backend.
///
/// Events are buffered for the current tick and written in one batch at tick
/// end.  Summaries and inventories are written at snapshot ticks.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    tick_ms:    u32,
    pending:    Vec<EventRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_ms:    config.tick_ms,
            pending:    Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_production_event(&mut self, tick: Tick, event: &ProductionEvent) {
        self.pending.push(EventRow::from_production(tick.0, event));
    }

    fn on_network_event(&mut self, tick: Tick, event: &NetworkEvent) {
        self.pending.push(EventRow::from_network(tick.0, event));
    }

    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {
        if self.pending.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.pending);
        let result = self.writer.write_events(&rows);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, summary: &TickSummary, world: &World) {
        let row = TickSummaryRow {
            tick:               tick.0,
            elapsed_ms:         tick.0 * self.tick_ms as u64,
            carriers_in_flight: summary.carriers_in_flight,
            buffered_orders:    summary.buffered_orders as u64,
            network_events:     summary.network_events as u64,
            production_events:  summary.production_events as u64,
            delivered_items:    summary.stats.delivered_items,
            dropped_items:      summary.stats.dropped_items,
            rebuffed:           summary.rebuffed,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);

        let rows: Vec<InventoryRow> = world
            .entities_with::<Inventory>()
            .into_iter()
            .filter_map(|node| world.get::<Inventory>(node).map(|inv| (node, inv)))
            .flat_map(|(node, inv)| {
                inv.iter().map(move |stack| InventoryRow {
                    tick: tick.0,
                    node,
                    item: stack.item.0,
                    count: stack.count,
                })
            })
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_inventories(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &NetworkStats) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
