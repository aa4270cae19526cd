//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `events.csv`
//! - `tick_summaries.csv`
//! - `inventory_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use lg_world::Entity;

use crate::writer::OutputWriter;
use crate::{EventRow, InventoryRow, OutputResult, TickSummaryRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    events:      Writer<File>,
    summaries:   Writer<File>,
    inventories: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "kind", "subject", "node", "item", "amount"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "elapsed_ms",
            "carriers_in_flight",
            "buffered_orders",
            "network_events",
            "production_events",
            "delivered_items",
            "dropped_items",
            "rebuffed",
        ])?;

        let mut inventories = Writer::from_path(dir.join("inventory_snapshots.csv"))?;
        inventories.write_record(["tick", "node", "item", "count"])?;

        Ok(Self {
            events,
            summaries,
            inventories,
            finished: false,
        })
    }
}

/// `index:generation`, stable across the file.
fn entity_field(e: Entity) -> String {
    format!("{}:{}", e.index, e.generation)
}

fn optional<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.kind.to_owned(),
                entity_field(row.subject),
                row.node.map(entity_field).unwrap_or_default(),
                optional(row.item),
                optional(row.amount),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.carriers_in_flight.to_string(),
            row.buffered_orders.to_string(),
            row.network_events.to_string(),
            row.production_events.to_string(),
            row.delivered_items.to_string(),
            row.dropped_items.to_string(),
            (row.rebuffed as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_inventories(&mut self, rows: &[InventoryRow]) -> OutputResult<()> {
        for row in rows {
            self.inventories.write_record(&[
                row.tick.to_string(),
                entity_field(row.node),
                row.item.to_string(),
                row.count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        self.inventories.flush()?;
        Ok(())
    }
}
