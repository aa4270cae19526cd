//! Integration tests for lg-output.

#[cfg(test)]
mod csv_tests {
    use lg_core::ItemId;
    use lg_network::NetworkEvent;
    use lg_production::ProductionEvent;
    use lg_world::Entity;
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{EventRow, InventoryRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn entity(index: u32) -> Entity {
        Entity { index, generation: 0 }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("events.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("inventory_snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("events.csv")),
            ["tick", "kind", "subject", "node", "item", "amount"]
        );
        assert_eq!(
            headers(dir.path().join("tick_summaries.csv")),
            [
                "tick",
                "elapsed_ms",
                "carriers_in_flight",
                "buffered_orders",
                "network_events",
                "production_events",
                "delivered_items",
                "dropped_items",
                "rebuffed",
            ]
        );
        assert_eq!(
            headers(dir.path().join("inventory_snapshots.csv")),
            ["tick", "node", "item", "count"]
        );
    }

    #[test]
    fn network_and_production_events_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let delivered = NetworkEvent::Delivered {
            carrier:     entity(4),
            destination: entity(2),
            item:        ItemId(7),
            amount:      3,
        };
        let mined = ProductionEvent::MiningCompleted { miner: entity(1) };
        w.write_events(&[
            EventRow::from_production(9, &mined),
            EventRow::from_network(9, &delivered),
        ])
        .unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("events.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "mining_completed");
        assert_eq!(&rows[0][2], "1:0");
        assert_eq!(&rows[0][3], ""); // no counterpart node
        assert_eq!(&rows[0][5], "");
        assert_eq!(&rows[1][0], "9");
        assert_eq!(&rows[1][1], "delivered");
        assert_eq!(&rows[1][2], "4:0");
        assert_eq!(&rows[1][3], "2:0");
        assert_eq!(&rows[1][4], "7");
        assert_eq!(&rows[1][5], "3");
    }

    #[test]
    fn tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:               3,
            elapsed_ms:         48,
            carriers_in_flight: 2,
            buffered_orders:    5,
            network_events:     1,
            production_events:  0,
            delivered_items:    12,
            dropped_items:      1,
            rebuffed:           true,
        })
        .unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("tick_summaries.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "48");
        assert_eq!(&rows[0][6], "12");
        assert_eq!(&rows[0][8], "1"); // rebuffed as integer
    }

    #[test]
    fn inventory_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_inventories(&[
            InventoryRow { tick: 0, node: entity(0), item: 1, count: 4 },
            InventoryRow { tick: 0, node: entity(0), item: 2, count: 6 },
        ])
        .unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("inventory_snapshots.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][2], "2");
        assert_eq!(&rows[1][3], "6");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[]).unwrap();
        w.write_inventories(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use lg_core::{ItemId, SimConfig, Vec2};
    use lg_inventory::Inventory;
    use lg_network::{spawn_base, spawn_provider, spawn_requester};
    use lg_sim::SimBuilder;
    use lg_world::World;
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    const ORE: ItemId = ItemId(0);

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn config() -> SimConfig {
        SimConfig {
            tick_ms:               16,
            total_ticks:           400,
            seed:                  1,
            carrier_speed:         0.05,
            order_buffer_capacity: 32,
            rebuff_interval_ticks: 50,
            output_interval_ticks: 100,
        }
    }

    fn world() -> World {
        let mut world = World::new();
        let mut stock = Inventory::new(10).unwrap();
        stock.try_store(ORE, 5).unwrap();
        spawn_provider(&mut world, Vec2::ZERO, stock).unwrap();
        spawn_requester(&mut world, Vec2::new(8.0, 0.0), Inventory::new(10).unwrap(), &[(ORE, 4)])
            .unwrap();
        spawn_base(&mut world, Vec2::new(4.0, 0.0), 1, 16).unwrap();
        world
    }

    #[test]
    fn integration_csv() {
        let config = config();
        let mut sim = SimBuilder::new(config.clone()).world(world()).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 100 over 400 ticks → snapshots at 0, 100, 200, 300.
        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        let ticks: Vec<_> = summaries.iter().map(|r| r[0].to_owned()).collect();
        assert_eq!(ticks, ["0", "100", "200", "300"]);
        assert_eq!(&summaries[1][1], "1600");

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let kinds: Vec<_> = rdr.records().map(|r| r.unwrap()[1].to_owned()).collect();
        let created = kinds.iter().filter(|k| *k == "carrier_created").count() as u64;
        assert_eq!(created, sim.network.stats.carriers_created);
        assert!(kinds.iter().any(|k| k == "carrier_created"));
        assert!(kinds.iter().any(|k| k == "delivered"));

        // Tick 0: only the provider holds anything.
        let mut rdr = csv::Reader::from_path(dir.path().join("inventory_snapshots.csv")).unwrap();
        let inventories: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        let at_zero: Vec<_> = inventories.iter().filter(|r| &r[0] == "0").collect();
        assert_eq!(at_zero.len(), 1);
        assert_eq!(&at_zero[0][3], "5");
        let delivered: i32 = inventories
            .iter()
            .filter(|r| &r[0] == "300" && &r[2] == "0")
            .map(|r| r[3].parse::<i32>().unwrap())
            .sum();
        assert_eq!(delivered, 5, "ore is conserved across nodes");
    }

    #[test]
    fn into_writer_after_finish() {
        let config = config();
        let mut sim = SimBuilder::new(config.clone()).world(World::new()).build().unwrap();
        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        let mut writer = obs.into_writer();
        crate::OutputWriter::finish(&mut writer).unwrap();
    }
}
