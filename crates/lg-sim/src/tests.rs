//! Integration tests for lg-sim.

use lg_core::{ItemId, SimConfig, Tick, Vec2};
use lg_inventory::Inventory;
use lg_network::{
    spawn_base, spawn_requester, Location, NetworkEvent, NetworkStats, ProvideLedger,
};
use lg_production::{MiningTarget, ProductionEvent, ProductionTimer};
use lg_world::{Entity, Prototype, World};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, TickSummary};

const ORE: ItemId = ItemId(0);

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        tick_ms: 16,
        total_ticks,
        seed: 42,
        carrier_speed: 0.05,
        order_buffer_capacity: 64,
        rebuff_interval_ticks: 30,
        output_interval_ticks: 0,
    }
}

fn miner_prototype() -> Prototype {
    Prototype::new()
        .with(MiningTarget(ORE))
        .with(ProductionTimer::new(100, 1.0))
        .with(ProvideLedger::offering([ORE]))
}

/// A miner at the origin, a requester 10 units east, a base between them.
struct Scene {
    world:     World,
    miner:     Entity,
    requester: Entity,
}

fn scene() -> Scene {
    let mut world = World::new();
    let miner = miner_prototype().spawn(&mut world).unwrap();
    world.insert(miner, Location(Vec2::ZERO)).unwrap();
    world.insert(miner, Inventory::new(10).unwrap()).unwrap();
    let requester =
        spawn_requester(&mut world, Vec2::new(10.0, 0.0), Inventory::new(10).unwrap(), &[(ORE, 3)])
            .unwrap();
    spawn_base(&mut world, Vec2::new(5.0, 0.0), 2, 16).unwrap();
    Scene { world, miner, requester }
}

#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    ends:      Vec<TickSummary>,
    snapshots: Vec<Tick>,
    /// `(tick, is_production, kind)` in delivery order.
    events:    Vec<(Tick, bool, &'static str)>,
    finished:  Vec<(Tick, NetworkStats)>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_production_event(&mut self, tick: Tick, event: &ProductionEvent) {
        self.events.push((tick, true, event.kind()));
    }
    fn on_network_event(&mut self, tick: Tick, event: &NetworkEvent) {
        self.events.push((tick, false, event.kind()));
    }
    fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
        self.ends.push(*summary);
    }
    fn on_snapshot(&mut self, tick: Tick, _summary: &TickSummary, _world: &World) {
        self.snapshots.push(tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick, stats: &NetworkStats) {
        self.finished.push((final_tick, *stats));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(test_config(10)).build().unwrap();
        assert!(sim.world.is_empty());
        assert_eq!(sim.network.buffer.capacity(), 64);
        assert_eq!(sim.clock.current_tick, Tick(0));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = test_config(10);
        config.tick_ms = 0;
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));

        let mut config = test_config(10);
        config.carrier_speed = f32::NAN;
        assert!(SimBuilder::new(config).build().is_err());
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_end_tick() {
        let mut sim = SimBuilder::new(test_config(25)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.starts.len(), 25);
        assert_eq!(rec.ends.len(), 25);
        assert_eq!(rec.finished.len(), 1);
        assert_eq!(rec.finished[0].0, Tick(25));
        assert_eq!(sim.clock.current_tick, Tick(25));

        // Already at the end: nothing more happens.
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(25));
    }

    #[test]
    fn run_ticks_ignores_end_and_skips_sim_end() {
        let mut sim = SimBuilder::new(test_config(5)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(8, &mut rec).unwrap();
        assert_eq!(rec.starts.len(), 8);
        assert!(rec.finished.is_empty());
        assert_eq!(sim.clock.current_tick, Tick(8));
    }

    #[test]
    fn periodic_rebuff_and_snapshots() {
        let mut config = test_config(0);
        config.rebuff_interval_ticks = 10;
        config.output_interval_ticks = 5;
        let mut sim = SimBuilder::new(config).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(12, &mut rec).unwrap();

        let rebuffed: Vec<_> = rec.ends.iter().filter(|s| s.rebuffed).map(|s| s.tick).collect();
        assert_eq!(rebuffed, vec![Tick(0), Tick(10)]);
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(5), Tick(10)]);
        assert_eq!(sim.network.stats.rebuff_passes, 2);
    }
}

// ── End-to-end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn mined_ore_reaches_requester() {
        let Scene { world, miner, requester } = scene();
        let mut sim = SimBuilder::new(test_config(1_500)).world(world).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let received = sim.world.get::<Inventory>(requester).unwrap().count_of(ORE);
        assert!(received >= 3, "requester got {received}");
        assert!(sim.network.stats.delivered_items >= 3);
        assert!(sim.world.get::<Inventory>(miner).is_some());

        let kinds: Vec<_> = rec.events.iter().map(|&(_, _, k)| k).collect();
        assert!(kinds.contains(&"mining_completed"));
        assert!(kinds.contains(&"carrier_created"));
        assert!(kinds.contains(&"delivered"));

        let (_, stats) = rec.finished[0];
        assert_eq!(stats, sim.network.stats);
    }

    #[test]
    fn production_events_precede_network_events_within_a_tick() {
        let Scene { world, .. } = scene();
        let mut sim = SimBuilder::new(test_config(600)).world(world).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        for pair in rec.events.windows(2) {
            let (t0, prod0, _) = pair[0];
            let (t1, prod1, _) = pair[1];
            assert!(t0 <= t1, "events out of tick order");
            if t0 == t1 {
                assert!(prod0 || !prod1, "production event after network event in {t0}");
            }
        }
    }

    #[test]
    fn summaries_track_event_counts() {
        let Scene { world, .. } = scene();
        let mut sim = SimBuilder::new(test_config(300)).world(world).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let summarized: usize = rec.ends.iter().map(|s| s.production_events + s.network_events).sum();
        assert_eq!(summarized, rec.events.len());
        let last = rec.ends.last().unwrap();
        assert_eq!(last.carriers_in_flight, sim.network.carriers_in_flight);
        assert_eq!(last.stats, sim.network.stats);
    }

    #[test]
    fn same_scene_same_outcome() {
        let run = || {
            let Scene { world, requester, .. } = scene();
            let mut sim = SimBuilder::new(test_config(800)).world(world).build().unwrap();
            sim.run(&mut NoopObserver).unwrap();
            (sim.network.stats, sim.world.get::<Inventory>(requester).unwrap().clone())
        };
        assert_eq!(run(), run());
    }
}
