//! The `Sim` struct and its tick loop.

use lg_core::{SimClock, SimConfig, Tick};
use lg_network::{dispatch_carriers, move_objects, run_carriers, LogisticNetwork, NetworkEvent};
use lg_production::{advance_timers, run_assemblers, run_miners, ProductionEvent};
use lg_world::{Events, World};
use tracing::{debug, info};

use crate::{SimObserver, SimResult, TickSummary};

/// The main simulation runner.
///
/// Holds the world, the logistic network, and the two event queues, and
/// drives the fixed per-tick pipeline described in the crate docs.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// Tracks the current tick and maps it to elapsed milliseconds.
    pub clock: SimClock,

    /// Every node, producer, and carrier.
    pub world: World,

    pub network: LogisticNetwork,

    /// Drained and forwarded to the observer at the end of every tick.
    pub network_events:    Events<NetworkEvent>,
    pub production_events: Events<ProductionEvent>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            total_ticks = self.config.total_ticks,
            tick_ms = self.config.tick_ms,
            "simulation started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick, &self.network.stats);
        info!(
            final_tick = %self.clock.current_tick,
            delivered = self.network.stats.delivered_items,
            dropped = self.network.stats.dropped_items,
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let mut summary = self.process_tick(now)?;

        summary.production_events = self.production_events.len();
        for event in self.production_events.drain() {
            observer.on_production_event(now, &event);
        }
        summary.network_events = self.network_events.len();
        for event in self.network_events.drain() {
            observer.on_network_event(now, &event);
        }

        observer.on_tick_end(now, &summary);
        if now.is_every(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &summary, &self.world);
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        let elapsed = self.config.tick_ms;

        // ── Production ────────────────────────────────────────────────────
        advance_timers(&mut self.world, elapsed);
        run_miners(&mut self.world, &mut self.production_events)?;
        run_assemblers(&mut self.world, &mut self.production_events)?;

        // ── Logistics ─────────────────────────────────────────────────────
        dispatch_carriers(&mut self.network, &mut self.world, &mut self.network_events)?;
        run_carriers(&mut self.network, &mut self.world, elapsed, &mut self.network_events)?;
        move_objects(&mut self.world, elapsed);

        let rebuffed = now.is_every(self.config.rebuff_interval_ticks);
        if rebuffed {
            let outcome = self.network.rebuff(&mut self.world);
            debug!(%now, orders = outcome.orders, "periodic rebuff");
        }

        Ok(TickSummary {
            tick: now,
            carriers_in_flight: self.network.carriers_in_flight,
            buffered_orders: self.network.buffer.len(),
            rebuffed,
            stats: self.network.stats,
            ..TickSummary::default()
        })
    }
}
