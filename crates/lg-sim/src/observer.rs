//! Simulation observer trait for progress reporting and data collection.

use lg_core::Tick;
use lg_network::{NetworkEvent, NetworkStats};
use lg_production::ProductionEvent;
use lg_world::World;

/// Per-tick figures handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:               Tick,
    pub carriers_in_flight: u32,
    /// Orders still waiting in the shared buffer.
    pub buffered_orders:    usize,
    pub network_events:     usize,
    pub production_events:  usize,
    /// A periodic matching pass ran this tick.
    pub rebuffed:           bool,
    /// Cumulative counters as of the end of the tick.
    pub stats:              NetworkStats,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — delivery counter
///
/// ```rust,ignore
/// struct Deliveries(i64);
///
/// impl SimObserver for Deliveries {
///     fn on_network_event(&mut self, _tick: Tick, event: &NetworkEvent) {
///         if let NetworkEvent::Delivered { amount, .. } = event {
///             self.0 += *amount as i64;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// One call per published production event, in publish order.
    fn on_production_event(&mut self, _tick: Tick, _event: &ProductionEvent) {}

    /// One call per published network event, in publish order.
    fn on_network_event(&mut self, _tick: Tick, _event: &NetworkEvent) {}

    /// Called at the end of each tick, after every event has been forwarded.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to the world.
    fn on_snapshot(&mut self, _tick: Tick, _summary: &TickSummary, _world: &World) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &NetworkStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
