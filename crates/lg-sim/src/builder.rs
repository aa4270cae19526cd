//! Fluent builder for constructing a [`Sim`].

use lg_core::SimConfig;
use lg_network::LogisticNetwork;
use lg_world::{Events, World};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// | Method        | Default                                 |
/// |---------------|-----------------------------------------|
/// | `.world(w)`   | An empty `World`                        |
///
/// The network is derived from the config (`order_buffer_capacity`,
/// `carrier_speed`).
pub struct SimBuilder {
    config: SimConfig,
    world:  Option<World>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, world: None }
    }

    /// Supply a world already populated with nodes.
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Validate the config and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let network = LogisticNetwork::from_config(&self.config)?;
        Ok(Sim {
            clock:             self.config.make_clock(),
            config:            self.config,
            world:             self.world.unwrap_or_default(),
            network,
            network_events:    Events::new(),
            production_events: Events::new(),
        })
    }
}
