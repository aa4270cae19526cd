//! Helpers that give an entity a network role.

use lg_core::{ItemId, Vec2};
use lg_inventory::Inventory;
use lg_production::ProductionTimer;
use lg_world::{Entity, World};

use crate::{BaseNode, Location, NetworkError, NetworkResult, ProvideLedger, RequestLedger};

/// Spawn a base at `at` holding `carriers` free carriers that checks for
/// work every `dispatch_ms` milliseconds.
pub fn spawn_base(world: &mut World, at: Vec2, carriers: i32, dispatch_ms: i32) -> NetworkResult<Entity> {
    if carriers < 0 {
        return Err(NetworkError::NegativeCarrierCount(carriers));
    }
    if dispatch_ms <= 0 {
        return Err(NetworkError::InvalidDispatchInterval(dispatch_ms));
    }
    let base = world.spawn();
    world.insert(base, Location(at))?;
    world.insert(base, BaseNode::new(carriers))?;
    world.insert(base, ProductionTimer::new(dispatch_ms, 1.0))?;
    Ok(base)
}

/// Spawn a provider at `at` offering everything in `stock`.
pub fn spawn_provider(world: &mut World, at: Vec2, stock: Inventory) -> NetworkResult<Entity> {
    let node = world.spawn();
    world.insert(node, Location(at))?;
    world.insert(node, stock)?;
    world.insert(node, ProvideLedger::new())?;
    Ok(node)
}

/// Spawn a requester at `at` asking for each `(item, quantity)` in
/// `requests`.
pub fn spawn_requester(
    world:    &mut World,
    at:       Vec2,
    stock:    Inventory,
    requests: &[(ItemId, i32)],
) -> NetworkResult<Entity> {
    let node = world.spawn();
    world.insert(node, Location(at))?;
    world.insert(node, stock)?;
    world.insert(node, RequestLedger::with_requests(requests.iter().copied()))?;
    Ok(node)
}
