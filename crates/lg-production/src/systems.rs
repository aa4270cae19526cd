//! Per-tick production systems.
//!
//! Each system walks the entities carrying its component set in ascending
//! slot order.  Component values that are `Copy` are read out, updated, and
//! written back so that the producer's `Inventory` can be borrowed mutably in
//! between.

use lg_inventory::{Inventory, InventoryResult};
use lg_world::{Entity, Events, World};
use tracing::trace;

use crate::{MiningTarget, ProductionEvent, ProductionState, ProductionTimer, Recipe};

/// Fill every `Working` timer by `elapsed_ms`.
pub fn advance_timers(world: &mut World, elapsed_ms: u32) {
    for entity in world.entities_with::<ProductionTimer>() {
        if let Some(timer) = world.get_mut::<ProductionTimer>(entity) {
            timer.advance(elapsed_ms);
        }
    }
}

/// Store one unit of the target item for every miner whose cycle completed.
///
/// A miner whose container is full stays completed in `OutputFull` and
/// retries every tick.
pub fn run_miners(world: &mut World, events: &mut Events<ProductionEvent>) -> InventoryResult<()> {
    for miner in world.entities_with3::<MiningTarget, ProductionTimer, Inventory>() {
        let (Some(&MiningTarget(item)), Some(&timer)) =
            (world.get::<MiningTarget>(miner), world.get::<ProductionTimer>(miner))
        else {
            continue;
        };
        if timer.state == ProductionState::Paused || !timer.is_completed() {
            continue;
        }

        let stored = match world.get_mut::<Inventory>(miner) {
            Some(inv) => inv.try_store(item, 1)?,
            None => continue,
        };

        let mut timer = timer;
        if stored {
            timer.reset();
            events.publish(ProductionEvent::MiningCompleted { miner });
            change_state(&mut timer, miner, ProductionState::Working, events);
        } else {
            change_state(&mut timer, miner, ProductionState::OutputFull, events);
        }
        write_back(world, miner, timer);
    }
    Ok(())
}

/// Advance the recipe cycle of every assembler.
///
/// - Completed (or `OutputFull`): store all outputs or none.  On success the
///   timer resets, `Completed` is published and the next cycle's inputs are
///   pulled; missing inputs park the assembler in `WaitingForResources`.  On
///   failure the assembler sits in `OutputFull`.
/// - `WaitingForResources`: pull all inputs or none; success starts `Working`.
pub fn run_assemblers(world: &mut World, events: &mut Events<ProductionEvent>) -> InventoryResult<()> {
    for assembler in world.entities_with3::<Recipe, ProductionTimer, Inventory>() {
        let Some(&timer) = world.get::<ProductionTimer>(assembler) else {
            continue;
        };
        if timer.state == ProductionState::Paused {
            continue;
        }
        let cycle_done = timer.is_completed() || timer.state == ProductionState::OutputFull;
        if !cycle_done && timer.state != ProductionState::WaitingForResources {
            continue;
        }
        let Some(recipe) = world.get::<Recipe>(assembler).cloned() else {
            continue;
        };
        let Some(inv) = world.get_mut::<Inventory>(assembler) else {
            continue;
        };

        let mut timer = timer;
        if cycle_done {
            if inv.try_store_batch(&recipe.outputs)? {
                timer.reset();
                events.publish(ProductionEvent::Completed { producer: assembler });
                let next = if inv.try_remove_batch(&recipe.inputs)? {
                    ProductionState::Working
                } else {
                    ProductionState::WaitingForResources
                };
                change_state(&mut timer, assembler, next, events);
            } else {
                change_state(&mut timer, assembler, ProductionState::OutputFull, events);
            }
        } else if inv.try_remove_batch(&recipe.inputs)? {
            change_state(&mut timer, assembler, ProductionState::Working, events);
        }
        write_back(world, assembler, timer);
    }
    Ok(())
}

fn change_state(
    timer:    &mut ProductionTimer,
    producer: Entity,
    to:       ProductionState,
    events:   &mut Events<ProductionEvent>,
) {
    if let Some(from) = timer.set_state(to) {
        trace!(%producer, %from, %to, "production state changed");
        events.publish(ProductionEvent::StateChanged { producer, from, to });
    }
}

fn write_back(world: &mut World, entity: Entity, timer: ProductionTimer) {
    if let Some(slot) = world.get_mut::<ProductionTimer>(entity) {
        *slot = timer;
    }
}
