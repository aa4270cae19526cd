//! Unit tests for lg-production.

use lg_core::ItemId;

const ORE: ItemId = ItemId(0);
const PLATE: ItemId = ItemId(1);

#[cfg(test)]
mod timer {
    use crate::{ProductionState, ProductionTimer};

    #[test]
    fn advance_clamps_to_cost() {
        let mut t = ProductionTimer::new(100, 1.0);
        t.advance(60);
        assert_eq!(t.progress, 60);
        assert!(!t.is_completed());
        t.advance(60);
        assert_eq!(t.progress, 100);
        assert!(t.is_completed());
        t.reset();
        assert_eq!(t.progress, 0);
    }

    #[test]
    fn advance_scales_by_speed() {
        let mut t = ProductionTimer::new(1000, 1.5);
        t.advance(16);
        assert_eq!(t.progress, 24);
    }

    #[test]
    fn only_working_timers_advance() {
        for state in [
            ProductionState::Idle,
            ProductionState::Paused,
            ProductionState::WaitingForResources,
            ProductionState::OutputFull,
        ] {
            let mut t = ProductionTimer::with_state(100, 1.0, state);
            t.advance(50);
            assert_eq!(t.progress, 0, "{state} advanced");
        }
    }

    #[test]
    fn set_state_reports_previous() {
        let mut t = ProductionTimer::new(10, 1.0);
        assert_eq!(t.set_state(ProductionState::Working), None);
        assert_eq!(t.set_state(ProductionState::Paused), Some(ProductionState::Working));
    }
}

#[cfg(test)]
mod miner {
    use lg_inventory::Inventory;
    use lg_world::{Events, World};

    use super::ORE;
    use crate::{
        advance_timers, run_miners, MiningTarget, ProductionEvent, ProductionState, ProductionTimer,
    };

    fn tick(world: &mut World, events: &mut Events<ProductionEvent>) {
        advance_timers(world, 50);
        run_miners(world, events).unwrap();
    }

    #[test]
    fn one_unit_per_cycle() {
        let mut world = World::new();
        let mut events = Events::new();
        let miner = world.spawn();
        world.insert(miner, MiningTarget(ORE)).unwrap();
        world.insert(miner, ProductionTimer::new(100, 1.0)).unwrap();
        world.insert(miner, Inventory::default()).unwrap();

        tick(&mut world, &mut events);
        assert_eq!(world.get::<Inventory>(miner).unwrap().count_of(ORE), 0);
        tick(&mut world, &mut events);
        assert_eq!(world.get::<Inventory>(miner).unwrap().count_of(ORE), 1);
        tick(&mut world, &mut events);
        tick(&mut world, &mut events);
        assert_eq!(world.get::<Inventory>(miner).unwrap().count_of(ORE), 2);

        let mined: Vec<_> = events.drain().collect();
        assert_eq!(mined, vec![
            ProductionEvent::MiningCompleted { miner },
            ProductionEvent::MiningCompleted { miner },
        ]);
    }

    #[test]
    fn faster_miner_yields_more() {
        let mut world = World::new();
        let mut events = Events::new();
        let slow = world.spawn();
        let fast = world.spawn();
        for (e, speed) in [(slow, 1.0), (fast, 2.0)] {
            world.insert(e, MiningTarget(ORE)).unwrap();
            world.insert(e, ProductionTimer::new(100, speed)).unwrap();
            world.insert(e, Inventory::new(100).unwrap()).unwrap();
        }
        for _ in 0..20 {
            tick(&mut world, &mut events);
        }
        assert_eq!(world.get::<Inventory>(slow).unwrap().count_of(ORE), 10);
        assert_eq!(world.get::<Inventory>(fast).unwrap().count_of(ORE), 20);
    }

    #[test]
    fn full_output_parks_then_resumes() {
        let mut world = World::new();
        let mut events = Events::new();
        let miner = world.spawn();
        world.insert(miner, MiningTarget(ORE)).unwrap();
        world.insert(miner, ProductionTimer::new(50, 1.0)).unwrap();
        world.insert(miner, Inventory::new(1).unwrap()).unwrap();

        tick(&mut world, &mut events);
        tick(&mut world, &mut events);
        let timer = *world.get::<ProductionTimer>(miner).unwrap();
        assert_eq!(timer.state, ProductionState::OutputFull);
        assert!(timer.is_completed());

        world.get_mut::<Inventory>(miner).unwrap().take(ORE, 1);
        run_miners(&mut world, &mut events).unwrap();
        assert_eq!(world.get::<ProductionTimer>(miner).unwrap().state, ProductionState::Working);
        assert_eq!(world.get::<Inventory>(miner).unwrap().count_of(ORE), 1);

        let changes: Vec<_> = events
            .drain()
            .filter(|e| matches!(e, ProductionEvent::StateChanged { .. }))
            .collect();
        assert_eq!(changes, vec![
            ProductionEvent::StateChanged {
                producer: miner,
                from:     ProductionState::Working,
                to:       ProductionState::OutputFull,
            },
            ProductionEvent::StateChanged {
                producer: miner,
                from:     ProductionState::OutputFull,
                to:       ProductionState::Working,
            },
        ]);
    }

    #[test]
    fn paused_miner_is_skipped() {
        let mut world = World::new();
        let mut events = Events::new();
        let miner = world.spawn();
        let mut timer = ProductionTimer::new(10, 1.0);
        timer.progress = 10;
        timer.state = ProductionState::Paused;
        world.insert(miner, MiningTarget(ORE)).unwrap();
        world.insert(miner, timer).unwrap();
        world.insert(miner, Inventory::default()).unwrap();

        run_miners(&mut world, &mut events).unwrap();
        assert!(world.get::<Inventory>(miner).unwrap().is_empty());
        assert!(events.is_empty());
    }
}

#[cfg(test)]
mod assembler {
    use lg_inventory::{Inventory, ItemStack};
    use lg_world::{Entity, Events, World};

    use super::{ORE, PLATE};
    use crate::{
        advance_timers, run_assemblers, ProductionEvent, ProductionState, ProductionTimer, Recipe,
    };

    fn smelter(world: &mut World, capacity: i32, plates_per_ore: i32) -> Entity {
        let recipe = Recipe::new(
            10,
            vec![ItemStack::new(ORE, 1)],
            vec![ItemStack::new(PLATE, plates_per_ore)],
        );
        let e = world.spawn();
        world.insert(e, recipe.timer(1.0)).unwrap();
        world.insert(e, recipe).unwrap();
        world.insert(e, Inventory::new(capacity).unwrap()).unwrap();
        e
    }

    fn tick(world: &mut World, events: &mut Events<ProductionEvent>) {
        advance_timers(world, 16);
        run_assemblers(world, events).unwrap();
    }

    fn state(world: &World, e: Entity) -> ProductionState {
        world.get::<ProductionTimer>(e).unwrap().state
    }

    #[test]
    fn consumes_all_inputs_then_waits() {
        let mut world = World::new();
        let mut events = Events::new();
        let e = smelter(&mut world, 10, 1);
        world.get_mut::<Inventory>(e).unwrap().try_store(ORE, 10).unwrap();

        for _ in 0..30 {
            tick(&mut world, &mut events);
        }

        let inv = world.get::<Inventory>(e).unwrap();
        assert_eq!(inv.count_of(ORE), 0);
        assert_eq!(inv.count_of(PLATE), 10);
        assert_eq!(state(&world, e), ProductionState::WaitingForResources);
        let completed = events
            .iter()
            .filter(|ev| matches!(ev, ProductionEvent::Completed { .. }))
            .count();
        assert_eq!(completed, 10);
    }

    #[test]
    fn waits_without_inputs() {
        let mut world = World::new();
        let mut events = Events::new();
        let e = smelter(&mut world, 10, 1);
        for _ in 0..5 {
            tick(&mut world, &mut events);
        }
        assert_eq!(state(&world, e), ProductionState::WaitingForResources);
        assert_eq!(world.get::<ProductionTimer>(e).unwrap().progress, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn output_full_blocks_until_space() {
        let mut world = World::new();
        let mut events = Events::new();
        let e = smelter(&mut world, 3, 2);
        world.get_mut::<Inventory>(e).unwrap().try_store(ORE, 2).unwrap();

        tick(&mut world, &mut events); // pull first ore
        assert_eq!(state(&world, e), ProductionState::Working);
        tick(&mut world, &mut events); // 2 plates out, second ore in
        assert_eq!(world.get::<Inventory>(e).unwrap().count_of(PLATE), 2);
        tick(&mut world, &mut events); // no room for 2 more
        assert_eq!(state(&world, e), ProductionState::OutputFull);
        tick(&mut world, &mut events);
        assert_eq!(world.get::<Inventory>(e).unwrap().count_of(PLATE), 2, "no partial store");

        world.get_mut::<Inventory>(e).unwrap().take(PLATE, 2);
        tick(&mut world, &mut events);
        assert_eq!(world.get::<Inventory>(e).unwrap().count_of(PLATE), 2);
        assert_eq!(state(&world, e), ProductionState::WaitingForResources);

        let transitions: Vec<_> = events
            .iter()
            .filter_map(|ev| match *ev {
                ProductionEvent::StateChanged { to, .. } => Some(to),
                _ => None,
            })
            .collect();
        assert_eq!(transitions, vec![
            ProductionState::Working,
            ProductionState::OutputFull,
            ProductionState::WaitingForResources,
        ]);
    }
}
