//! outpost — a small mining outpost for the rust_logi engine.
//!
//! Miners dig ore, smelters turn ore into plates, and workshops consume
//! plates.  Carriers stationed at a few bases move everything around.  The
//! layout is drawn from a seeded `SimRng`, so one seed always gives the same
//! map and the same run.
//!
//! ```text
//! cargo run -p outpost                       # built-in config
//! cargo run -p outpost -- config.json        # SimConfig from JSON
//! RUST_LOG=lg_network=debug cargo run -p outpost
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lg_core::{ItemId, SimConfig, SimRng, Vec2};
use lg_inventory::{Inventory, ItemStack};
use lg_network::{spawn_base, spawn_requester, Location, ProvideLedger, RequestLedger};
use lg_output::{CsvWriter, SimOutputObserver};
use lg_production::{MiningTarget, ProductionTimer, Recipe};
use lg_sim::SimBuilder;
use lg_world::{Entity, Prototype, World};

// ── Constants ─────────────────────────────────────────────────────────────────

const ORE:   ItemId = ItemId(0);
const PLATE: ItemId = ItemId(1);

const MINERS:     usize = 6;
const SMELTERS:   usize = 3;
const WORKSHOPS:  usize = 4;
const BASES:      usize = 2;
const MAP_SIZE:   f32   = 60.0;
const OUTPUT_DIR: &str  = "output/outpost";

// ── Scene ─────────────────────────────────────────────────────────────────────

/// Which role each node plays, for the final report.
struct Scene {
    world: World,
    nodes: Vec<(&'static str, Entity)>,
}

fn random_point(rng: &mut SimRng) -> Vec2 {
    Vec2::new(rng.gen_range(0.0..MAP_SIZE), rng.gen_range(0.0..MAP_SIZE))
}

fn build_scene(seed: u64) -> Result<Scene> {
    let mut rng = SimRng::new(seed);
    let mut layout = rng.child(1);
    let mut tuning = rng.child(2);
    let mut world = World::new();
    let mut nodes = Vec::new();

    // Miners: dig one ore per cycle, offer only ore.
    let miner = Prototype::new()
        .with(MiningTarget(ORE))
        .with(ProvideLedger::offering([ORE]))
        .with(Inventory::new(20)?);
    for _ in 0..MINERS {
        let node = miner.spawn(&mut world)?;
        let cycle_ms = tuning.gen_range(400..900);
        world.insert(node, ProductionTimer::new(cycle_ms, 1.0))?;
        world.insert(node, Location(random_point(&mut layout)))?;
        nodes.push(("miner", node));
    }

    // Smelters: 2 ore → 1 plate.  Request ore, offer plates only.
    let smelting = Recipe::new(
        1_200,
        vec![ItemStack::new(ORE, 2)],
        vec![ItemStack::new(PLATE, 1)],
    );
    let smelter = Prototype::new()
        .with(smelting.timer(1.0))
        .with(smelting)
        .with(ProvideLedger::offering([PLATE]))
        .with(RequestLedger::with_requests([(ORE, 6)]))
        .with(Inventory::new(16)?);
    for _ in 0..SMELTERS {
        let node = smelter.spawn(&mut world)?;
        world.insert(node, Location(random_point(&mut layout)))?;
        nodes.push(("smelter", node));
    }

    // Workshops: sinks for plates.
    for _ in 0..WORKSHOPS {
        let want = tuning.gen_range(4..12);
        let node = spawn_requester(
            &mut world,
            random_point(&mut layout),
            Inventory::new(40)?,
            &[(PLATE, want)],
        )?;
        nodes.push(("workshop", node));
    }

    for _ in 0..BASES {
        let carriers = tuning.gen_range(3..6);
        let node = spawn_base(&mut world, random_point(&mut layout), carriers, 250)?;
        nodes.push(("base", node));
    }

    Ok(Scene { world, nodes })
}

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig {
            total_ticks: 4_000,
            seed: 42,
            carrier_speed: 0.02,
            order_buffer_capacity: 256,
            output_interval_ticks: 100,
            ..SimConfig::default()
        });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: SimConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!(%path, "loaded config");
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    println!("=== outpost — rust_logi ===");
    println!(
        "Miners: {MINERS}  |  Smelters: {SMELTERS}  |  Workshops: {WORKSHOPS}  |  Bases: {BASES}  |  Seed: {}",
        config.seed
    );

    // 1. Scene.
    let Scene { world, nodes } = build_scene(config.seed)?;

    // 2. Sim.
    let mut sim = SimBuilder::new(config.clone()).world(world).build()?;

    // 3. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = SimOutputObserver::new(writer, &config);

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();
    if let Some(e) = obs.take_error() {
        warn!("output error: {e}");
    }

    // 5. Summary.
    let stats = sim.network.stats;
    println!("Simulation complete in {:.3} s  ({})", elapsed.as_secs_f64(), sim.clock);
    println!(
        "  carriers: {} created, {} returned, {} aborted, {} in flight",
        stats.carriers_created,
        stats.carriers_returned,
        stats.carriers_aborted,
        sim.network.carriers_in_flight
    );
    println!(
        "  items:    {} picked up, {} delivered, {} dropped",
        stats.picked_up_items, stats.delivered_items, stats.dropped_items
    );
    println!("  output:   {OUTPUT_DIR}/");
    println!();

    // 6. Final inventories.
    println!("{:<10} {:<12} {:<16} Contents", "Role", "Entity", "Position");
    println!("{}", "-".repeat(56));
    for (role, node) in nodes {
        let Some(&Location(at)) = sim.world.get::<Location>(node) else {
            continue;
        };
        let contents = sim
            .world
            .get::<Inventory>(node)
            .map(|inv| inv.display_content().replace('\n', ", "))
            .unwrap_or_default();
        println!("{:<10} {:<12} {:<16} {}", role, node.to_string(), at.to_string(), contents);
    }

    Ok(())
}
