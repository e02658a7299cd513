//! corridor — devices driving along a row of roadside cloudlets.
//!
//! Environment:
//!
//! | Variable         | Default          | Meaning                                |
//! |------------------|------------------|----------------------------------------|
//! | `FOGMIG_POLICY`  | `lowest-latency` | one of the four `PolicyKind` names     |
//! | `FOGMIG_CONFIG`  | *(none)*         | path to a `MigrationConfig` JSON file  |
//! | `FOGMIG_OUTPUT`  | `output/corridor`| directory for the CSV output           |
//! | `RUST_LOG`       | `info`           | tracing filter                         |
//!
//! `remote-delegated` also reads `FOGMIG_INFERENCE_URL` and
//! `FOGMIG_INFERENCE_TIMEOUT_MS`.

mod topology;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fm_core::{Coordinate, DeviceId, ServerId, SimConfig, Tick};
use fm_inference::InferenceConfig;
use fm_output::{CsvWriter, RecordOutputObserver, RecordWriter};
use fm_policy::{DecisionRecord, MigrationConfig, PolicyKind, build_engine};
use fm_sim::{LinearMobility, MigrationSimBuilder, SimObserver, TickStats};
use fm_topology::{MigPointPolicy, MobileDevice, Topology};

use topology::{AP_COUNT, AP_SPACING, bounds, build_corridor};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEVICE_COUNT:     usize = 12;
const SEED:             u64 = 42;
const TICK_DURATION_MS: u64 = 1_000;
const TOTAL_TICKS:      u64 = 120;

// ── Observer wrapper to count outcomes ───────────────────────────────────────

struct CountingObserver<W: RecordWriter> {
    inner:      RecordOutputObserver<W>,
    decisions:  usize,
    migrations: usize,
    handoffs:   usize,
}

impl<W: RecordWriter> CountingObserver<W> {
    fn new(inner: RecordOutputObserver<W>) -> Self {
        Self { inner, decisions: 0, migrations: 0, handoffs: 0 }
    }
}

impl<W: RecordWriter> SimObserver for CountingObserver<W> {
    fn on_decision(&mut self, record: &DecisionRecord) {
        self.decisions += 1;
        self.inner.on_decision(record);
    }

    fn on_migration(&mut self, tick: Tick, device: &MobileDevice, from: Option<ServerId>, to: ServerId) {
        self.migrations += 1;
        self.inner.on_migration(tick, device, from, to);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.handoffs += stats.handoffs;
        self.inner.on_tick_end(tick, stats);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> Result<MigrationConfig> {
    let mut config = match std::env::var_os("FOGMIG_CONFIG") {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", PathBuf::from(&path).display()))?;
            serde_json::from_str(&text).context("parsing migration config")?
        }
        None => MigrationConfig::default(),
    };
    // Environment overrides the file for the inference endpoint.
    if std::env::var_os(fm_inference::ENV_URL).is_some()
        || std::env::var_os(fm_inference::ENV_TIMEOUT_MS).is_some()
    {
        config.inference = InferenceConfig::from_env()?;
    }
    Ok(config)
}

/// Devices scattered along the road, mostly eastbound, each hosted on the
/// cloudlet of the AP it starts under (or the nearest one if that AP has
/// none).
fn place_devices(topology: &Topology, rng: &mut SmallRng) -> Vec<MobileDevice> {
    let east = AP_SPACING * (AP_COUNT - 1) as f64;
    let mut devices = Vec::with_capacity(DEVICE_COUNT);
    while devices.len() < DEVICE_COUNT {
        let coord = Coordinate::new(rng.gen_range(0.0..east), rng.gen_range(-3.0..3.0));
        let Some(ap) = topology.nearest_covering_ap(coord) else { continue };
        let heading = if rng.gen_bool(0.75) { 0.0 } else { 180.0 };
        let speed = if rng.gen_bool(0.1) { 0.0 } else { rng.gen_range(1.0..6.0) };
        let policy = MigPointPolicy::ALL[rng.gen_range(0..MigPointPolicy::ALL.len())];

        let id = DeviceId(devices.len() as u32);
        let mut device = MobileDevice::new(id, format!("car-{}", id.0), coord, ap)
            .with_motion(speed, heading)
            .with_policy(policy);
        let server = topology.ap(ap).and_then(|a| a.server).or_else(|| {
            topology
                .servers()
                .iter()
                .min_by(|a, b| a.coord.distance(coord).total_cmp(&b.coord.distance(coord)))
                .map(|s| s.id)
        });
        if let Some(server) = server {
            device = device.with_server(server);
        }
        devices.push(device);
    }
    devices
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let kind: PolicyKind = match std::env::var("FOGMIG_POLICY") {
        Ok(name) => name.parse()?,
        Err(_) => PolicyKind::LowestLatency,
    };
    let migration_config = load_config()?;
    let out_dir = std::env::var_os("FOGMIG_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output/corridor"));

    // 1. Topology and devices.
    let topology = build_corridor()?;
    let sim_config = SimConfig { tick_duration_ms: TICK_DURATION_MS, total_ticks: TOTAL_TICKS, seed: SEED };
    let mut rng = SmallRng::seed_from_u64(sim_config.seed);
    let devices = place_devices(&topology, &mut rng);
    info!(
        policy = %kind,
        aps = topology.ap_count(),
        servers = topology.server_count(),
        devices = devices.len(),
        ticks = sim_config.total_ticks,
        "starting corridor run"
    );

    // 2. Sim.
    let engine = build_engine(kind, &migration_config)?;
    let (min, max) = bounds();
    let mut sim = MigrationSimBuilder::new(sim_config.clone(), topology, engine, LinearMobility::bounded(min, max))
        .devices(devices)
        .build()?;

    // 3. Output.
    std::fs::create_dir_all(&out_dir)?;
    let writer = CsvWriter::new(&out_dir)?;
    let mut obs = CountingObserver::new(RecordOutputObserver::new(writer, &sim_config));

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  decisions.csv      : {} rows", obs.decisions);
    println!("  migrations         : {}", obs.migrations);
    println!("  handoffs           : {}", obs.handoffs);
    println!();

    println!("{:<8} {:<10} {:<12} {:<6}", "Device", "AP", "Cloudlet", "Moves");
    println!("{}", "-".repeat(40));
    for d in &sim.devices {
        let ap = sim.topology.ap(d.source_ap).map_or("?", |a| a.name.as_str());
        let server = d
            .current_server
            .and_then(|s| sim.topology.server(s))
            .map_or("-", |s| s.name.as_str());
        println!("{:<8} {:<10} {:<12} {:<6}", d.name, ap, server, d.migrations);
    }

    Ok(())
}
