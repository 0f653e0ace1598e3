use anyhow::Result;
use clap::Parser;
use creeps_common::SimulationConfig;
use creeps_engine::output::{save_final_positions, save_snapshots};
use creeps_engine::CreepSimulation;
use log::{debug, error, info, trace, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Headless runner for the bouncing-creeps simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override `timing.total_ticks`
    #[arg(long)]
    ticks: Option<u32>,

    /// Override `population.placement_seed`
    #[arg(long)]
    seed: Option<u64>,

    /// Override `output.format` (json, bincode, messagepack)
    #[arg(long)]
    format: Option<String>,
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();
    let args = Args::parse();

    info!("Starting creeps engine...");

    // --- Load Configuration ---
    let mut config = SimulationConfig::load(&args.config)?;
    if let Some(ticks) = args.ticks {
        config.timing.total_ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.population.placement_seed = seed;
    }
    if let Some(format) = args.format {
        config.output.format = Some(format);
    }
    info!("Loaded configuration from {}", args.config.display());
    debug!("Configuration: {:#?}", config);

    // --- Initialize Simulation ---
    let mut sim = match CreepSimulation::from_config(&config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("Rejected configuration: {}", e);
            anyhow::bail!("Failed to initialize simulation.");
        }
    };
    info!("Simulation initialized with {} entities.", sim.entity_count());

    let total_ticks = config.timing.total_ticks;
    if config.timing.record_interval_ticks == 0 {
        warn!("record_interval_ticks is 0. Recording every tick.");
    }
    let record_interval = config.record_interval();
    info!("Recording snapshot every {} ticks.", record_interval);

    info!("Starting simulation loop for {} ticks...", total_ticks);
    let start_time = Instant::now();
    let mut previous_print_time = start_time;

    // --- Initial Snapshot (tick = 0) ---
    sim.record_snapshot();

    for step in 0..total_ticks {
        let tick_start_time = Instant::now();
        let report = sim.tick();
        let tick_duration = tick_start_time.elapsed();

        let current_time = Instant::now();
        let print_interval_secs = 5.0;
        let should_print_status = current_time.duration_since(previous_print_time).as_secs_f64() >= print_interval_secs;
        let is_record_step = (step + 1) % record_interval == 0;
        let is_last_step = step == total_ticks - 1 || report.survivors == 0;

        if should_print_status || is_record_step || is_last_step {
            info!(
                "Tick [{}/{}] | Entities: {} | Removed: {} | Tick Time: {:6.3} ms | Elapsed: {:.2} s",
                report.tick,
                total_ticks,
                report.survivors,
                sim.removed_total(),
                tick_duration.as_secs_f64() * 1000.0,
                start_time.elapsed().as_secs_f64()
            );
            previous_print_time = current_time;

            if is_record_step || is_last_step {
                sim.record_snapshot();
            }
        } else {
            trace!(
                "Tick [{}/{}] completed in {:.3} ms",
                report.tick,
                total_ticks,
                tick_duration.as_secs_f64() * 1000.0
            );
        }

        if report.survivors == 0 {
            info!("No entities left after tick {}. Stopping early.", report.tick);
            break;
        }
    }

    let total_duration = start_time.elapsed();
    info!(
        "Simulation finished after {} ticks in {:.3} seconds.",
        sim.current_tick(),
        total_duration.as_secs_f64()
    );

    // --- Save Recorded Data ---
    if config.output.save_stats {
        if let Err(e) = save_snapshots(sim.recorded_snapshots(), &config.output) {
            error!("{:#}", e);
        }
    } else {
        info!("Skipping saving snapshots as per config (save_stats is false).");
    }

    if config.output.save_final_positions {
        if let Err(e) = save_final_positions(sim.entities(), &config.output) {
            error!("{:#}", e);
        }
    } else {
        info!("Skipping saving final positions as per config.");
    }

    info!("Simulation Complete.");
    Ok(())
}
