use anyhow::{Context, Result};
use clap::Parser;
use partsim::config::RunConfig;
use partsim::scene::particles_in_box;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Event-driven point-particle collision simulator")]
struct Args {
    /// YAML run configuration; defaults apply to missing fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short = 'n', long)]
    particles: Option<usize>,

    #[arg(short, long)]
    end_time: Option<f64>,

    #[arg(short, long)]
    seed: Option<u64>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn load_config(args: &Args) -> Result<RunConfig> {
    let mut cfg = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(n) = args.particles {
        cfg.particles = n;
    }
    if let Some(t) = args.end_time {
        cfg.end_time = t;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let cfg = load_config(&args)?;

    let mut system = particles_in_box(&cfg)?;
    info!(
        particles = system.len(),
        kinetic_energy = system.total_kinetic_energy(),
        momentum = %system.total_momentum(),
        center_of_mass = %system.center_of_mass(),
        "initial state"
    );

    let report = system
        .simulate_for(cfg.end_time)
        .context("simulation aborted")?;

    info!(
        momentum = %report.initial_momentum,
        kinetic_energy = report.initial_kinetic_energy,
        "init"
    );
    info!(
        momentum = %report.final_momentum,
        kinetic_energy = report.final_kinetic_energy,
        elapsed = report.elapsed,
        events = report.events,
        collisions = report.collisions,
        "final"
    );
    info!(
        momentum_drift = report.momentum_drift(),
        energy_drift = report.energy_drift(),
        center_of_mass = %system.center_of_mass(),
        "done"
    );
    Ok(())
}
