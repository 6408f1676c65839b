//! Tumble CLI
//!
//! Rolls physically simulated dice without a renderer: builds a procedural
//! die, drops it into the standard arena, steps the world on a fixed-rate
//! frame loop and prints the face each roll settles on.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tumble::{Die, DieKind, PhysicsWorld, RollTuning, SharedWorld};

const DT: f32 = 1.0 / 60.0;

/// Tumble - roll simulated dice and read the face they land on
#[derive(Parser)]
#[command(name = "tumble", version, about = "Roll a physically simulated die")]
struct Cli {
    /// Die to roll (d4, d6, d8, d10, d12, d20)
    #[arg(short, long, default_value = "d6", value_parser = parse_die_kind)]
    die: DieKind,

    /// Number of rolls
    #[arg(short = 'n', long, default_value_t = 1)]
    rolls: u32,

    /// Tuning overrides (RON file); unset fields keep their defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Step the simulation as fast as possible instead of at 60 Hz
    #[arg(long)]
    fast: bool,
}

fn parse_die_kind(s: &str) -> Result<DieKind, String> {
    DieKind::parse(s)
        .ok_or_else(|| format!("unknown die '{s}' (expected d4, d6, d8, d10, d12 or d20)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut tuning = match &cli.tuning {
        Some(path) => RollTuning::load(path)?,
        None => RollTuning::default(),
    };
    tuning.density = cli.die.density();

    let world = PhysicsWorld::new(DT).into_shared();
    world.lock().expect("world lock").spawn_arena();
    let mut die = Die::new(cli.die.model(), &world, tuning)?;

    let mut counts = vec![0u32; cli.die.face_count() as usize];
    for i in 1..=cli.rolls {
        let face = run_roll(&world, &mut die, cli.fast).await?;
        println!(
            "{} {}",
            format!("roll {i}:").dimmed(),
            format!("{} shows {}", cli.die.name(), face).green().bold()
        );
        if let Some(slot) = (face as usize)
            .checked_sub(1)
            .and_then(|f| counts.get_mut(f))
        {
            *slot += 1;
        }
    }

    if cli.rolls > 1 {
        println!();
        println!("{}", "face counts:".dimmed());
        for (face, count) in counts.iter().enumerate() {
            if *count > 0 {
                println!("  {:>3} x {}", count, face + 1);
            }
        }
    }
    Ok(())
}

/// Drive the frame loop until the pending roll resolves.
async fn run_roll(world: &SharedWorld, die: &mut Die, fast: bool) -> Result<u32> {
    let pending = die.roll()?;
    let result = tokio::spawn(pending);

    let mut ticker = tokio::time::interval(Duration::from_secs_f32(DT));
    while !result.is_finished() {
        world.lock().expect("world lock").step();
        die.update(DT);
        if fast {
            tokio::task::yield_now().await;
        } else {
            ticker.tick().await;
        }
    }
    Ok(result.await?)
}
