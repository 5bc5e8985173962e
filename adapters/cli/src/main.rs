#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for validating layouts, browsing daily maps and
//! running headless Daily Dungeon sessions.

mod curated;
mod simulate;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use daily_dungeon_core::PlayerClass;
use daily_dungeon_session::SessionConfig;
use daily_dungeon_system_reachability::{validate_layout, ValidationReport};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "daily-dungeon", version, about = "Headless Daily Dungeon tools")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Validates a 100-symbol layout and prints the report as JSON.
    Validate {
        /// Layout using `0` for walls, `1` for floors and `T` for teleports.
        layout: String,
    },
    /// Prints the curated map, monster and modifier of a day.
    Daily {
        /// Day number; the rotation repeats every thirty days.
        #[arg(long, default_value_t = 0)]
        day: u64,
    },
    /// Runs a headless session driven by an autopilot.
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// TOML session configuration. Other flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Layout to play instead of the daily map.
    #[arg(long)]
    layout: Option<String>,
    /// Player class: warrior, rogue or dark-knight.
    #[arg(long)]
    class: Option<String>,
    /// Seed for every random stream.
    #[arg(long)]
    seed: Option<u64>,
    /// Upper bound on simulated ticks.
    #[arg(long, default_value_t = 20_000)]
    ticks: u32,
    /// Day whose curated map is played when no layout is given.
    #[arg(long, default_value_t = 0)]
    day: u64,
}

#[derive(Debug, Serialize)]
struct DailyReport {
    day: u64,
    name: String,
    rows: Vec<String>,
    monster: &'static str,
    modifier: &'static str,
    validation: ValidationReport,
}

/// Entry point for the Daily Dungeon command-line interface.
fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("daily_dungeon=info".parse()?))
        .init();

    match Cli::parse().command {
        CliCommand::Validate { layout } => {
            let report = validate_layout(&layout);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        CliCommand::Daily { day } => {
            let map = curated::map_for_day(day);
            let report = DailyReport {
                day,
                rows: map
                    .layout
                    .as_bytes()
                    .chunks(10)
                    .map(|row| String::from_utf8_lossy(row).into_owned())
                    .collect(),
                monster: map.monster,
                modifier: map.modifier.label(),
                validation: validate_layout(&map.layout),
                name: map.name,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Simulate(args) => {
            let ticks = args.ticks;
            let config = session_config(args)?;
            let summary = simulate::run(config, ticks)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Resolves the configuration file, falling back to the day's curated map,
/// then applies flag overrides.
fn session_config(args: SimulateArgs) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => simulate::load_config(path)?,
        None => {
            let map = curated::map_for_day(args.day);
            SessionConfig::new(map.layout, PlayerClass::Warrior)
                .with_monster(map.monster)
                .with_modifier(map.modifier)
        }
    };
    if let Some(layout) = args.layout {
        config.layout = layout;
    }
    if let Some(label) = args.class {
        config.class =
            PlayerClass::from_label(&label).ok_or_else(|| anyhow!("unknown class `{label}`"))?;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}
