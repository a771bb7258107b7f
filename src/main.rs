//! Replays recorded landmark traces through an exercise session.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use motion_coach::{
    app::{AppConfig, CoachApp},
    config::{Config, EXAMPLE_CONFIG},
    detector::ExerciseKind,
    events::CoachEvent,
};
use std::{
    fs::File,
    io::{self, BufReader},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Exercise to run (neck_tilt, head_rotation, shoulder_shrug)
    #[arg(short, long, default_value = "neck_tilt")]
    exercise: String,

    /// JSON-lines landmark trace ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    trace: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Override the repetition goal
    #[arg(short, long)]
    goal: Option<u32>,

    /// Run the blink / eye-strain monitor alongside
    #[arg(short, long)]
    monitor: bool,

    /// Keep the partial result when the trace ends before the goal
    #[arg(long)]
    finish: bool,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            match Config::from_file(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Failed to load config file: {}. Using defaults.", e);
                    Config::default()
                }
            }
        }
        None => Config::default(),
    };

    let exercise: ExerciseKind = args.exercise.parse()?;
    let mut app = CoachApp::new(AppConfig {
        exercise,
        config,
        goal: args.goal,
        monitor: args.monitor,
        finish_at_end: args.finish,
    })?;

    let mut print_event = |event: &CoachEvent| match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => log::warn!("Failed to serialize event: {e}"),
    };

    let summary = if args.trace == "-" {
        app.run(io::stdin().lock(), &mut print_event)?
    } else {
        let file = File::open(&args.trace).with_context(|| format!("Failed to open trace {}", args.trace))?;
        app.run(BufReader::new(file), &mut print_event)?
    };

    info!(
        "{} frames, {} reps, {} points, completed: {}",
        summary.frames, summary.rep_count, summary.reward_points, summary.completed
    );

    Ok(())
}
