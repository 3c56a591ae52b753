//! HOS Trip Planner - command line entry point
//!
//! Reads a trip plan request as JSON and writes the plan response to stdout.

mod cli;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hos_trip_planner::config::Config;
use hos_trip_planner::handlers::handle_plan_message;
use hos_trip_planner::TripPlanner;

use cli::{Cli, Command};

fn init_tracing(logs_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hos_trip_planner=debug".into()),
    );
    // stdout carries the JSON response
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match logs_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).ok();
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "planner.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read request from stdin")?;
        Ok(buf)
    } else {
        std::fs::read(input).with_context(|| format!("Failed to read request file {}", input))
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let _guard = init_tracing(config.logs_dir.as_deref());
    info!("Configuration loaded");

    let planner = TripPlanner::new(config.rules);

    match cli.command.unwrap_or(Command::Plan {
        input: "-".to_string(),
        pretty: false,
    }) {
        Command::Plan { input, pretty } => {
            let payload = read_input(&input)?;
            let response = handle_plan_message(&payload, &planner)?;
            print_json(&response, pretty)
        }
        Command::Rules => print_json(&serde_json::to_value(planner.rules())?, true),
    }
}
