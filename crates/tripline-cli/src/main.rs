//! Tripline CLI Application
//!
//! Command-line interface for the Tripline trip planner.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use tripline_core::{params::ListTrips, PlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        allow_conflicts,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_conflict_enforcement(!allow_conflicts)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Tripline started");

    match command {
        Some(Trip { command }) => Cli::new(planner, renderer).handle_trip_command(command).await,
        Some(Activity { command }) => {
            Cli::new(planner, renderer)
                .handle_activity_command(command)
                .await
        }
        Some(Packing { command }) => {
            Cli::new(planner, renderer)
                .handle_packing_command(command)
                .await
        }
        None => {
            Cli::new(planner, renderer)
                .list_trips(&ListTrips { upcoming: false })
                .await
        }
    }
}
