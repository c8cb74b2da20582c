use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ActivityCommands, PackingCommands, TripCommands};

/// Main command-line interface for the Tripline trip planner
///
/// Tripline organizes travel into trips, each with a dated itinerary of
/// activities and any number of packing lists. Running it without a command
/// lists your trips.
#[derive(Parser)]
#[command(version, about, name = "trip")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tripline/tripline.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Allow two activities to share the same date and time
    #[arg(long, global = true)]
    pub allow_conflicts: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Tripline CLI
///
/// Commands are grouped by resource:
/// - `trip`: create, list, show, update, and delete trips
/// - `activity`: manage the itinerary of a trip
/// - `packing`: manage packing lists and their items
#[derive(Subcommand)]
pub enum Commands {
    /// Manage trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Manage activities within a trip
    #[command(alias = "a")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Manage packing lists and items
    #[command(alias = "p")]
    Packing {
        #[command(subcommand)]
        command: PackingCommands,
    },
}
