//! CLI argument parsing for the hos-trip-planner binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hos-trip-planner",
    about = "Plan a truck trip under hours-of-service rules and emit ELD daily logs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plan a trip from a JSON request (default if no subcommand given)
    Plan {
        /// Request file, or "-" for stdin
        #[arg(long, short, default_value = "-")]
        input: String,
        /// Pretty-print the JSON response
        #[arg(long)]
        pretty: bool,
    },
    /// Print the active HOS rules as JSON
    Rules,
}
