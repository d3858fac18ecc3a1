//! Main entry point for the innkeep CLI.
//!
//! This is the command-line front desk over the innkeep record store.
//! It provides commands for the whole stay:
//! - `guest`, `room`, `menu`: Maintain the hotel's records
//! - `reserve`, `walk-in`: Book rooms
//! - `check-in`, `check-out`: Run the stay and print the bill
//! - `order`, `order-status`: Room service
//! - `expire`, `reservations`, `report`: Housekeeping and summaries

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    if let Err(e) = innkeep::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: logging unavailable: {e}");
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Guest(cmd) => cmd.execute(&global),
        cli::Command::Room(cmd) => cmd.execute(&global),
        cli::Command::Menu(cmd) => cmd.execute(&global),
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::WalkIn(cmd) => cmd.execute(&global),
        cli::Command::CheckIn(cmd) => cmd.execute(&global),
        cli::Command::CheckOut(cmd) => cmd.execute(&global),
        cli::Command::Expire(cmd) => cmd.execute(&global),
        cli::Command::Reservations(cmd) => cmd.execute(&global),
        cli::Command::Order(cmd) => cmd.execute(&global),
        cli::Command::OrderStatus(cmd) => cmd.execute(&global),
        cli::Command::Report(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
