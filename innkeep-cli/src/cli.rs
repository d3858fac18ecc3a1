//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckInCommand, CheckOutCommand, ExpireCommand, GuestCommand, MenuCommand, OrderCommand,
    OrderStatusCommand, ReportCommand, ReservationsCommand, ReserveCommand, RoomCommand,
    WalkInCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Front desk for a small hotel kept in flat files.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Run the front desk of a small hotel", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Register and list guests
    Guest(GuestCommand),

    /// Add, list and maintain rooms
    Room(RoomCommand),

    /// Manage the room-service menu
    Menu(MenuCommand),

    /// Reserve a room for a future stay
    Reserve(ReserveCommand),

    /// Book and check in a guest now
    WalkIn(WalkInCommand),

    /// Check in a confirmed reservation
    CheckIn(CheckInCommand),

    /// Check out and print the bill
    CheckOut(CheckOutCommand),

    /// Expire reservations whose guest never arrived
    Expire(ExpireCommand),

    /// List reservations
    Reservations(ReservationsCommand),

    /// Order room service
    Order(OrderCommand),

    /// Advance a room-service order
    OrderStatus(OrderStatusCommand),

    /// Summarize room usage
    Report(ReportCommand),
}
