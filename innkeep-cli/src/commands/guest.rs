//! Guest command implementation.
//!
//! This module implements `guest add` and `guest list`.

use crate::error::CliError;
use crate::utils::{open_store, parse_symbolic, GlobalOptions};
use clap::{Args, Subcommand};
use innkeep::entities::{Guest, IdType};
use innkeep::{Query, Record};

/// Register and list guests.
#[derive(Args)]
pub struct GuestCommand {
    #[command(subcommand)]
    pub action: GuestAction,
}

/// Guest subcommands.
#[derive(Subcommand)]
pub enum GuestAction {
    /// Register a new guest
    Add(GuestAddArgs),

    /// List registered guests
    List(GuestListArgs),
}

/// Arguments for `guest add`.
#[derive(Args)]
pub struct GuestAddArgs {
    /// Identification number (passport or driving licence)
    #[arg(long, value_name = "ID")]
    pub id: String,

    /// Identification type
    #[arg(long, value_name = "TYPE", value_parser = parse_symbolic::<IdType>, default_value = "PASSPORT")]
    pub id_type: IdType,

    /// Full name
    #[arg(long)]
    pub name: String,

    /// Postal address
    #[arg(long, default_value = "")]
    pub address: String,

    /// Country of residence
    #[arg(long, default_value = "")]
    pub country: String,

    /// Gender (M or F)
    #[arg(long)]
    pub gender: String,

    /// Nationality
    #[arg(long, default_value = "")]
    pub nationality: String,

    /// Contact number (8 digits)
    #[arg(long)]
    pub contact: String,

    /// Credit card number (16 digits)
    #[arg(long, value_name = "NUMBER")]
    pub credit_card: String,
}

/// Arguments for `guest list`.
#[derive(Args)]
pub struct GuestListArgs {
    /// Only guests whose name contains this text (case-insensitive)
    #[arg(long)]
    pub name: Option<String>,
}

impl GuestCommand {
    /// Execute the guest command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            GuestAction::Add(args) => add(args, global),
            GuestAction::List(args) => list(&args, global),
        }
    }
}

fn add(args: GuestAddArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let mut store = open_store(global)?;

    let mut guest = Record::new(Guest {
        id: args.id,
        id_type: args.id_type,
        name: args.name,
        address: args.address,
        country: args.country,
        gender: args.gender,
        nationality: args.nationality,
        contact: args.contact,
        credit_card: args.credit_card,
    });
    guest.save(&mut store)?;

    println!("{}", guest.id);
    if !global.quiet {
        eprintln!("Registered guest {}", guest.name);
    }
    Ok(())
}

fn list(args: &GuestListArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let store = open_store(global)?;

    let guests = match &args.name {
        Some(name) => store.find_all::<Guest>(&Query::by("name", name.as_str()).partial())?,
        None => store.all::<Guest>(),
    };

    println!("ID\tNAME\tID_TYPE\tCONTACT\tNATIONALITY");
    for guest in &guests {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            guest.id, guest.name, guest.id_type, guest.contact, guest.nationality
        );
    }
    Ok(())
}
