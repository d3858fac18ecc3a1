//! Room command implementation.
//!
//! This module implements `room add`, `room list`, `room maintenance` and
//! `room vacate`.

use crate::error::CliError;
use crate::utils::{open_store, parse_symbolic, GlobalOptions};
use clap::{Args, Subcommand};
use innkeep::entities::{BedType, Facing, Room, RoomStatus, RoomType};
use innkeep::error::Error as LibError;
use innkeep::{MaintenanceOperations, Query, Record, RecordStore};

/// Manage rooms.
#[derive(Args)]
pub struct RoomCommand {
    #[command(subcommand)]
    pub action: RoomAction,
}

/// Room subcommands.
#[derive(Subcommand)]
pub enum RoomAction {
    /// Add a vacant room
    Add(RoomAddArgs),

    /// List rooms
    List(RoomListArgs),

    /// Take a vacant room out of service
    Maintenance(RoomIdArgs),

    /// Return a room under maintenance to service
    Vacate(RoomIdArgs),
}

/// Arguments for `room add`.
#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct RoomAddArgs {
    /// Floor (2-99)
    #[arg(long)]
    pub floor: i32,

    /// Unit number on the floor (1-99)
    #[arg(long)]
    pub number: i32,

    /// Room type
    #[arg(long = "type", value_name = "TYPE", value_parser = parse_symbolic::<RoomType>)]
    pub room_type: RoomType,

    /// Nightly rate on weekdays
    #[arg(long)]
    pub rate: f64,

    /// Nightly rate on weekends
    #[arg(long)]
    pub weekend_rate: f64,

    /// Bed type
    #[arg(long, value_parser = parse_symbolic::<BedType>, default_value = "SINGLE_BED")]
    pub bed: BedType,

    /// View from the room
    #[arg(long, value_parser = parse_symbolic::<Facing>, default_value = "NO_VIEW")]
    pub facing: Facing,

    /// The room has wifi
    #[arg(long)]
    pub wifi: bool,

    /// Smoking is allowed in the room
    #[arg(long)]
    pub smoking: bool,
}

/// Arguments for `room list`.
#[derive(Args)]
pub struct RoomListArgs {
    /// Only rooms in this status
    #[arg(long, value_parser = parse_symbolic::<RoomStatus>)]
    pub status: Option<RoomStatus>,

    /// Only rooms of this type
    #[arg(long = "type", value_name = "TYPE", value_parser = parse_symbolic::<RoomType>)]
    pub room_type: Option<RoomType>,
}

/// A room selected by id.
#[derive(Args)]
pub struct RoomIdArgs {
    /// Room id, four digits of floor and number (e.g. 0205)
    pub room_id: String,
}

impl RoomCommand {
    /// Execute the room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            RoomAction::Add(args) => add(&args, global),
            RoomAction::List(args) => list(&args, global),
            RoomAction::Maintenance(args) => {
                let mut store = open_store(global)?;
                let mut room = find_room(&store, &args.room_id)?;
                MaintenanceOperations::start(&mut store, &mut room)?;
                report_status(&room, global);
                Ok(())
            }
            RoomAction::Vacate(args) => {
                let mut store = open_store(global)?;
                let mut room = find_room(&store, &args.room_id)?;
                MaintenanceOperations::end(&mut store, &mut room)?;
                report_status(&room, global);
                Ok(())
            }
        }
    }
}

fn add(args: &RoomAddArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let mut store = open_store(global)?;

    let mut room = Record::new(Room {
        room_type: args.room_type,
        rate: args.rate,
        weekend_rate: args.weekend_rate,
        floor: args.floor,
        number: args.number,
        wifi_enabled: args.wifi,
        smoking_allowed: args.smoking,
        bed_type: args.bed,
        facing: args.facing,
        status: RoomStatus::Vacant,
    });
    room.save(&mut store)?;

    println!("{}", room.room_id());
    Ok(())
}

fn list(args: &RoomListArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let store = open_store(global)?;

    let mut query = Query::new();
    if let Some(status) = args.status {
        query = query.filter("status", status.as_str());
    }
    if let Some(room_type) = args.room_type {
        query = query.filter("roomType", room_type.as_str());
    }
    let rooms = store.find_all::<Room>(&query)?;

    println!("ROOM\tTYPE\tRATE\tWEEKEND\tBED\tFACING\tWIFI\tSMOKING\tSTATUS");
    for room in &rooms {
        println!(
            "{}\t{}\t{:.2}\t{:.2}\t{}\t{}\t{}\t{}\t{}",
            room.room_id(),
            room.room_type,
            room.rate,
            room.weekend_rate,
            room.bed_type,
            room.facing,
            room.wifi_enabled,
            room.smoking_allowed,
            room.status_label(),
        );
    }
    Ok(())
}

fn find_room(store: &RecordStore, room_id: &str) -> Result<Record<Room>, CliError> {
    store.lookup::<Room>("roomId", room_id).ok_or_else(|| {
        CliError::from(LibError::NotFound {
            resource: format!("room {room_id}"),
        })
    })
}

fn report_status(room: &Record<Room>, global: &GlobalOptions) {
    if !global.quiet {
        eprintln!("Room {} is now {}", room.room_id(), room.status_label());
    }
}
