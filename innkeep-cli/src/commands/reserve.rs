//! Reserve and walk-in command implementations.
//!
//! `reserve` books a room for a future stay; `walk-in` books and checks in
//! at once, starting the stay now.

use crate::error::CliError;
use crate::utils::{format_datetime, open_store, parse_datetime, parse_symbolic, GlobalOptions};
use chrono::NaiveDateTime;
use clap::Args;
use innkeep::entities::RoomType;
use innkeep::{Booking, BookingOperations, ReservationRequest, RoomSelection};

/// The party and room shared by `reserve` and `walk-in`.
#[derive(Args)]
pub struct StayArgs {
    /// Id of the registered guest
    #[arg(long, value_name = "ID")]
    pub guest: String,

    /// Book the first vacant room of this type
    #[arg(
        long = "type",
        value_name = "TYPE",
        value_parser = parse_symbolic::<RoomType>,
        conflicts_with = "room",
        required_unless_present = "room"
    )]
    pub room_type: Option<RoomType>,

    /// Book this room (e.g. 0205)
    #[arg(long, value_name = "ROOM_ID")]
    pub room: Option<String>,

    /// Check-out date and time ("YYYY-MM-DD HHMM")
    #[arg(long, value_name = "WHEN", value_parser = parse_datetime)]
    pub check_out: NaiveDateTime,

    /// Number of adults
    #[arg(long, default_value_t = 1)]
    pub adults: u32,

    /// Number of children
    #[arg(long, default_value_t = 0)]
    pub children: u32,
}

impl StayArgs {
    fn selection(&self) -> Result<RoomSelection, CliError> {
        match (&self.room, self.room_type) {
            (Some(room_id), _) => Ok(RoomSelection::ById(room_id.clone())),
            (None, Some(room_type)) => Ok(RoomSelection::ByType(room_type)),
            (None, None) => Err(CliError::InvalidArguments(
                "either --room or --type is required".into(),
            )),
        }
    }

    fn request(&self, check_in: NaiveDateTime) -> Result<ReservationRequest, CliError> {
        Ok(
            ReservationRequest::new(self.guest.as_str(), self.selection()?, check_in, self.check_out)
                .with_party(self.adults, self.children),
        )
    }
}

/// Reserve a room for a future stay.
#[derive(Args)]
pub struct ReserveCommand {
    #[command(flatten)]
    pub stay: StayArgs,

    /// Check-in date and time ("YYYY-MM-DD HHMM")
    #[arg(long, value_name = "WHEN", value_parser = parse_datetime)]
    pub check_in: NaiveDateTime,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let request = self.stay.request(self.check_in)?;
        let mut store = open_store(global)?;
        let booking = BookingOperations::create(&mut store, &request)?;
        print_booking(&booking, global);
        Ok(())
    }
}

/// Book and check in a guest without a prior reservation.
#[derive(Args)]
pub struct WalkInCommand {
    #[command(flatten)]
    pub stay: StayArgs,
}

impl WalkInCommand {
    /// Execute the walk-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut store = open_store(global)?;
        let request = self.stay.request(store.now())?;
        let booking = BookingOperations::walk_in(&mut store, &request)?;
        print_booking(&booking, global);
        Ok(())
    }
}

// The code goes to stdout so scripts can capture it.
fn print_booking(booking: &Booking, global: &GlobalOptions) {
    println!("{}", booking.reservation.code);
    if !global.quiet {
        eprintln!(
            "Room {} ({}) {} from {} to {}",
            booking.room.room_id(),
            booking.room.room_type,
            booking.room.status_label(),
            format_datetime(booking.reservation.check_in),
            format_datetime(booking.reservation.check_out),
        );
    }
}
