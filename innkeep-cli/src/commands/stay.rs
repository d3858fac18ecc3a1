//! Check-in and check-out command implementations.

use crate::error::CliError;
use crate::utils::{find_reservation, open_store, GlobalOptions};
use clap::Args;
use innkeep::StayOperations;

/// Check in a confirmed reservation.
#[derive(Args)]
pub struct CheckInCommand {
    /// Reservation code
    pub code: String,
}

impl CheckInCommand {
    /// Execute the check-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut store = open_store(global)?;
        let mut reservation = find_reservation(&store, &self.code)?;
        let room = StayOperations::check_in(&mut store, &mut reservation)?;

        if !global.quiet {
            eprintln!(
                "Checked in {} to room {}",
                reservation.guest_id,
                room.room_id()
            );
        }
        Ok(())
    }
}

/// Check out a checked-in reservation and print its bill.
#[derive(Args)]
pub struct CheckOutCommand {
    /// Reservation code
    pub code: String,

    /// Print the bill without checking out
    #[arg(long)]
    pub preview: bool,
}

impl CheckOutCommand {
    /// Execute the check-out command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut store = open_store(global)?;
        let mut reservation = find_reservation(&store, &self.code)?;

        let bill = if self.preview {
            StayOperations::prepare_check_out(&store, &reservation)?
        } else {
            StayOperations::check_out(&mut store, &mut reservation)?
        };

        println!("{bill}");
        if self.preview && !global.quiet {
            eprintln!("[PREVIEW] Reservation {} is still checked in", self.code);
        }
        Ok(())
    }
}
