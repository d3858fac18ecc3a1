//! Expire command implementation.
//!
//! This module implements the `expire` command, which marks confirmed
//! reservations whose guest never arrived as expired and frees their rooms.

use crate::error::CliError;
use crate::utils::{format_datetime, open_store, GlobalOptions};
use clap::Args;
use innkeep::ExpiryOperations;

/// Expire no-show reservations.
#[derive(Args)]
pub struct ExpireCommand {
    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ExpireCommand {
    /// Execute the expire command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut store = open_store(global)?;
        let grace = store.config().expiry_grace_hours();

        if self.dry_run && !global.quiet {
            eprintln!("[DRY RUN] Scanning for reservations more than {grace}h past check-in...");
        }

        let result = ExpiryOperations::sweep(&mut store, self.dry_run)?;

        // Format output
        if global.quiet {
            if result.expired_count > 0 {
                println!("{}", result.expired_count);
            }
        } else {
            let verb = if self.dry_run {
                "[DRY RUN] Would expire"
            } else {
                "Expired"
            };
            eprintln!("{verb} {} reservation(s)", result.expired_count);

            for (code, reason) in &result.failed {
                eprintln!("Warning: could not expire {code}: {reason}");
            }

            if global.verbose {
                for reservation in &result.expired_reservations {
                    eprintln!(
                        "  - {}: guest {}, room {}, check-in {}",
                        reservation.code,
                        reservation.guest_id,
                        reservation.room_id,
                        format_datetime(reservation.check_in)
                    );
                }
            }
        }

        Ok(())
    }
}
