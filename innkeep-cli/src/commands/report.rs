//! Report command implementation.
//!
//! Prints the room count per status and, when a status is given, which
//! rooms of each type are in it.

use crate::error::CliError;
use crate::utils::{json_error, open_store, parse_symbolic, GlobalOptions};
use clap::{Args, ValueEnum};
use innkeep::entities::RoomStatus;
use innkeep::operations::ReportOperations;
use std::io::Write;

/// Summarize room usage.
#[derive(Args)]
pub struct ReportCommand {
    /// Also list rooms per type split by this status
    #[arg(long, value_parser = parse_symbolic::<RoomStatus>)]
    pub status: Option<RoomStatus>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: ReportFormat,
}

/// Output format for the report command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text
    Table,
    /// JSON format
    Json,
}

impl ReportCommand {
    /// Execute the report command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let store = open_store(global)?;
        let counts = ReportOperations::status_counts(&store);
        let occupancy = self
            .status
            .map(|status| ReportOperations::occupancy(&store, status));

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        match self.format {
            ReportFormat::Json => {
                let json = serde_json::json!({
                    "status_counts": counts,
                    "occupancy": occupancy,
                });
                serde_json::to_writer_pretty(&mut handle, &json).map_err(json_error)?;
                writeln!(handle)?;
            }
            ReportFormat::Table => {
                writeln!(handle, "STATUS\tROOMS")?;
                for count in &counts {
                    writeln!(handle, "{}\t{}", count.status, count.count)?;
                }

                if let (Some(status), Some(lines)) = (self.status, occupancy) {
                    writeln!(handle)?;
                    writeln!(handle, "TYPE\t{status}\tOTHER")?;
                    for line in lines {
                        writeln!(
                            handle,
                            "{}\t{}\t{}",
                            line.room_type,
                            join_or_dash(&line.matching),
                            join_or_dash(&line.other)
                        )?;
                    }
                }
            }
        }

        Ok(())
    }
}

fn join_or_dash(ids: &[String]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.join(",")
    }
}
