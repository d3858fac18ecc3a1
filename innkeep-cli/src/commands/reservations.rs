//! Reservations command implementation.
//!
//! This module implements the `reservations` command, which lists
//! reservations in various formats (table, JSON, CSV) after sweeping
//! expired ones.

use crate::error::CliError;
use crate::utils::{csv_error, format_datetime, json_error, open_store, GlobalOptions};
use clap::{Args, ValueEnum};
use innkeep::entities::{Reservation, ReservationStatus};
use innkeep::{BookingOperations, Record};
use std::io::Write;

/// Column headers for CSV output.
const COLUMN_HEADERS: [&str; 8] = [
    "code",
    "status",
    "guest",
    "room",
    "check_in",
    "check_out",
    "adults",
    "children",
];

/// List reservations.
#[derive(Args)]
pub struct ReservationsCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "INNKEEP_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Filter by guest id
    #[arg(long, value_name = "ID")]
    pub guest: Option<String>,

    /// Filter by room id
    #[arg(long, value_name = "ROOM_ID")]
    pub room: Option<String>,

    /// Only reservations that still hold a room
    #[arg(long)]
    pub active: bool,
}

/// Output format for the reservations command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut store = open_store(global)?;
        let mut reservations = BookingOperations::list(&mut store)?;

        if let Some(ref guest) = self.guest {
            reservations.retain(|r| r.guest_id.eq_ignore_ascii_case(guest));
        }
        if let Some(ref room) = self.room {
            reservations.retain(|r| &r.room_id == room);
        }
        if self.active {
            reservations.retain(|r| {
                matches!(
                    r.status,
                    ReservationStatus::Confirmed | ReservationStatus::CheckedIn
                )
            });
        }

        match self.format {
            OutputFormat::Table => format_as_table(&reservations)?,
            OutputFormat::Json => format_as_json(&reservations)?,
            OutputFormat::Csv => format_as_csv(&reservations)?,
        }

        Ok(())
    }
}

fn format_as_table(reservations: &[Record<Reservation>]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            res.code,
            res.status,
            res.guest_id,
            res.room_id,
            format_datetime(res.check_in),
            format_datetime(res.check_out),
            res.adults,
            res.children,
        )?;
    }

    Ok(())
}

fn format_as_json(reservations: &[Record<Reservation>]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = reservations
        .iter()
        .map(|r| {
            serde_json::json!({
                "code": r.code,
                "status": r.status,
                "guest": r.guest_id,
                "room": r.room_id,
                "check_in": format_datetime(r.check_in),
                "check_out": format_datetime(r.check_out),
                "adults": r.adults,
                "children": r.children,
                "nights": r.total_days(),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data).map_err(json_error)?;
    writeln!(handle)?;

    Ok(())
}

fn format_as_csv(reservations: &[Record<Reservation>]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::Writer::from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for res in reservations {
        writer
            .write_record(&[
                res.code.clone(),
                res.status.to_string(),
                res.guest_id.clone(),
                res.room_id.clone(),
                format_datetime(res.check_in),
                format_datetime(res.check_out),
                res.adults.to_string(),
                res.children.to_string(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
