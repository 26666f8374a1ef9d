//! Output formatting for reservation listings.
//!
//! Reservations are written to stdout as a human-readable table, JSON,
//! CSV or TSV. Status messages go to stderr so stdout stays parseable.

use crate::error::CliError;
use chrono::NaiveDate;
use roombook::config::OutputFormat;
use roombook::{Availability, Reservation};
use serde::Serialize;
use std::io::Write;

/// Column headers for reservation output.
const COLUMN_HEADERS: [&str; 6] = ["id", "user_id", "room_id", "start_date", "end_date", "status"];

/// Column headers for availability output.
const AVAILABILITY_HEADERS: [&str; 6] = [
    "room_id",
    "start_date",
    "end_date",
    "status",
    "conflicts",
    "message",
];

/// Flat row written for each reservation.
#[derive(Serialize)]
struct ReservationRow {
    id: i64,
    user_id: i64,
    room_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: &'static str,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id().value(),
            user_id: r.user_id(),
            room_id: r.room_id(),
            start_date: r.start_date(),
            end_date: r.end_date(),
            status: r.status().as_str(),
        }
    }
}

/// Write reservations to stdout in the requested format.
pub fn write_reservations(
    format: OutputFormat,
    reservations: &[Reservation],
) -> Result<(), CliError> {
    let rows: Vec<ReservationRow> = reservations.iter().map(ReservationRow::from).collect();
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => write_table(&mut handle, &rows),
        OutputFormat::Json => write_json(&mut handle, &rows),
        OutputFormat::Csv => write_delimited(&mut handle, &rows, b','),
        OutputFormat::Tsv => write_delimited(&mut handle, &rows, b'\t'),
    }
}

/// Write a single reservation to stdout.
///
/// JSON output is an object rather than a one-element array.
pub fn write_reservation(format: OutputFormat, reservation: &Reservation) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, &ReservationRow::from(reservation))
            .map_err(json_error)?;
        writeln!(handle)?;
        return Ok(());
    }
    write_reservations(format, std::slice::from_ref(reservation))
}

/// Write an availability result to stdout.
pub fn write_availability(format: OutputFormat, availability: &Availability) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let conflicts = availability
        .conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", availability.status)?;
            writeln!(handle, "{}", availability.message())?;
            if !conflicts.is_empty() {
                writeln!(handle, "Conflicting reservations: {}", conflicts.join(", "))?;
            }
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "room_id": availability.room_id,
                "start_date": availability.range.start(),
                "end_date": availability.range.end(),
                "status": availability.status,
                "conflicts": availability.conflicts,
                "message": availability.message(),
            });
            serde_json::to_writer_pretty(&mut handle, &value).map_err(json_error)?;
            writeln!(handle)?;
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(handle);
            writer.write_record(AVAILABILITY_HEADERS).map_err(csv_error)?;
            writer
                .write_record([
                    availability.room_id.to_string(),
                    availability.range.start().to_string(),
                    availability.range.end().to_string(),
                    availability.status.to_string(),
                    conflicts.join(" "),
                    availability.message(),
                ])
                .map_err(csv_error)?;
            writer.flush()?;
        }
    }

    Ok(())
}

/// Format reservations as a human-readable table.
fn write_table<W: Write>(out: &mut W, rows: &[ReservationRow]) -> Result<(), CliError> {
    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;

    for row in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.id, row.user_id, row.room_id, row.start_date, row.end_date, row.status
        )?;
    }

    Ok(())
}

/// Format reservations as a JSON array.
fn write_json<W: Write>(out: &mut W, rows: &[ReservationRow]) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, rows).map_err(json_error)?;
    writeln!(out)?;
    Ok(())
}

/// Format reservations as delimited output (CSV or TSV).
fn write_delimited<W: Write>(
    out: &mut W,
    rows: &[ReservationRow],
    delimiter: u8,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(out);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush()?;

    Ok(())
}

/// Convert `serde_json::Error` to `CliError`.
fn json_error(e: serde_json::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Convert `csv::Error` to `CliError`.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}
