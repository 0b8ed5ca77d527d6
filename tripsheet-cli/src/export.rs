//! CSV, Excel, JSON and stdout renderings of a [`TripReport`].

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use rust_xlsxwriter::{Workbook, XlsxError};
use serde::Serialize;
use thiserror::Error;
use tripsheet_core::{TripRecord, TripReport};

/// Column headers of the CSV report.
pub const CSV_HEADERS: [&str; 4] = ["Datum", "Bestemming", "Omschrijving", "Totale afstand (km)"];

/// Label in the first column of the trailing summary row.
const TOTAL_LABEL: &str = "Totaal";

/// Trips listed individually in the stdout summary.
const SUMMARY_PREVIEW: usize = 5;

/// Worksheet holding the trips in the Excel report.
pub const XLSX_SHEET_NAME: &str = "Reisverslag";

/// Widest an Excel column is sized to, in characters.
const XLSX_MAX_COLUMN_WIDTH: u16 = 50;

/// Characters of padding added to the widest cell of each column.
const XLSX_COLUMN_PADDING: u16 = 2;

/// Errors raised while writing report files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The file could not be created or written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination file.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// CSV encoding failed.
    #[error("failed to encode CSV for {path}: {source}")]
    Csv {
        /// Destination file.
        path: Utf8PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
    /// Excel encoding failed.
    #[error("failed to encode Excel workbook for {path}: {source}")]
    Xlsx {
        /// Destination file.
        path: Utf8PathBuf,
        /// Underlying workbook error.
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    /// JSON encoding failed.
    #[error("failed to encode JSON for {path}: {source}")]
    Json {
        /// Destination file.
        path: Utf8PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
struct JsonTrip<'a> {
    date: String,
    destination: &'a str,
    description: &'a str,
    total_distance: u32,
}

impl<'a> From<&'a TripRecord> for JsonTrip<'a> {
    fn from(trip: &'a TripRecord) -> Self {
        Self {
            date: trip.formatted_date(),
            destination: &trip.destination,
            description: &trip.description,
            total_distance: trip.distance_km,
        }
    }
}

/// Every row of the report as text: header, one row per trip, then the total.
fn report_rows(report: &TripReport) -> Vec<[String; 4]> {
    let mut rows = Vec::with_capacity(report.trips().len() + 2);
    rows.push(CSV_HEADERS.map(str::to_owned));
    rows.extend(report.trips().iter().map(|trip| {
        [
            trip.formatted_date(),
            trip.destination.clone(),
            trip.description.clone(),
            trip.distance_km.to_string(),
        ]
    }));
    rows.push([
        TOTAL_LABEL.to_owned(),
        report.trip_count_label(),
        report.period_label(),
        report.total_km().to_string(),
    ]);
    rows
}

fn csv_bytes(report: &TripReport) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in report_rows(report) {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

/// Write the trips as CSV with a trailing total row.
pub fn write_csv(path: &Utf8Path, report: &TripReport) -> Result<(), ExportError> {
    let bytes = csv_bytes(report).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tripsheet_fs::write_file(path, &bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {} trips to {path}", report.trips().len());
    Ok(())
}

/// Column widths fitting the longest cell of each column plus padding,
/// capped at [`XLSX_MAX_COLUMN_WIDTH`].
fn column_widths(rows: &[[String; 4]]) -> [u16; 4] {
    let mut widths = [0_u16; 4];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            let chars = u16::try_from(cell.chars().count()).unwrap_or(u16::MAX);
            *width = (*width).max(chars);
        }
    }
    widths.map(|width| {
        width
            .saturating_add(XLSX_COLUMN_PADDING)
            .min(XLSX_MAX_COLUMN_WIDTH)
    })
}

fn xlsx_bytes(report: &TripReport) -> Result<Vec<u8>, XlsxError> {
    let rows = report_rows(report);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name(XLSX_SHEET_NAME)?;
    for (row_num, row) in (0_u32..).zip(&rows) {
        let [date, destination, description, distance] = row;
        sheet.write_string(row_num, 0, date)?;
        sheet.write_string(row_num, 1, destination)?;
        sheet.write_string(row_num, 2, description)?;
        // Distances go in as numbers so the sheet can sum them.
        match distance.parse::<u32>() {
            Ok(km) => sheet.write_number(row_num, 3, km)?,
            Err(_) => sheet.write_string(row_num, 3, distance)?,
        };
    }
    for (col, width) in (0_u16..).zip(column_widths(&rows)) {
        sheet.set_column_width(col, width)?;
    }
    workbook.save_to_buffer()
}

/// Write the trips as an Excel workbook with a single `Reisverslag` sheet.
pub fn write_xlsx(path: &Utf8Path, report: &TripReport) -> Result<(), ExportError> {
    let bytes = xlsx_bytes(report).map_err(|source| ExportError::Xlsx {
        path: path.to_path_buf(),
        source,
    })?;
    tripsheet_fs::write_file(path, &bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote Excel report to {path}");
    Ok(())
}

/// Write the trips as a pretty-printed JSON array.
pub fn write_json(path: &Utf8Path, report: &TripReport) -> Result<(), ExportError> {
    let trips: Vec<JsonTrip<'_>> = report.trips().iter().map(JsonTrip::from).collect();
    let payload = serde_json::to_string_pretty(&trips).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tripsheet_fs::write_file(path, payload.as_bytes()).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote JSON report to {path}");
    Ok(())
}

/// Files written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// The CSV report, always written.
    pub csv: Utf8PathBuf,
    /// The JSON copy, when requested.
    pub json: Option<Utf8PathBuf>,
    /// The Excel workbook, when requested.
    pub xlsx: Option<Utf8PathBuf>,
}

impl ReportPaths {
    /// `csv`, with the optional siblings sharing its stem.
    #[must_use]
    pub fn beside(csv: Utf8PathBuf, json: bool, xlsx: bool) -> Self {
        Self {
            json: json.then(|| csv.with_extension("json")),
            xlsx: xlsx.then(|| csv.with_extension("xlsx")),
            csv,
        }
    }
}

/// Print a short human-readable account of the run.
pub fn write_summary(
    writer: &mut dyn Write,
    report: &TripReport,
    paths: &ReportPaths,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "Reisverslag {} vanuit {} ({} afstanden)",
        report.period_label(),
        report.origin(),
        report.source()
    )?;
    writeln!(writer, "{} gegenereerd", report.trip_count_label())?;
    for (index, trip) in report.trips().iter().take(SUMMARY_PREVIEW).enumerate() {
        writeln!(
            writer,
            "  {}. {} - {} ({}km)",
            index + 1,
            trip.formatted_date(),
            trip.destination,
            trip.distance_km
        )?;
    }
    let remaining = report.trips().len().saturating_sub(SUMMARY_PREVIEW);
    if remaining > 0 {
        writeln!(writer, "  ... en nog {remaining} ritten")?;
    }
    writeln!(
        writer,
        "Totale kilometers: {}km (doel: {}km)",
        report.total_km(),
        report.target_km()
    )?;
    writeln!(writer, "Gestopt: {}", report.stop_reason())?;
    writeln!(writer, "CSV: {}", paths.csv)?;
    if let Some(path) = &paths.json {
        writeln!(writer, "JSON: {path}")?;
    }
    if let Some(path) = &paths.xlsx {
        writeln!(writer, "Excel: {path}")?;
    }
    Ok(())
}
