//! CSV export of profit reports and trip logs.
//!
//! Writers are generic over [`std::io::Write`]. Amounts are written with two
//! decimals. An empty collection still produces the header row.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::Dashboard;
use crate::error::{Error, Result};
use crate::model::Trip;
use crate::profit::ProfitReport;
use crate::storage::{FleetSnapshot, DATE_FORMAT};

/// Header row of the profit report export.
pub const PROFIT_HEADERS: [&str; 7] = [
    "Vehicle",
    "Trips",
    "Total Hire",
    "Fixed Cost",
    "Variable Cost",
    "Maintenance",
    "Profit",
];

/// Header row of the trip log export.
pub const TRIP_HEADERS: [&str; 14] = [
    "Date",
    "Vehicle",
    "Driver",
    "From",
    "To",
    "Fuel Liters",
    "Fuel",
    "Bata",
    "Toll",
    "RTO",
    "Misc",
    "Hire",
    "Trip Expense",
    "Trip Balance",
];

/// What to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// One row per vehicle plus a total row.
    #[default]
    Profit,
    /// One row per trip.
    Trips,
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profit => write!(f, "profit"),
            Self::Trips => write!(f, "trips"),
        }
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Default export file name, e.g. `fleet_profit_2024-03-01.csv`.
#[must_use]
pub fn default_file_name(prefix: &str, kind: ExportKind, date: NaiveDate) -> String {
    format!("{}_{}_{}.csv", prefix.trim(), kind, date.format(DATE_FORMAT))
}

/// Write a profit report as CSV.
///
/// Returns the number of vehicle rows written (the total row not included).
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_profit_csv<W: Write>(report: &ProfitReport, writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(PROFIT_HEADERS)?;

    for row in &report.vehicles {
        csv.write_record([
            row.vehicle_number.clone(),
            row.trip_count.to_string(),
            money(row.total_hire),
            money(row.fixed_cost),
            money(row.variable_cost),
            money(row.maintenance_cost),
            money(row.profit),
        ])?;
    }

    let totals = &report.totals;
    let trip_count: usize = report.vehicles.iter().map(|r| r.trip_count).sum();
    csv.write_record([
        "TOTAL".to_string(),
        trip_count.to_string(),
        money(totals.total_hire),
        money(totals.total_fixed_cost),
        money(totals.total_variable_cost),
        money(totals.total_maintenance_cost),
        money(totals.total_profit),
    ])?;

    csv.flush()?;
    Ok(report.vehicles.len())
}

/// Write a trip log as CSV.
///
/// Returns the number of trip rows written.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_trips_csv<W: Write>(trips: &[Trip], writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(TRIP_HEADERS)?;

    for trip in trips {
        csv.write_record([
            trip.date.format(DATE_FORMAT).to_string(),
            trip.vehicle_number.clone(),
            trip.driver_name.clone(),
            trip.from_location.clone(),
            trip.to_location.clone(),
            money(trip.fuel_liters()),
            money(trip.fuel()),
            money(trip.bata()),
            money(trip.toll()),
            money(trip.rto()),
            money(trip.misc()),
            money(trip.hire()),
            money(trip.expense()),
            money(trip.balance()),
        ])?;
    }

    csv.flush()?;
    Ok(trips.len())
}

/// Write a profit report and its dashboard as pretty-printed JSON.
///
/// The document has `vehicles`, `totals` and `dashboard` keys.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails, or an I/O error if the
/// trailing newline cannot be written.
pub fn write_report_json<W: Write>(
    report: &ProfitReport,
    dashboard: &Dashboard<'_>,
    mut writer: W,
) -> Result<()> {
    #[derive(Serialize)]
    struct Document<'a> {
        vehicles: &'a [crate::profit::VehicleProfit],
        totals: &'a crate::profit::FleetTotals,
        dashboard: &'a Dashboard<'a>,
    }

    let document = Document {
        vehicles: &report.vehicles,
        totals: &report.totals,
        dashboard,
    };
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writeln!(writer)?;
    Ok(())
}

/// Export a snapshot to a CSV file, creating parent directories as needed.
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or writing fails.
pub fn export_to_path(snapshot: &FleetSnapshot, kind: ExportKind, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let file = File::create(path)?;
    let rows = match kind {
        ExportKind::Profit => write_profit_csv(&snapshot.profit_report(), file)?,
        ExportKind::Trips => write_trips_csv(&snapshot.trips, file)?,
    };

    info!("Exported {} {} row(s) to {}", rows, kind, path.display());
    Ok(rows)
}
