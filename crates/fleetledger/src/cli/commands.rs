//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands and the small
//! value parsers they share.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::model::{Driver, OperationalCost, Trip, Vehicle};
use crate::storage::DATE_FORMAT;

/// Parse a non-negative decimal amount.
fn parse_amount(value: &str) -> Result<f64, String> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !amount.is_finite() {
        return Err(format!("`{value}` is not a finite number"));
    }
    if amount < 0.0 {
        return Err(format!("`{value}` must not be negative"));
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` date.
fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("`{value}` is not a date in YYYY-MM-DD form"))
}

/// Parse a list length greater than zero.
fn parse_top_n(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("`{value}` is not a positive integer")),
    }
}

/// Trimmed optional text; blank input clears the field.
fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Arguments shared by every `list` subcommand.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments shared by every `show` subcommand.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Record ID
    pub id: i64,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Arguments shared by every `delete` subcommand.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Record ID
    pub id: i64,
}

// === Vehicles ===

/// Vehicle commands.
#[derive(Debug, Subcommand)]
pub enum VehicleCommand {
    /// Register a vehicle
    Add(VehicleAddArgs),
    /// List vehicles, newest first
    List(ListArgs),
    /// Show one vehicle
    Show(ShowArgs),
    /// Change some fields of a vehicle
    Edit(VehicleEditArgs),
    /// Delete a vehicle that has no trips or maintenance records
    Delete(DeleteArgs),
}

/// Fixed monthly costs of a vehicle.
#[derive(Debug, Default, Args)]
pub struct VehicleCosts {
    /// Monthly loan instalment
    #[arg(long, value_parser = parse_amount)]
    pub emi: Option<f64>,

    /// Insurance
    #[arg(long, value_parser = parse_amount)]
    pub insurance: Option<f64>,

    /// Road tax
    #[arg(long, value_parser = parse_amount)]
    pub tax: Option<f64>,

    /// Pollution certificate
    #[arg(long, value_parser = parse_amount)]
    pub pucc: Option<f64>,

    /// Permit
    #[arg(long, value_parser = parse_amount)]
    pub permit: Option<f64>,
}

impl VehicleCosts {
    /// Copy the provided amounts onto `vehicle`, leaving the rest untouched.
    pub fn apply(&self, vehicle: &mut Vehicle) {
        if self.emi.is_some() {
            vehicle.emi = self.emi;
        }
        if self.insurance.is_some() {
            vehicle.insurance = self.insurance;
        }
        if self.tax.is_some() {
            vehicle.tax = self.tax;
        }
        if self.pucc.is_some() {
            vehicle.pucc = self.pucc;
        }
        if self.permit.is_some() {
            vehicle.permit = self.permit;
        }
    }
}

/// `vehicle add` arguments.
#[derive(Debug, Args)]
pub struct VehicleAddArgs {
    /// Registration number
    pub number: String,

    #[command(flatten)]
    pub costs: VehicleCosts,
}

impl VehicleAddArgs {
    /// Build the vehicle record to insert.
    #[must_use]
    pub fn to_vehicle(&self) -> Vehicle {
        let mut vehicle = Vehicle::new(self.number.trim());
        self.costs.apply(&mut vehicle);
        vehicle
    }
}

/// `vehicle edit` arguments.
#[derive(Debug, Args)]
pub struct VehicleEditArgs {
    /// Vehicle ID
    pub id: i64,

    /// New registration number
    #[arg(long)]
    pub number: Option<String>,

    #[command(flatten)]
    pub costs: VehicleCosts,
}

impl VehicleEditArgs {
    /// Apply the provided fields to `vehicle`.
    pub fn apply(&self, vehicle: &mut Vehicle) {
        if let Some(number) = &self.number {
            vehicle.vehicle_number = number.trim().to_string();
        }
        self.costs.apply(vehicle);
    }
}

// === Drivers ===

/// Driver commands.
#[derive(Debug, Subcommand)]
pub enum DriverCommand {
    /// Register a driver
    Add(DriverAddArgs),
    /// List drivers, newest first
    List(ListArgs),
    /// Show one driver
    Show(ShowArgs),
    /// Change some fields of a driver
    Edit(DriverEditArgs),
    /// Delete a driver that has no trips
    Delete(DeleteArgs),
}

/// `driver add` arguments.
#[derive(Debug, Args)]
pub struct DriverAddArgs {
    /// Full name
    pub name: String,

    /// Driving license number
    #[arg(long)]
    pub license: Option<String>,

    /// Contact phone number
    #[arg(long)]
    pub contact: Option<String>,
}

impl DriverAddArgs {
    /// Build the driver record to insert.
    #[must_use]
    pub fn to_driver(&self) -> Driver {
        Driver {
            license_no: self.license.as_deref().and_then(optional_text),
            contact_no: self.contact.as_deref().and_then(optional_text),
            ..Driver::new(self.name.trim())
        }
    }
}

/// `driver edit` arguments.
#[derive(Debug, Args)]
pub struct DriverEditArgs {
    /// Driver ID
    pub id: i64,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New license number (an empty value clears it)
    #[arg(long)]
    pub license: Option<String>,

    /// New contact number (an empty value clears it)
    #[arg(long)]
    pub contact: Option<String>,
}

impl DriverEditArgs {
    /// Apply the provided fields to `driver`.
    pub fn apply(&self, driver: &mut Driver) {
        if let Some(name) = &self.name {
            driver.name = name.trim().to_string();
        }
        if let Some(license) = &self.license {
            driver.license_no = optional_text(license);
        }
        if let Some(contact) = &self.contact {
            driver.contact_no = optional_text(contact);
        }
    }
}

// === Trips ===

/// Trip commands.
#[derive(Debug, Subcommand)]
pub enum TripCommand {
    /// Log a trip
    Add(TripAddArgs),
    /// List trips, newest first
    List(TripListArgs),
    /// Show one trip
    Show(ShowArgs),
    /// Change some fields of a trip
    Edit(TripEditArgs),
    /// Delete a trip
    Delete(DeleteArgs),
}

/// Money recorded against a trip.
#[derive(Debug, Default, Args)]
pub struct TripAmounts {
    /// Fuel filled, in liters
    #[arg(long, value_parser = parse_amount)]
    pub fuel_liters: Option<f64>,

    /// Fuel cost
    #[arg(long, value_parser = parse_amount)]
    pub fuel: Option<f64>,

    /// Driver allowance
    #[arg(long, value_parser = parse_amount)]
    pub bata: Option<f64>,

    /// Toll charges
    #[arg(long, value_parser = parse_amount)]
    pub toll: Option<f64>,

    /// RTO charges
    #[arg(long, value_parser = parse_amount)]
    pub rto: Option<f64>,

    /// Other expenses
    #[arg(long, value_parser = parse_amount)]
    pub misc: Option<f64>,

    /// Hire charge earned
    #[arg(long, value_parser = parse_amount)]
    pub hire: Option<f64>,
}

impl TripAmounts {
    /// Copy the provided amounts onto `trip`, leaving the rest untouched.
    pub fn apply(&self, trip: &mut Trip) {
        let fields = [
            (&mut trip.fuel_liters, self.fuel_liters),
            (&mut trip.fuel, self.fuel),
            (&mut trip.bata, self.bata),
            (&mut trip.toll, self.toll),
            (&mut trip.rto, self.rto),
            (&mut trip.misc, self.misc),
            (&mut trip.hire, self.hire),
        ];
        for (slot, value) in fields {
            if value.is_some() {
                *slot = value;
            }
        }
    }
}

/// `trip add` arguments.
#[derive(Debug, Args)]
pub struct TripAddArgs {
    /// Vehicle ID
    #[arg(long)]
    pub vehicle: i64,

    /// Driver ID
    #[arg(long)]
    pub driver: i64,

    /// Trip date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Starting point
    #[arg(long)]
    pub from: String,

    /// Destination
    #[arg(long)]
    pub to: String,

    #[command(flatten)]
    pub amounts: TripAmounts,
}

impl TripAddArgs {
    /// Build the trip record to insert, dated `today` when no date was given.
    #[must_use]
    pub fn to_trip(&self, today: NaiveDate) -> Trip {
        let mut trip = Trip::new(
            self.vehicle,
            self.driver,
            self.date.unwrap_or(today),
            self.from.trim(),
            self.to.trim(),
        );
        self.amounts.apply(&mut trip);
        trip
    }
}

/// `trip list` arguments.
#[derive(Debug, Args)]
pub struct TripListArgs {
    /// Only trips run by this vehicle
    #[arg(long)]
    pub vehicle: Option<i64>,

    #[command(flatten)]
    pub list: ListArgs,
}

/// `trip edit` arguments.
#[derive(Debug, Args)]
pub struct TripEditArgs {
    /// Trip ID
    pub id: i64,

    /// New vehicle ID
    #[arg(long)]
    pub vehicle: Option<i64>,

    /// New driver ID
    #[arg(long)]
    pub driver: Option<i64>,

    /// New date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// New starting point
    #[arg(long)]
    pub from: Option<String>,

    /// New destination
    #[arg(long)]
    pub to: Option<String>,

    #[command(flatten)]
    pub amounts: TripAmounts,
}

impl TripEditArgs {
    /// Apply the provided fields to `trip`.
    pub fn apply(&self, trip: &mut Trip) {
        if let Some(vehicle) = self.vehicle {
            trip.vehicle_id = vehicle;
        }
        if let Some(driver) = self.driver {
            trip.driver_id = driver;
        }
        if let Some(date) = self.date {
            trip.date = date;
        }
        if let Some(from) = &self.from {
            trip.from_location = from.trim().to_string();
        }
        if let Some(to) = &self.to {
            trip.to_location = to.trim().to_string();
        }
        self.amounts.apply(trip);
    }
}

// === Maintenance ===

/// Maintenance charge commands.
#[derive(Debug, Subcommand)]
pub enum CostCommand {
    /// Record a maintenance charge
    Add(CostAddArgs),
    /// List maintenance charges, newest first
    List(ListArgs),
    /// Show one maintenance charge
    Show(ShowArgs),
    /// Change some fields of a maintenance charge
    Edit(CostEditArgs),
    /// Delete a maintenance charge
    Delete(DeleteArgs),
}

/// `cost add` arguments.
#[derive(Debug, Args)]
pub struct CostAddArgs {
    /// Vehicle ID
    #[arg(long)]
    pub vehicle: i64,

    /// Amount charged
    #[arg(long, value_parser = parse_amount)]
    pub charge: f64,

    /// Free-form description of the work
    #[arg(long)]
    pub notes: Option<String>,
}

impl CostAddArgs {
    /// Build the maintenance record to insert.
    #[must_use]
    pub fn to_cost(&self) -> OperationalCost {
        OperationalCost {
            notes: self.notes.as_deref().and_then(optional_text),
            ..OperationalCost::new(self.vehicle, self.charge)
        }
    }
}

/// `cost edit` arguments.
#[derive(Debug, Args)]
pub struct CostEditArgs {
    /// Maintenance record ID
    pub id: i64,

    /// New vehicle ID
    #[arg(long)]
    pub vehicle: Option<i64>,

    /// New amount
    #[arg(long, value_parser = parse_amount)]
    pub charge: Option<f64>,

    /// New notes (an empty value clears them)
    #[arg(long)]
    pub notes: Option<String>,
}

impl CostEditArgs {
    /// Apply the provided fields to `cost`.
    pub fn apply(&self, cost: &mut OperationalCost) {
        if let Some(vehicle) = self.vehicle {
            cost.vehicle_id = vehicle;
        }
        if self.charge.is_some() {
            cost.maintenance_charge = self.charge;
        }
        if let Some(notes) = &self.notes {
            cost.notes = optional_text(notes);
        }
    }
}

// === Reporting ===

/// Report command arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Length of each ranked list (defaults to `report.top_n`)
    #[arg(short = 'n', long, value_parser = parse_top_n)]
    pub top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// What to export
    #[arg(short, long, value_enum, default_value = "profit")]
    pub kind: ExportKindArg,

    /// Output file (defaults to `<prefix>_<kind>_<date>.csv` in the export directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Export kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKindArg {
    /// Per-vehicle profit with a total row
    Profit,
    /// Trip log
    Trips,
}

impl From<ExportKindArg> for crate::export::ExportKind {
    fn from(arg: ExportKindArg) -> Self {
        match arg {
            ExportKindArg::Profit => Self::Profit,
            ExportKindArg::Trips => Self::Trips,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
