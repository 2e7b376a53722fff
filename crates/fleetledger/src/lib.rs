//! `fleetledger` - Profit tracking for a small commercial vehicle fleet
//!
//! This library stores vehicles, drivers, trips and maintenance records in
//! SQLite and turns them into per-vehicle and fleet-wide profit reports,
//! ranked dashboards and CSV exports.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod profit;
pub mod storage;
pub mod validate;

pub use analytics::Dashboard;
pub use config::Config;
pub use error::{Error, Result};
pub use export::ExportKind;
pub use logging::init_logging;
pub use model::{Driver, OperationalCost, Trip, Vehicle};
pub use profit::{aggregate, FleetTotals, ProfitReport, VehicleProfit};
pub use storage::{FleetSnapshot, Storage, StorageStats};
