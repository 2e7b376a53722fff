//! `fleet` - CLI for fleetledger
//!
//! This binary records vehicles, drivers, trips and maintenance charges and
//! prints profit reports and CSV exports built from them.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::debug;

use fleetledger::analytics::Dashboard;
use fleetledger::cli::{
    Cli, Command, ConfigCommand, CostCommand, DriverCommand, ExportCommand, OutputFormat,
    ReportCommand, TripCommand, VehicleCommand,
};
use fleetledger::export::{default_file_name, export_to_path, write_report_json, ExportKind};
use fleetledger::storage::DATE_FORMAT;
use fleetledger::{
    init_logging, Config, Driver, Error, OperationalCost, ProfitReport, Storage, Trip, Vehicle,
    VehicleProfit,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let open = || Session::open(cli.config.clone(), cli.database.clone());

    // Execute the command
    match cli.command {
        Command::Vehicle(cmd) => handle_vehicle(&open()?, cmd),
        Command::Driver(cmd) => handle_driver(&open()?, cmd),
        Command::Trip(cmd) => handle_trip(&open()?, cmd),
        Command::Cost(cmd) => handle_cost(&open()?, cmd),
        Command::Report(cmd) => handle_report(&open()?, &cmd),
        Command::Export(cmd) => handle_export(&open()?, &cmd),
        Command::Status(cmd) => handle_status(&open()?, cmd.json),
        // Config commands must work even when the configuration is broken
        Command::Config(cmd) => handle_config(cli.config.clone(), cmd),
    }
}

/// Loaded configuration and the database it points at.
#[derive(Debug)]
struct Session {
    config: Config,
    storage: Storage,
}

impl Session {
    fn open(config_path: Option<PathBuf>, database: Option<PathBuf>) -> Result<Self> {
        let config = Config::load_from(config_path).context("failed to load configuration")?;
        let db_path = database.unwrap_or_else(|| config.database_path());
        debug!("Using database {}", db_path.display());
        let storage = Storage::open(&db_path)
            .with_context(|| format!("failed to open database {}", db_path.display()))?;
        Ok(Self { config, storage })
    }

    fn money(&self) -> Money<'_> {
        Money::new(&self.config.report.currency_symbol)
    }
}

/// Formats amounts with the configured currency symbol.
#[derive(Debug)]
struct Money<'a> {
    symbol: &'a str,
}

impl<'a> Money<'a> {
    fn new(symbol: &'a str) -> Self {
        Self { symbol }
    }

    fn format(&self, value: f64) -> String {
        if value < 0.0 {
            format!("-{}{:.2}", self.symbol, -value)
        } else {
            format!("{}{:.2}", self.symbol, value)
        }
    }
}

fn display_id(id: Option<i64>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn ensure_updated(updated: bool, entity: &'static str, id: i64) -> Result<()> {
    if updated {
        println!("Updated {entity} {id}.");
        Ok(())
    } else {
        Err(Error::not_found(entity, id).into())
    }
}

fn ensure_deleted(deleted: bool, entity: &'static str, id: i64) -> Result<()> {
    if deleted {
        println!("Deleted {entity} {id}.");
        Ok(())
    } else {
        Err(Error::not_found(entity, id).into())
    }
}

// === Vehicles ===

fn handle_vehicle(session: &Session, cmd: VehicleCommand) -> Result<()> {
    let storage = &session.storage;
    let fmt = &session.money();
    match cmd {
        VehicleCommand::Add(args) => {
            let vehicle = args.to_vehicle();
            let id = storage.insert_vehicle(&vehicle)?;
            println!("Added vehicle {id} ({}).", vehicle.vehicle_number);
        }
        VehicleCommand::List(args) => {
            let vehicles = storage.list_vehicles()?;
            print_vehicles(&vehicles, fmt, args.format)?;
        }
        VehicleCommand::Show(args) => {
            let vehicle = storage
                .get_vehicle(args.id)?
                .ok_or_else(|| Error::not_found("vehicle", args.id))?;
            if args.json {
                print_json(&vehicle)?;
            } else {
                println!("Vehicle {}", display_id(vehicle.id));
                println!("  Number:     {}", vehicle.vehicle_number);
                println!("  EMI:        {}", fmt.format(vehicle.emi()));
                println!("  Insurance:  {}", fmt.format(vehicle.insurance()));
                println!("  Tax:        {}", fmt.format(vehicle.tax()));
                println!("  PUCC:       {}", fmt.format(vehicle.pucc()));
                println!("  Permit:     {}", fmt.format(vehicle.permit()));
                println!("  Fixed cost: {}", fmt.format(vehicle.fixed_cost()));
                println!("  Added:      {}", vehicle.created_at.to_rfc3339());
            }
        }
        VehicleCommand::Edit(args) => {
            let mut vehicle = storage
                .get_vehicle(args.id)?
                .ok_or_else(|| Error::not_found("vehicle", args.id))?;
            args.apply(&mut vehicle);
            ensure_updated(storage.update_vehicle(args.id, &vehicle)?, "vehicle", args.id)?;
        }
        VehicleCommand::Delete(args) => {
            ensure_deleted(storage.delete_vehicle(args.id)?, "vehicle", args.id)?;
        }
    }
    Ok(())
}

fn print_vehicles(vehicles: &[Vehicle], fmt: &Money<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(vehicles)?,
        _ if vehicles.is_empty() => println!("No vehicles recorded."),
        OutputFormat::Table => {
            println!(
                "{:>5}  {:<14} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                "ID", "NUMBER", "EMI", "INSURANCE", "TAX", "PUCC", "PERMIT", "FIXED"
            );
            for v in vehicles {
                println!(
                    "{:>5}  {:<14} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                    display_id(v.id),
                    v.vehicle_number,
                    fmt.format(v.emi()),
                    fmt.format(v.insurance()),
                    fmt.format(v.tax()),
                    fmt.format(v.pucc()),
                    fmt.format(v.permit()),
                    fmt.format(v.fixed_cost()),
                );
            }
        }
        OutputFormat::Plain => {
            for v in vehicles {
                println!(
                    "{}  {}  fixed {}",
                    display_id(v.id),
                    v.vehicle_number,
                    fmt.format(v.fixed_cost())
                );
            }
        }
    }
    Ok(())
}

// === Drivers ===

fn handle_driver(session: &Session, cmd: DriverCommand) -> Result<()> {
    let storage = &session.storage;
    match cmd {
        DriverCommand::Add(args) => {
            let driver = args.to_driver();
            let id = storage.insert_driver(&driver)?;
            println!("Added driver {id} ({}).", driver.name);
        }
        DriverCommand::List(args) => {
            let drivers = storage.list_drivers()?;
            print_drivers(&drivers, args.format)?;
        }
        DriverCommand::Show(args) => {
            let driver = storage
                .get_driver(args.id)?
                .ok_or_else(|| Error::not_found("driver", args.id))?;
            if args.json {
                print_json(&driver)?;
            } else {
                println!("Driver {}", display_id(driver.id));
                println!("  Name:     {}", driver.name);
                println!("  License:  {}", driver.license_no.as_deref().unwrap_or("-"));
                println!("  Contact:  {}", driver.contact_no.as_deref().unwrap_or("-"));
                println!("  Added:    {}", driver.created_at.to_rfc3339());
            }
        }
        DriverCommand::Edit(args) => {
            let mut driver = storage
                .get_driver(args.id)?
                .ok_or_else(|| Error::not_found("driver", args.id))?;
            args.apply(&mut driver);
            ensure_updated(storage.update_driver(args.id, &driver)?, "driver", args.id)?;
        }
        DriverCommand::Delete(args) => {
            ensure_deleted(storage.delete_driver(args.id)?, "driver", args.id)?;
        }
    }
    Ok(())
}

fn print_drivers(drivers: &[Driver], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(drivers)?,
        _ if drivers.is_empty() => println!("No drivers recorded."),
        OutputFormat::Table => {
            println!("{:>5}  {:<24} {:<18} {:<14}", "ID", "NAME", "LICENSE", "CONTACT");
            for d in drivers {
                println!(
                    "{:>5}  {:<24} {:<18} {:<14}",
                    display_id(d.id),
                    d.name,
                    d.license_no.as_deref().unwrap_or("-"),
                    d.contact_no.as_deref().unwrap_or("-"),
                );
            }
        }
        OutputFormat::Plain => {
            for d in drivers {
                println!("{}  {}", display_id(d.id), d.name);
            }
        }
    }
    Ok(())
}

// === Trips ===

fn handle_trip(session: &Session, cmd: TripCommand) -> Result<()> {
    let storage = &session.storage;
    let fmt = &session.money();
    match cmd {
        TripCommand::Add(args) => {
            let trip = args.to_trip(Local::now().date_naive());
            let id = storage.insert_trip(&trip)?;
            println!(
                "Added trip {id} ({} -> {} on {}).",
                trip.from_location,
                trip.to_location,
                trip.date.format(DATE_FORMAT)
            );
        }
        TripCommand::List(args) => {
            let trips = match args.vehicle {
                Some(vehicle_id) => storage.list_trips_for_vehicle(vehicle_id)?,
                None => storage.list_trips()?,
            };
            print_trips(&trips, fmt, args.list.format)?;
        }
        TripCommand::Show(args) => {
            let trip = storage
                .get_trip(args.id)?
                .ok_or_else(|| Error::not_found("trip", args.id))?;
            if args.json {
                print_json(&trip)?;
            } else {
                println!("Trip {}", display_id(trip.id));
                println!("  Date:        {}", trip.date.format(DATE_FORMAT));
                println!("  Vehicle:     {} (id {})", trip.vehicle_number, trip.vehicle_id);
                println!("  Driver:      {} (id {})", trip.driver_name, trip.driver_id);
                println!("  Route:       {} -> {}", trip.from_location, trip.to_location);
                println!("  Fuel:        {} ({:.2} L)", fmt.format(trip.fuel()), trip.fuel_liters());
                println!("  Bata:        {}", fmt.format(trip.bata()));
                println!("  Toll:        {}", fmt.format(trip.toll()));
                println!("  RTO:         {}", fmt.format(trip.rto()));
                println!("  Misc:        {}", fmt.format(trip.misc()));
                println!("  Hire:        {}", fmt.format(trip.hire()));
                println!("  Expense:     {}", fmt.format(trip.expense()));
                println!("  Balance:     {}", fmt.format(trip.balance()));
            }
        }
        TripCommand::Edit(args) => {
            let mut trip = storage
                .get_trip(args.id)?
                .ok_or_else(|| Error::not_found("trip", args.id))?;
            args.apply(&mut trip);
            ensure_updated(storage.update_trip(args.id, &trip)?, "trip", args.id)?;
        }
        TripCommand::Delete(args) => {
            ensure_deleted(storage.delete_trip(args.id)?, "trip", args.id)?;
        }
    }
    Ok(())
}

fn print_trips(trips: &[Trip], fmt: &Money<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(trips)?,
        _ if trips.is_empty() => println!("No trips recorded."),
        OutputFormat::Table => {
            println!(
                "{:>5}  {:<10} {:<14} {:<18} {:<28} {:>12} {:>12} {:>12}",
                "ID", "DATE", "VEHICLE", "DRIVER", "ROUTE", "HIRE", "EXPENSE", "BALANCE"
            );
            for t in trips {
                println!(
                    "{:>5}  {:<10} {:<14} {:<18} {:<28} {:>12} {:>12} {:>12}",
                    display_id(t.id),
                    t.date.format(DATE_FORMAT).to_string(),
                    t.vehicle_number,
                    t.driver_name,
                    format!("{} -> {}", t.from_location, t.to_location),
                    fmt.format(t.hire()),
                    fmt.format(t.expense()),
                    fmt.format(t.balance()),
                );
            }
        }
        OutputFormat::Plain => {
            for t in trips {
                println!(
                    "{}  {}  {}  {} -> {}  balance {}",
                    display_id(t.id),
                    t.date.format(DATE_FORMAT),
                    t.vehicle_number,
                    t.from_location,
                    t.to_location,
                    fmt.format(t.balance())
                );
            }
        }
    }
    Ok(())
}

// === Maintenance ===

fn handle_cost(session: &Session, cmd: CostCommand) -> Result<()> {
    let storage = &session.storage;
    let fmt = &session.money();
    match cmd {
        CostCommand::Add(args) => {
            let cost = args.to_cost();
            let id = storage.insert_cost(&cost)?;
            println!(
                "Added maintenance charge {id} ({} for vehicle {}).",
                fmt.format(cost.maintenance_charge()),
                cost.vehicle_id
            );
        }
        CostCommand::List(args) => {
            let costs = storage.list_costs()?;
            print_costs(&costs, fmt, args.format)?;
        }
        CostCommand::Show(args) => {
            let cost = storage
                .get_cost(args.id)?
                .ok_or_else(|| Error::not_found("maintenance charge", args.id))?;
            if args.json {
                print_json(&cost)?;
            } else {
                println!("Maintenance charge {}", display_id(cost.id));
                println!("  Vehicle:  {}", cost.vehicle_id);
                println!("  Charge:   {}", fmt.format(cost.maintenance_charge()));
                println!("  Notes:    {}", cost.notes.as_deref().unwrap_or("-"));
                println!("  Added:    {}", cost.created_at.to_rfc3339());
            }
        }
        CostCommand::Edit(args) => {
            let mut cost = storage
                .get_cost(args.id)?
                .ok_or_else(|| Error::not_found("maintenance charge", args.id))?;
            args.apply(&mut cost);
            ensure_updated(
                storage.update_cost(args.id, &cost)?,
                "maintenance charge",
                args.id,
            )?;
        }
        CostCommand::Delete(args) => {
            ensure_deleted(
                storage.delete_cost(args.id)?,
                "maintenance charge",
                args.id,
            )?;
        }
    }
    Ok(())
}

fn print_costs(costs: &[OperationalCost], fmt: &Money<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(costs)?,
        _ if costs.is_empty() => println!("No maintenance charges recorded."),
        OutputFormat::Table => {
            println!("{:>5}  {:>8} {:>12}  {:<30}", "ID", "VEHICLE", "CHARGE", "NOTES");
            for c in costs {
                println!(
                    "{:>5}  {:>8} {:>12}  {:<30}",
                    display_id(c.id),
                    c.vehicle_id,
                    fmt.format(c.maintenance_charge()),
                    c.notes.as_deref().unwrap_or("-"),
                );
            }
        }
        OutputFormat::Plain => {
            for c in costs {
                println!(
                    "{}  vehicle {}  {}",
                    display_id(c.id),
                    c.vehicle_id,
                    fmt.format(c.maintenance_charge())
                );
            }
        }
    }
    Ok(())
}

// === Reporting ===

fn handle_report(session: &Session, cmd: &ReportCommand) -> Result<()> {
    let fmt = &session.money();
    let top_n = cmd.top.unwrap_or(session.config.report.top_n);
    let snapshot = session.storage.snapshot()?;
    let report = snapshot.profit_report();
    let dashboard = Dashboard::build(&report, &snapshot.trips, top_n);

    match cmd.format {
        OutputFormat::Json => write_report_json(&report, &dashboard, std::io::stdout().lock())?,
        _ if report.is_empty() => println!("No vehicles recorded."),
        OutputFormat::Table => {
            print_profit_table(&report, fmt);
            println!();
            print_dashboard(&dashboard, fmt);
        }
        OutputFormat::Plain => {
            for row in &report.vehicles {
                println!(
                    "{}: profit {} over {} trip(s)",
                    row.vehicle_number,
                    fmt.format(row.profit),
                    row.trip_count
                );
            }
            let totals = &report.totals;
            println!(
                "Fleet: profit {} ({} profitable, {} losing)",
                fmt.format(totals.total_profit),
                totals.profitable_count,
                totals.losing_count
            );
        }
    }
    Ok(())
}

fn print_profit_table(report: &ProfitReport, fmt: &Money<'_>) {
    println!(
        "{:<14} {:>6} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "VEHICLE", "TRIPS", "HIRE", "FIXED", "VARIABLE", "MAINTENANCE", "PROFIT"
    );
    for row in &report.vehicles {
        println!(
            "{:<14} {:>6} {:>14} {:>14} {:>14} {:>14} {:>14}",
            row.vehicle_number,
            row.trip_count,
            fmt.format(row.total_hire),
            fmt.format(row.fixed_cost),
            fmt.format(row.variable_cost),
            fmt.format(row.maintenance_cost),
            fmt.format(row.profit),
        );
    }

    let totals = &report.totals;
    println!();
    println!("Fleet totals ({} vehicles)", totals.vehicle_count);
    println!("  Hire:         {}", fmt.format(totals.total_hire));
    println!("  Fixed cost:   {}", fmt.format(totals.total_fixed_cost));
    println!("  Variable:     {}", fmt.format(totals.total_variable_cost));
    println!("  Maintenance:  {}", fmt.format(totals.total_maintenance_cost));
    println!("  Profit:       {}", fmt.format(totals.total_profit));
    println!("  Profitable:   {}", totals.profitable_count);
    println!("  Losing:       {}", totals.losing_count);
}

fn print_dashboard(dashboard: &Dashboard<'_>, fmt: &Money<'_>) {
    let sections: [(&str, &[&VehicleProfit], fn(&VehicleProfit) -> f64); 4] = [
        ("Loss leaders", &dashboard.loss_leaders, |r| r.profit),
        ("Least profitable", &dashboard.least_profitable, |r| r.profit),
        ("Highest maintenance", &dashboard.highest_maintenance, |r| {
            r.maintenance_cost
        }),
        ("Highest fuel", &dashboard.highest_fuel, |r| r.fuel_cost),
    ];
    for (title, rows, metric) in sections {
        println!("{title}");
        if rows.is_empty() {
            println!("  (none)");
        }
        for row in rows {
            println!(
                "  {:<14} {:>14}",
                row.vehicle_number,
                fmt.format(metric(row))
            );
        }
        println!();
    }

    println!("Latest trips");
    if dashboard.latest_submissions.is_empty() {
        println!("  (none)");
    }
    for trip in &dashboard.latest_submissions {
        println!(
            "  {}  {:<14} {} -> {}",
            trip.date.format(DATE_FORMAT),
            trip.vehicle_number,
            trip.from_location,
            trip.to_location
        );
    }
    if let Some(updated) = dashboard.last_updated {
        println!();
        println!("Last updated: {}", updated.to_rfc3339());
    }
}

fn handle_export(session: &Session, cmd: &ExportCommand) -> Result<()> {
    let config = &session.config;
    let kind = ExportKind::from(cmd.kind);
    let path = cmd.output.clone().unwrap_or_else(|| {
        config.export_dir().join(default_file_name(
            &config.export.file_prefix,
            kind,
            Local::now().date_naive(),
        ))
    });

    let snapshot = session.storage.snapshot()?;
    let rows = export_to_path(&snapshot, kind, &path)
        .with_context(|| format!("failed to export to {}", path.display()))?;
    println!("Wrote {rows} {kind} row(s) to {}", path.display());
    Ok(())
}

fn handle_status(session: &Session, json: bool) -> Result<()> {
    let storage = &session.storage;
    let stats = storage.stats()?;
    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "stats": stats,
        });
        print_json(&status)?;
    } else {
        println!("fleet status");
        println!("------------");
        println!("Database:      {}", storage.path().display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!("Vehicles:      {}", stats.vehicles);
        println!("Drivers:       {}", stats.drivers);
        println!("Trips:         {}", stats.trips);
        println!("Maintenance:   {}", stats.operational_costs);
    }
    Ok(())
}

// === Configuration ===

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path).context("failed to load configuration")?;
            if json {
                print_json(&config)?;
            } else {
                print_config(&config);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            validate_config(&path)?;
        }
    }
    Ok(())
}

fn print_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Storage]");
    println!("  Database path:    {}", config.database_path().display());
    println!();
    println!("[Report]");
    println!("  Top N:            {}", config.report.top_n);
    println!("  Currency symbol:  {}", config.report.currency_symbol);
    println!();
    println!("[Export]");
    println!("  Directory:        {}", config.export_dir().display());
    println!("  File prefix:      {}", config.export.file_prefix);
}

fn validate_config(path: &Path) -> Result<()> {
    println!("Validating configuration: {}", path.display());
    if !path.exists() {
        println!("No configuration file found; defaults apply.");
    }
    match Config::load_from(Some(path.to_path_buf())) {
        Ok(_) => {
            println!("Configuration is valid.");
            Ok(())
        }
        Err(e) => bail!("configuration error: {e}"),
    }
}
