//! Command-line interface for fleetledger.
//!
//! This module provides the CLI structure for the `fleet` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, CostAddArgs, CostCommand, CostEditArgs, DeleteArgs, DriverAddArgs,
    DriverCommand, DriverEditArgs, ExportCommand, ExportKindArg, ListArgs, OutputFormat,
    ReportCommand, ShowArgs, StatusCommand, TripAddArgs, TripAmounts, TripCommand, TripEditArgs,
    TripListArgs, VehicleAddArgs, VehicleCommand, VehicleCosts, VehicleEditArgs,
};

use crate::logging::Verbosity;

/// fleet - Track what each vehicle in your fleet earns
///
/// Records vehicles, drivers, trips and maintenance charges, and reports the
/// profit of every vehicle and of the fleet as a whole.
#[derive(Debug, Parser)]
#[command(name = "fleet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database file to use instead of the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage vehicles
    #[command(subcommand)]
    Vehicle(VehicleCommand),

    /// Manage drivers
    #[command(subcommand)]
    Driver(DriverCommand),

    /// Manage trips
    #[command(subcommand)]
    Trip(TripCommand),

    /// Manage maintenance charges
    #[command(subcommand)]
    Cost(CostCommand),

    /// Show per-vehicle profit, fleet totals and rankings
    Report(ReportCommand),

    /// Write a CSV export
    Export(ExportCommand),

    /// Show database location and record counts
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "fleet");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["fleet", "status"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["fleet", "-q", "status"]).verbosity(), Verbosity::Quiet);
        assert_eq!(
            parse(&["fleet", "-v", "status"]).verbosity(),
            Verbosity::Verbose
        );
        assert_eq!(
            parse(&["fleet", "-vv", "status"]).verbosity(),
            Verbosity::Trace
        );
    }

    #[test]
    fn test_parse_global_paths() {
        let cli = parse(&[
            "fleet",
            "-c",
            "/custom/config.toml",
            "--database",
            "/tmp/fleet.db",
            "status",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/fleet.db")));
    }

    #[test]
    fn test_parse_vehicle_add() {
        let cli = parse(&[
            "fleet", "vehicle", "add", "KL07CY2255", "--emi", "5000", "--tax", "500",
        ]);
        let Command::Vehicle(VehicleCommand::Add(args)) = cli.command else {
            panic!("expected vehicle add");
        };
        assert_eq!(args.number, "KL07CY2255");
        assert_eq!(args.costs.emi, Some(5000.0));
        assert_eq!(args.costs.tax, Some(500.0));
        assert_eq!(args.costs.insurance, None);
    }

    #[test]
    fn test_parse_rejects_negative_amount() {
        let result = Cli::try_parse_from(["fleet", "vehicle", "add", "KL01", "--emi", "-5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_trip_add() {
        let cli = parse(&[
            "fleet",
            "trip",
            "add",
            "--vehicle",
            "1",
            "--driver",
            "2",
            "--date",
            "2024-03-01",
            "--from",
            "Kochi",
            "--to",
            "Chennai",
            "--hire",
            "4000",
            "--fuel-liters",
            "80",
        ]);
        let Command::Trip(TripCommand::Add(args)) = cli.command else {
            panic!("expected trip add");
        };
        assert_eq!(args.vehicle, 1);
        assert_eq!(args.driver, 2);
        assert_eq!(args.from, "Kochi");
        assert_eq!(args.amounts.hire, Some(4000.0));
        assert_eq!(args.amounts.fuel_liters, Some(80.0));
        assert!(args.date.is_some());
    }

    #[test]
    fn test_parse_trip_add_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "fleet", "trip", "add", "--vehicle", "1", "--driver", "2", "--date", "03/01/2024",
            "--from", "A", "--to", "B",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_trip_list_for_vehicle() {
        let cli = parse(&["fleet", "trip", "list", "--vehicle", "3", "--format", "json"]);
        let Command::Trip(TripCommand::List(args)) = cli.command else {
            panic!("expected trip list");
        };
        assert_eq!(args.vehicle, Some(3));
        assert_eq!(args.list.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_edit_without_fields() {
        let cli = parse(&["fleet", "driver", "edit", "4"]);
        let Command::Driver(DriverCommand::Edit(args)) = cli.command else {
            panic!("expected driver edit");
        };
        assert_eq!(args.id, 4);
        assert!(args.name.is_none());
    }

    #[test]
    fn test_parse_cost_delete() {
        let cli = parse(&["fleet", "cost", "delete", "9"]);
        assert!(matches!(
            cli.command,
            Command::Cost(CostCommand::Delete(DeleteArgs { id: 9 }))
        ));
    }

    #[test]
    fn test_parse_report() {
        let cli = parse(&["fleet", "report"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.top, None);
        assert_eq!(args.format, OutputFormat::Table);

        let cli = parse(&["fleet", "report", "--top", "3", "--format", "json"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.top, Some(3));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_report_rejects_zero_top() {
        assert!(Cli::try_parse_from(["fleet", "report", "--top", "0"]).is_err());
    }

    #[test]
    fn test_parse_export() {
        let cli = parse(&["fleet", "export"]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.kind, ExportKindArg::Profit);
        assert!(args.output.is_none());

        let cli = parse(&["fleet", "export", "--kind", "trips", "-o", "out.csv"]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.kind, ExportKindArg::Trips);
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["fleet", "config", "validate", "--file", "/tmp/c.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
