//! End-to-end flow: record fleet activity, read it back as one snapshot and
//! turn it into a profit report and CSV exports.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use fleetledger::analytics::Dashboard;
use fleetledger::export::{export_to_path, write_profit_csv, write_trips_csv, ExportKind};
use fleetledger::{Driver, Error, OperationalCost, Storage, Trip, Vehicle};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

struct Fleet {
    storage: Storage,
    earner: i64,
    idle: i64,
    driver: i64,
}

fn seeded_fleet(storage: Storage) -> Fleet {
    let earner = storage
        .insert_vehicle(&Vehicle {
            emi: Some(5000.0),
            insurance: Some(1000.0),
            tax: Some(500.0),
            pucc: Some(200.0),
            permit: Some(300.0),
            ..Vehicle::new("KL07CY2255")
        })
        .unwrap();
    let idle = storage
        .insert_vehicle(&Vehicle {
            emi: Some(1200.0),
            ..Vehicle::new("KL07AB0001")
        })
        .unwrap();
    let driver = storage.insert_driver(&Driver::new("Ravi")).unwrap();

    storage
        .insert_trip(&Trip {
            fuel: Some(1000.0),
            bata: Some(200.0),
            hire: Some(5000.0),
            ..Trip::new(earner, driver, date(1), "Kochi", "Chennai")
        })
        .unwrap();
    storage
        .insert_trip(&Trip {
            fuel: Some(1500.0),
            toll: Some(300.0),
            hire: Some(7000.0),
            ..Trip::new(earner, driver, date(4), "Chennai", "Bengaluru")
        })
        .unwrap();
    storage
        .insert_cost(&OperationalCost::new(earner, 800.0))
        .unwrap();

    Fleet {
        storage,
        earner,
        idle,
        driver,
    }
}

#[test]
fn test_snapshot_report_and_exports() {
    let fleet = seeded_fleet(Storage::open_in_memory().unwrap());

    let snapshot = fleet.storage.snapshot().unwrap();
    assert_eq!(snapshot.vehicles.len(), 2);
    assert_eq!(snapshot.trips.len(), 2);

    let report = snapshot.profit_report();
    let earner = report
        .vehicles
        .iter()
        .find(|v| v.vehicle_id == Some(fleet.earner))
        .unwrap();
    // hire 12000 - fixed 7000 - variable 3000 - maintenance 800
    assert_eq!(earner.trip_count, 2);
    assert_eq!(earner.total_hire, 12_000.0);
    assert_eq!(earner.variable_cost, 3000.0);
    assert_eq!(earner.profit, 1200.0);

    let idle = report
        .vehicles
        .iter()
        .find(|v| v.vehicle_id == Some(fleet.idle))
        .unwrap();
    assert_eq!(idle.trip_count, 0);
    assert_eq!(idle.profit, -1200.0);

    assert_eq!(report.totals.total_profit, 0.0);
    assert_eq!(report.totals.profitable_count, 1);
    assert_eq!(report.totals.losing_count, 1);

    let dashboard = Dashboard::build(&report, &snapshot.trips, 5);
    assert_eq!(dashboard.loss_leaders.len(), 1);
    assert_eq!(dashboard.loss_leaders[0].vehicle_number, "KL07AB0001");
    assert_eq!(dashboard.highest_maintenance[0].vehicle_number, "KL07CY2255");
    assert_eq!(dashboard.latest_submissions.len(), 2);

    let mut profit_csv = Vec::new();
    write_profit_csv(&report, &mut profit_csv).unwrap();
    let profit_csv = String::from_utf8(profit_csv).unwrap();
    assert!(profit_csv.contains("KL07CY2255,2,12000.00,7000.00,3000.00,800.00,1200.00"));
    assert!(profit_csv.contains("KL07AB0001,0,0.00,1200.00,0.00,0.00,-1200.00"));
    assert!(profit_csv.ends_with("TOTAL,2,12000.00,8200.00,3000.00,800.00,0.00\n"));

    let mut trips_csv = Vec::new();
    write_trips_csv(&snapshot.trips, &mut trips_csv).unwrap();
    let trips_csv = String::from_utf8(trips_csv).unwrap();
    assert_eq!(trips_csv.lines().count(), 3);
    assert!(trips_csv.contains("2024-03-04,KL07CY2255,Ravi,Chennai,Bengaluru"));
}

#[test]
fn test_edits_flow_into_report() {
    let fleet = seeded_fleet(Storage::open_in_memory().unwrap());

    let mut vehicle = fleet.storage.get_vehicle(fleet.earner).unwrap().unwrap();
    vehicle.vehicle_number = "KL07CY9999".to_string();
    vehicle.emi = Some(6000.0);
    assert!(fleet.storage.update_vehicle(fleet.earner, &vehicle).unwrap());

    let snapshot = fleet.storage.snapshot().unwrap();
    assert!(snapshot
        .trips
        .iter()
        .all(|t| t.vehicle_id != fleet.earner || t.vehicle_number == "KL07CY9999"));

    let report = snapshot.profit_report();
    let earner = report
        .vehicles
        .iter()
        .find(|v| v.vehicle_id == Some(fleet.earner))
        .unwrap();
    assert_eq!(earner.vehicle_number, "KL07CY9999");
    assert_eq!(earner.profit, 200.0);
}

#[test]
fn test_referenced_records_cannot_be_deleted() {
    let fleet = seeded_fleet(Storage::open_in_memory().unwrap());

    let err = fleet.storage.delete_vehicle(fleet.earner).unwrap_err();
    assert!(matches!(err, Error::RecordInUse { .. }));
    let err = fleet.storage.delete_driver(fleet.driver).unwrap_err();
    assert!(matches!(err, Error::RecordInUse { .. }));

    assert!(fleet.storage.delete_vehicle(fleet.idle).unwrap());
    let report = fleet.storage.snapshot().unwrap().profit_report();
    assert_eq!(report.vehicles.len(), 1);
}

#[test]
fn test_file_backed_store_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("fleet.db");

    {
        let fleet = seeded_fleet(Storage::open(&db_path).unwrap());
        assert_eq!(fleet.storage.path(), db_path.as_path());
    }

    let storage = Storage::open(&db_path).unwrap();
    let stats = storage.stats().unwrap();
    assert_eq!(stats.vehicles, 2);
    assert_eq!(stats.drivers, 1);
    assert_eq!(stats.trips, 2);
    assert_eq!(stats.operational_costs, 1);

    let out = dir.path().join("exports").join("fleet_trips.csv");
    let rows = export_to_path(&storage.snapshot().unwrap(), ExportKind::Trips, &out).unwrap();
    assert_eq!(rows, 2);
    assert!(std::fs::read_to_string(&out)
        .unwrap()
        .starts_with("Date,Vehicle,Driver,From,To"));
}
