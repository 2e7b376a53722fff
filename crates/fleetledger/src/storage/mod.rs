//! Storage layer for fleetledger.
//!
//! This module provides `SQLite`-based persistent storage for vehicles,
//! drivers, trips and maintenance charges, plus consistent bulk snapshots for
//! profit aggregation.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{Driver, OperationalCost, Trip, Vehicle};
use crate::profit::{self, ProfitReport};
use crate::validate;

/// Format used for trip dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const VEHICLE_COLUMNS: &str =
    "id, vehicle_number, emi, insurance, tax, pucc, permit, created_at";
const DRIVER_COLUMNS: &str = "id, name, license_no, contact_no, created_at";
const TRIP_COLUMNS: &str = "id, vehicle_id, driver_id, vehicle_number, driver_name, date, \
     from_location, to_location, fuel_liters, fuel, bata, toll, rto, misc, hire, created_at";
const COST_COLUMNS: &str = "id, vehicle_id, maintenance_charge, notes, created_at";

/// Record store for the fleet.
///
/// Provides persistent storage using `SQLite` with support for:
/// - Create, read, update and delete per record kind
/// - Restrict semantics when deleting referenced vehicles or drivers
/// - Denormalized vehicle numbers and driver names on trips
/// - Consistent snapshots for aggregation
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

/// Every record in the store, read inside one transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetSnapshot {
    /// All vehicles, newest first.
    pub vehicles: Vec<Vehicle>,
    /// All drivers, newest first.
    pub drivers: Vec<Driver>,
    /// All trips, newest first.
    pub trips: Vec<Trip>,
    /// All maintenance charges, newest first.
    pub costs: Vec<OperationalCost>,
}

impl FleetSnapshot {
    /// Aggregate this snapshot into a profit report.
    #[must_use]
    pub fn profit_report(&self) -> ProfitReport {
        profit::aggregate(&self.vehicles, &self.trips, &self.costs)
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Number of vehicles stored.
    pub vehicles: i64,
    /// Number of drivers stored.
    pub drivers: i64,
    /// Number of trips stored.
    pub trips: i64,
    /// Number of maintenance charges stored.
    pub operational_costs: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // === Vehicles ===

    /// Insert a vehicle and return its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the database operation fails.
    pub fn insert_vehicle(&self, vehicle: &Vehicle) -> Result<i64> {
        validate::vehicle(vehicle)?;
        self.conn.execute(
            r"
            INSERT INTO vehicles (vehicle_number, emi, insurance, tax, pucc, permit, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                vehicle.vehicle_number.trim(),
                vehicle.emi,
                vehicle.insurance,
                vehicle.tax,
                vehicle.pucc,
                vehicle.permit,
                format_timestamp(vehicle.created_at),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted vehicle {} with id {}", vehicle.vehicle_number, id);
        Ok(id)
    }

    /// Get a vehicle by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_vehicle(&self, id: i64) -> Result<Option<Vehicle>> {
        let sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = ?1");
        let vehicle = self
            .conn
            .query_row(&sql, [id], row_to_vehicle)
            .optional()?;
        Ok(vehicle)
    }

    /// List all vehicles, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        query_vehicles(&self.conn)
    }

    /// Replace a vehicle's fields.
    ///
    /// Trips run by the vehicle pick up the new registration number. Returns
    /// `false` if no vehicle has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the database operation fails.
    pub fn update_vehicle(&self, id: i64, vehicle: &Vehicle) -> Result<bool> {
        validate::vehicle(vehicle)?;
        let tx = self.conn.unchecked_transaction()?;
        let number = vehicle.vehicle_number.trim();
        let affected = tx.execute(
            r"
            UPDATE vehicles
            SET vehicle_number = ?1, emi = ?2, insurance = ?3, tax = ?4, pucc = ?5, permit = ?6
            WHERE id = ?7
            ",
            params![
                number,
                vehicle.emi,
                vehicle.insurance,
                vehicle.tax,
                vehicle.pucc,
                vehicle.permit,
                id,
            ],
        )?;
        if affected > 0 {
            let trips = tx.execute(
                "UPDATE trips SET vehicle_number = ?1 WHERE vehicle_id = ?2",
                params![number, id],
            )?;
            debug!("Updated vehicle {} and {} trip(s)", id, trips);
        }
        tx.commit()?;
        Ok(affected > 0)
    }

    /// Delete a vehicle by ID.
    ///
    /// Returns `true` if a vehicle was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordInUse`] if trips or maintenance charges still
    /// reference the vehicle, or an error if the database operation fails.
    pub fn delete_vehicle(&self, id: i64) -> Result<bool> {
        let trips = self.count_where("trips", "vehicle_id", id)?;
        let costs = self.count_where("operational_costs", "vehicle_id", id)?;
        if trips > 0 || costs > 0 {
            return Err(Error::RecordInUse {
                entity: "vehicle",
                id,
                dependents: format!("{trips} trip(s) and {costs} maintenance record(s)"),
            });
        }

        let affected = self
            .conn
            .execute("DELETE FROM vehicles WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    // === Drivers ===

    /// Insert a driver and return its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the database operation fails.
    pub fn insert_driver(&self, driver: &Driver) -> Result<i64> {
        validate::driver(driver)?;
        self.conn.execute(
            r"
            INSERT INTO drivers (name, license_no, contact_no, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                driver.name.trim(),
                driver.license_no,
                driver.contact_no,
                format_timestamp(driver.created_at),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted driver with id {}", id);
        Ok(id)
    }

    /// Get a driver by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_driver(&self, id: i64) -> Result<Option<Driver>> {
        let sql = format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = ?1");
        let driver = self.conn.query_row(&sql, [id], row_to_driver).optional()?;
        Ok(driver)
    }

    /// List all drivers, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_drivers(&self) -> Result<Vec<Driver>> {
        query_drivers(&self.conn)
    }

    /// Replace a driver's fields.
    ///
    /// Trips assigned to the driver pick up the new name. Returns `false` if
    /// no driver has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the database operation fails.
    pub fn update_driver(&self, id: i64, driver: &Driver) -> Result<bool> {
        validate::driver(driver)?;
        let tx = self.conn.unchecked_transaction()?;
        let name = driver.name.trim();
        let affected = tx.execute(
            "UPDATE drivers SET name = ?1, license_no = ?2, contact_no = ?3 WHERE id = ?4",
            params![name, driver.license_no, driver.contact_no, id],
        )?;
        if affected > 0 {
            tx.execute(
                "UPDATE trips SET driver_name = ?1 WHERE driver_id = ?2",
                params![name, id],
            )?;
        }
        tx.commit()?;
        Ok(affected > 0)
    }

    /// Delete a driver by ID.
    ///
    /// Returns `true` if a driver was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordInUse`] if trips still reference the driver, or
    /// an error if the database operation fails.
    pub fn delete_driver(&self, id: i64) -> Result<bool> {
        let trips = self.count_where("trips", "driver_id", id)?;
        if trips > 0 {
            return Err(Error::RecordInUse {
                entity: "driver",
                id,
                dependents: format!("{trips} trip(s)"),
            });
        }

        let affected = self
            .conn
            .execute("DELETE FROM drivers WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    // === Trips ===

    /// Insert a trip and return its new id.
    ///
    /// The referenced vehicle's number and driver's name are copied onto the
    /// stored row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the vehicle or driver does not exist,
    /// or an error if validation or the database operation fails.
    pub fn insert_trip(&self, trip: &Trip) -> Result<i64> {
        validate::trip(trip)?;
        let (vehicle_number, driver_name) = self.resolve_trip_references(trip)?;

        self.conn.execute(
            r"
            INSERT INTO trips (vehicle_id, driver_id, vehicle_number, driver_name, date,
                               from_location, to_location, fuel_liters, fuel, bata, toll,
                               rto, misc, hire, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            ",
            params![
                trip.vehicle_id,
                trip.driver_id,
                vehicle_number,
                driver_name,
                trip.date.format(DATE_FORMAT).to_string(),
                trip.from_location.trim(),
                trip.to_location.trim(),
                trip.fuel_liters,
                trip.fuel,
                trip.bata,
                trip.toll,
                trip.rto,
                trip.misc,
                trip.hire,
                format_timestamp(trip.created_at),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "Inserted trip {} for vehicle {} ({} -> {})",
            id, vehicle_number, trip.from_location, trip.to_location
        );
        Ok(id)
    }

    /// Get a trip by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_trip(&self, id: i64) -> Result<Option<Trip>> {
        let sql = format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1");
        let trip = self.conn.query_row(&sql, [id], row_to_trip).optional()?;
        Ok(trip)
    }

    /// List all trips, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_trips(&self) -> Result<Vec<Trip>> {
        query_trips(&self.conn)
    }

    /// List the trips run by one vehicle, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_trips_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<Trip>> {
        let sql = format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE vehicle_id = ?1 \
             ORDER BY created_at DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let trips = stmt
            .query_map([vehicle_id], row_to_trip)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(trips)
    }

    /// Replace a trip's fields.
    ///
    /// Returns `false` if no trip has this id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the vehicle or driver does not exist,
    /// or an error if validation or the database operation fails.
    pub fn update_trip(&self, id: i64, trip: &Trip) -> Result<bool> {
        validate::trip(trip)?;
        let (vehicle_number, driver_name) = self.resolve_trip_references(trip)?;

        let affected = self.conn.execute(
            r"
            UPDATE trips
            SET vehicle_id = ?1, driver_id = ?2, vehicle_number = ?3, driver_name = ?4,
                date = ?5, from_location = ?6, to_location = ?7, fuel_liters = ?8,
                fuel = ?9, bata = ?10, toll = ?11, rto = ?12, misc = ?13, hire = ?14
            WHERE id = ?15
            ",
            params![
                trip.vehicle_id,
                trip.driver_id,
                vehicle_number,
                driver_name,
                trip.date.format(DATE_FORMAT).to_string(),
                trip.from_location.trim(),
                trip.to_location.trim(),
                trip.fuel_liters,
                trip.fuel,
                trip.bata,
                trip.toll,
                trip.rto,
                trip.misc,
                trip.hire,
                id,
            ],
        )?;
        Ok(affected > 0)
    }

    /// Delete a trip by ID.
    ///
    /// Returns `true` if a trip was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_trip(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM trips WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    fn resolve_trip_references(&self, trip: &Trip) -> Result<(String, String)> {
        let vehicle = self
            .get_vehicle(trip.vehicle_id)?
            .ok_or_else(|| Error::not_found("vehicle", trip.vehicle_id))?;
        let driver = self
            .get_driver(trip.driver_id)?
            .ok_or_else(|| Error::not_found("driver", trip.driver_id))?;
        Ok((vehicle.vehicle_number, driver.name))
    }

    // === Operational costs ===

    /// Insert a maintenance charge and return its new id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the vehicle does not exist, or an error
    /// if validation or the database operation fails.
    pub fn insert_cost(&self, cost: &OperationalCost) -> Result<i64> {
        validate::operational_cost(cost)?;
        self.require_vehicle(cost.vehicle_id)?;

        self.conn.execute(
            r"
            INSERT INTO operational_costs (vehicle_id, maintenance_charge, notes, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                cost.vehicle_id,
                cost.maintenance_charge,
                cost.notes,
                format_timestamp(cost.created_at),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted maintenance charge {} for vehicle {}", id, cost.vehicle_id);
        Ok(id)
    }

    /// Get a maintenance charge by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_cost(&self, id: i64) -> Result<Option<OperationalCost>> {
        let sql = format!("SELECT {COST_COLUMNS} FROM operational_costs WHERE id = ?1");
        let cost = self.conn.query_row(&sql, [id], row_to_cost).optional()?;
        Ok(cost)
    }

    /// List all maintenance charges, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_costs(&self) -> Result<Vec<OperationalCost>> {
        query_costs(&self.conn)
    }

    /// Replace a maintenance charge's fields.
    ///
    /// Returns `false` if no charge has this id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the vehicle does not exist, or an error
    /// if validation or the database operation fails.
    pub fn update_cost(&self, id: i64, cost: &OperationalCost) -> Result<bool> {
        validate::operational_cost(cost)?;
        self.require_vehicle(cost.vehicle_id)?;

        let affected = self.conn.execute(
            r"
            UPDATE operational_costs
            SET vehicle_id = ?1, maintenance_charge = ?2, notes = ?3
            WHERE id = ?4
            ",
            params![cost.vehicle_id, cost.maintenance_charge, cost.notes, id],
        )?;
        Ok(affected > 0)
    }

    /// Delete a maintenance charge by ID.
    ///
    /// Returns `true` if a charge was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_cost(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM operational_costs WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    fn require_vehicle(&self, vehicle_id: i64) -> Result<()> {
        if self.count_where("vehicles", "id", vehicle_id)? == 0 {
            return Err(Error::not_found("vehicle", vehicle_id));
        }
        Ok(())
    }

    // === Bulk reads ===

    /// Read every record inside a single transaction.
    ///
    /// Aggregating a snapshot never mixes rows from before and after a
    /// concurrent write.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn snapshot(&self) -> Result<FleetSnapshot> {
        let tx = self.conn.unchecked_transaction()?;
        let snapshot = FleetSnapshot {
            vehicles: query_vehicles(&tx)?,
            drivers: query_drivers(&tx)?,
            trips: query_trips(&tx)?,
            costs: query_costs(&tx)?,
        };
        tx.commit()?;

        debug!(
            "Snapshot: {} vehicles, {} drivers, {} trips, {} costs",
            snapshot.vehicles.len(),
            snapshot.drivers.len(),
            snapshot.trips.len(),
            snapshot.costs.len()
        );
        Ok(snapshot)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            vehicles: self.count("vehicles")?,
            drivers: self.count("drivers")?,
            trips: self.count("trips")?,
            operational_costs: self.count("operational_costs")?,
            db_size_bytes,
        })
    }

    fn count(&self, table: &str) -> Result<i64> {
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?;
        Ok(count)
    }

    fn count_where(&self, table: &str, column: &str, id: i64) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1"),
            [id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn query_vehicles(conn: &Connection) -> Result<Vec<Vehicle>> {
    let sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let vehicles = stmt
        .query_map([], row_to_vehicle)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(vehicles)
}

fn query_drivers(conn: &Connection) -> Result<Vec<Driver>> {
    let sql = format!("SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let drivers = stmt
        .query_map([], row_to_driver)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(drivers)
}

fn query_trips(conn: &Connection) -> Result<Vec<Trip>> {
    let sql = format!("SELECT {TRIP_COLUMNS} FROM trips ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let trips = stmt
        .query_map([], row_to_trip)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(trips)
}

fn query_costs(conn: &Connection) -> Result<Vec<OperationalCost>> {
    let sql = format!(
        "SELECT {COST_COLUMNS} FROM operational_costs ORDER BY created_at DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let costs = stmt
        .query_map([], row_to_cost)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(costs)
}

/// Fixed-width UTC timestamps so text ordering matches time ordering.
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Listings sort by `created_at`; an unparseable value is a read error.
fn parse_timestamp(index: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_date(index: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_vehicle(row: &rusqlite::Row) -> rusqlite::Result<Vehicle> {
    let created_at: String = row.get(7)?;
    Ok(Vehicle {
        id: Some(row.get(0)?),
        vehicle_number: row.get(1)?,
        emi: row.get(2)?,
        insurance: row.get(3)?,
        tax: row.get(4)?,
        pucc: row.get(5)?,
        permit: row.get(6)?,
        created_at: parse_timestamp(7, &created_at)?,
    })
}

fn row_to_driver(row: &rusqlite::Row) -> rusqlite::Result<Driver> {
    let created_at: String = row.get(4)?;
    Ok(Driver {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        license_no: row.get(2)?,
        contact_no: row.get(3)?,
        created_at: parse_timestamp(4, &created_at)?,
    })
}

fn row_to_trip(row: &rusqlite::Row) -> rusqlite::Result<Trip> {
    let date: String = row.get(5)?;
    let created_at: String = row.get(15)?;
    Ok(Trip {
        id: Some(row.get(0)?),
        vehicle_id: row.get(1)?,
        driver_id: row.get(2)?,
        vehicle_number: row.get(3)?,
        driver_name: row.get(4)?,
        date: parse_date(5, &date)?,
        from_location: row.get(6)?,
        to_location: row.get(7)?,
        fuel_liters: row.get(8)?,
        fuel: row.get(9)?,
        bata: row.get(10)?,
        toll: row.get(11)?,
        rto: row.get(12)?,
        misc: row.get(13)?,
        hire: row.get(14)?,
        created_at: parse_timestamp(15, &created_at)?,
    })
}

fn row_to_cost(row: &rusqlite::Row) -> rusqlite::Result<OperationalCost> {
    let created_at: String = row.get(4)?;
    Ok(OperationalCost {
        id: Some(row.get(0)?),
        vehicle_id: row.get(1)?,
        maintenance_charge: row.get(2)?,
        notes: row.get(3)?,
        created_at: parse_timestamp(4, &created_at)?,
    })
}
