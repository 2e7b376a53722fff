//! `SQLite` schema definitions for fleetledger.
//!
//! Monetary columns are nullable `REAL`s; absent amounts stay `NULL` in the
//! database and are coalesced to zero on read by the record types.

/// SQL statement to create the vehicles table.
pub const CREATE_VEHICLES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS vehicles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vehicle_number TEXT NOT NULL,
    emi REAL,
    insurance REAL,
    tax REAL,
    pucc REAL,
    permit REAL,
    created_at TEXT NOT NULL
)
";

/// SQL statement to create the drivers table.
pub const CREATE_DRIVERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS drivers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    license_no TEXT,
    contact_no TEXT,
    created_at TEXT NOT NULL
)
";

/// SQL statement to create the trips table.
pub const CREATE_TRIPS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS trips (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vehicle_id INTEGER NOT NULL REFERENCES vehicles(id),
    driver_id INTEGER NOT NULL REFERENCES drivers(id),
    vehicle_number TEXT NOT NULL,
    driver_name TEXT NOT NULL,
    date TEXT NOT NULL,
    from_location TEXT NOT NULL,
    to_location TEXT NOT NULL,
    fuel_liters REAL,
    fuel REAL,
    bata REAL,
    toll REAL,
    rto REAL,
    misc REAL,
    hire REAL,
    created_at TEXT NOT NULL
)
";

/// SQL statement to create the operational costs table.
pub const CREATE_OPERATIONAL_COSTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS operational_costs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vehicle_id INTEGER NOT NULL REFERENCES vehicles(id),
    maintenance_charge REAL,
    notes TEXT,
    created_at TEXT NOT NULL
)
";

/// Index for looking up trips by vehicle.
pub const CREATE_TRIPS_VEHICLE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_trips_vehicle ON trips(vehicle_id)
";

/// Index for looking up trips by driver.
pub const CREATE_TRIPS_DRIVER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_trips_driver ON trips(driver_id)
";

/// Index for looking up maintenance charges by vehicle.
pub const CREATE_COSTS_VEHICLE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_operational_costs_vehicle ON operational_costs(vehicle_id)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_VEHICLES_TABLE,
    CREATE_DRIVERS_TABLE,
    CREATE_TRIPS_TABLE,
    CREATE_OPERATIONAL_COSTS_TABLE,
    CREATE_TRIPS_VEHICLE_INDEX,
    CREATE_TRIPS_DRIVER_INDEX,
    CREATE_COSTS_VEHICLE_INDEX,
    CREATE_METADATA_TABLE,
];
