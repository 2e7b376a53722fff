//! Field validation applied before records are written.
//!
//! Only writes are validated. Reads and profit aggregation accept whatever is
//! stored and coalesce bad amounts to zero instead.

use crate::error::{Error, Result};
use crate::model::{Driver, OperationalCost, Trip, Vehicle};

fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "is required"));
    }
    Ok(())
}

fn require_amount(field: &'static str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(Error::validation(field, "must be a finite number")),
        Some(v) if v < 0.0 => Err(Error::validation(
            field,
            format!("must be non-negative, got {v}"),
        )),
        _ => Ok(()),
    }
}

fn require_reference(field: &'static str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(Error::validation(field, "is required"));
    }
    Ok(())
}

/// Validate a vehicle before it is inserted or updated.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the first offending field.
pub fn vehicle(vehicle: &Vehicle) -> Result<()> {
    require_text("vehicle_number", &vehicle.vehicle_number)?;
    require_amount("emi", vehicle.emi)?;
    require_amount("insurance", vehicle.insurance)?;
    require_amount("tax", vehicle.tax)?;
    require_amount("pucc", vehicle.pucc)?;
    require_amount("permit", vehicle.permit)?;
    Ok(())
}

/// Validate a driver before it is inserted or updated.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the name is blank.
pub fn driver(driver: &Driver) -> Result<()> {
    require_text("name", &driver.name)
}

/// Validate a trip before it is inserted or updated.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the first offending field.
pub fn trip(trip: &Trip) -> Result<()> {
    require_reference("vehicle_id", trip.vehicle_id)?;
    require_reference("driver_id", trip.driver_id)?;
    require_text("from_location", &trip.from_location)?;
    require_text("to_location", &trip.to_location)?;
    require_amount("fuel_liters", trip.fuel_liters)?;
    require_amount("fuel", trip.fuel)?;
    require_amount("bata", trip.bata)?;
    require_amount("toll", trip.toll)?;
    require_amount("rto", trip.rto)?;
    require_amount("misc", trip.misc)?;
    require_amount("hire", trip.hire)?;
    Ok(())
}

/// Validate a maintenance charge before it is inserted or updated.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the first offending field.
pub fn operational_cost(cost: &OperationalCost) -> Result<()> {
    require_reference("vehicle_id", cost.vehicle_id)?;
    require_amount("maintenance_charge", cost.maintenance_charge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_trip() -> Trip {
        Trip::new(
            1,
            1,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "Kochi",
            "Chennai",
        )
    }

    #[test]
    fn test_valid_vehicle() {
        let v = Vehicle {
            emi: Some(5000.0),
            ..Vehicle::new("KL07CY2255")
        };
        assert!(vehicle(&v).is_ok());
    }

    #[test]
    fn test_vehicle_blank_number() {
        let err = vehicle(&Vehicle::new("   ")).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: "vehicle_number",
                ..
            }
        ));
    }

    #[test]
    fn test_vehicle_negative_amount() {
        let v = Vehicle {
            permit: Some(-1.0),
            ..Vehicle::new("KL07CY2255")
        };
        let err = vehicle(&v).unwrap_err();
        assert!(err.to_string().contains("permit"));
    }

    #[test]
    fn test_vehicle_missing_amounts_are_fine() {
        assert!(vehicle(&Vehicle::new("KL07CY2255")).is_ok());
    }

    #[test]
    fn test_driver_name_required() {
        assert!(driver(&Driver::new("Ravi")).is_ok());
        assert!(driver(&Driver::new("")).unwrap_err().is_validation());
    }

    #[test]
    fn test_valid_trip() {
        assert!(trip(&valid_trip()).is_ok());
    }

    #[test]
    fn test_trip_requires_locations() {
        let t = Trip {
            to_location: String::new(),
            ..valid_trip()
        };
        assert!(trip(&t).unwrap_err().to_string().contains("to_location"));
    }

    #[test]
    fn test_trip_requires_references() {
        let t = Trip {
            driver_id: 0,
            ..valid_trip()
        };
        assert!(trip(&t).unwrap_err().to_string().contains("driver_id"));
    }

    #[test]
    fn test_trip_rejects_nan_hire() {
        let t = Trip {
            hire: Some(f64::NAN),
            ..valid_trip()
        };
        assert!(trip(&t).unwrap_err().to_string().contains("finite"));
    }

    #[test]
    fn test_operational_cost() {
        assert!(operational_cost(&OperationalCost::new(1, 800.0)).is_ok());
        assert!(operational_cost(&OperationalCost::new(1, -5.0)).is_err());
        assert!(operational_cost(&OperationalCost::new(0, 5.0)).is_err());
    }
}
