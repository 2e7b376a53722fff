//! Record types for fleetledger.
//!
//! Every monetary field is stored as `Option<f64>` because the record store
//! allows it to be absent. Absent amounts are never an error: each record
//! exposes one accessor per amount that coalesces a missing (or non-finite)
//! value to zero, and all arithmetic in the crate reads through those
//! accessors.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Coalesce an optional amount to a finite number, treating `None` as zero.
#[must_use]
pub fn amount(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// A registered vehicle and its fixed monthly costs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Identifier assigned by the record store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Registration number, e.g. `KL07CY2255`.
    pub vehicle_number: String,
    /// Loan installment.
    pub emi: Option<f64>,
    /// Insurance premium.
    pub insurance: Option<f64>,
    /// Road tax.
    pub tax: Option<f64>,
    /// Pollution-under-control certificate fee.
    pub pucc: Option<f64>,
    /// Permit fee.
    pub permit: Option<f64>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Create an unsaved vehicle with no costs filled in.
    #[must_use]
    pub fn new(vehicle_number: impl Into<String>) -> Self {
        Self {
            vehicle_number: vehicle_number.into(),
            created_at: Utc::now(),
            ..Self::default()
        }
    }

    /// Loan installment, zero when absent.
    #[must_use]
    pub fn emi(&self) -> f64 {
        amount(self.emi)
    }

    /// Insurance premium, zero when absent.
    #[must_use]
    pub fn insurance(&self) -> f64 {
        amount(self.insurance)
    }

    /// Road tax, zero when absent.
    #[must_use]
    pub fn tax(&self) -> f64 {
        amount(self.tax)
    }

    /// PUCC fee, zero when absent.
    #[must_use]
    pub fn pucc(&self) -> f64 {
        amount(self.pucc)
    }

    /// Permit fee, zero when absent.
    #[must_use]
    pub fn permit(&self) -> f64 {
        amount(self.permit)
    }

    /// Sum of all fixed costs.
    #[must_use]
    pub fn fixed_cost(&self) -> f64 {
        self.emi() + self.insurance() + self.tax() + self.pucc() + self.permit()
    }
}

/// A driver who can be assigned to trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Identifier assigned by the record store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Full name.
    pub name: String,
    /// Driving licence number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_no: Option<String>,
    /// Phone or other contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_no: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Driver {
    /// Create an unsaved driver.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            ..Self::default()
        }
    }
}

/// A single trip run by one vehicle and one driver.
///
/// `vehicle_number` and `driver_name` are copies of the referenced records'
/// fields, refreshed by the store whenever the trip or its references are
/// written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Identifier assigned by the record store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Vehicle that ran the trip.
    pub vehicle_id: i64,
    /// Driver assigned to the trip.
    pub driver_id: i64,
    /// Registration number of the vehicle.
    pub vehicle_number: String,
    /// Name of the driver.
    pub driver_name: String,
    /// Day the trip ran.
    pub date: NaiveDate,
    /// Origin.
    pub from_location: String,
    /// Destination.
    pub to_location: String,
    /// Fuel volume in liters.
    pub fuel_liters: Option<f64>,
    /// Fuel cost.
    pub fuel: Option<f64>,
    /// Driver daily allowance.
    pub bata: Option<f64>,
    /// Toll charges.
    pub toll: Option<f64>,
    /// Regulatory / transport-authority charges.
    pub rto: Option<f64>,
    /// Anything else.
    pub misc: Option<f64>,
    /// Revenue billed for the trip.
    pub hire: Option<f64>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Create an unsaved trip between two places.
    #[must_use]
    pub fn new(
        vehicle_id: i64,
        driver_id: i64,
        date: NaiveDate,
        from_location: impl Into<String>,
        to_location: impl Into<String>,
    ) -> Self {
        Self {
            vehicle_id,
            driver_id,
            date,
            from_location: from_location.into(),
            to_location: to_location.into(),
            created_at: Utc::now(),
            ..Self::default()
        }
    }

    /// Fuel volume, zero when absent.
    #[must_use]
    pub fn fuel_liters(&self) -> f64 {
        amount(self.fuel_liters)
    }

    /// Fuel cost, zero when absent.
    #[must_use]
    pub fn fuel(&self) -> f64 {
        amount(self.fuel)
    }

    /// Driver allowance, zero when absent.
    #[must_use]
    pub fn bata(&self) -> f64 {
        amount(self.bata)
    }

    /// Toll, zero when absent.
    #[must_use]
    pub fn toll(&self) -> f64 {
        amount(self.toll)
    }

    /// RTO charges, zero when absent.
    #[must_use]
    pub fn rto(&self) -> f64 {
        amount(self.rto)
    }

    /// Miscellaneous costs, zero when absent.
    #[must_use]
    pub fn misc(&self) -> f64 {
        amount(self.misc)
    }

    /// Hire, zero when absent.
    #[must_use]
    pub fn hire(&self) -> f64 {
        amount(self.hire)
    }

    /// Variable cost of this trip: fuel, bata, toll, RTO and misc.
    #[must_use]
    pub fn expense(&self) -> f64 {
        self.fuel() + self.bata() + self.toll() + self.rto() + self.misc()
    }

    /// Hire left after the trip's own expenses.
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.hire() - self.expense()
    }
}

/// A maintenance charge booked against a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationalCost {
    /// Identifier assigned by the record store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Vehicle the charge belongs to.
    pub vehicle_id: i64,
    /// Amount charged.
    pub maintenance_charge: Option<f64>,
    /// Free-text note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl OperationalCost {
    /// Create an unsaved maintenance charge.
    #[must_use]
    pub fn new(vehicle_id: i64, maintenance_charge: f64) -> Self {
        Self {
            vehicle_id,
            maintenance_charge: Some(maintenance_charge),
            created_at: Utc::now(),
            ..Self::default()
        }
    }

    /// Maintenance charge, zero when absent.
    #[must_use]
    pub fn maintenance_charge(&self) -> f64 {
        amount(self.maintenance_charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_coalesces_missing_and_non_finite() {
        assert_eq!(amount(None), 0.0);
        assert_eq!(amount(Some(f64::NAN)), 0.0);
        assert_eq!(amount(Some(f64::INFINITY)), 0.0);
        assert_eq!(amount(Some(12.5)), 12.5);
    }

    #[test]
    fn test_vehicle_fixed_cost() {
        let vehicle = Vehicle {
            emi: Some(5000.0),
            insurance: Some(1000.0),
            tax: Some(500.0),
            pucc: Some(200.0),
            permit: Some(300.0),
            ..Vehicle::new("KL07CY2255")
        };
        assert_eq!(vehicle.fixed_cost(), 7000.0);
    }

    #[test]
    fn test_vehicle_fixed_cost_with_missing_fields() {
        let vehicle = Vehicle {
            emi: Some(5000.0),
            ..Vehicle::new("KL07CY2255")
        };
        assert_eq!(vehicle.insurance(), 0.0);
        assert_eq!(vehicle.fixed_cost(), 5000.0);
        assert_eq!(Vehicle::new("EMPTY").fixed_cost(), 0.0);
    }

    #[test]
    fn test_trip_expense_and_balance() {
        let trip = Trip {
            hire: Some(10_000.0),
            fuel: Some(2000.0),
            bata: Some(500.0),
            toll: Some(100.0),
            rto: Some(50.0),
            misc: Some(50.0),
            ..Trip::default()
        };
        assert_eq!(trip.expense(), 2700.0);
        assert_eq!(trip.balance(), 7300.0);
    }

    #[test]
    fn test_trip_defaults_to_zero() {
        let trip = Trip::default();
        assert_eq!(trip.hire(), 0.0);
        assert_eq!(trip.expense(), 0.0);
        assert_eq!(trip.fuel_liters(), 0.0);
    }

    #[test]
    fn test_operational_cost_charge() {
        assert_eq!(OperationalCost::new(1, 800.0).maintenance_charge(), 800.0);
        assert_eq!(OperationalCost::default().maintenance_charge(), 0.0);
    }

    #[test]
    fn test_vehicle_serialize_skips_missing_id() {
        let json = serde_json::to_string(&Vehicle::new("TN01AB1234")).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(json.contains("TN01AB1234"));
    }

    #[test]
    fn test_driver_deserialize_without_optional_fields() {
        let json = r#"{"name":"Ravi","created_at":"2024-01-15T10:00:00Z"}"#;
        let driver: Driver = serde_json::from_str(json).unwrap();
        assert_eq!(driver.name, "Ravi");
        assert!(driver.license_no.is_none());
        assert!(driver.id.is_none());
    }
}
