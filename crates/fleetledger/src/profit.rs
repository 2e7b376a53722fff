//! Per-vehicle profitability.
//!
//! [`aggregate`] turns vehicles, trips and maintenance charges into one
//! [`VehicleProfit`] per vehicle plus [`FleetTotals`]. It is a pure function:
//! inputs are borrowed immutably, nothing is written anywhere, and the same
//! inputs always produce the same report.
//!
//! For a vehicle `V`:
//!
//! ```text
//! fixed_cost(V)       = emi + insurance + tax + pucc + permit
//! variable_cost(V)    = Σ trips(V) (fuel + bata + toll + rto + misc)
//! maintenance_cost(V) = Σ costs(V) maintenance_charge
//! total_hire(V)       = Σ trips(V) hire
//! profit(V)           = total_hire - fixed_cost - variable_cost - maintenance_cost
//! ```
//!
//! Missing amounts count as zero.
//!
//! # Example
//!
//! ```
//! use fleetledger::model::{OperationalCost, Trip, Vehicle};
//! use fleetledger::profit::aggregate;
//!
//! let vehicle = Vehicle { id: Some(1), emi: Some(1000.0), ..Vehicle::default() };
//! let trip = Trip { vehicle_id: 1, hire: Some(4000.0), fuel: Some(500.0), ..Trip::default() };
//! let cost = OperationalCost::new(1, 250.0);
//!
//! let report = aggregate(&[vehicle], &[trip], &[cost]);
//! assert_eq!(report.vehicles[0].profit, 2250.0);
//! assert_eq!(report.totals.profitable_count, 1);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{OperationalCost, Trip, Vehicle};

/// Derived profit figures for one vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfit {
    /// Identifier of the vehicle.
    pub vehicle_id: Option<i64>,
    /// Registration number of the vehicle.
    pub vehicle_number: String,
    /// Number of trips run by the vehicle.
    pub trip_count: usize,
    /// Sum of hire over the vehicle's trips.
    pub total_hire: f64,
    /// Sum of the vehicle's fixed costs.
    pub fixed_cost: f64,
    /// Sum of trip expenses (fuel, bata, toll, RTO, misc).
    pub variable_cost: f64,
    /// Fuel share of `variable_cost`.
    pub fuel_cost: f64,
    /// Sum of maintenance charges.
    pub maintenance_cost: f64,
    /// Hire minus every cost.
    pub profit: f64,
}

impl VehicleProfit {
    /// Whether the vehicle made money.
    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.profit > 0.0
    }

    /// Whether the vehicle lost money.
    #[must_use]
    pub fn is_losing(&self) -> bool {
        self.profit < 0.0
    }
}

/// Fleet-wide sums over every [`VehicleProfit`].
///
/// A vehicle whose profit is exactly zero is counted in neither
/// `profitable_count` nor `losing_count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetTotals {
    /// Number of vehicles in the report.
    pub vehicle_count: usize,
    /// Sum of hire across the fleet.
    pub total_hire: f64,
    /// Sum of fixed costs across the fleet.
    pub total_fixed_cost: f64,
    /// Sum of trip expenses across the fleet.
    pub total_variable_cost: f64,
    /// Sum of maintenance charges across the fleet.
    pub total_maintenance_cost: f64,
    /// Sum of per-vehicle profit.
    pub total_profit: f64,
    /// Vehicles with profit above zero.
    pub profitable_count: usize,
    /// Vehicles with profit below zero.
    pub losing_count: usize,
}

/// Result of a profit aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitReport {
    /// One entry per input vehicle, in input order.
    pub vehicles: Vec<VehicleProfit>,
    /// Fleet-wide sums.
    pub totals: FleetTotals,
}

impl ProfitReport {
    /// Whether the report covers no vehicles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct TripTotals {
    count: usize,
    hire: f64,
    expense: f64,
    fuel: f64,
}

/// Aggregate vehicles, trips and maintenance charges into a profit report.
///
/// Trips and charges are matched to vehicles by `vehicle_id`. Records that
/// reference no vehicle in `vehicles` contribute nothing. Never fails: empty
/// inputs give an empty report with zero totals.
#[must_use]
pub fn aggregate(
    vehicles: &[Vehicle],
    trips: &[Trip],
    costs: &[OperationalCost],
) -> ProfitReport {
    let mut trip_totals: HashMap<i64, TripTotals> = HashMap::new();
    for trip in trips {
        let entry = trip_totals.entry(trip.vehicle_id).or_default();
        entry.count += 1;
        entry.hire += trip.hire();
        entry.expense += trip.expense();
        entry.fuel += trip.fuel();
    }

    let mut maintenance: HashMap<i64, f64> = HashMap::new();
    for cost in costs {
        *maintenance.entry(cost.vehicle_id).or_default() += cost.maintenance_charge();
    }

    log_orphans(vehicles, trips, costs);

    let mut totals = FleetTotals::default();
    let mut rows = Vec::with_capacity(vehicles.len());

    for vehicle in vehicles {
        let trip_sum = vehicle
            .id
            .and_then(|id| trip_totals.get(&id).copied())
            .unwrap_or_default();
        let maintenance_cost = vehicle
            .id
            .and_then(|id| maintenance.get(&id).copied())
            .unwrap_or_default();
        let fixed_cost = vehicle.fixed_cost();
        let profit = trip_sum.hire - fixed_cost - trip_sum.expense - maintenance_cost;

        let row = VehicleProfit {
            vehicle_id: vehicle.id,
            vehicle_number: vehicle.vehicle_number.clone(),
            trip_count: trip_sum.count,
            total_hire: trip_sum.hire,
            fixed_cost,
            variable_cost: trip_sum.expense,
            fuel_cost: trip_sum.fuel,
            maintenance_cost,
            profit,
        };

        totals.vehicle_count += 1;
        totals.total_hire += row.total_hire;
        totals.total_fixed_cost += row.fixed_cost;
        totals.total_variable_cost += row.variable_cost;
        totals.total_maintenance_cost += row.maintenance_cost;
        totals.total_profit += row.profit;
        if row.is_profitable() {
            totals.profitable_count += 1;
        } else if row.is_losing() {
            totals.losing_count += 1;
        }

        rows.push(row);
    }

    debug!(
        vehicles = totals.vehicle_count,
        trips = trips.len(),
        costs = costs.len(),
        total_profit = totals.total_profit,
        "aggregated fleet profit"
    );

    ProfitReport {
        vehicles: rows,
        totals,
    }
}

fn log_orphans(vehicles: &[Vehicle], trips: &[Trip], costs: &[OperationalCost]) {
    let known: HashSet<i64> = vehicles.iter().filter_map(|v| v.id).collect();
    let orphan_trips = trips
        .iter()
        .filter(|t| !known.contains(&t.vehicle_id))
        .count();
    let orphan_costs = costs
        .iter()
        .filter(|c| !known.contains(&c.vehicle_id))
        .count();
    if orphan_trips > 0 || orphan_costs > 0 {
        debug!(
            orphan_trips,
            orphan_costs, "records reference vehicles outside the snapshot"
        );
    }
}
