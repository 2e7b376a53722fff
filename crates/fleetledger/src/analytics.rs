//! Top-N lists for the dashboard view.
//!
//! Every list filters, stable-sorts by one field, then truncates. Ties keep
//! their input order. Inputs are only borrowed; results are new vectors of
//! references into them.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::Trip;
use crate::profit::{ProfitReport, VehicleProfit};

/// Default length of every top-N list.
pub const DEFAULT_TOP_N: usize = 5;

fn top_by<'a, T, F, K>(items: &'a [T], n: usize, keep: F, cmp: K) -> Vec<&'a T>
where
    F: Fn(&T) -> bool,
    K: Fn(&T, &T) -> Ordering,
{
    let mut selected: Vec<&T> = items.iter().filter(|item| keep(*item)).collect();
    // `sort_by` is stable, so equal keys keep their input order
    selected.sort_by(|a, b| cmp(*a, *b));
    selected.truncate(n);
    selected
}

/// Vehicles running at a loss, biggest loss first.
#[must_use]
pub fn loss_leaders(rows: &[VehicleProfit], n: usize) -> Vec<&VehicleProfit> {
    top_by(rows, n, VehicleProfit::is_losing, |a, b| {
        a.profit.total_cmp(&b.profit)
    })
}

/// Profitable vehicles with the thinnest margin first.
#[must_use]
pub fn least_profitable(rows: &[VehicleProfit], n: usize) -> Vec<&VehicleProfit> {
    top_by(rows, n, VehicleProfit::is_profitable, |a, b| {
        a.profit.total_cmp(&b.profit)
    })
}

/// Vehicles with the largest maintenance spend.
#[must_use]
pub fn highest_maintenance(rows: &[VehicleProfit], n: usize) -> Vec<&VehicleProfit> {
    top_by(
        rows,
        n,
        |r| r.maintenance_cost > 0.0,
        |a, b| b.maintenance_cost.total_cmp(&a.maintenance_cost),
    )
}

/// Vehicles with the largest fuel spend.
#[must_use]
pub fn highest_fuel(rows: &[VehicleProfit], n: usize) -> Vec<&VehicleProfit> {
    top_by(
        rows,
        n,
        |r| r.fuel_cost > 0.0,
        |a, b| b.fuel_cost.total_cmp(&a.fuel_cost),
    )
}

/// Most recently entered trips.
#[must_use]
pub fn latest_submissions(trips: &[Trip], n: usize) -> Vec<&Trip> {
    top_by(trips, n, |_| true, |a, b| b.created_at.cmp(&a.created_at))
}

/// Creation time of the newest trip, if any.
#[must_use]
pub fn last_updated(trips: &[Trip]) -> Option<DateTime<Utc>> {
    trips.iter().map(|t| t.created_at).max()
}

/// All dashboard lists computed at once.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard<'a> {
    /// See [`loss_leaders`].
    pub loss_leaders: Vec<&'a VehicleProfit>,
    /// See [`least_profitable`].
    pub least_profitable: Vec<&'a VehicleProfit>,
    /// See [`highest_maintenance`].
    pub highest_maintenance: Vec<&'a VehicleProfit>,
    /// See [`highest_fuel`].
    pub highest_fuel: Vec<&'a VehicleProfit>,
    /// See [`latest_submissions`].
    pub latest_submissions: Vec<&'a Trip>,
    /// See [`last_updated`].
    pub last_updated: Option<DateTime<Utc>>,
}

impl<'a> Dashboard<'a> {
    /// Build every list from a report and the trips it was computed from.
    #[must_use]
    pub fn build(report: &'a ProfitReport, trips: &'a [Trip], n: usize) -> Self {
        Self {
            loss_leaders: loss_leaders(&report.vehicles, n),
            least_profitable: least_profitable(&report.vehicles, n),
            highest_maintenance: highest_maintenance(&report.vehicles, n),
            highest_fuel: highest_fuel(&report.vehicles, n),
            latest_submissions: latest_submissions(trips, n),
            last_updated: last_updated(trips),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(id: i64, profit: f64, maintenance: f64, fuel: f64) -> VehicleProfit {
        VehicleProfit {
            vehicle_id: Some(id),
            vehicle_number: format!("V{id}"),
            profit,
            maintenance_cost: maintenance,
            fuel_cost: fuel,
            ..VehicleProfit::default()
        }
    }

    fn ids(rows: &[&VehicleProfit]) -> Vec<i64> {
        rows.iter().filter_map(|r| r.vehicle_id).collect()
    }

    fn trip_at(id: i64, hour: u32) -> Trip {
        Trip {
            id: Some(id),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            ..Trip::default()
        }
    }

    #[test]
    fn test_loss_leaders_sorted_by_biggest_loss() {
        let rows = [
            row(1, -100.0, 0.0, 0.0),
            row(2, 500.0, 0.0, 0.0),
            row(3, -900.0, 0.0, 0.0),
            row(4, 0.0, 0.0, 0.0),
        ];
        assert_eq!(ids(&loss_leaders(&rows, 5)), vec![3, 1]);
    }

    #[test]
    fn test_least_profitable_excludes_break_even() {
        let rows = [
            row(1, 300.0, 0.0, 0.0),
            row(2, 0.0, 0.0, 0.0),
            row(3, 100.0, 0.0, 0.0),
            row(4, -50.0, 0.0, 0.0),
        ];
        assert_eq!(ids(&least_profitable(&rows, 5)), vec![3, 1]);
    }

    #[test]
    fn test_highest_maintenance_and_fuel() {
        let rows = [
            row(1, 0.0, 100.0, 0.0),
            row(2, 0.0, 0.0, 50.0),
            row(3, 0.0, 700.0, 900.0),
        ];
        assert_eq!(ids(&highest_maintenance(&rows, 5)), vec![3, 1]);
        assert_eq!(ids(&highest_fuel(&rows, 5)), vec![3, 2]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let rows = [
            row(1, -10.0, 5.0, 0.0),
            row(2, -10.0, 5.0, 0.0),
            row(3, -10.0, 5.0, 0.0),
        ];
        assert_eq!(ids(&loss_leaders(&rows, 5)), vec![1, 2, 3]);
        assert_eq!(ids(&highest_maintenance(&rows, 2)), vec![1, 2]);
    }

    #[test]
    fn test_truncates_to_n() {
        let rows: Vec<_> = (1..=10).map(|i| row(i, -(i as f64), 0.0, 0.0)).collect();
        assert_eq!(ids(&loss_leaders(&rows, 3)), vec![10, 9, 8]);
        assert!(loss_leaders(&rows, 0).is_empty());
    }

    #[test]
    fn test_inputs_are_not_reordered() {
        let rows = vec![row(1, -1.0, 0.0, 0.0), row(2, -5.0, 0.0, 0.0)];
        let before = rows.clone();
        let _ = loss_leaders(&rows, 5);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_latest_submissions_and_last_updated() {
        let trips = [trip_at(1, 8), trip_at(2, 12), trip_at(3, 10)];
        let latest: Vec<_> = latest_submissions(&trips, 2)
            .iter()
            .filter_map(|t| t.id)
            .collect();
        assert_eq!(latest, vec![2, 3]);
        assert_eq!(last_updated(&trips), Some(trips[1].created_at));
        assert_eq!(last_updated(&[]), None);
    }

    #[test]
    fn test_dashboard_build() {
        let report = ProfitReport {
            vehicles: vec![row(1, -10.0, 20.0, 30.0), row(2, 10.0, 0.0, 0.0)],
            ..ProfitReport::default()
        };
        let trips = [trip_at(1, 9)];
        let dashboard = Dashboard::build(&report, &trips, DEFAULT_TOP_N);

        assert_eq!(ids(&dashboard.loss_leaders), vec![1]);
        assert_eq!(ids(&dashboard.least_profitable), vec![2]);
        assert_eq!(dashboard.latest_submissions.len(), 1);
        assert!(dashboard.last_updated.is_some());
    }
}
