use serde::Serialize;
use tracing::debug;

use backpacker_common::{normalize_longitude_delta, Job, Location};

use crate::rules::CIRCUMNAVIGATION_DEGREES;

/// A job the traveler completed and what it paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub job: Job,
    pub earnings: i64,
}

/// The traveler's ledger: money, position, route and work history.
///
/// `total_longitude_change` is the signed sum of every move's longitude
/// delta, each taken the short way round the globe. Reaching 360 degrees
/// in either direction and standing in the start city wins the game.
#[derive(Debug, Clone, Serialize)]
pub struct Journal {
    current_money: i64,
    start_location: Location,
    current_location: Location,
    total_longitude_change: f64,
    visited_locations: Vec<Location>,
    job_history: Vec<JobRecord>,
}

impl Journal {
    pub fn new(starting_money: i64, start: Location) -> Self {
        Self {
            current_money: starting_money,
            start_location: start.clone(),
            current_location: start.clone(),
            total_longitude_change: 0.0,
            visited_locations: vec![start],
            job_history: Vec::new(),
        }
    }

    pub fn current_money(&self) -> i64 {
        self.current_money
    }

    pub fn start_location(&self) -> &Location {
        &self.start_location
    }

    pub fn current_location(&self) -> &Location {
        &self.current_location
    }

    pub fn total_longitude_change(&self) -> f64 {
        self.total_longitude_change
    }

    pub fn visited_locations(&self) -> &[Location] {
        &self.visited_locations
    }

    pub fn job_history(&self) -> &[JobRecord] {
        &self.job_history
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        cost <= self.current_money
    }

    /// Add `delta` (negative to spend). The balance may go to zero or below.
    pub fn update_money(&mut self, delta: i64) {
        self.current_money += delta;
    }

    /// Move from `old` to `new`, accumulating the normalized longitude delta.
    pub fn update_location(&mut self, new: Location, old: &Location) {
        let delta = normalize_longitude_delta(new.longitude - old.longitude);
        self.total_longitude_change += delta;

        debug!(
            from = %old,
            to = %new,
            delta,
            total = self.total_longitude_change,
            "Journal location updated"
        );

        self.current_location = new.clone();
        self.visited_locations.push(new);
    }

    pub fn record_job(&mut self, job: Job, earnings: i64) {
        self.job_history.push(JobRecord { job, earnings });
    }

    /// Full circle travelled and back in the city the journey began in.
    ///
    /// Cities are compared by name only. A journey that never left the
    /// start city cannot win.
    pub fn has_won(&self) -> bool {
        self.visited_locations.len() > 1
            && self.total_longitude_change.abs() >= CIRCUMNAVIGATION_DEGREES
            && self.current_location.city == self.start_location.city
    }

    /// Share of a full circle covered so far, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        (self.total_longitude_change.abs() / CIRCUMNAVIGATION_DEGREES * 100.0).min(100.0)
    }
}
