//! Activity models.
//!
//! An activity is an edge of an event-activity network: a duration
//! constraint between two events. A feasible timetable must place the
//! elapsed time from source to target inside the activity's
//! `[lower_bound, upper_bound]` window — modulo the period for periodic
//! activities, as plain absolute time for aperiodic ones.
//!
//! Bounds are expressed in absolute time units, never pre-reduced modulo
//! the period, so a HEADWAY or SYNC window spanning a period wrap may have
//! `upper_bound` beyond the period length.
//!
//! # Reference
//! Liebchen & Möhring (2007), "The modeling power of the periodic event
//! scheduling problem"

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{Edge, Identifiable};

/// What an activity constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityType {
    /// A vehicle driving between consecutive stops of its line.
    Drive,
    /// A vehicle dwelling at a stop between arrival and departure.
    Wait,
    /// Passengers transferring between lines at a stop.
    Change,
    /// Minimum separation between vehicles sharing infrastructure.
    Headway,
    /// A vehicle turning around to serve the opposite direction.
    Turnaround,
    /// Synchronization between events fixed relative to each other.
    Sync,
}

/// An activity's bounds are inconsistent: `lower > upper`, or a bound is
/// negative.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("activity {id}: invalid bounds [{lower}, {upper}]")]
pub struct BoundError {
    /// Id of the offending activity.
    pub id: i64,
    /// Rejected lower bound.
    pub lower: f64,
    /// Rejected upper bound.
    pub upper: f64,
}

/// An edge of the periodic event-activity network.
///
/// A periodic timetable π is feasible for this activity iff some value
/// congruent to `π(target) − π(source)` modulo the period lies in
/// `[lower_bound, upper_bound]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicActivity {
    /// Unique activity identifier within one periodic network.
    pub id: i64,
    /// Kind of constraint this activity models.
    pub activity_type: ActivityType,
    /// Source periodic event id.
    pub source_event_id: i64,
    /// Target periodic event id.
    pub target_event_id: i64,
    /// Minimum duration, in time units (≥ 0).
    pub lower_bound: f64,
    /// Maximum duration, in time units (≥ lower bound; may exceed the period).
    pub upper_bound: f64,
    /// Passengers using this activity (non-negative).
    pub passenger_count: f64,
}

impl PeriodicActivity {
    /// Creates an activity with no passengers.
    pub fn new(
        id: i64,
        activity_type: ActivityType,
        source_event_id: i64,
        target_event_id: i64,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Self {
        Self {
            id,
            activity_type,
            source_event_id,
            target_event_id,
            lower_bound,
            upper_bound,
            passenger_count: 0.0,
        }
    }

    /// Sets the passenger count.
    pub fn with_passengers(mut self, passenger_count: f64) -> Self {
        self.passenger_count = passenger_count;
        self
    }

    /// Rejects `lower > upper` and negative bounds.
    pub fn check_bounds(&self) -> Result<(), BoundError> {
        if self.lower_bound < 0.0 || self.upper_bound < 0.0 || self.lower_bound > self.upper_bound
        {
            return Err(BoundError {
                id: self.id,
                lower: self.lower_bound,
                upper: self.upper_bound,
            });
        }
        Ok(())
    }

    /// Duration `(target_time − source_time) mod period`, normalized into
    /// `[0, period)`. `period` must be positive.
    pub fn periodic_duration(&self, source_time: i64, target_time: i64, period: i64) -> i64 {
        debug_assert!(period > 0);
        (target_time - source_time).rem_euclid(period)
    }

    /// The normalized duration lifted by whole periods to the smallest
    /// congruent value ≥ `lower_bound` — the duration the timetable
    /// actually models for this activity.
    pub fn lifted_duration(&self, source_time: i64, target_time: i64, period: i64) -> i64 {
        let normalized = self.periodic_duration(source_time, target_time, period);
        if (normalized as f64) < self.lower_bound {
            normalized
                + period
                    * ((self.lower_bound - normalized as f64) / period as f64).ceil() as i64
        } else {
            normalized
        }
    }

    /// Whether the given event times satisfy this activity's bounds: the
    /// [lifted duration](Self::lifted_duration) must not exceed `upper_bound`.
    pub fn is_feasible(&self, source_time: i64, target_time: i64, period: i64) -> bool {
        self.lifted_duration(source_time, target_time, period) as f64 <= self.upper_bound
    }
}

impl Identifiable for PeriodicActivity {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Edge for PeriodicActivity {
    fn source_id(&self) -> i64 {
        self.source_event_id
    }

    fn target_id(&self) -> i64 {
        self.target_event_id
    }
}

/// An edge of the rolled-out (time-expanded) event-activity network.
///
/// The duration check is plain absolute time, no modulo. As with events,
/// `periodic_activity_id` is provenance only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AperiodicActivity {
    /// Unique activity identifier within one aperiodic network.
    pub id: i64,
    /// Originating periodic activity, if any.
    pub periodic_activity_id: Option<i64>,
    /// Kind of constraint this activity models.
    pub activity_type: ActivityType,
    /// Source aperiodic event id.
    pub source_event_id: i64,
    /// Target aperiodic event id.
    pub target_event_id: i64,
    /// Minimum duration, in time units (≥ 0).
    pub lower_bound: i64,
    /// Maximum duration, in time units (≥ lower bound).
    pub upper_bound: i64,
    /// Passengers using this activity (non-negative).
    pub passenger_count: f64,
}

impl AperiodicActivity {
    /// Creates a freestanding activity (no periodic provenance, no passengers).
    pub fn new(
        id: i64,
        activity_type: ActivityType,
        source_event_id: i64,
        target_event_id: i64,
        lower_bound: i64,
        upper_bound: i64,
    ) -> Self {
        Self {
            id,
            periodic_activity_id: None,
            activity_type,
            source_event_id,
            target_event_id,
            lower_bound,
            upper_bound,
            passenger_count: 0.0,
        }
    }

    /// Records the periodic activity this one was rolled out from.
    pub fn with_periodic_activity(mut self, periodic_activity_id: i64) -> Self {
        self.periodic_activity_id = Some(periodic_activity_id);
        self
    }

    /// Sets the passenger count.
    pub fn with_passengers(mut self, passenger_count: f64) -> Self {
        self.passenger_count = passenger_count;
        self
    }

    /// Rejects `lower > upper` and negative bounds.
    pub fn check_bounds(&self) -> Result<(), BoundError> {
        if self.lower_bound < 0 || self.lower_bound > self.upper_bound {
            return Err(BoundError {
                id: self.id,
                lower: self.lower_bound as f64,
                upper: self.upper_bound as f64,
            });
        }
        Ok(())
    }

    /// Absolute duration `target_time − source_time`.
    pub fn duration(&self, source_time: i64, target_time: i64) -> i64 {
        target_time - source_time
    }

    /// Whether the given absolute event times satisfy this activity's bounds.
    pub fn is_feasible(&self, source_time: i64, target_time: i64) -> bool {
        let duration = self.duration(source_time, target_time);
        self.lower_bound <= duration && duration <= self.upper_bound
    }
}

impl Identifiable for AperiodicActivity {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Edge for AperiodicActivity {
    fn source_id(&self) -> i64 {
        self.source_event_id
    }

    fn target_id(&self) -> i64 {
        self.target_event_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait(lower: f64, upper: f64) -> PeriodicActivity {
        PeriodicActivity::new(1, ActivityType::Wait, 1, 2, lower, upper)
    }

    #[test]
    fn test_bounds_accepted() {
        assert!(wait(2.0, 5.0).check_bounds().is_ok());
        assert!(wait(0.0, 0.0).check_bounds().is_ok());
    }

    #[test]
    fn test_bounds_rejected() {
        let err = wait(5.0, 2.0).check_bounds().unwrap_err();
        assert_eq!(err.id, 1);
        assert_eq!((err.lower, err.upper), (5.0, 2.0));
        assert!(wait(-1.0, 2.0).check_bounds().is_err());
    }

    #[test]
    fn test_periodic_duration_normalizes() {
        let a = wait(0.0, 60.0);
        assert_eq!(a.periodic_duration(10, 25, 60), 15);
        assert_eq!(a.periodic_duration(50, 10, 60), 20); // wraps
        assert_eq!(a.periodic_duration(10, 250, 60), 0); // many periods
    }

    #[test]
    fn test_feasibility_inside_and_outside_window() {
        // period 60, times 10 → 25, duration 15
        let inside = wait(10.0, 20.0);
        assert!(inside.is_feasible(10, 25, 60));

        let outside = wait(20.0, 25.0);
        assert!(!outside.is_feasible(10, 25, 60));
    }

    #[test]
    fn test_feasibility_window_spanning_wrap() {
        // headway window beyond the period: duration 5 lifts to 65 ∈ [50, 70]
        let headway = PeriodicActivity::new(3, ActivityType::Headway, 1, 2, 50.0, 70.0);
        assert!(headway.is_feasible(0, 5, 60));
        // but 45 lifts to 105 ∉ [50, 70]
        assert!(!headway.is_feasible(0, 45, 60));
        // and 55 fits without lifting
        assert!(headway.is_feasible(0, 55, 60));
    }

    #[test]
    fn test_lifted_duration() {
        let headway = PeriodicActivity::new(3, ActivityType::Headway, 1, 2, 50.0, 70.0);
        assert_eq!(headway.lifted_duration(0, 5, 60), 65);
        assert_eq!(headway.lifted_duration(0, 55, 60), 55);
        // exact congruence at the lower bound needs no extra period
        let sync = PeriodicActivity::new(4, ActivityType::Sync, 1, 2, 65.0, 70.0);
        assert_eq!(sync.lifted_duration(0, 5, 60), 65);
    }

    #[test]
    fn test_feasibility_at_bound_edges() {
        let a = wait(15.0, 15.0);
        assert!(a.is_feasible(10, 25, 60));
        assert!(!a.is_feasible(10, 26, 60));
    }

    #[test]
    fn test_aperiodic_duration_is_absolute() {
        let a = AperiodicActivity::new(1, ActivityType::Drive, 1, 2, 10, 20);
        assert_eq!(a.duration(100, 115), 15);
        assert!(a.is_feasible(100, 115));
        // 75 time units would be feasible modulo 60, but not absolutely
        assert!(!a.is_feasible(100, 175));
        assert!(!a.is_feasible(100, 105));
    }

    #[test]
    fn test_aperiodic_bounds_check() {
        let a = AperiodicActivity::new(2, ActivityType::Change, 1, 2, 7, 3);
        assert!(a.check_bounds().is_err());
    }

    #[test]
    fn test_wire_tokens_match_external_contract() {
        assert_eq!(
            serde_json::to_string(&ActivityType::Turnaround).unwrap(),
            "\"TURNAROUND\""
        );
        let parsed: ActivityType = serde_json::from_str("\"HEADWAY\"").unwrap();
        assert_eq!(parsed, ActivityType::Headway);
    }
}
