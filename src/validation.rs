//! Validation for event-activity networks.
//!
//! Pure queries over fully built networks and timetables. Detects:
//! - Inconsistent activity bounds
//! - Timetables violating activity duration windows (periodic and absolute)
//! - Negative passenger counts
//! - Aperiodic provenance ids that resolve to nothing in the periodic network
//!
//! Insertion-time integrity (duplicate ids, missing incident nodes) is
//! enforced by the graph itself and surfaces as
//! [`GraphError`](crate::graph::GraphError) the moment the offending object
//! is added; the checks here cover everything that only becomes decidable
//! once a whole network, a timetable, or both networks are in hand.

use crate::graph::Graph;
use crate::models::{
    AperiodicActivity, AperiodicEvent, PeriodicActivity, PeriodicEvent, PeriodicTimetable,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending object id.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An activity's lower bound exceeds its upper bound, or a bound is negative.
    InvalidBounds,
    /// An event or activity carries a negative passenger count.
    NegativePassengerCount,
    /// A feasibility check met an event with no timetable entry.
    MissingTime,
    /// An activity's duration falls outside its bounds.
    InfeasibleDuration,
    /// An aperiodic event references a periodic event that doesn't exist.
    UnresolvedEventReference,
    /// An aperiodic activity references a periodic activity that doesn't exist.
    UnresolvedActivityReference,
    /// An aperiodic activity's endpoints don't descend from its periodic
    /// activity's endpoints.
    InconsistentRollout,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the intrinsic invariants of a periodic network.
///
/// Checks:
/// 1. Every activity has consistent, non-negative bounds
/// 2. No event or activity carries a negative passenger count
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues,
/// ordered by object id.
pub fn validate_periodic_network<G>(graph: &G) -> ValidationResult
where
    G: Graph<PeriodicEvent, PeriodicActivity>,
{
    let mut errors = Vec::new();

    let mut events: Vec<&PeriodicEvent> = graph.nodes().collect();
    events.sort_by_key(|event| event.id);
    for event in events {
        if event.passenger_count < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePassengerCount,
                format!(
                    "Event {} has negative passenger count {}",
                    event.id, event.passenger_count
                ),
            ));
        }
    }

    let mut activities: Vec<&PeriodicActivity> = graph.edges().collect();
    activities.sort_by_key(|activity| activity.id);
    for activity in activities {
        if let Err(err) = activity.check_bounds() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBounds,
                err.to_string(),
            ));
        }
        if activity.passenger_count < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePassengerCount,
                format!(
                    "Activity {} has negative passenger count {}",
                    activity.id, activity.passenger_count
                ),
            ));
        }
    }

    finish(errors)
}

/// Checks a candidate periodic timetable against every activity's duration
/// window, modulo the timetable's period.
///
/// A periodic network may legitimately exist before any timetable is
/// assigned, so this is a standalone query rather than an insertion-time
/// rule. Events without a timetable entry are reported as
/// [`MissingTime`](ValidationErrorKind::MissingTime) and their activities
/// skipped.
pub fn validate_periodic_feasibility<G>(graph: &G, timetable: &PeriodicTimetable) -> ValidationResult
where
    G: Graph<PeriodicEvent, PeriodicActivity>,
{
    let mut errors = Vec::new();
    let period = timetable.period_length();

    let mut activities: Vec<&PeriodicActivity> = graph.edges().collect();
    activities.sort_by_key(|activity| activity.id);
    for activity in activities {
        let times = (
            timetable.get(activity.source_event_id),
            timetable.get(activity.target_event_id),
        );
        let (Some(source_time), Some(target_time)) = times else {
            for (event_id, time) in [
                (activity.source_event_id, times.0),
                (activity.target_event_id, times.1),
            ] {
                if time.is_none() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::MissingTime,
                        format!("Event {} of activity {} has no timetable entry", event_id, activity.id),
                    ));
                }
            }
            continue;
        };
        if !activity.is_feasible(source_time, target_time, period) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InfeasibleDuration,
                format!(
                    "Activity {} has periodic duration {} outside [{}, {}]",
                    activity.id,
                    activity.periodic_duration(source_time, target_time, period),
                    activity.lower_bound,
                    activity.upper_bound
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates an aperiodic network against its own stored event times.
///
/// Checks bounds consistency, passenger counts, and the absolute duration
/// window of every activity (no modulo).
pub fn validate_aperiodic_network<G>(graph: &G) -> ValidationResult
where
    G: Graph<AperiodicEvent, AperiodicActivity>,
{
    let mut errors = Vec::new();

    let mut events: Vec<&AperiodicEvent> = graph.nodes().collect();
    events.sort_by_key(|event| event.id);
    for event in events {
        if event.passenger_count < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePassengerCount,
                format!(
                    "Event {} has negative passenger count {}",
                    event.id, event.passenger_count
                ),
            ));
        }
    }

    let mut activities: Vec<&AperiodicActivity> = graph.edges().collect();
    activities.sort_by_key(|activity| activity.id);
    for activity in activities {
        if let Err(err) = activity.check_bounds() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBounds,
                err.to_string(),
            ));
        }
        // incident events are guaranteed present by the graph's insertion checks
        let (Some(source), Some(target)) = (
            graph.node(activity.source_event_id),
            graph.node(activity.target_event_id),
        ) else {
            continue;
        };
        if !activity.is_feasible(source.time, target.time) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InfeasibleDuration,
                format!(
                    "Activity {} has duration {} outside [{}, {}]",
                    activity.id,
                    activity.duration(source.time, target.time),
                    activity.lower_bound,
                    activity.upper_bound
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates the provenance links of a rolled-out network against the
/// periodic network it claims to descend from.
///
/// Only decidable while both networks are held simultaneously; once the
/// periodic network is discarded, provenance ids become plain labels.
/// Freestanding objects (provenance `None`) are always legal.
pub fn validate_rollout_references<GP, GA>(periodic: &GP, aperiodic: &GA) -> ValidationResult
where
    GP: Graph<PeriodicEvent, PeriodicActivity>,
    GA: Graph<AperiodicEvent, AperiodicActivity>,
{
    let mut errors = Vec::new();

    let mut events: Vec<&AperiodicEvent> = aperiodic.nodes().collect();
    events.sort_by_key(|event| event.id);
    for event in events {
        if let Some(periodic_event_id) = event.periodic_event_id {
            if periodic.node(periodic_event_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnresolvedEventReference,
                    format!(
                        "Event {} references unknown periodic event {}",
                        event.id, periodic_event_id
                    ),
                ));
            }
        }
    }

    let mut activities: Vec<&AperiodicActivity> = aperiodic.edges().collect();
    activities.sort_by_key(|activity| activity.id);
    for activity in activities {
        let Some(periodic_activity_id) = activity.periodic_activity_id else {
            continue;
        };
        let Some(original) = periodic.edge(periodic_activity_id) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnresolvedActivityReference,
                format!(
                    "Activity {} references unknown periodic activity {}",
                    activity.id, periodic_activity_id
                ),
            ));
            continue;
        };
        let source_origin = aperiodic
            .node(activity.source_event_id)
            .and_then(|event| event.periodic_event_id);
        let target_origin = aperiodic
            .node(activity.target_event_id)
            .and_then(|event| event.periodic_event_id);
        if source_origin != Some(original.source_event_id)
            || target_origin != Some(original.target_event_id)
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InconsistentRollout,
                format!(
                    "Activity {} does not connect replicas of periodic activity {}'s endpoints",
                    activity.id, periodic_activity_id
                ),
            ));
        }
    }

    finish(errors)
}
