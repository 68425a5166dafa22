//! Event models.
//!
//! An event is a timed node of an event-activity network: a vehicle of a
//! line arriving at or departing from a stop. Periodic events carry no time
//! of their own (times live in the periodic timetable); aperiodic events are
//! dated replicas that carry their absolute time directly and remember which
//! periodic event they were rolled out from.
//!
//! # Reference
//! Serafini & Ukovich (1989), "A mathematical model for periodic scheduling
//! problems"

use serde::{Deserialize, Serialize};

use crate::graph::Identifiable;

/// What happens at an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    /// A vehicle arrives at a stop.
    Arrival,
    /// A vehicle departs from a stop.
    Departure,
    /// A fixed anchor event, pinned by external timetable constraints.
    Fix,
}

/// Traversal direction of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineDirection {
    /// Along the line's stop sequence.
    #[serde(rename = ">")]
    Forwards,
    /// Against the line's stop sequence.
    #[serde(rename = "<")]
    Backwards,
}

/// A node of the periodic event-activity network.
///
/// Identity is id-based; times are assigned externally through a
/// [`PeriodicTimetable`](crate::models::PeriodicTimetable), modulo the
/// network's period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicEvent {
    /// Unique event identifier within one periodic network.
    pub id: i64,
    /// Stop where this event takes place.
    pub stop_id: i64,
    /// Arrival, departure, or fixed anchor.
    pub event_type: EventType,
    /// Line this event belongs to.
    pub line_id: i64,
    /// Passengers using this event (non-negative).
    pub passenger_count: f64,
    /// Line traversal direction.
    pub direction: LineDirection,
    /// Which repetition of the line's frequency this event belongs to (0-based).
    pub line_frequency_repetition: i64,
}

impl PeriodicEvent {
    /// Creates an event with no passengers, forward direction, repetition 0.
    pub fn new(id: i64, stop_id: i64, event_type: EventType, line_id: i64) -> Self {
        Self {
            id,
            stop_id,
            event_type,
            line_id,
            passenger_count: 0.0,
            direction: LineDirection::Forwards,
            line_frequency_repetition: 0,
        }
    }

    /// Sets the passenger count.
    pub fn with_passengers(mut self, passenger_count: f64) -> Self {
        self.passenger_count = passenger_count;
        self
    }

    /// Sets the traversal direction.
    pub fn with_direction(mut self, direction: LineDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the frequency repetition index.
    pub fn with_repetition(mut self, line_frequency_repetition: i64) -> Self {
        self.line_frequency_repetition = line_frequency_repetition;
        self
    }
}

impl Identifiable for PeriodicEvent {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A node of the rolled-out (time-expanded) event-activity network.
///
/// Carries its absolute time directly. `periodic_event_id` is provenance,
/// not a structural pointer: the aperiodic network owns its objects and
/// stays valid after the periodic network is discarded. `None` marks a
/// freestanding event that was not rolled out from any periodic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AperiodicEvent {
    /// Unique event identifier within one aperiodic network. Numbered
    /// independently of periodic ids.
    pub id: i64,
    /// Originating periodic event, if any.
    pub periodic_event_id: Option<i64>,
    /// Stop where this event takes place.
    pub stop_id: i64,
    /// Arrival, departure, or fixed anchor.
    pub event_type: EventType,
    /// Absolute time, not reduced modulo any period; may span many periods.
    pub time: i64,
    /// Passengers using this event (non-negative).
    pub passenger_count: f64,
}

impl AperiodicEvent {
    /// Creates a freestanding event (no periodic provenance).
    pub fn new(id: i64, stop_id: i64, event_type: EventType, time: i64) -> Self {
        Self {
            id,
            periodic_event_id: None,
            stop_id,
            event_type,
            time,
            passenger_count: 0.0,
        }
    }

    /// Records the periodic event this one was rolled out from.
    pub fn with_periodic_event(mut self, periodic_event_id: i64) -> Self {
        self.periodic_event_id = Some(periodic_event_id);
        self
    }

    /// Sets the passenger count.
    pub fn with_passengers(mut self, passenger_count: f64) -> Self {
        self.passenger_count = passenger_count;
        self
    }
}

impl Identifiable for AperiodicEvent {
    fn id(&self) -> i64 {
        self.id
    }
}
