//! Timetable models.
//!
//! A timetable maps event ids to times. [`PeriodicTimetable`] values are
//! conceptually taken modulo the period length; the map itself stores
//! whatever integer the producer inserts — some producers store pre-reduced
//! times, others store raw times reduced lazily at comparison. [`Timetable`]
//! holds absolute rolled-out times and never reduces.
//!
//! The only lifecycle distinction is entry present vs. entry absent: an
//! event without an entry has not been scheduled yet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Assignment of periodic times to periodic events, modulo a period.
///
/// The two scalars are fixed at construction and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicTimetable {
    times: BTreeMap<i64, i64>,
    time_units_per_minute: i64,
    period_length: i64,
}

impl PeriodicTimetable {
    /// Creates an empty timetable. `period_length` and
    /// `time_units_per_minute` must be positive.
    pub fn new(time_units_per_minute: i64, period_length: i64) -> Self {
        debug_assert!(time_units_per_minute > 0 && period_length > 0);
        Self {
            times: BTreeMap::new(),
            time_units_per_minute,
            period_length,
        }
    }

    /// Time units per minute of real time.
    pub fn time_units_per_minute(&self) -> i64 {
        self.time_units_per_minute
    }

    /// The period length, in time units.
    pub fn period_length(&self) -> i64 {
        self.period_length
    }

    /// The stored time of an event, or `None` if not yet assigned.
    pub fn get(&self, event_id: i64) -> Option<i64> {
        self.times.get(&event_id).copied()
    }

    /// The stored time of an event, or `default` if not yet assigned.
    pub fn get_or(&self, event_id: i64, default: i64) -> i64 {
        self.get(event_id).unwrap_or(default)
    }

    /// Assigns a time to an event, replacing any previous entry. The value
    /// is stored as given; use [`normalize`](Self::normalize) first for
    /// canonical modulo storage.
    pub fn set(&mut self, event_id: i64, time: i64) {
        self.times.insert(event_id, time);
    }

    /// Whether the event has an entry.
    pub fn contains(&self, event_id: i64) -> bool {
        self.times.contains_key(&event_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether no event has been assigned a time.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Entries in ascending event-id order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.times.iter().map(|(id, time)| (*id, *time))
    }

    /// Reduces a time into `[0, period_length)`.
    pub fn normalize(&self, time: i64) -> i64 {
        time.rem_euclid(self.period_length)
    }

    /// Converts a time-unit value to minutes.
    pub fn to_minutes(&self, time: i64) -> f64 {
        time as f64 / self.time_units_per_minute as f64
    }
}

/// Assignment of absolute times to aperiodic events.
///
/// Same shape as [`PeriodicTimetable`] without the period: times are
/// absolute and never reduced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    times: BTreeMap<i64, i64>,
    time_units_per_minute: i64,
}

impl Timetable {
    /// Creates an empty timetable. `time_units_per_minute` must be positive.
    pub fn new(time_units_per_minute: i64) -> Self {
        debug_assert!(time_units_per_minute > 0);
        Self {
            times: BTreeMap::new(),
            time_units_per_minute,
        }
    }

    /// Time units per minute of real time.
    pub fn time_units_per_minute(&self) -> i64 {
        self.time_units_per_minute
    }

    /// The stored time of an event, or `None` if not yet assigned.
    pub fn get(&self, event_id: i64) -> Option<i64> {
        self.times.get(&event_id).copied()
    }

    /// The stored time of an event, or `default` if not yet assigned.
    pub fn get_or(&self, event_id: i64, default: i64) -> i64 {
        self.get(event_id).unwrap_or(default)
    }

    /// Assigns a time to an event, replacing any previous entry.
    pub fn set(&mut self, event_id: i64, time: i64) {
        self.times.insert(event_id, time);
    }

    /// Whether the event has an entry.
    pub fn contains(&self, event_id: i64) -> bool {
        self.times.contains_key(&event_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether no event has been assigned a time.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Entries in ascending event-id order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.times.iter().map(|(id, time)| (*id, *time))
    }

    /// Converts a time-unit value to minutes.
    pub fn to_minutes(&self, time: i64) -> f64 {
        time as f64 / self.time_units_per_minute as f64
    }
}
