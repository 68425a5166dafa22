//! Line and line-pool models.
//!
//! A line is a fixed stop sequence served with a frequency per period; a
//! line pool is the set of lines a line plan selected. Events reference
//! lines by id, so the pool is part of the referential closure when
//! constructing event-activity networks from a line concept.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A line id was inserted twice into the same pool.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("duplicate line id {0} inserted into the same pool")]
pub struct DuplicateLineId(pub i64);

/// A transit line: an ordered stop sequence with an operating frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Unique line identifier within one pool.
    pub id: i64,
    /// Times the line is served per period (≥ 1 for operating lines).
    pub frequency: i64,
    /// Operating cost per period (for line-planning consumers).
    pub cost: f64,
    /// Ordered stop ids the line serves.
    pub stops: Vec<i64>,
}

impl Line {
    /// Creates a line with frequency 1, zero cost, and no stops.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            frequency: 1,
            cost: 0.0,
            stops: Vec::new(),
        }
    }

    /// Sets the frequency.
    pub fn with_frequency(mut self, frequency: i64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the operating cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Sets the stop sequence.
    pub fn with_stops(mut self, stops: Vec<i64>) -> Self {
        self.stops = stops;
        self
    }

    /// Number of stops the line serves.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

/// The set of lines of one line plan, keyed by line id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinePool {
    lines: BTreeMap<i64, Line>,
}

impl LinePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line. Rejects a duplicate id, leaving the pool unchanged.
    pub fn add_line(&mut self, line: Line) -> Result<(), DuplicateLineId> {
        if self.lines.contains_key(&line.id) {
            return Err(DuplicateLineId(line.id));
        }
        self.lines.insert(line.id, line);
        Ok(())
    }

    /// Looks up a line by id.
    pub fn line(&self, id: i64) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// All lines, in ascending id order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// Number of lines in the pool.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the pool has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
