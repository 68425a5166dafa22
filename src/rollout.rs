//! Rollout: expanding a periodic network into a time-expanded one.
//!
//! Each periodic event is replicated once per period of the planning
//! horizon, at its normalized periodic time shifted by whole periods; each
//! periodic activity is replicated from every source replica to the unique
//! target replica reached at the activity's lifted duration. Replicas carry
//! the id of their periodic original as provenance, so the correspondence
//! stays reconstructible while both networks are held — but the rolled-out
//! network owns its objects and outlives the periodic one.
//!
//! Also provides the two wholesale mutation passes of the aperiodic
//! lifecycle: stamping event times from an external [`Timetable`] and
//! rebuilding the edge set without a discarded subset of activities.

use std::collections::HashMap;

use log::{debug, warn};
use thiserror::Error;

use crate::graph::{ArrayGraph, Edge, Graph, GraphError, Identifiable};
use crate::models::{
    AperiodicActivity, AperiodicEvent, PeriodicActivity, PeriodicEvent, PeriodicTimetable,
    Timetable,
};

/// Explicit rollout parameters. No defaults are read from ambient state;
/// callers resolve their configuration before constructing this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutConfig {
    /// Number of periods to replicate (the planning horizon).
    pub period_count: i64,
    /// Index of the first replicated period; replica times start at
    /// `first_period * period_length`.
    pub first_period: i64,
}

impl RolloutConfig {
    /// Horizon of `period_count` periods starting at period 0.
    pub fn new(period_count: i64) -> Self {
        Self {
            period_count,
            first_period: 0,
        }
    }

    /// Shifts the horizon to start at `first_period`.
    pub fn with_first_period(mut self, first_period: i64) -> Self {
        self.first_period = first_period;
        self
    }
}

/// Rollout failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RolloutError {
    /// A periodic event has no timetable entry, so its replicas cannot be
    /// placed in time.
    #[error("periodic event {0} has no timetable entry to roll out from")]
    MissingEventTime(i64),
    /// The rolled-out network rejected an insertion.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Expands a periodic network into an aperiodic one.
///
/// Every periodic event must have a timetable entry. Replica ids are fresh
/// and dense, numbered from 1 in ascending periodic-id order, so the result
/// uses the array backing. An activity replica is emitted only when its
/// target replica lies inside the horizon; at the horizon's trailing edge
/// the last source replicas of wrapping activities therefore stay
/// unconnected, matching the open end of the planning window.
pub fn rollout<G>(
    periodic: &G,
    timetable: &PeriodicTimetable,
    config: &RolloutConfig,
) -> Result<ArrayGraph<AperiodicEvent, AperiodicActivity>, RolloutError>
where
    G: Graph<PeriodicEvent, PeriodicActivity>,
{
    let period = timetable.period_length();
    let mut rolled = ArrayGraph::directed();

    let mut events: Vec<&PeriodicEvent> = periodic.nodes().collect();
    events.sort_by_key(|event| event.id);

    // periodic event id → normalized base time and replica ids per period
    let mut base_times: HashMap<i64, i64> = HashMap::new();
    let mut replicas: HashMap<i64, Vec<i64>> = HashMap::new();

    let mut next_event_id = 1;
    for event in events {
        let raw = timetable
            .get(event.id)
            .ok_or(RolloutError::MissingEventTime(event.id))?;
        let base = timetable.normalize(raw);
        base_times.insert(event.id, base);
        let ids = replicas.entry(event.id).or_default();
        for p in 0..config.period_count {
            let time = base + (config.first_period + p) * period;
            rolled.add_node(
                AperiodicEvent::new(next_event_id, event.stop_id, event.event_type, time)
                    .with_periodic_event(event.id)
                    .with_passengers(event.passenger_count),
            )?;
            ids.push(next_event_id);
            next_event_id += 1;
        }
    }

    let mut activities: Vec<&PeriodicActivity> = periodic.edges().collect();
    activities.sort_by_key(|activity| activity.id);

    let mut next_activity_id = 1;
    for activity in activities {
        // endpoints are guaranteed present by the periodic graph's insertion
        // checks, and every event was rolled out above
        let (Some(&source_base), Some(&target_base)) = (
            base_times.get(&activity.source_event_id),
            base_times.get(&activity.target_event_id),
        ) else {
            continue;
        };
        let (Some(source_replicas), Some(target_replicas)) = (
            replicas.get(&activity.source_event_id),
            replicas.get(&activity.target_event_id),
        ) else {
            continue;
        };

        let lifted = activity.lifted_duration(source_base, target_base, period);
        if lifted as f64 > activity.upper_bound {
            warn!(
                "activity {}: timetable duration {} exceeds upper bound {}; replicas will be infeasible",
                activity.id, lifted, activity.upper_bound
            );
        }
        // lifted ≡ target_base − source_base (mod period), so this is exact
        let period_offset = (source_base + lifted - target_base) / period;

        for (p, &source_replica) in source_replicas.iter().enumerate() {
            let q = p as i64 + period_offset;
            if q >= config.period_count {
                continue;
            }
            rolled.add_edge(
                AperiodicActivity::new(
                    next_activity_id,
                    activity.activity_type,
                    source_replica,
                    target_replicas[q as usize],
                    activity.lower_bound.ceil() as i64,
                    activity.upper_bound.floor() as i64,
                )
                .with_periodic_activity(activity.id)
                .with_passengers(activity.passenger_count),
            )?;
            next_activity_id += 1;
        }
    }

    debug!(
        "rolled out {} events and {} activities over {} periods",
        rolled.node_count(),
        rolled.edge_count(),
        config.period_count
    );
    Ok(rolled)
}

/// Overwrites each aperiodic event's time from the timetable's entry,
/// keeping the stored event time where the timetable has none.
///
/// Re-applying the same timetable is a no-op, so the timetable can serve as
/// the canonical time source at any point of the construction phase.
pub fn set_event_times_from_timetable<G>(graph: &mut G, timetable: &Timetable)
where
    G: Graph<AperiodicEvent, AperiodicActivity>,
{
    let event_ids: Vec<i64> = graph.nodes().map(Identifiable::id).collect();
    let mut applied = 0usize;
    for event_id in event_ids {
        if let Some(time) = timetable.get(event_id) {
            if let Some(event) = graph.node_mut(event_id) {
                event.time = time;
                applied += 1;
            }
        }
    }
    debug!("applied {applied} timetable entries to event times");
}

/// Rebuilds a network without the activities selected by `discard`.
///
/// Networks never delete objects in place (incidence indexes would dangle);
/// dropping activities — e.g., CHANGE edges no passenger uses — copies all
/// nodes and the retained edges into a fresh graph of the same directedness.
pub fn rebuild_without_activities<N, E, G, F>(graph: &G, discard: F) -> Result<G, GraphError>
where
    N: Identifiable + Clone,
    E: Edge + Clone,
    G: Graph<N, E>,
    F: Fn(&E) -> bool,
{
    let mut rebuilt = graph.empty_like();

    let mut nodes: Vec<&N> = graph.nodes().collect();
    nodes.sort_by_key(|node| node.id());
    for node in nodes {
        rebuilt.add_node(node.clone())?;
    }

    let mut retained: Vec<&E> = graph.edges().filter(|edge| !discard(edge)).collect();
    retained.sort_by_key(|edge| edge.id());
    let dropped = graph.edge_count() - retained.len();
    for edge in retained {
        rebuilt.add_edge(edge.clone())?;
    }

    debug!("rebuilt network, discarding {dropped} activities");
    Ok(rebuilt)
}
