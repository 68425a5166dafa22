//! Network quality metrics.
//!
//! Computes summary figures of a timetabled event-activity network for
//! downstream evaluation stages: how much of the network is scheduled, how
//! many duration windows hold, and how much time passengers spend.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled events | Events with a timetable entry |
//! | Feasible activities | Duration inside `[lower, upper]` |
//! | Weighted duration | Σ passengers × duration (perceived travel time) |
//! | Total slack | Σ (duration − lower bound) over feasible activities |

use crate::graph::Graph;
use crate::models::{
    AperiodicActivity, AperiodicEvent, PeriodicActivity, PeriodicEvent, PeriodicTimetable,
};

/// Summary figures of one timetabled network.
///
/// All durations are in the network's time units. Activities whose endpoint
/// times are unknown count as unscheduled and contribute to no duration sum.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableKpi {
    /// Number of events.
    pub event_count: usize,
    /// Events with an assigned time.
    pub scheduled_event_count: usize,
    /// Number of activities.
    pub activity_count: usize,
    /// Activities whose duration satisfies their bounds.
    pub feasible_activity_count: usize,
    /// Activities with known endpoint times violating their bounds.
    pub infeasible_activity_count: usize,
    /// Sum of durations over activities with known endpoint times.
    pub total_duration: i64,
    /// Passenger-weighted duration sum (perceived travel time).
    pub weighted_duration: f64,
    /// Slack above the lower bound, summed over feasible activities.
    pub total_slack: f64,
}

impl TimetableKpi {
    /// Computes KPIs of a periodic network under a candidate timetable.
    ///
    /// Durations are the lifted periodic durations, so a HEADWAY spanning a
    /// period wrap contributes its real span, not its residue.
    pub fn periodic<G>(graph: &G, timetable: &PeriodicTimetable) -> Self
    where
        G: Graph<PeriodicEvent, PeriodicActivity>,
    {
        let period = timetable.period_length();
        let event_count = graph.node_count();
        let scheduled_event_count = graph
            .nodes()
            .filter(|event| timetable.contains(event.id))
            .count();

        let mut kpi = Self::empty(event_count, scheduled_event_count, graph.edge_count());
        for activity in graph.edges() {
            let (Some(source_time), Some(target_time)) = (
                timetable.get(activity.source_event_id),
                timetable.get(activity.target_event_id),
            ) else {
                continue;
            };
            let duration = activity.lifted_duration(source_time, target_time, period);
            kpi.record(
                duration,
                activity.lower_bound,
                activity.passenger_count,
                activity.is_feasible(source_time, target_time, period),
            );
        }
        kpi
    }

    /// Computes KPIs of an aperiodic network from its own event times.
    pub fn aperiodic<G>(graph: &G) -> Self
    where
        G: Graph<AperiodicEvent, AperiodicActivity>,
    {
        // aperiodic events always carry a time
        let event_count = graph.node_count();
        let mut kpi = Self::empty(event_count, event_count, graph.edge_count());
        for activity in graph.edges() {
            let (Some(source), Some(target)) = (
                graph.node(activity.source_event_id),
                graph.node(activity.target_event_id),
            ) else {
                continue;
            };
            let duration = activity.duration(source.time, target.time);
            kpi.record(
                duration,
                activity.lower_bound as f64,
                activity.passenger_count,
                activity.is_feasible(source.time, target.time),
            );
        }
        kpi
    }

    fn empty(event_count: usize, scheduled_event_count: usize, activity_count: usize) -> Self {
        Self {
            event_count,
            scheduled_event_count,
            activity_count,
            feasible_activity_count: 0,
            infeasible_activity_count: 0,
            total_duration: 0,
            weighted_duration: 0.0,
            total_slack: 0.0,
        }
    }

    fn record(&mut self, duration: i64, lower_bound: f64, passengers: f64, feasible: bool) {
        self.total_duration += duration;
        self.weighted_duration += passengers * duration as f64;
        if feasible {
            self.feasible_activity_count += 1;
            self.total_slack += duration as f64 - lower_bound;
        } else {
            self.infeasible_activity_count += 1;
        }
    }

    /// Whether every activity with known endpoint times is feasible and
    /// every event is scheduled.
    pub fn is_fully_feasible(&self) -> bool {
        self.infeasible_activity_count == 0 && self.scheduled_event_count == self.event_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MapGraph;
    use crate::models::{ActivityType, EventType};

    fn sample_network() -> (MapGraph<PeriodicEvent, PeriodicActivity>, PeriodicTimetable) {
        let mut graph = MapGraph::directed();
        graph
            .add_node(PeriodicEvent::new(1, 1, EventType::Departure, 1))
            .unwrap();
        graph
            .add_node(PeriodicEvent::new(2, 2, EventType::Arrival, 1))
            .unwrap();
        graph
            .add_node(PeriodicEvent::new(3, 2, EventType::Departure, 2))
            .unwrap();
        graph
            .add_edge(
                PeriodicActivity::new(1, ActivityType::Drive, 1, 2, 5.0, 10.0)
                    .with_passengers(100.0),
            )
            .unwrap();
        graph
            .add_edge(
                PeriodicActivity::new(2, ActivityType::Change, 2, 3, 2.0, 10.0)
                    .with_passengers(30.0),
            )
            .unwrap();

        let mut timetable = PeriodicTimetable::new(1, 60);
        timetable.set(1, 0);
        timetable.set(2, 8);
        timetable.set(3, 12);
        (graph, timetable)
    }

    #[test]
    fn test_periodic_kpi() {
        let (graph, timetable) = sample_network();
        let kpi = TimetableKpi::periodic(&graph, &timetable);

        assert_eq!(kpi.event_count, 3);
        assert_eq!(kpi.scheduled_event_count, 3);
        assert_eq!(kpi.activity_count, 2);
        assert_eq!(kpi.feasible_activity_count, 2);
        assert_eq!(kpi.infeasible_activity_count, 0);
        // durations 8 and 4
        assert_eq!(kpi.total_duration, 12);
        assert!((kpi.weighted_duration - (100.0 * 8.0 + 30.0 * 4.0)).abs() < 1e-10);
        // slack (8 − 5) + (4 − 2)
        assert!((kpi.total_slack - 5.0).abs() < 1e-10);
        assert!(kpi.is_fully_feasible());
    }

    #[test]
    fn test_periodic_kpi_counts_infeasible() {
        let (graph, mut timetable) = sample_network();
        timetable.set(3, 9); // change duration 1 < lower bound 2 lifts to 61 > 10
        let kpi = TimetableKpi::periodic(&graph, &timetable);
        assert_eq!(kpi.feasible_activity_count, 1);
        assert_eq!(kpi.infeasible_activity_count, 1);
        assert!(!kpi.is_fully_feasible());
    }

    #[test]
    fn test_unscheduled_events_skip_activities() {
        let (graph, _) = sample_network();
        let mut partial = PeriodicTimetable::new(1, 60);
        partial.set(1, 0);
        partial.set(2, 8);
        let kpi = TimetableKpi::periodic(&graph, &partial);
        assert_eq!(kpi.scheduled_event_count, 2);
        assert_eq!(kpi.feasible_activity_count, 1);
        assert_eq!(kpi.infeasible_activity_count, 0);
        assert_eq!(kpi.total_duration, 8);
        assert!(!kpi.is_fully_feasible());
    }

    #[test]
    fn test_aperiodic_kpi() {
        let mut graph: MapGraph<AperiodicEvent, AperiodicActivity> = MapGraph::directed();
        graph
            .add_node(AperiodicEvent::new(1, 1, EventType::Departure, 100))
            .unwrap();
        graph
            .add_node(AperiodicEvent::new(2, 2, EventType::Arrival, 108))
            .unwrap();
        graph
            .add_edge(
                AperiodicActivity::new(1, ActivityType::Drive, 1, 2, 5, 10).with_passengers(40.0),
            )
            .unwrap();

        let kpi = TimetableKpi::aperiodic(&graph);
        assert_eq!(kpi.event_count, 2);
        assert_eq!(kpi.scheduled_event_count, 2);
        assert_eq!(kpi.feasible_activity_count, 1);
        assert_eq!(kpi.total_duration, 8);
        assert!((kpi.weighted_duration - 320.0).abs() < 1e-10);
        assert!(kpi.is_fully_feasible());
    }
}
