//! Event-activity network core for periodic timetabling.
//!
//! Models public-transit line plans as event-activity networks and assigns
//! periodic or absolute times to events subject to duration constraints —
//! the data model underlying the Periodic Event Scheduling Problem (PESP)
//! and its time-expanded counterpart. Two coupled time representations are
//! kept consistent: a *periodic* network reasoned about modulo a fixed
//! period, and an *aperiodic* (rolled-out) network whose dated replicas
//! carry absolute times and remember their periodic originals.
//!
//! # Modules
//!
//! - **`graph`**: Minimal typed multigraph — [`Graph`](graph::Graph) with
//!   the interchangeable [`ArrayGraph`](graph::ArrayGraph) and
//!   [`MapGraph`](graph::MapGraph) backings
//! - **`models`**: Domain types — events, activities, lines, and the
//!   periodic/aperiodic timetables
//! - **`rollout`**: Expansion of a periodic network across the planning
//!   horizon, plus the wholesale mutation passes of the aperiodic lifecycle
//! - **`validation`**: Feasibility and cross-network integrity checks
//! - **`metrics`**: Summary figures for evaluation stages
//!
//! # Architecture
//!
//! This crate defines the combinatorial objects that optimization and
//! evaluation operate on — it performs no optimization itself. Everything
//! is plain owned data built single-threaded in a construction phase and
//! read-mostly afterwards; no ambient configuration or process-wide state
//! is consulted. File formats, solvers, and pipelines live in consumer
//! crates that talk to this core through `nodes()`/`edges()` enumeration
//! and typed insertion.
//!
//! # References
//!
//! - Serafini & Ukovich (1989), "A mathematical model for periodic
//!   scheduling problems"
//! - Liebchen & Möhring (2007), "The modeling power of the periodic event
//!   scheduling problem"
//! - Nachtigall (1998), "Periodic network optimization and fixed interval
//!   timetables"

pub mod graph;
pub mod metrics;
pub mod models;
pub mod rollout;
pub mod validation;
