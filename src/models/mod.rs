//! Event-activity network domain models.
//!
//! Provides the entities of both time representations: periodic objects
//! reasoned about modulo a fixed period, and aperiodic (rolled-out) objects
//! with absolute times. The two families are flat structs linked by explicit
//! provenance ids, never by embedding one inside the other.
//!
//! # Entity Mappings
//!
//! | Periodic | Aperiodic | Graph role |
//! |----------|-----------|------------|
//! | PeriodicEvent | AperiodicEvent | node |
//! | PeriodicActivity | AperiodicActivity | edge |
//! | PeriodicTimetable | Timetable | node time assignment |

mod activity;
mod event;
mod line;
mod timetable;

pub use activity::{ActivityType, AperiodicActivity, BoundError, PeriodicActivity};
pub use event::{AperiodicEvent, EventType, LineDirection, PeriodicEvent};
pub use line::{DuplicateLineId, Line, LinePool};
pub use timetable::{PeriodicTimetable, Timetable};
