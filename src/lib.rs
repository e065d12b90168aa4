//! # Performance counter discovery and polling
//!
//! Browse the counter objects known to a machine, build counter paths, add counters of one
//! object instance to a query and print their values periodically until told to stop.
//!
//! Everything is written against [`PerfSubsystem`](subsystem::PerfSubsystem); the Windows
//! implementation lives in [`pdh`].
pub mod app;
pub mod catalog;
pub mod error;
pub mod path;
#[cfg(windows)]
pub mod pdh;
pub mod polling;
pub mod query;
pub mod subsystem;

#[cfg(test)]
pub(crate) mod fake;

pub use catalog::{Catalog, CounterNames};
pub use error::{PdhError, PdhResult, QueryError};
pub use path::{PATH_ERROR, counter_path, try_counter_path};
pub use polling::{PollOptions, StopHandle};
pub use query::{AttachedCounter, Query};
pub use subsystem::{CounterPathElements, PerfSubsystem};
pub use win_high::perf::types::{DetailLevel, FormatFlags};
