//! What the `pdh-poll` binary does with its settings, independent of the subsystem behind it.
use std::io::Write;

use win_high::perf::types::DetailLevel;

use crate::catalog::Catalog;
use crate::error::QueryError;
use crate::polling::{PollOptions, StopHandle};
use crate::query::Query;
use crate::subsystem::PerfSubsystem;

pub const DEFAULT_OBJECT: &str = "Network Interface";
pub const DEFAULT_COUNTERS: [&str; 2] = ["Bytes Received/sec", "Bytes Sent/sec"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    ListObjects,
    ListCounters,
    ListInstances,
    Poll,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub action: Action,
    pub object: String,
    /// Overrides the automatically selected first instance.
    pub instance: Option<String>,
    pub counters: Vec<String>,
    pub machine: Option<String>,
    pub detail: DetailLevel,
    pub poll: PollOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            action: Action::Poll,
            object: DEFAULT_OBJECT.to_owned(),
            instance: None,
            counters: DEFAULT_COUNTERS.iter().map(|s| s.to_string()).collect(),
            machine: None,
            detail: DetailLevel::Wizard,
            poll: PollOptions::default(),
        }
    }
}

/// Carry out `settings.action`. `on_poll` receives the stop handle right before polling starts.
pub fn run<S, W, F>(pdh: S, settings: &Settings, out: &mut W, on_poll: F) -> Result<(), QueryError>
where
    S: PerfSubsystem,
    W: Write,
    F: FnOnce(StopHandle),
{
    if settings.action == Action::ListObjects {
        let catalog = Catalog::new(&pdh)
            .machine(settings.machine.as_deref())
            .detail(settings.detail);
        return Query::dump_available_objects(&catalog, out);
    }

    let mut query = Query::open(pdh)
        .machine(settings.machine.clone())
        .detail(settings.detail);
    query.set_object(&settings.object)?;

    match settings.action {
        Action::ListCounters => query.dump_available_counters(out),
        Action::ListInstances => query.dump_available_instances(out),
        _ => {
            if let Some(instance) = settings.instance.as_deref() {
                query.set_instance(instance)?;
            }
            query.add_counters(&settings.counters)?;
            on_poll(query.stop_handle());
            query.counter_polling_dump(&settings.poll, out)
        }
    }
}
