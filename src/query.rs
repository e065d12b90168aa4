use std::io::Write;
use std::mem;

use log::{error, info, warn};

use win_high::perf::types::DetailLevel;

use crate::catalog::{Catalog, dump_list};
use crate::error::{PdhError, QueryError};
use crate::path::counter_path;
use crate::polling::StopHandle;
use crate::subsystem::{PerfSubsystem, to_wide};

/// Counter added to a query. Its handle belongs to the query and is never released separately.
#[derive(Debug)]
pub struct AttachedCounter<C> {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) handle: C,
}

impl<C> AttachedCounter<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handle(&self) -> &C {
        &self.handle
    }
}

/// Exclusive owner of one open query and of the counters added to it.
///
/// A query which failed to open is "not ok": every operation on it logs a diagnostic and
/// does nothing. The query is closed on drop.
pub struct Query<S: PerfSubsystem> {
    pub(crate) pdh: S,
    pub(crate) hquery: Option<S::Query>,
    pub(crate) counters: Vec<AttachedCounter<S::Counter>>,
    object_name: Option<String>,
    instance_name: Option<String>,
    machine: Option<String>,
    detail: DetailLevel,
    pub(crate) keep_going: StopHandle,
}

/// Log the diagnostic of a failed operation and hand the error back.
pub(crate) fn report(operation: &str, e: QueryError) -> QueryError {
    match e {
        QueryError::Pdh(_) | QueryError::Io(_) => error!("{}: {}", operation, e),
        _ => warn!("{}: {}", operation, e),
    }
    e
}

impl<S: PerfSubsystem> Query<S> {
    /// Open a new query. Failure is logged and leaves the query "not ok".
    pub fn open(pdh: S) -> Self {
        let hquery = match pdh.open_query() {
            Ok(hquery) => Some(hquery),
            Err(e) => {
                error!("Query: PdhOpenQuery failed: {}", e);
                None
            }
        };
        Query {
            pdh,
            hquery,
            counters: Vec::new(),
            object_name: None,
            instance_name: None,
            machine: None,
            detail: DetailLevel::default(),
            keep_going: StopHandle::new(),
        }
    }

    /// Enumerate and compose paths against another machine. `None` is the local one.
    pub fn machine(mut self, machine: Option<String>) -> Self {
        self.machine = machine;
        self
    }

    pub fn detail(mut self, detail: DetailLevel) -> Self {
        self.detail = detail;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.hquery.is_some()
    }

    /// Move the query handle, counters and selection out into a new `Query`, leaving this one
    /// "not ok". Stop handles obtained earlier keep controlling the moved query.
    pub fn take(&mut self) -> Self
    where
        S: Clone,
    {
        Query {
            pdh: self.pdh.clone(),
            hquery: self.hquery.take(),
            counters: mem::take(&mut self.counters),
            object_name: self.object_name.take(),
            instance_name: self.instance_name.take(),
            machine: self.machine.clone(),
            detail: self.detail,
            keep_going: self.keep_going.clone(),
        }
    }

    pub fn object_name(&self) -> Option<&str> {
        self.object_name.as_deref()
    }

    pub fn instance_name(&self) -> Option<&str> {
        self.instance_name.as_deref()
    }

    pub fn counters(&self) -> &[AttachedCounter<S::Counter>] {
        &self.counters
    }

    pub fn catalog(&self) -> Catalog<'_, S> {
        Catalog::new(&self.pdh)
            .machine(self.machine.as_deref())
            .detail(self.detail)
    }

    fn check_ok(&self, operation: &str) -> Result<(), QueryError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(report(operation, QueryError::NotOk))
        }
    }

    /// Select an object and, if it has instances, its first instance.
    pub fn set_object(&mut self, name: &str) -> Result<(), QueryError> {
        self.check_ok("SetObject")?;
        self.object_name = Some(name.to_owned()).filter(|name| !name.is_empty());
        let names = self.catalog().list_counters(name);
        if let Some(first) = names.instances.into_iter().next() {
            info!("Automatically selecting instance {:?}", first);
            self.instance_name = Some(first);
        }
        Ok(())
    }

    pub fn set_instance(&mut self, name: &str) -> Result<(), QueryError> {
        self.check_ok("SetInstance")?;
        self.instance_name = Some(name.to_owned()).filter(|name| !name.is_empty());
        Ok(())
    }

    /// Print every object known to the catalog's machine.
    pub fn dump_available_objects<W: Write>(
        catalog: &Catalog<'_, S>,
        out: &mut W,
    ) -> Result<(), QueryError> {
        catalog
            .dump_objects(out)
            .map_err(|e| report("DumpAvailableObjects", e.into()))
    }

    fn require_object(&self, operation: &str) -> Result<&str, QueryError> {
        self.check_ok(operation)?;
        match self.object_name.as_deref() {
            Some(object) => Ok(object),
            None => {
                warn!("{}: An object needs to be set before calling", operation);
                Err(QueryError::NoObject)
            }
        }
    }

    pub fn dump_available_counters<W: Write>(&self, out: &mut W) -> Result<(), QueryError> {
        const OP: &str = "DumpAvailableCounters";
        let object = self.require_object(OP)?;
        let names = self.catalog().list_counters(object);
        dump_list(out, &names.counters).map_err(|e| report(OP, e.into()))
    }

    pub fn dump_available_instances<W: Write>(&self, out: &mut W) -> Result<(), QueryError> {
        const OP: &str = "DumpAvailableInstances";
        let object = self.require_object(OP)?;
        let names = self.catalog().list_counters(object);
        dump_list(out, &names.instances).map_err(|e| report(OP, e.into()))
    }

    /// Add counters of the selected object instance, in order.
    ///
    /// Stops at the first failure: counters added before it stay attached, names after it are
    /// not tried.
    pub fn add_counters<I>(&mut self, names: I) -> Result<(), QueryError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        const OP: &str = "AddCounter";
        for name in names {
            let name = name.as_ref();
            let hquery = match self.hquery.as_ref() {
                Some(hquery) => hquery,
                None => return Err(report(OP, QueryError::NotOk)),
            };
            let object = match self.object_name.as_deref() {
                Some(object) => object,
                None => return Err(report(OP, QueryError::NoObject)),
            };
            let instance = match self.instance_name.as_deref() {
                Some(instance) => instance,
                None => return Err(report(OP, QueryError::NoInstance)),
            };

            let path = counter_path(&self.pdh, self.machine.as_deref(), object, name, instance);
            let handle = to_wide(&path)
                .and_then(|wide_path| self.pdh.add_counter(hquery, &wide_path))
                .map_err(|e: PdhError| {
                    report(OP, e.with_comment(format!("PdhAddCounter {:?} failed", path)).into())
                })?;
            self.counters.push(AttachedCounter {
                name: name.to_owned(),
                path,
                handle,
            });
        }
        Ok(())
    }

    pub fn add_counter(&mut self, name: &str) -> Result<(), QueryError> {
        self.add_counters([name])
    }
}

impl<S: PerfSubsystem> Drop for Query<S> {
    fn drop(&mut self) {
        if let Some(hquery) = self.hquery.take() {
            // counter handles die with the query
            self.counters.clear();
            if let Err(e) = self.pdh.close_query(hquery) {
                error!("PdhCloseQuery Error: {}", e);
            }
        }
    }
}
