//! In-memory performance data library for tests.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use widestring::{U16CStr, U16String};

use win_high::perf::types::{DetailLevel, FormatFlags};
use win_low::um::pdhmsg::*;

use crate::error::{PdhError, PdhResult};
use crate::polling::StopHandle;
use crate::subsystem::{CounterPathElements, PerfSubsystem};

pub struct FakeObject {
    pub name: String,
    pub counters: Vec<String>,
    pub instances: Vec<String>,
}

impl FakeObject {
    pub fn new(name: &str, counters: &[&str], instances: &[&str]) -> Self {
        FakeObject {
            name: name.to_owned(),
            counters: counters.iter().map(|s| s.to_string()).collect(),
            instances: instances.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Default)]
pub struct FakeState {
    pub objects: Vec<FakeObject>,

    pub fail_open: Option<u32>,
    pub fail_enum: Option<u32>,
    pub fail_path: Option<u32>,
    /// Counter name -> status returned by `add_counter`.
    pub fail_add: HashMap<String, u32>,
    /// (collection number starting at 1, status)
    pub fail_collect: Option<(usize, u32)>,
    /// Counter name -> value per collection; the last entry repeats.
    pub values: HashMap<String, Vec<Result<f64, u32>>>,
    /// Request a stop from inside the given collection, as a control handler would.
    pub stop_on_collect: Option<(usize, StopHandle)>,

    pub enum_calls: usize,
    pub opened: Vec<u32>,
    pub closed: Vec<u32>,
    pub add_attempts: Vec<String>,
    pub collects: usize,
    pub reads: usize,
}

/// Cheap to clone; clones share state, so a test can keep one to inspect calls.
#[derive(Clone, Default)]
pub struct FakePdh {
    state: Rc<RefCell<FakeState>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FakeCounter {
    pub query: u32,
    pub name: String,
}

impl FakePdh {
    pub fn new(objects: Vec<FakeObject>) -> Self {
        let fake = FakePdh::default();
        fake.state().objects = objects;
        fake
    }

    /// A machine with a couple of network adapters, processors and a singleton object.
    pub fn network() -> Self {
        Self::new(vec![
            FakeObject::new(
                "Network Interface",
                &["Bytes Received/sec", "Bytes Sent/sec", "Bytes Total/sec"],
                &["Intel[R] Ethernet Connection", "Loopback Pseudo-Interface"],
            ),
            FakeObject::new("Processor", &["% Processor Time", "% Idle Time"], &["0", "_Total"]),
            FakeObject::new("Memory", &["Available MBytes", "Pages/sec"], &[]),
        ])
    }

    pub fn state(&self) -> std::cell::RefMut<'_, FakeState> {
        self.state.borrow_mut()
    }
}

fn multi_sz<'a>(names: impl Iterator<Item = &'a String>) -> Vec<u16> {
    let mut raw = Vec::new();
    for name in names {
        raw.extend(name.encode_utf16());
        raw.push(0);
    }
    if !raw.is_empty() {
        raw.push(0);
    }
    raw
}

fn fits(raw: &[u16], buffer: &Option<&mut [u16]>, len: u32) -> bool {
    match buffer {
        Some(buffer) => buffer.len() >= raw.len() && len as usize >= raw.len(),
        None => raw.is_empty(),
    }
}

fn copy(raw: &[u16], buffer: Option<&mut [u16]>, len: &mut u32) {
    if let Some(buffer) = buffer {
        buffer[..raw.len()].copy_from_slice(raw);
    }
    *len = raw.len() as u32;
}

impl PerfSubsystem for FakePdh {
    type Query = u32;
    type Counter = FakeCounter;

    fn enum_objects(
        &self,
        _machine: Option<&U16CStr>,
        buffer: Option<&mut [u16]>,
        len: &mut u32,
        _detail: DetailLevel,
        _refresh: bool,
    ) -> PdhResult<()> {
        let mut state = self.state();
        state.enum_calls += 1;
        if let Some(status) = state.fail_enum {
            return Err(PdhError::new(status));
        }
        let raw = multi_sz(state.objects.iter().map(|o| &o.name));
        if !fits(&raw, &buffer, *len) {
            *len = raw.len() as u32;
            return Err(PdhError::new(PDH_MORE_DATA));
        }
        copy(&raw, buffer, len);
        Ok(())
    }

    fn enum_object_items(
        &self,
        _machine: Option<&U16CStr>,
        object: &U16CStr,
        counters: Option<&mut [u16]>,
        counters_len: &mut u32,
        instances: Option<&mut [u16]>,
        instances_len: &mut u32,
        _detail: DetailLevel,
    ) -> PdhResult<()> {
        let mut state = self.state();
        state.enum_calls += 1;
        if let Some(status) = state.fail_enum {
            return Err(PdhError::new(status));
        }
        let object = object.to_string_lossy();
        let found = match state.objects.iter().find(|o| o.name == object) {
            Some(found) => found,
            None => {
                *counters_len = 0;
                *instances_len = 0;
                return Err(PdhError::new(PDH_CSTATUS_NO_OBJECT));
            }
        };
        let raw_counters = multi_sz(found.counters.iter());
        let raw_instances = multi_sz(found.instances.iter());
        if !fits(&raw_counters, &counters, *counters_len)
            || !fits(&raw_instances, &instances, *instances_len)
        {
            *counters_len = raw_counters.len() as u32;
            *instances_len = raw_instances.len() as u32;
            return Err(PdhError::new(PDH_MORE_DATA));
        }
        copy(&raw_counters, counters, counters_len);
        copy(&raw_instances, instances, instances_len);
        Ok(())
    }

    fn make_counter_path(
        &self,
        elements: &CounterPathElements<'_>,
        buffer: &mut [u16],
        len: &mut u32,
    ) -> PdhResult<()> {
        if let Some(status) = self.state().fail_path {
            return Err(PdhError::new(status));
        }
        if elements.object.is_empty() || elements.counter.is_empty() {
            return Err(PdhError::new(PDH_INVALID_ARGUMENT));
        }
        let mut path = String::new();
        if let Some(machine) = elements.machine {
            path.push_str(&format!("\\\\{}", machine.to_string_lossy()));
        }
        path.push_str(&format!("\\{}", elements.object.to_string_lossy()));
        if let Some(instance) = elements.instance {
            path.push_str(&format!("({})", instance.to_string_lossy()));
        }
        path.push_str(&format!("\\{}", elements.counter.to_string_lossy()));

        let mut raw = U16String::from_str(&path).into_vec();
        raw.push(0);
        if raw.len() > *len as usize || raw.len() > buffer.len() {
            *len = raw.len() as u32;
            return Err(PdhError::new(PDH_MORE_DATA));
        }
        buffer[..raw.len()].copy_from_slice(&raw);
        *len = raw.len() as u32;
        Ok(())
    }

    fn open_query(&self) -> PdhResult<Self::Query> {
        let mut state = self.state();
        if let Some(status) = state.fail_open {
            return Err(PdhError::new(status));
        }
        let id = state.opened.len() as u32 + 1;
        state.opened.push(id);
        Ok(id)
    }

    fn add_counter(&self, query: &Self::Query, path: &U16CStr) -> PdhResult<Self::Counter> {
        let mut state = self.state();
        if !state.opened.contains(query) || state.closed.contains(query) {
            return Err(PdhError::new(PDH_INVALID_HANDLE));
        }
        let path = path.to_string_lossy();
        state.add_attempts.push(path.clone());
        let name = match path.rsplit('\\').next() {
            Some(name) if !name.is_empty() && path.starts_with('\\') => name.to_owned(),
            _ => return Err(PdhError::new(PDH_CSTATUS_BAD_COUNTERNAME)),
        };
        if let Some(&status) = state.fail_add.get(&name) {
            return Err(PdhError::new(status));
        }
        Ok(FakeCounter {
            query: *query,
            name,
        })
    }

    fn collect_query_data(&self, query: &Self::Query) -> PdhResult<()> {
        let mut state = self.state();
        if state.closed.contains(query) {
            return Err(PdhError::new(PDH_INVALID_HANDLE));
        }
        state.collects += 1;
        if let Some((n, stop)) = state.stop_on_collect.as_ref() {
            if *n == state.collects {
                stop.stop();
            }
        }
        match state.fail_collect {
            Some((n, status)) if n == state.collects => Err(PdhError::new(status)),
            _ => Ok(()),
        }
    }

    fn formatted_value(&self, counter: &Self::Counter, _format: FormatFlags) -> PdhResult<f64> {
        let mut state = self.state();
        state.reads += 1;
        if state.collects == 0 {
            return Err(PdhError::new(PDH_INVALID_DATA));
        }
        let cycle = state.collects - 1;
        match state.values.get(&counter.name) {
            Some(script) if !script.is_empty() => {
                script[cycle.min(script.len() - 1)].map_err(PdhError::new)
            }
            _ => Ok(0.0),
        }
    }

    fn close_query(&self, query: Self::Query) -> PdhResult<()> {
        let mut state = self.state();
        if state.closed.contains(&query) {
            return Err(PdhError::new(PDH_INVALID_HANDLE));
        }
        state.closed.push(query);
        Ok(())
    }
}
