//! Listing of counter objects, and of counters and instances of one object.
//!
//! Nothing is cached: every call asks the subsystem again.
use std::io::{self, Write};

use itertools::Itertools;
use log::debug;

use win_high::format::parse_name_list;
use win_high::perf::types::DetailLevel;

use crate::error::{PdhError, PdhResult};
use crate::subsystem::{PerfSubsystem, to_wide};

/// Counters and instances of one object, in enumeration order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CounterNames {
    pub counters: Vec<String>,
    pub instances: Vec<String>,
}

#[derive(Clone, Copy, Debug)]
pub struct Catalog<'a, S> {
    pdh: &'a S,
    machine: Option<&'a str>,
    detail: DetailLevel,
}

impl<'a, S: PerfSubsystem> Catalog<'a, S> {
    /// Catalog of the local machine at wizard detail level.
    pub fn new(pdh: &'a S) -> Self {
        Catalog {
            pdh,
            machine: None,
            detail: DetailLevel::Wizard,
        }
    }

    pub fn machine(mut self, machine: Option<&'a str>) -> Self {
        self.machine = machine;
        self
    }

    pub fn detail(mut self, detail: DetailLevel) -> Self {
        self.detail = detail;
        self
    }

    pub fn try_list_objects(&self) -> PdhResult<Vec<String>> {
        let machine = self.machine.map(to_wide).transpose()?;
        let mut len: u32 = 0;

        // Query the size, refreshing the object list; PDH_MORE_DATA is the expected outcome.
        if let Err(e) = self.pdh.enum_objects(machine.as_deref(), None, &mut len, self.detail, true) {
            debug!("PdhEnumObjects size probe: {}", e);
        }

        let mut buffer = vec![0u16; len as usize];
        self.pdh
            .enum_objects(machine.as_deref(), Some(&mut buffer), &mut len, self.detail, false)
            .map_err(|e: PdhError| e.with_comment("PdhEnumObjects failed"))?;
        Ok(parse_name_list(&buffer))
    }

    /// All objects known to the system, or nothing if enumeration fails.
    pub fn list_objects(&self) -> Vec<String> {
        self.try_list_objects().unwrap_or_else(|e| {
            debug!("{}", e);
            Vec::new()
        })
    }

    pub fn try_list_counters(&self, object: &str) -> PdhResult<CounterNames> {
        let machine = self.machine.map(to_wide).transpose()?;
        let object_w = to_wide(object)?;
        let mut counters_len: u32 = 0;
        let mut instances_len: u32 = 0;

        if let Err(e) = self.pdh.enum_object_items(
            machine.as_deref(),
            &object_w,
            None,
            &mut counters_len,
            None,
            &mut instances_len,
            self.detail,
        ) {
            debug!("PdhEnumObjectItems size probe for {:?}: {}", object, e);
        }

        let mut counters = vec![0u16; counters_len as usize];
        let mut instances = vec![0u16; instances_len as usize];
        self.pdh
            .enum_object_items(
                machine.as_deref(),
                &object_w,
                Some(&mut counters),
                &mut counters_len,
                Some(&mut instances),
                &mut instances_len,
                self.detail,
            )
            .map_err(|e: PdhError| {
                e.with_comment(format!("PdhEnumObjectItems failed for {:?}", object))
            })?;

        Ok(CounterNames {
            counters: parse_name_list(&counters),
            instances: parse_name_list(&instances),
        })
    }

    /// Counters and instances of `object`, or two empty lists if enumeration fails.
    pub fn list_counters(&self, object: &str) -> CounterNames {
        self.try_list_counters(object).unwrap_or_else(|e| {
            debug!("{}", e);
            CounterNames::default()
        })
    }

    pub fn dump_objects<W: Write>(&self, out: &mut W) -> io::Result<()> {
        dump_list(out, &self.list_objects())
    }
}

/// One name per line, indented.
pub fn dump_list<W: Write>(out: &mut W, list: &[String]) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        list.iter()
            .format_with("\n", |name, f| f(&format_args!("    {}", name)))
    )
}
