//! The real subsystem: Performance Data Helper of the local Windows installation.
use widestring::U16CStr;

use win_high::error::WinError;
use win_high::perf::pdh::*;
use win_high::perf::types::{DetailLevel, FormatFlags};
use win_high::prelude::{PDH_HCOUNTER, PDH_HQUERY};

use crate::error::{PdhError, PdhResult};
use crate::subsystem::{CounterPathElements, PerfSubsystem};

impl From<WinError> for PdhError {
    fn from(e: WinError) -> Self {
        PdhError::new(e.error_code())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Pdh;

impl PerfSubsystem for Pdh {
    type Query = PDH_HQUERY;
    type Counter = PDH_HCOUNTER;

    fn enum_objects(
        &self,
        machine: Option<&U16CStr>,
        buffer: Option<&mut [u16]>,
        len: &mut u32,
        detail: DetailLevel,
        refresh: bool,
    ) -> PdhResult<()> {
        Ok(PdhEnumObjectsW_Safe(machine, buffer, len, detail.raw(), refresh)?)
    }

    fn enum_object_items(
        &self,
        machine: Option<&U16CStr>,
        object: &U16CStr,
        counters: Option<&mut [u16]>,
        counters_len: &mut u32,
        instances: Option<&mut [u16]>,
        instances_len: &mut u32,
        detail: DetailLevel,
    ) -> PdhResult<()> {
        Ok(PdhEnumObjectItemsW_Safe(
            machine,
            object,
            counters,
            counters_len,
            instances,
            instances_len,
            detail.raw(),
        )?)
    }

    fn make_counter_path(
        &self,
        elements: &CounterPathElements<'_>,
        buffer: &mut [u16],
        len: &mut u32,
    ) -> PdhResult<()> {
        Ok(PdhMakeCounterPathW_Safe(
            elements.machine,
            elements.object,
            elements.counter,
            elements.instance,
            buffer,
            len,
        )?)
    }

    fn open_query(&self) -> PdhResult<Self::Query> {
        Ok(PdhOpenQueryW_Safe()?)
    }

    fn add_counter(&self, query: &Self::Query, path: &U16CStr) -> PdhResult<Self::Counter> {
        Ok(PdhAddCounterW_Safe(*query, path)?)
    }

    fn collect_query_data(&self, query: &Self::Query) -> PdhResult<()> {
        Ok(PdhCollectQueryData_Safe(*query)?)
    }

    fn formatted_value(&self, counter: &Self::Counter, format: FormatFlags) -> PdhResult<f64> {
        Ok(PdhGetFormattedCounterValue_Safe(*counter, format.double_format())?)
    }

    fn close_query(&self, query: Self::Query) -> PdhResult<()> {
        Ok(PdhCloseQuery_Safe(query)?)
    }
}
