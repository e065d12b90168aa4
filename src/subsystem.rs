//! The boundary between this crate and the operating system's performance data library.
use widestring::{U16CStr, U16CString};

use win_high::perf::types::{DetailLevel, FormatFlags};
use win_low::um::pdhmsg::PDH_INVALID_ARGUMENT;

use crate::error::{PdhError, PdhResult};

/// Components of a counter path, borrowed for the duration of one composition call.
#[derive(Clone, Copy, Debug)]
pub struct CounterPathElements<'a> {
    /// `None` for the local machine.
    pub machine: Option<&'a U16CStr>,
    pub object: &'a U16CStr,
    pub counter: &'a U16CStr,
    /// `None` for objects without instances.
    pub instance: Option<&'a U16CStr>,
}

/// Calls into the performance data library, mirroring the `Pdh*` functions one to one.
///
/// Enumeration follows the library protocol: a first call without buffers reports the required
/// sizes (usually failing with `PDH_MORE_DATA`), a second call fills caller-allocated buffers with
/// double-NUL-terminated name lists. Sizes are counted in UTF-16 code units.
pub trait PerfSubsystem {
    /// Open query handle. Nothing closes it implicitly; see [`close_query`](Self::close_query).
    type Query;
    /// Counter handle, valid while its query is open.
    type Counter;

    fn enum_objects(
        &self,
        machine: Option<&U16CStr>,
        buffer: Option<&mut [u16]>,
        len: &mut u32,
        detail: DetailLevel,
        refresh: bool,
    ) -> PdhResult<()>;

    #[allow(clippy::too_many_arguments)]
    fn enum_object_items(
        &self,
        machine: Option<&U16CStr>,
        object: &U16CStr,
        counters: Option<&mut [u16]>,
        counters_len: &mut u32,
        instances: Option<&mut [u16]>,
        instances_len: &mut u32,
        detail: DetailLevel,
    ) -> PdhResult<()>;

    /// On success `len` is the path length in code units, terminating NUL included.
    fn make_counter_path(
        &self,
        elements: &CounterPathElements<'_>,
        buffer: &mut [u16],
        len: &mut u32,
    ) -> PdhResult<()>;

    fn open_query(&self) -> PdhResult<Self::Query>;

    fn add_counter(&self, query: &Self::Query, path: &U16CStr) -> PdhResult<Self::Counter>;

    /// Refresh the values of every counter of the query in one batch.
    fn collect_query_data(&self, query: &Self::Query) -> PdhResult<()>;

    /// Value computed by the last collection. Fails with `PDH_INVALID_DATA` while there is none.
    fn formatted_value(&self, counter: &Self::Counter, format: FormatFlags) -> PdhResult<f64>;

    /// Close the query, invalidating its counter handles.
    fn close_query(&self, query: Self::Query) -> PdhResult<()>;
}

/// Convert a name for the wide API. Names with embedded NULs can not be passed through.
pub(crate) fn to_wide(name: &str) -> PdhResult<U16CString> {
    U16CString::from_str(name).map_err(|_| {
        PdhError::new(PDH_INVALID_ARGUMENT).with_comment(format!("Name contains NUL: {:?}", name))
    })
}
