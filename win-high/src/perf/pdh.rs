//! Thin safe wrappers around the wide-character `Pdh*` functions.
//!
//! Buffers and sizes are passed through unchanged: callers follow the usual PDH protocol of
//! probing the size with no buffer first, and the status of that probe is returned as is.
#![allow(non_snake_case)]

use win_low::um::pdhmsg;

use crate::prelude::*;

#[inline]
fn check(status: u32) -> WinResult<()> {
    if status == pdhmsg::ERROR_SUCCESS {
        Ok(())
    } else {
        Err(WinError::from_pdh_status(status))
    }
}

#[inline]
fn optional_pcwstr(string: Option<&U16CStr>) -> PCWSTR {
    string.map_or(PCWSTR::null(), |s| PCWSTR(s.as_ptr()))
}

#[inline]
fn optional_pwstr(string: Option<&U16CStr>) -> PWSTR {
    // PDH only reads through the path element pointers.
    string.map_or(PWSTR::null(), |s| PWSTR(s.as_ptr() as *mut u16))
}

#[inline]
fn buffer_pwstr(buffer: Option<&mut [u16]>) -> Option<PWSTR> {
    buffer
        .filter(|b| !b.is_empty())
        .map(|b| PWSTR(b.as_mut_ptr()))
}

/// Open a new query on the local real-time data source.
pub fn PdhOpenQueryW_Safe() -> WinResult<PDH_HQUERY> {
    let mut hquery = PDH_HQUERY::default();
    // SAFETY: NULL data source selects real-time data, `hquery` is a valid out pointer.
    let status = unsafe { PdhOpenQueryW(PCWSTR::null(), 0, &mut hquery) };
    check(status)?;
    Ok(hquery)
}

/// Close a query and every counter handle which belongs to it.
pub fn PdhCloseQuery_Safe(hquery: PDH_HQUERY) -> WinResult<()> {
    check(unsafe { PdhCloseQuery(hquery) })
}

pub fn PdhAddCounterW_Safe(hquery: PDH_HQUERY, path: &U16CStr) -> WinResult<PDH_HCOUNTER> {
    let mut hcounter = PDH_HCOUNTER::default();
    // SAFETY: `path` is NUL-terminated and outlives the call.
    let status = unsafe { PdhAddCounterW(hquery, PCWSTR(path.as_ptr()), 0, &mut hcounter) };
    check(status)?;
    Ok(hcounter)
}

pub fn PdhCollectQueryData_Safe(hquery: PDH_HQUERY) -> WinResult<()> {
    check(unsafe { PdhCollectQueryData(hquery) })
}

/// Read the value computed by the last collection as a `double`.
///
/// `format` is the complete `dwFormat` argument, `PDH_FMT_DOUBLE` included.
pub fn PdhGetFormattedCounterValue_Safe(hcounter: PDH_HCOUNTER, format: u32) -> WinResult<f64> {
    let mut value = PDH_FMT_COUNTERVALUE::default();
    let status =
        unsafe { PdhGetFormattedCounterValue(hcounter, PDH_FMT(format), None, &mut value) };
    check(status)?;
    // SAFETY: PDH_FMT_DOUBLE was requested, so the union holds `doubleValue`.
    Ok(unsafe { value.Anonymous.doubleValue })
}

/// `PdhEnumObjectsW`. Pass `None` as the buffer to learn the required size in `len`.
pub fn PdhEnumObjectsW_Safe(
    machine: Option<&U16CStr>,
    buffer: Option<&mut [u16]>,
    len: &mut u32,
    detail_level: u32,
    refresh: bool,
) -> WinResult<()> {
    let status = unsafe {
        PdhEnumObjectsW(
            PCWSTR::null(), // szDataSource: real-time
            optional_pcwstr(machine),
            buffer_pwstr(buffer),
            len,
            PERF_DETAIL(detail_level),
            refresh,
        )
    };
    check(status)
}

/// `PdhEnumObjectItemsW`. Pass `None` as both buffers to learn the required sizes.
pub fn PdhEnumObjectItemsW_Safe(
    machine: Option<&U16CStr>,
    object: &U16CStr,
    counters: Option<&mut [u16]>,
    counters_len: &mut u32,
    instances: Option<&mut [u16]>,
    instances_len: &mut u32,
    detail_level: u32,
) -> WinResult<()> {
    let status = unsafe {
        PdhEnumObjectItemsW(
            PCWSTR::null(), // szDataSource: real-time
            optional_pcwstr(machine),
            PCWSTR(object.as_ptr()),
            buffer_pwstr(counters),
            counters_len,
            buffer_pwstr(instances),
            instances_len,
            PERF_DETAIL(detail_level),
            0, // dwFlags: reserved
        )
    };
    check(status)
}

/// `PdhMakeCounterPathW`. On success `len` holds the path length including its NUL.
pub fn PdhMakeCounterPathW_Safe(
    machine: Option<&U16CStr>,
    object: &U16CStr,
    counter: &U16CStr,
    instance: Option<&U16CStr>,
    buffer: &mut [u16],
    len: &mut u32,
) -> WinResult<()> {
    let elements = PDH_COUNTER_PATH_ELEMENTS_W {
        szMachineName: optional_pwstr(machine),
        szObjectName: optional_pwstr(Some(object)),
        szInstanceName: optional_pwstr(instance),
        szParentInstance: PWSTR::null(),
        dwInstanceIndex: 0,
        szCounterName: optional_pwstr(Some(counter)),
    };
    let status = unsafe {
        PdhMakeCounterPathW(&elements, buffer_pwstr(Some(buffer)), len, PDH_PATH_FLAGS(0))
    };
    check(status)
}
