//! Composition of full counter paths, `\\Machine\Object(Instance)\Counter`.
use log::error;

use win_low::um::pdh::PDH_MAX_COUNTER_PATH;

use crate::error::{PdhError, PdhResult};
use crate::subsystem::{CounterPathElements, PerfSubsystem, to_wide};

/// Returned by [`counter_path`] in place of a path which could not be composed.
pub const PATH_ERROR: &str = "Error";

/// Compose a counter path in a buffer of the maximum path size. Single attempt.
///
/// An empty `instance` means the object has no instances.
pub fn try_counter_path<S: PerfSubsystem>(
    pdh: &S,
    machine: Option<&str>,
    object: &str,
    counter: &str,
    instance: &str,
) -> PdhResult<String> {
    let machine = machine.map(to_wide).transpose()?;
    let object = to_wide(object)?;
    let counter = to_wide(counter)?;
    let instance = match instance {
        "" => None,
        name => Some(to_wide(name)?),
    };
    let elements = CounterPathElements {
        machine: machine.as_deref(),
        object: &object,
        counter: &counter,
        instance: instance.as_deref(),
    };

    let mut path = vec![0u16; PDH_MAX_COUNTER_PATH as usize + 1];
    let mut len = PDH_MAX_COUNTER_PATH;
    pdh.make_counter_path(&elements, &mut path, &mut len)
        .map_err(|e: PdhError| e.with_comment("PdhMakeCounterPath failed"))?;

    // returned length counts the terminating NUL
    path.truncate(len as usize);
    if path.last() == Some(&0) {
        path.pop();
    }
    Ok(String::from_utf16_lossy(&path))
}

/// Same as [`try_counter_path`], but logs the failure and returns [`PATH_ERROR`] instead.
pub fn counter_path<S: PerfSubsystem>(
    pdh: &S,
    machine: Option<&str>,
    object: &str,
    counter: &str,
    instance: &str,
) -> String {
    try_counter_path(pdh, machine, object, counter, instance).unwrap_or_else(|e| {
        error!("CounterPath: {}", e);
        PATH_ERROR.to_owned()
    })
}
