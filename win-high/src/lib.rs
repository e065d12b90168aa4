//! # Various Rusty wrappers for the Performance Data Helper API
pub mod format;
pub mod perf;

#[cfg(windows)]
pub mod console;
#[cfg(windows)]
pub mod error;
#[cfg(windows)]
pub mod prelude;
