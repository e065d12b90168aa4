//! Performance Data Helper: typed options and safe call wrappers.
pub mod types;

#[cfg(windows)]
pub mod pdh;
