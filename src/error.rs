use std::error::Error;
use std::fmt;
use std::io;

use win_low::um::pdhmsg::{PDH_INVALID_DATA, status_name};

/// Status code of a failed performance data call, with an optional note on what was being done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdhError {
    status: u32,
    comment: Option<String>,
}

impl PdhError {
    pub fn new(status: u32) -> Self {
        PdhError {
            status,
            comment: None,
        }
    }

    pub fn with_comment<S: Into<String>>(&self, comment: S) -> Self {
        let mut clone = self.clone();
        clone.comment = Some(comment.into());
        clone
    }

    pub fn status(&self) -> u32 {
        self.status
    }

    /// The counter has no valid value yet, e.g. a rate counter after the first collection.
    pub fn is_invalid_data(&self) -> bool {
        self.status == PDH_INVALID_DATA
    }
}

impl fmt::Display for PdhError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = self.comment.as_ref() {
            write!(f, "{}; ", comment)?;
        }
        write!(f, "Status 0x{:08X}", self.status)?;
        if let Some(name) = status_name(self.status) {
            write!(f, " ({})", name)?;
        }
        Ok(())
    }
}

impl Error for PdhError {}

pub type PdhResult<T> = Result<T, PdhError>;

/// Why an operation on a [`Query`](crate::query::Query) did nothing or stopped early.
///
/// The `Display` text is the diagnostic printed when the failure happens.
#[derive(Debug)]
pub enum QueryError {
    /// The underlying query was never opened, or has been taken away.
    NotOk,
    NoObject,
    NoInstance,
    NoCounters,
    Pdh(PdhError),
    Io(io::Error),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::NotOk => f.write_str("Query was not successfully created"),
            QueryError::NoObject => f.write_str("No Object Name selected"),
            QueryError::NoInstance => f.write_str("No Instance Name selected"),
            QueryError::NoCounters => f.write_str("Nothing to do, the Counter List is empty"),
            QueryError::Pdh(e) => write!(f, "{}", e),
            QueryError::Io(e) => write!(f, "Console output failed: {}", e),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueryError::Pdh(e) => Some(e),
            QueryError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PdhError> for QueryError {
    fn from(e: PdhError) -> Self {
        QueryError::Pdh(e)
    }
}

impl From<io::Error> for QueryError {
    fn from(e: io::Error) -> Self {
        QueryError::Io(e)
    }
}
