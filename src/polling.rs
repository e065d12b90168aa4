//! Periodic sampling of every counter attached to a [`Query`].
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::Duration;

use win_high::perf::types::FormatFlags;

use crate::error::{PdhError, QueryError};
use crate::query::{Query, report};
use crate::subsystem::PerfSubsystem;

/// Printed before the values of every sample.
pub const SEPARATOR: &str = "      =======================";
/// Printed in place of the value of a counter which has no data yet.
pub const NO_DATA: &str = " -- no data --";

/// Cancellation token of a polling loop.
///
/// Clones share the flag, so a clone can be handed to a console control handler while the loop
/// runs. There is one writer and one reader and nothing else is shared, so relaxed ordering is
/// enough.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to finish after the current sample.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn rearm(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PollOptions {
    /// Sleep before every collection.
    pub interval: Duration,
    pub format: FormatFlags,
    /// Digits after the decimal point; shortest exact representation when `None`.
    pub precision: Option<usize>,
}

impl Default for PollOptions {
    fn default() -> Self {
        PollOptions {
            interval: Duration::from_millis(1000),
            format: FormatFlags::empty(),
            precision: None,
        }
    }
}

impl PollOptions {
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        PollOptions {
            interval: Duration::from_millis(interval_ms),
            ..Self::default()
        }
    }

    fn format_value(&self, value: f64) -> String {
        match self.precision {
            Some(precision) => format!("{:.*}", precision, value),
            None => value.to_string(),
        }
    }
}

impl<S: PerfSubsystem> Query<S> {
    pub fn stop_handle(&self) -> StopHandle {
        self.keep_going.clone()
    }

    pub fn stop_polling(&self) {
        self.keep_going.stop();
    }

    /// Sleep, collect and print every attached counter, until stopped or until an error.
    ///
    /// The stop flag is reset on entry and checked after each printed sample, so a stop request
    /// never cuts a sample short. Counters without data yet print a placeholder; any other
    /// read failure ends the loop.
    pub fn counter_polling_dump<W: Write>(
        &self,
        options: &PollOptions,
        out: &mut W,
    ) -> Result<(), QueryError> {
        const OP: &str = "CounterPollingDump";
        if self.counters.is_empty() {
            return Err(report(OP, QueryError::NoCounters));
        }
        let hquery = match self.hquery.as_ref() {
            Some(hquery) => hquery,
            None => return Err(report(OP, QueryError::NotOk)),
        };
        let width = self
            .counters
            .iter()
            .map(|counter| counter.name().chars().count())
            .max()
            .unwrap_or(0);

        self.keep_going.rearm();
        loop {
            sleep(options.interval);
            self.pdh
                .collect_query_data(hquery)
                .map_err(|e: PdhError| {
                    report(OP, e.with_comment("PdhCollectQueryData failed").into())
                })?;
            self.print_sample(options, width, out)
                .map_err(|e| report(OP, e))?;
            if self.keep_going.is_stopped() {
                break;
            }
        }
        Ok(())
    }

    fn print_sample<W: Write>(
        &self,
        options: &PollOptions,
        width: usize,
        out: &mut W,
    ) -> Result<(), QueryError> {
        writeln!(out, "{}", SEPARATOR)?;
        for counter in self.counters.iter() {
            let padding = width - counter.name().chars().count() + 2;
            match self.pdh.formatted_value(counter.handle(), options.format) {
                Ok(value) => writeln!(
                    out,
                    "{}{:padding$}    {}",
                    counter.name(),
                    "",
                    options.format_value(value),
                    padding = padding
                )?,
                Err(e) if e.is_invalid_data() => {
                    writeln!(out, "{}{:padding$}{}", counter.name(), "", NO_DATA, padding = padding)?
                }
                Err(e) => {
                    out.flush()?;
                    return Err(e
                        .with_comment(format!(
                            "PdhGetFormattedCounterValue failed for {:?}",
                            counter.name()
                        ))
                        .into());
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use win_low::um::pdhmsg::*;

    use super::*;
    use crate::fake::FakePdh;

    fn options() -> PollOptions {
        PollOptions {
            interval: Duration::ZERO,
            ..PollOptions::default()
        }
    }

    fn polled_query() -> (FakePdh, Query<FakePdh>) {
        let pdh = FakePdh::network();
        let mut query = Query::open(pdh.clone());
        query.set_object("Network Interface").unwrap();
        query
            .add_counters(["Bytes Received/sec", "Bytes Sent/sec"])
            .unwrap();
        (pdh, query)
    }

    fn lines(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_nothing_to_poll() {
        let pdh = FakePdh::network();
        let query = Query::open(pdh.clone());
        let mut out = Vec::new();
        let result = query.counter_polling_dump(&PollOptions::default(), &mut out);
        assert!(matches!(result, Err(QueryError::NoCounters)));
        assert_eq!(pdh.state().collects, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_stop_after_current_sample() {
        let (pdh, query) = polled_query();
        {
            let mut state = pdh.state();
            state.values.insert("Bytes Received/sec".to_owned(), vec![Ok(1.5), Ok(2048.0)]);
            state.values.insert("Bytes Sent/sec".to_owned(), vec![Ok(2.0)]);
            state.stop_on_collect = Some((2, query.stop_handle()));
        }
        let mut out = Vec::new();
        query.counter_polling_dump(&options(), &mut out).unwrap();

        assert_eq!(pdh.state().collects, 2);
        assert_eq!(
            lines(out),
            vec![
                SEPARATOR,
                "Bytes Received/sec      1.5",
                "Bytes Sent/sec          2",
                SEPARATOR,
                "Bytes Received/sec      2048",
                "Bytes Sent/sec          2",
            ]
        );
    }

    #[test]
    fn test_stop_requested_before_start_is_reset() {
        let (pdh, query) = polled_query();
        query.stop_polling();
        pdh.state().stop_on_collect = Some((3, query.stop_handle()));
        query.counter_polling_dump(&options(), &mut Vec::new()).unwrap();
        assert_eq!(pdh.state().collects, 3);
    }

    #[test]
    fn test_no_data_placeholder_continues() {
        let (pdh, query) = polled_query();
        {
            let mut state = pdh.state();
            state.values.insert(
                "Bytes Received/sec".to_owned(),
                vec![Err(PDH_INVALID_DATA), Ok(10.0)],
            );
            state.values.insert("Bytes Sent/sec".to_owned(), vec![Ok(20.0)]);
            state.stop_on_collect = Some((2, query.stop_handle()));
        }
        let mut out = Vec::new();
        query.counter_polling_dump(&options(), &mut out).unwrap();
        assert_eq!(
            lines(out),
            vec![
                SEPARATOR,
                "Bytes Received/sec   -- no data --",
                "Bytes Sent/sec          20",
                SEPARATOR,
                "Bytes Received/sec      10",
                "Bytes Sent/sec          20",
            ]
        );
    }

    #[test]
    fn test_other_read_failure_ends_loop() {
        let (pdh, query) = polled_query();
        {
            let mut state = pdh.state();
            state.values.insert(
                "Bytes Received/sec".to_owned(),
                vec![Ok(1.0), Err(PDH_CSTATUS_INVALID_DATA)],
            );
            state.stop_on_collect = Some((5, query.stop_handle()));
        }
        let mut out = Vec::new();
        let result = query.counter_polling_dump(&options(), &mut out);
        match result {
            Err(QueryError::Pdh(e)) => assert_eq!(e.status(), PDH_CSTATUS_INVALID_DATA),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(pdh.state().collects, 2);
        // the failing counter comes first in the second sample, nothing follows it
        assert_eq!(lines(out).len(), 4);
        assert_eq!(pdh.state().reads, 3);
    }

    #[test]
    fn test_collection_failure_ends_loop() {
        let (pdh, query) = polled_query();
        pdh.state().fail_collect = Some((1, PDH_NO_DATA));
        let mut out = Vec::new();
        let result = query.counter_polling_dump(&options(), &mut out);
        assert!(matches!(result, Err(QueryError::Pdh(ref e)) if e.status() == PDH_NO_DATA));
        assert!(out.is_empty());
        assert_eq!(pdh.state().reads, 0);
    }

    #[test]
    fn test_precision() {
        let (pdh, query) = polled_query();
        {
            let mut state = pdh.state();
            state.values.insert("Bytes Received/sec".to_owned(), vec![Ok(1.0 / 3.0)]);
            state.stop_on_collect = Some((1, query.stop_handle()));
        }
        let options = PollOptions {
            precision: Some(2),
            ..options()
        };
        let mut out = Vec::new();
        query.counter_polling_dump(&options, &mut out).unwrap();
        assert_eq!(lines(out)[1], "Bytes Received/sec      0.33");
    }

    #[test]
    fn test_taken_query_does_not_poll() {
        let (pdh, mut query) = polled_query();
        let moved = query.take();
        let result = query.counter_polling_dump(&options(), &mut Vec::new());
        assert!(matches!(result, Err(QueryError::NoCounters)));
        assert_eq!(pdh.state().collects, 0);
        assert_eq!(moved.counters().len(), 2);
    }
}
