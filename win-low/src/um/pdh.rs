//! Limits, detail levels and formatting flags from `<pdh.h>` and `<winperf.h>`.

/// Maximum length of a counter path in characters, not counting the terminating NUL.
pub const PDH_MAX_COUNTER_PATH: u32 = 2048;

pub const PERF_DETAIL_NOVICE: u32 = 100;
pub const PERF_DETAIL_ADVANCED: u32 = 200;
pub const PERF_DETAIL_EXPERT: u32 = 300;
pub const PERF_DETAIL_WIZARD: u32 = 400;

pub const PDH_FMT_RAW: u32 = 0x0000_0010;
pub const PDH_FMT_ANSI: u32 = 0x0000_0020;
pub const PDH_FMT_UNICODE: u32 = 0x0000_0040;
pub const PDH_FMT_LONG: u32 = 0x0000_0100;
pub const PDH_FMT_DOUBLE: u32 = 0x0000_0200;
pub const PDH_FMT_LARGE: u32 = 0x0000_0400;
pub const PDH_FMT_NOSCALE: u32 = 0x0000_1000;
pub const PDH_FMT_1000: u32 = 0x0000_2000;
pub const PDH_FMT_NODATA: u32 = 0x0000_4000;
pub const PDH_FMT_NOCAP100: u32 = 0x0000_8000;
