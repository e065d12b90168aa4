use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use win_low::um::pdh::*;

/// Level of detail of the objects and counters returned by enumeration.
///
/// Each level includes everything from the levels below it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub enum DetailLevel {
    /// `PERF_DETAIL_NOVICE`
    Novice,
    /// `PERF_DETAIL_ADVANCED`
    Advanced,
    /// `PERF_DETAIL_EXPERT`
    Expert,
    /// `PERF_DETAIL_WIZARD`, everything.
    #[default]
    Wizard,
}

impl DetailLevel {
    pub fn raw(&self) -> u32 {
        match self {
            DetailLevel::Novice => PERF_DETAIL_NOVICE,
            DetailLevel::Advanced => PERF_DETAIL_ADVANCED,
            DetailLevel::Expert => PERF_DETAIL_EXPERT,
            DetailLevel::Wizard => PERF_DETAIL_WIZARD,
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetailLevel::Novice => "novice",
            DetailLevel::Advanced => "advanced",
            DetailLevel::Expert => "expert",
            DetailLevel::Wizard => "wizard",
        };
        f.write_str(name)
    }
}

impl FromStr for DetailLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "novice" => Ok(DetailLevel::Novice),
            "advanced" => Ok(DetailLevel::Advanced),
            "expert" => Ok(DetailLevel::Expert),
            "wizard" => Ok(DetailLevel::Wizard),
            _ => Err(format!(
                "unknown detail level {:?}, expected one of: novice, advanced, expert, wizard",
                s
            )),
        }
    }
}

bitflags! {
    /// Modifiers applied on top of `PDH_FMT_DOUBLE` when reading a formatted value.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub struct FormatFlags: u32 {
        /// Do not apply the counter's default scaling factor.
        const NOSCALE = PDH_FMT_NOSCALE;
        /// Multiply the final value by 1,000.
        const MULTIPLY_1000 = PDH_FMT_1000;
        /// Do not cap percentage values at 100.
        const NOCAP100 = PDH_FMT_NOCAP100;
    }
}

impl FormatFlags {
    /// Complete `dwFormat` argument for a double-precision read.
    pub fn double_format(&self) -> u32 {
        PDH_FMT_DOUBLE | self.bits()
    }
}
