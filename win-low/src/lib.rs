//! Raw constants and macros from Windows SDK headers.
//!
//! Nothing here calls into Windows, so the values are available on every platform.
pub mod um;
