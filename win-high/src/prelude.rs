#![allow(unused_imports)]

//! Everything you need to get started with PDH on top of the `windows` crate.
pub use std::ptr::{self, null, null_mut};

pub use widestring::{U16CStr, U16CString, U16Str, U16String, u16cstr};

pub use windows_core::{BOOL, PCWSTR, PWSTR};

pub use windows::Win32::Foundation::*;
pub use windows::Win32::System::Console::*;
pub use windows::Win32::System::Diagnostics::Debug::*;
pub use windows::Win32::System::Performance::*;
pub use windows::Win32::System::SystemServices::*;

pub use crate::error::*;
