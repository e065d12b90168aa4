//! Status codes from `<pdhmsg.h>`.
//!
//! PDH functions return these as plain `DWORD`s, separate from the Win32 error space.

pub const ERROR_SUCCESS: u32 = 0;

pub const PDH_CSTATUS_VALID_DATA: u32 = 0x0000_0000;
pub const PDH_CSTATUS_NEW_DATA: u32 = 0x0000_0001;
pub const PDH_CSTATUS_NO_MACHINE: u32 = 0x8000_07D0;
pub const PDH_CSTATUS_NO_INSTANCE: u32 = 0x8000_07D1;
pub const PDH_MORE_DATA: u32 = 0x8000_07D2;
pub const PDH_CSTATUS_ITEM_NOT_VALIDATED: u32 = 0x8000_07D3;
pub const PDH_RETRY: u32 = 0x8000_07D4;
pub const PDH_NO_DATA: u32 = 0x8000_07D5;
pub const PDH_CSTATUS_NO_OBJECT: u32 = 0xC000_0BB8;
pub const PDH_CSTATUS_NO_COUNTER: u32 = 0xC000_0BB9;
pub const PDH_CSTATUS_INVALID_DATA: u32 = 0xC000_0BBA;
pub const PDH_MEMORY_ALLOCATION_FAILURE: u32 = 0xC000_0BBB;
pub const PDH_INVALID_HANDLE: u32 = 0xC000_0BBC;
pub const PDH_INVALID_ARGUMENT: u32 = 0xC000_0BBD;
pub const PDH_FUNCTION_NOT_FOUND: u32 = 0xC000_0BBE;
pub const PDH_CSTATUS_NO_COUNTERNAME: u32 = 0xC000_0BBF;
pub const PDH_CSTATUS_BAD_COUNTERNAME: u32 = 0xC000_0BC0;
pub const PDH_INVALID_BUFFER: u32 = 0xC000_0BC1;
pub const PDH_INSUFFICIENT_BUFFER: u32 = 0xC000_0BC2;
pub const PDH_CANNOT_CONNECT_MACHINE: u32 = 0xC000_0BC3;
pub const PDH_INVALID_PATH: u32 = 0xC000_0BC4;
pub const PDH_INVALID_INSTANCE: u32 = 0xC000_0BC5;
pub const PDH_INVALID_DATA: u32 = 0xC000_0BC6;

/// Symbolic name of a status code, for diagnostics.
pub fn status_name(status: u32) -> Option<&'static str> {
    let name = match status {
        PDH_CSTATUS_VALID_DATA => "PDH_CSTATUS_VALID_DATA",
        PDH_CSTATUS_NEW_DATA => "PDH_CSTATUS_NEW_DATA",
        PDH_CSTATUS_NO_MACHINE => "PDH_CSTATUS_NO_MACHINE",
        PDH_CSTATUS_NO_INSTANCE => "PDH_CSTATUS_NO_INSTANCE",
        PDH_MORE_DATA => "PDH_MORE_DATA",
        PDH_CSTATUS_ITEM_NOT_VALIDATED => "PDH_CSTATUS_ITEM_NOT_VALIDATED",
        PDH_RETRY => "PDH_RETRY",
        PDH_NO_DATA => "PDH_NO_DATA",
        PDH_CSTATUS_NO_OBJECT => "PDH_CSTATUS_NO_OBJECT",
        PDH_CSTATUS_NO_COUNTER => "PDH_CSTATUS_NO_COUNTER",
        PDH_CSTATUS_INVALID_DATA => "PDH_CSTATUS_INVALID_DATA",
        PDH_MEMORY_ALLOCATION_FAILURE => "PDH_MEMORY_ALLOCATION_FAILURE",
        PDH_INVALID_HANDLE => "PDH_INVALID_HANDLE",
        PDH_INVALID_ARGUMENT => "PDH_INVALID_ARGUMENT",
        PDH_FUNCTION_NOT_FOUND => "PDH_FUNCTION_NOT_FOUND",
        PDH_CSTATUS_NO_COUNTERNAME => "PDH_CSTATUS_NO_COUNTERNAME",
        PDH_CSTATUS_BAD_COUNTERNAME => "PDH_CSTATUS_BAD_COUNTERNAME",
        PDH_INVALID_BUFFER => "PDH_INVALID_BUFFER",
        PDH_INSUFFICIENT_BUFFER => "PDH_INSUFFICIENT_BUFFER",
        PDH_CANNOT_CONNECT_MACHINE => "PDH_CANNOT_CONNECT_MACHINE",
        PDH_INVALID_PATH => "PDH_INVALID_PATH",
        PDH_INVALID_INSTANCE => "PDH_INVALID_INSTANCE",
        PDH_INVALID_DATA => "PDH_INVALID_DATA",
        _ => return None,
    };
    Some(name)
}
