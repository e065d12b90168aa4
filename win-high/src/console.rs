//! Console control events (Ctrl+C, Ctrl+Break, closing the console window).
#![allow(non_snake_case)]

use crate::prelude::*;

/// Signature of a console control handler routine.
pub type CtrlHandler = unsafe extern "system" fn(ctrl_type: u32) -> BOOL;

/// Add `handler` to the list of handler routines of the calling process.
pub fn SetConsoleCtrlHandler_Safe(handler: CtrlHandler) -> WinResult<()> {
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }
        .map_err(|_| WinError::get_with_message().with_comment("SetConsoleCtrlHandler failed"))
}

/// Whether the control event asks the process to stop: Ctrl+C, Ctrl+Break or console close.
pub fn is_stop_event(ctrl_type: u32) -> bool {
    ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT || ctrl_type == CTRL_CLOSE_EVENT
}
