use std::error::Error;
use std::fmt;

use crate::prelude::*;

use win_low::um::pdhmsg::status_name;
use win_low::um::winnt::MAKELANGID;

/// Status of a failed Win32 or PDH call.
///
/// PDH functions report their own status codes which `FormatMessageW` does not know about
/// without loading `pdh.dll` messages, so for them the symbolic name is shown instead.
#[derive(Debug, Clone)]
pub struct WinError {
    error_code: u32,
    comment: Option<String>,
    message: Option<String>,
}

impl WinError {
    fn _new(error_code: u32, comment: Option<String>, message: Option<String>) -> Self {
        WinError {
            error_code,
            comment,
            message,
        }
    }

    pub fn new(error_code: WIN32_ERROR) -> Self {
        Self::_new(error_code.0, None, None)
    }

    /// Wrap a status returned by one of the `Pdh*` functions.
    pub fn from_pdh_status(status: u32) -> Self {
        Self::_new(status, None, status_name(status).map(str::to_owned))
    }

    /// Call `GetLastError()` & `FormatMessage(...)` at once.
    pub fn get_with_message() -> Self {
        Self::new(Self::get_last_error()).with_message()
    }

    pub fn with_comment<S: Into<String>>(&self, comment: S) -> Self {
        let mut clone = self.clone();
        clone.comment = Some(comment.into());
        clone
    }

    /// If formatted message is not initialized, get one via `FormatMessage(...)` and return new error instance.
    pub fn with_message(&self) -> Self {
        match self.message.as_ref() {
            Some(_) => self.clone(),
            None => {
                let mut clone = self.clone();
                clone.message = Some(match Self::format_message_from_error_code(self.error_code) {
                    Ok(message) => message,
                    Err(format_error) => format!(
                        "FormatMessageW failed with 0x{:08X} while formatting this error",
                        format_error.0
                    ),
                });
                clone
            }
        }
    }

    /// Error code getter.
    pub fn error_code(&self) -> u32 {
        self.error_code
    }

    #[inline(always)]
    fn get_last_error() -> WIN32_ERROR {
        unsafe { GetLastError() }
    }

    fn format_message_from_error_code(error_code: u32) -> Result<String, WIN32_ERROR> {
        unsafe {
            let mut buffer: PWSTR = PWSTR::null();
            // If the function succeeds, the return value is the number of TCHARs stored in the output buffer, excluding the terminating null character.
            let len = FormatMessageW(
                FORMAT_MESSAGE_IGNORE_INSERTS
                    | FORMAT_MESSAGE_FROM_SYSTEM
                    | FORMAT_MESSAGE_ALLOCATE_BUFFER, // dwFlags
                None, // lpSource
                error_code, // dwMessageId
                MAKELANGID(LANG_NEUTRAL as _, SUBLANG_DEFAULT as _) as _, // dwLanguageId
                ::std::mem::transmute(&mut buffer as *mut PWSTR),  // lpBuffer
                0, // nSize
                None, // va_args
            );

            // If the function fails, the return value is zero. To get extended error information, call GetLastError.
            if len == 0 {
                return Err(Self::get_last_error());
            }

            let message_u16 = U16Str::from_ptr(buffer.0, len as usize);
            let message_string = message_u16.to_string_lossy().trim_end().to_owned();

            LocalFree(Some(HLOCAL(buffer.as_ptr() as *mut _)));

            Ok(message_string)
        }
    }

    const UNKNOWN_ERROR: &'static str = "UNKNOWN ERROR CODE";
}

impl fmt::Display for WinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = self.comment.as_ref() {
            write!(f, "{}; ", comment)?;
        }
        let message = match self.message.as_ref() {
            Some(msg) => msg.as_str(),
            None => Self::UNKNOWN_ERROR,
        };
        write!(f, "Error Code 0x{:08X}: {}", self.error_code, message)
    }
}

impl Error for WinError {}

/// Rust + Windows extension for error handling
pub type WinResult<T> = Result<T, WinError>;
