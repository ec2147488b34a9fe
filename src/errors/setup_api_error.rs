// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use windows::Win32::Foundation::{
    GetLastError, ERROR_ACCESS_DENIED, ERROR_INVALID_DATA, ERROR_INVALID_PARAMETER,
    ERROR_NO_MORE_ITEMS, WIN32_ERROR,
};

/// Error surface of every setup API operation in this crate.
///
/// The well-known win32 codes callers are expected to branch on get their own variants; every
/// other code passes through as `Win32Error` with the native value intact.
///
/// - `NoMoreItems` is the normal index-probe enumeration terminator, not a failure.
/// - `AccessDenied` is an expected outcome for operations which require elevation (e.g. creating
///   a new device record).
/// - `NotPresent` means the device legitimately lacks the requested registry property; it must
///   not abort a broader enumeration loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupApiError {
    InvalidParameter,
    AccessDenied,
    NotPresent,
    NoMoreItems,
    Win32Error(/*win32_error: */ u32),
}
//
impl SetupApiError {
    pub(crate) fn from_win32_error(win32_error: WIN32_ERROR) -> SetupApiError {
        match win32_error {
            ERROR_INVALID_PARAMETER => SetupApiError::InvalidParameter,
            ERROR_ACCESS_DENIED => SetupApiError::AccessDenied,
            ERROR_INVALID_DATA => SetupApiError::NotPresent,
            ERROR_NO_MORE_ITEMS => SetupApiError::NoMoreItems,
            _ => SetupApiError::Win32Error(win32_error.0),
        }
    }

    pub(crate) fn from_last_error() -> SetupApiError {
        SetupApiError::from_win32_error(unsafe { GetLastError() })
    }

    /// The native win32 error code behind this error.
    pub fn code(&self) -> u32 {
        match self {
            SetupApiError::InvalidParameter => ERROR_INVALID_PARAMETER.0,
            SetupApiError::AccessDenied => ERROR_ACCESS_DENIED.0,
            SetupApiError::NotPresent => ERROR_INVALID_DATA.0,
            SetupApiError::NoMoreItems => ERROR_NO_MORE_ITEMS.0,
            SetupApiError::Win32Error(win32_error) => *win32_error,
        }
    }
}

impl std::fmt::Display for SetupApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupApiError::InvalidParameter => write!(f, "invalid parameter"),
            SetupApiError::AccessDenied => write!(f, "access denied"),
            SetupApiError::NotPresent => write!(f, "property is not present on this device"),
            SetupApiError::NoMoreItems => write!(f, "no more items"),
            SetupApiError::Win32Error(win32_error) => write!(f, "win32 error: {}", win32_error),
        }
    }
}

impl std::error::Error for SetupApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_codes_classify_to_their_variants() {
        assert_eq!(SetupApiError::from_win32_error(ERROR_INVALID_PARAMETER), SetupApiError::InvalidParameter);
        assert_eq!(SetupApiError::from_win32_error(ERROR_ACCESS_DENIED), SetupApiError::AccessDenied);
        assert_eq!(SetupApiError::from_win32_error(ERROR_INVALID_DATA), SetupApiError::NotPresent);
        assert_eq!(SetupApiError::from_win32_error(ERROR_NO_MORE_ITEMS), SetupApiError::NoMoreItems);
    }

    #[test]
    fn other_codes_pass_through_verbatim() {
        let error = SetupApiError::from_win32_error(WIN32_ERROR(1784 /*ERROR_INVALID_USER_BUFFER*/));
        assert_eq!(error, SetupApiError::Win32Error(1784));
        assert_eq!(error.code(), 1784);
    }

    #[test]
    fn code_recovers_the_native_value_for_every_variant() {
        assert_eq!(SetupApiError::InvalidParameter.code(), 87);
        assert_eq!(SetupApiError::AccessDenied.code(), 5);
        assert_eq!(SetupApiError::NotPresent.code(), 13);
        assert_eq!(SetupApiError::NoMoreItems.code(), 259);
    }
}
