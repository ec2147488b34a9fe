// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::device_info_data::DeviceInfoData;
use crate::enums::{RegKeyScope, RegKeyType};
use crate::SetupApiError;
use log::warn;
use windows::Win32::Foundation::WIN32_ERROR;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::SetupDiOpenDevRegKey;
use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
use windows_sys::Win32::System::Registry::{RegCloseKey, HKEY};

impl DeviceInfoData<'_> {
    /// Opens one of the device's registry keys (its hardware key or its driver's software key)
    /// with the requested registry access rights (e.g. `KEY_READ`).
    ///
    /// The returned key is an independent resource; it is closed when the `DevRegKey` is
    /// dropped, on every exit path.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdiopendevregkey
    pub fn open_dev_reg_key(
        &self,
        scope: RegKeyScope,
        hw_profile: u32,
        key_type: RegKeyType,
        sam_desired: u32,
    ) -> Result<DevRegKey, SetupApiError> {
        let mut devinfo_data = self.raw_devinfo_data();

        let key_handle = unsafe {
            SetupDiOpenDevRegKey(
                self.owning_set().raw_handle(),
                &mut devinfo_data,
                scope.to_dics_flag(),
                hw_profile,
                key_type.to_direg(),
                sam_desired,
            )
        };
        if key_handle as isize == INVALID_HANDLE_VALUE as isize {
            return Err(SetupApiError::from_last_error());
        }

        Ok(DevRegKey { handle: key_handle })
    }
}

/// An open device registry key, closed on drop.
pub struct DevRegKey {
    handle: HKEY,
}
//
impl DevRegKey {
    pub fn raw_handle(&self) -> HKEY {
        self.handle
    }

    /// Closes the key. Dropping the key does the same; use `close` when the failure code
    /// matters.
    pub fn close(self) -> Result<(), SetupApiError> {
        let handle = self.handle;
        std::mem::forget(self);

        let close_result = unsafe { RegCloseKey(handle) };
        if close_result != 0 {
            return Err(SetupApiError::from_win32_error(WIN32_ERROR(close_result)));
        }

        Ok(())
    }
}
//
impl Drop for DevRegKey {
    fn drop(&mut self) {
        let close_result = unsafe { RegCloseKey(self.handle) };
        if close_result != 0 {
            warn!("could not close device registry key; win32 error: {}", close_result);
            debug_assert!(false, "Could not close device registry key");
        }
    }
}
