// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::device_info_data::DeviceInfoData;
use crate::wide_text;
use crate::SetupApiError;
use log::{debug, warn};
use windows_sys::core::GUID;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    SetupDiCreateDeviceInfoListExW, SetupDiCreateDeviceInfoW, SetupDiDestroyDeviceInfoList,
    SetupDiGetClassDevsExW, SetupDiGetDeviceInfoListDetailW, SetupDiGetSelectedDevice,
    SetupDiSetSelectedDevice, HDEVINFO, SP_DEVINFO_DATA, SP_DEVINFO_LIST_DETAIL_DATA_W,
    SP_MAX_MACHINENAME_LENGTH,
};
use windows_sys::Win32::Foundation::{HANDLE, INVALID_HANDLE_VALUE};

/// A device information set: the provider-managed collection of device records addressed by one
/// opaque HDEVINFO handle.
///
/// The set exclusively owns its handle. Dropping the set destroys the handle and releases every
/// resource derived from it; `close` does the same but surfaces the provider's failure code.
/// Derived values (`DeviceInfoData`, `DriverInfoList`, `DevRegKey`) borrow the set, so the
/// borrow checker keeps them from outliving it.
///
/// The provider leaves concurrent use of one set from multiple threads undefined; keep a set on
/// a single logical caller.
pub struct DeviceInfoSet {
    handle: HDEVINFO,
}
//
impl DeviceInfoSet {
    /// Creates an empty device information set, optionally scoped to a setup class and/or a
    /// remote machine (`None` or an empty machine name means the local machine).
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdicreatedeviceinfolistexw
    pub fn create(class_guid: Option<&GUID>, machine_name: Option<&str>) -> Result<DeviceInfoSet, SetupApiError> {
        let class_guid_as_ptr = match class_guid {
            Some(value) => value as *const GUID,
            None => std::ptr::null(),
        };
        //
        // NOTE: the utf16 vector must stay bound to a local so that it outlives the pointer we
        //       take from it for the call
        let machine_name_as_utf16_chars = wide_text::optional_to_utf16_with_nul(machine_name);
        let machine_name_as_pcwstr = wide_text::optional_utf16_as_pcwstr(&machine_name_as_utf16_chars);

        let handle = unsafe {
            SetupDiCreateDeviceInfoListExW(class_guid_as_ptr, std::ptr::null_mut(), machine_name_as_pcwstr, std::ptr::null_mut())
        };
        if handle as isize == INVALID_HANDLE_VALUE as isize {
            return Err(SetupApiError::from_last_error());
        }

        debug!("created empty device info set");
        Ok(DeviceInfoSet { handle })
    }

    /// Opens a device information set over the pre-existing devices which match the given setup
    /// class and/or PnP enumerator name, combined per `flags` (DIGCF_* bits, e.g.
    /// `DIGCF_PRESENT`).
    ///
    /// At least one of `class_guid` and `enumerator` must be supplied; with neither, the
    /// provider has no way to bound which devices qualify and the call fails with
    /// `InvalidParameter`.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdigetclassdevsexw
    pub fn open(
        class_guid: Option<&GUID>,
        enumerator: Option<&str>,
        flags: u32,
        machine_name: Option<&str>,
    ) -> Result<DeviceInfoSet, SetupApiError> {
        if class_guid.is_none() && enumerator.is_none() {
            return Err(SetupApiError::InvalidParameter);
        }

        let class_guid_as_ptr = match class_guid {
            Some(value) => value as *const GUID,
            None => std::ptr::null(),
        };
        //
        let enumerator_as_utf16_chars = wide_text::optional_to_utf16_with_nul(enumerator);
        let enumerator_as_pcwstr = wide_text::optional_utf16_as_pcwstr(&enumerator_as_utf16_chars);
        //
        let machine_name_as_utf16_chars = wide_text::optional_to_utf16_with_nul(machine_name);
        let machine_name_as_pcwstr = wide_text::optional_utf16_as_pcwstr(&machine_name_as_utf16_chars);

        let handle = unsafe {
            SetupDiGetClassDevsExW(
                class_guid_as_ptr,
                enumerator_as_pcwstr,
                std::ptr::null_mut(),
                flags,
                std::ptr::null_mut(),
                machine_name_as_pcwstr,
                std::ptr::null_mut(),
            )
        };
        if handle as isize == INVALID_HANDLE_VALUE as isize {
            return Err(SetupApiError::from_last_error());
        }

        debug!("opened device info set (flags: {:#x})", flags);
        Ok(DeviceInfoSet { handle })
    }

    /// Destroys the set, releasing the provider handle and every resource derived from it.
    ///
    /// Dropping the set does the same; use `close` when the failure code matters.
    pub fn close(self) -> Result<(), SetupApiError> {
        let handle = self.handle;
        std::mem::forget(self);

        let destroy_result = unsafe { SetupDiDestroyDeviceInfoList(handle) };
        if destroy_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        debug!("closed device info set");
        Ok(())
    }

    /// Set-level detail: the class the set was scoped to and, for a set opened against a remote
    /// machine, that machine's connection handle and name.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdigetdeviceinfolistdetailw
    pub fn list_detail(&self) -> Result<DeviceInfoListDetail, SetupApiError> {
        let mut detail_data = SP_DEVINFO_LIST_DETAIL_DATA_W {
            cbSize: std::mem::size_of::<SP_DEVINFO_LIST_DETAIL_DATA_W>() as u32,
            ClassGuid: GUID::from_u128(0),
            RemoteMachineHandle: std::ptr::null_mut(),
            RemoteMachineName: [0; SP_MAX_MACHINENAME_LENGTH as usize],
        };

        let get_detail_result = unsafe { SetupDiGetDeviceInfoListDetailW(self.handle, &mut detail_data) };
        if get_detail_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(DeviceInfoListDetail {
            class_guid: detail_data.ClassGuid,
            remote_machine_handle: detail_data.RemoteMachineHandle,
            remote_machine_name: wide_text::string_from_utf16_until_nul(&detail_data.RemoteMachineName),
        })
    }

    /// Creates a new device record in the set. Requires elevation; `AccessDenied` is an
    /// expected outcome otherwise.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdicreatedeviceinfow
    pub fn create_device_info(
        &self,
        device_name: &str,
        class_guid: &GUID,
        device_description: Option<&str>,
        creation_flags: u32,
    ) -> Result<DeviceInfoData<'_>, SetupApiError> {
        let device_name_as_utf16_chars = wide_text::to_utf16_with_nul(device_name);
        //
        let device_description_as_utf16_chars = wide_text::optional_to_utf16_with_nul(device_description);
        let device_description_as_pcwstr = wide_text::optional_utf16_as_pcwstr(&device_description_as_utf16_chars);

        let mut devinfo_data = empty_devinfo_data();
        let create_result = unsafe {
            SetupDiCreateDeviceInfoW(
                self.handle,
                device_name_as_utf16_chars.as_ptr(),
                class_guid,
                device_description_as_pcwstr,
                std::ptr::null_mut(),
                creation_flags,
                &mut devinfo_data,
            )
        };
        if create_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(DeviceInfoData::new(devinfo_data, self))
    }

    /// Records `device` as the set's selected device.
    ///
    /// The device must be a member of this set (i.e. a value this set's enumerator produced);
    /// a record from a different set is rejected with `InvalidParameter`.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdisetselecteddevice
    pub fn set_selected_device(&self, device: &DeviceInfoData<'_>) -> Result<(), SetupApiError> {
        if !std::ptr::eq(device.owning_set(), self) {
            return Err(SetupApiError::InvalidParameter);
        }

        let mut devinfo_data = device.raw_devinfo_data();
        let set_selected_result = unsafe { SetupDiSetSelectedDevice(self.handle, &mut devinfo_data) };
        if set_selected_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(())
    }

    /// The set's currently selected device. Fails with the provider's native code if no device
    /// has been selected.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdigetselecteddevice
    pub fn selected_device(&self) -> Result<DeviceInfoData<'_>, SetupApiError> {
        let mut devinfo_data = empty_devinfo_data();
        let get_selected_result = unsafe { SetupDiGetSelectedDevice(self.handle, &mut devinfo_data) };
        if get_selected_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(DeviceInfoData::new(devinfo_data, self))
    }

    pub(crate) fn raw_handle(&self) -> HDEVINFO {
        self.handle
    }
}
//
impl Drop for DeviceInfoSet {
    fn drop(&mut self) {
        let destroy_result = unsafe { SetupDiDestroyDeviceInfoList(self.handle) };
        if destroy_result == 0 {
            warn!("could not destroy device info set; win32 error: {}", SetupApiError::from_last_error().code());
            debug_assert!(false, "Could not clean up device info set");
        }
    }
}

pub(crate) fn empty_devinfo_data() -> SP_DEVINFO_DATA {
    SP_DEVINFO_DATA {
        cbSize: std::mem::size_of::<SP_DEVINFO_DATA>() as u32,
        ClassGuid: GUID::from_u128(0),
        DevInst: 0,
        Reserved: 0,
    }
}

/// Set-level detail returned by `DeviceInfoSet::list_detail`.
///
/// For a set scoped to the local machine, `remote_machine_handle` is null and
/// `remote_machine_name` is empty; for a remote set they carry the connection handle and the
/// machine name exactly as given at creation.
pub struct DeviceInfoListDetail {
    pub class_guid: GUID,
    pub remote_machine_handle: HANDLE,
    pub remote_machine_name: String,
}
