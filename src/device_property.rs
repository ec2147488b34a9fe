// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::device_info_data::DeviceInfoData;
use crate::device_registry_property::DeviceRegistryProperty;
use crate::registry_property_value::RegistryPropertyValue;
use crate::wide_text;
use crate::SetupApiError;
use windows::Win32::Foundation::ERROR_INSUFFICIENT_BUFFER;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    SetupDiGetDeviceInstallParamsW, SetupDiGetDeviceRegistryPropertyW, SP_DEVINSTALL_PARAMS_W,
};

impl DeviceInfoData<'_> {
    /// Reads one of the device's registry properties, decoded per the registry data type the
    /// provider reports for it.
    ///
    /// Fails with `NotPresent` when the device legitimately lacks the property (e.g. not every
    /// device carries compatible IDs); that outcome must not abort a broader enumeration loop.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdigetdeviceregistrypropertyw
    pub fn registry_property(&self, property: DeviceRegistryProperty) -> Result<RegistryPropertyValue, SetupApiError> {
        let mut devinfo_data = self.raw_devinfo_data();

        // get the data type and size of the property; the expected "error" here is
        // ERROR_INSUFFICIENT_BUFFER with required_size filled in
        let mut registry_data_type: u32 = 0;
        let mut required_size: u32 = 0;
        let get_property_result = unsafe {
            SetupDiGetDeviceRegistryPropertyW(
                self.owning_set().raw_handle(),
                &mut devinfo_data,
                property.to_spdrp(),
                &mut registry_data_type,
                std::ptr::null_mut(),
                0,
                &mut required_size,
            )
        };
        check_size_probe_result(get_property_result, required_size)?;

        // retrieve the property value
        let mut property_buffer = vec![0u8; required_size as usize];
        let get_property_result = unsafe {
            SetupDiGetDeviceRegistryPropertyW(
                self.owning_set().raw_handle(),
                &mut devinfo_data,
                property.to_spdrp(),
                &mut registry_data_type,
                property_buffer.as_mut_ptr(),
                required_size,
                std::ptr::null_mut(),
            )
        };
        if get_property_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(RegistryPropertyValue::decode(registry_data_type, &property_buffer))
    }

    /// The device's installer configuration parameters.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdigetdeviceinstallparamsw
    pub fn install_params(&self) -> Result<DeviceInstallParams, SetupApiError> {
        let mut devinfo_data = self.raw_devinfo_data();

        let mut install_params = SP_DEVINSTALL_PARAMS_W {
            cbSize: std::mem::size_of::<SP_DEVINSTALL_PARAMS_W>() as u32,
            Flags: 0,
            FlagsEx: 0,
            hwndParent: std::ptr::null_mut(),
            InstallMsgHandler: None,
            InstallMsgHandlerContext: std::ptr::null_mut(),
            FileQueue: std::ptr::null_mut(),
            ClassInstallReserved: 0,
            Reserved: 0,
            DriverPath: [0; 260],
        };

        let get_install_params_result =
            unsafe { SetupDiGetDeviceInstallParamsW(self.owning_set().raw_handle(), &mut devinfo_data, &mut install_params) };
        if get_install_params_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(DeviceInstallParams {
            flags: install_params.Flags,
            flags_ex: install_params.FlagsEx,
            driver_path: wide_text::string_from_utf16_until_nul(&install_params.DriverPath),
        })
    }
}

// shared handling for the two-call size-probe convention: a probe with a null buffer is expected
// to fail with ERROR_INSUFFICIENT_BUFFER and fill in the required size
pub(crate) fn check_size_probe_result(probe_result: i32, required_size: u32) -> Result<(), SetupApiError> {
    if probe_result == 0 {
        let error = SetupApiError::from_last_error();
        if error.code() == ERROR_INSUFFICIENT_BUFFER.0 {
            // the error we intentionally induced; the caller can now size its buffer
            Ok(())
        } else {
            Err(error)
        }
    } else {
        // a probe with no buffer only succeeds when the value itself is empty
        if required_size > 0 {
            debug_assert!(false, "Size probe succeeded even though we passed it no buffer");
            return Err(SetupApiError::Win32Error(windows::Win32::Foundation::ERROR_INVALID_USER_BUFFER.0));
        }
        Ok(())
    }
}

/// Read-only per-device installer configuration, decoded from the provider's native install
/// params record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInstallParams {
    pub flags: u32,
    pub flags_ex: u32,
    pub driver_path: String,
}
