// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::wide_text;
use crate::SetupApiError;
use windows::Win32::Foundation::ERROR_INSUFFICIENT_BUFFER;
use windows_sys::core::GUID;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    SetupDiClassGuidsFromNameExW, SetupDiClassNameFromGuidExW, MAX_CLASS_NAME_LEN,
};

/// Resolves a setup class GUID to its class name, on the local machine (`None`/empty) or a
/// remote one.
///
/// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdiclassnamefromguidexw
pub fn class_name_from_guid(class_guid: &GUID, machine_name: Option<&str>) -> Result<String, SetupApiError> {
    let machine_name_as_utf16_chars = wide_text::optional_to_utf16_with_nul(machine_name);
    let machine_name_as_pcwstr = wide_text::optional_utf16_as_pcwstr(&machine_name_as_utf16_chars);

    // class names are bounded by MAX_CLASS_NAME_LEN, so a fixed buffer suffices
    let mut class_name_as_utf16_chars = [0u16; MAX_CLASS_NAME_LEN as usize];
    let get_class_name_result = unsafe {
        SetupDiClassNameFromGuidExW(
            class_guid,
            class_name_as_utf16_chars.as_mut_ptr(),
            MAX_CLASS_NAME_LEN,
            std::ptr::null_mut(),
            machine_name_as_pcwstr,
            std::ptr::null_mut(),
        )
    };
    if get_class_name_result == 0 {
        return Err(SetupApiError::from_last_error());
    }

    Ok(wide_text::string_from_utf16_until_nul(&class_name_as_utf16_chars))
}

/// Resolves a class name to the setup class GUIDs registered under it.
///
/// The mapping is many-to-one: a name may resolve to several GUIDs and callers must scan the
/// full result. An unknown name resolves to an empty list, not an error.
///
/// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdiclassguidsfromnameexw
pub fn class_guids_from_name(class_name: &str, machine_name: Option<&str>) -> Result<Vec<GUID>, SetupApiError> {
    let class_name_as_utf16_chars = wide_text::to_utf16_with_nul(class_name);
    //
    let machine_name_as_utf16_chars = wide_text::optional_to_utf16_with_nul(machine_name);
    let machine_name_as_pcwstr = wide_text::optional_utf16_as_pcwstr(&machine_name_as_utf16_chars);

    // get the number of GUIDs registered under this class name; for an unknown name this first
    // call succeeds with a required count of zero
    let mut required_guid_count: u32 = 0;
    let get_class_guids_result = unsafe {
        SetupDiClassGuidsFromNameExW(
            class_name_as_utf16_chars.as_ptr(),
            std::ptr::null_mut(),
            0,
            &mut required_guid_count,
            machine_name_as_pcwstr,
            std::ptr::null_mut(),
        )
    };
    if get_class_guids_result == 0 {
        let error = SetupApiError::from_last_error();
        if error.code() != ERROR_INSUFFICIENT_BUFFER.0 {
            return Err(error);
        }
        // ERROR_INSUFFICIENT_BUFFER is the expected outcome for a known name; proceed
    }
    if required_guid_count == 0 {
        return Ok(Vec::new());
    }

    // retrieve the GUID list
    let mut class_guids = vec![GUID::from_u128(0); required_guid_count as usize];
    let get_class_guids_result = unsafe {
        SetupDiClassGuidsFromNameExW(
            class_name_as_utf16_chars.as_ptr(),
            class_guids.as_mut_ptr(),
            required_guid_count,
            &mut required_guid_count,
            machine_name_as_pcwstr,
            std::ptr::null_mut(),
        )
    };
    if get_class_guids_result == 0 {
        return Err(SetupApiError::from_last_error());
    }
    class_guids.truncate(required_guid_count as usize);

    Ok(class_guids)
}
