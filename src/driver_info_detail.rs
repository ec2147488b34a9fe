// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::device_property::check_size_probe_result;
use crate::driver_info_data::FileTime;
use crate::registry_property_value::split_multi_string;
use crate::wide_text;
use crate::SetupApiError;
use windows::Win32::Foundation::ERROR_NOT_ENOUGH_MEMORY;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    SetupDiGetDriverInfoDetailW, HDEVINFO, SP_DEVINFO_DATA, SP_DRVINFO_DATA_V2_W,
    SP_DRVINFO_DETAIL_DATA_W,
};

/// Extended static metadata for one candidate driver: where it came from (INF file and section)
/// and the hardware/compatible IDs it was matched on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverInfoDetail {
    pub inf_date: FileTime,
    pub section_name: String,
    pub inf_file_name: String,
    pub drv_description: String,
    pub hardware_id: String,
    pub compat_ids: Vec<String>,
}

// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdigetdriverinfodetailw
pub(crate) fn get_driver_info_detail(
    handle_to_device_info_set: HDEVINFO,
    devinfo_data: &mut SP_DEVINFO_DATA,
    driver_info_data: &mut SP_DRVINFO_DATA_V2_W,
) -> Result<DriverInfoDetail, SetupApiError> {
    // get the size of the detail record; the trailing hardware-ID buffer is variable length, so
    // the required size is only known to the provider
    let mut required_size: u32 = 0;
    let get_detail_result = unsafe {
        SetupDiGetDriverInfoDetailW(
            handle_to_device_info_set,
            devinfo_data,
            driver_info_data,
            std::ptr::null_mut(),
            0,
            &mut required_size,
        )
    };
    check_size_probe_result(get_detail_result, required_size)?;

    // manually allocate memory for the SP_DRVINFO_DETAIL_DATA_W struct (as it has an
    // ANYSIZE_ARRAY for the [u16] HardwareID buffer); the provider insists on at least the
    // fixed-layout size even when the record's payload is shorter
    let buffer_size = std::cmp::max(required_size as usize, std::mem::size_of::<SP_DRVINFO_DETAIL_DATA_W>());
    let detail_data = unsafe { libc::malloc(buffer_size) as *mut SP_DRVINFO_DETAIL_DATA_W };
    if detail_data.is_null() {
        return Err(SetupApiError::Win32Error(ERROR_NOT_ENOUGH_MEMORY.0));
    }
    unsafe {
        std::ptr::write_bytes(detail_data as *mut u8, 0, buffer_size);
        (*detail_data).cbSize = std::mem::size_of::<SP_DRVINFO_DETAIL_DATA_W>() as u32;
    }

    let get_detail_result = unsafe {
        SetupDiGetDriverInfoDetailW(
            handle_to_device_info_set,
            devinfo_data,
            driver_info_data,
            detail_data,
            buffer_size as u32,
            std::ptr::null_mut(),
        )
    };
    let decode_result = if get_detail_result == 0 {
        Err(SetupApiError::from_last_error())
    } else {
        Ok(unsafe { decode_detail_data(detail_data, buffer_size as u32) })
    };
    //
    // the manually-allocated record is released on every path once decoding has copied out of it
    unsafe { libc::free(detail_data as *mut libc::c_void) };

    decode_result
}

unsafe fn decode_detail_data(detail_data: *const SP_DRVINFO_DETAIL_DATA_W, record_size: u32) -> DriverInfoDetail {
    // the hardware-ID buffer runs from the HardwareID field to the end of the record;
    // CompatIDsOffset/CompatIDsLength address the compatible-ID list within it, in utf16 chars
    let hardware_id_buffer_offset = std::mem::offset_of!(SP_DRVINFO_DETAIL_DATA_W, HardwareID);
    let hardware_id_buffer_length = (record_size as usize - hardware_id_buffer_offset) / 2;
    let hardware_id_buffer = std::slice::from_raw_parts((*detail_data).HardwareID.as_ptr(), hardware_id_buffer_length);

    let compat_ids_offset = (*detail_data).CompatIDsOffset as usize;
    let compat_ids_length = (*detail_data).CompatIDsLength as usize;
    let compat_ids = if compat_ids_length > 0 && compat_ids_offset + compat_ids_length <= hardware_id_buffer_length {
        split_multi_string(&hardware_id_buffer[compat_ids_offset..compat_ids_offset + compat_ids_length])
    } else {
        Vec::new()
    };

    DriverInfoDetail {
        inf_date: FileTime::from_native(&(*detail_data).InfDate),
        section_name: wide_text::string_from_utf16_until_nul(&(*detail_data).SectionName),
        inf_file_name: wide_text::string_from_utf16_until_nul(&(*detail_data).InfFileName),
        drv_description: wide_text::string_from_utf16_until_nul(&(*detail_data).DrvDescription),
        hardware_id: wide_text::string_from_utf16_until_nul(hardware_id_buffer),
        compat_ids,
    }
}
