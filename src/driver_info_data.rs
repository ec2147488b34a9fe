// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::wide_text;
use crate::SetupApiError;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::SP_DRVINFO_DATA_V2_W;
use windows_sys::Win32::Foundation::FILETIME;

// This module is the only place the provider's fixed-layout SP_DRVINFO_DATA_V2_W record is
// taken apart or rebuilt; everything else in the crate works with the portable DriverInfoData.

/// One candidate driver, in portable form.
///
/// `driver_type` carries the provider's raw driver-type tag (an SPDIT_* value; zero for
/// placeholder entries). `reserved` is the provider's opaque bookkeeping word; it is carried
/// verbatim so that converting back to the native record reproduces it exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverInfoData {
    pub driver_type: u32,
    pub reserved: usize,
    pub description: String,
    pub mfg_name: String,
    pub provider_name: String,
    pub driver_date: FileTime,
    pub driver_version: u64,
}
//
impl DriverInfoData {
    /// Decodes the provider's fixed-layout record into portable form.
    pub fn from_native(native: &SP_DRVINFO_DATA_V2_W) -> DriverInfoData {
        DriverInfoData {
            driver_type: native.DriverType,
            reserved: native.Reserved,
            description: wide_text::string_from_utf16_until_nul(&native.Description),
            mfg_name: wide_text::string_from_utf16_until_nul(&native.MfgName),
            provider_name: wide_text::string_from_utf16_until_nul(&native.ProviderName),
            driver_date: FileTime::from_native(&native.DriverDate),
            driver_version: native.DriverVersion,
        }
    }

    /// Rebuilds the provider's fixed-layout record.
    ///
    /// For any value obtained via `from_native` on a provider-produced record this is an exact
    /// inverse. Fails with `InvalidParameter` if a string field contains an interior null or
    /// does not fit its fixed-size buffer (with its null terminator).
    pub fn to_native(&self) -> Result<SP_DRVINFO_DATA_V2_W, SetupApiError> {
        Ok(SP_DRVINFO_DATA_V2_W {
            cbSize: std::mem::size_of::<SP_DRVINFO_DATA_V2_W>() as u32,
            DriverType: self.driver_type,
            Reserved: self.reserved,
            Description: encode_fixed_utf16(&self.description)?,
            MfgName: encode_fixed_utf16(&self.mfg_name)?,
            ProviderName: encode_fixed_utf16(&self.provider_name)?,
            DriverDate: self.driver_date.to_native(),
            DriverVersion: self.driver_version,
        })
    }
}

/// A win32 FILETIME timestamp in portable, comparable form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileTime {
    pub low_date_time: u32,
    pub high_date_time: u32,
}
//
impl FileTime {
    pub(crate) fn from_native(native: &FILETIME) -> FileTime {
        FileTime {
            low_date_time: native.dwLowDateTime,
            high_date_time: native.dwHighDateTime,
        }
    }

    pub(crate) fn to_native(self) -> FILETIME {
        FILETIME {
            dwLowDateTime: self.low_date_time,
            dwHighDateTime: self.high_date_time,
        }
    }
}

// encodes into a zero-filled fixed-size utf16 buffer, leaving room for the null terminator
fn encode_fixed_utf16<const BUFFER_LENGTH: usize>(text: &str) -> Result<[u16; BUFFER_LENGTH], SetupApiError> {
    let mut buffer = [0u16; BUFFER_LENGTH];
    let mut length: usize = 0;
    for utf16_char in text.encode_utf16() {
        if utf16_char == 0 || length + 1 >= BUFFER_LENGTH {
            return Err(SetupApiError::InvalidParameter);
        }
        buffer[length] = utf16_char;
        length += 1;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_native() -> SP_DRVINFO_DATA_V2_W {
        let mut native = SP_DRVINFO_DATA_V2_W {
            cbSize: std::mem::size_of::<SP_DRVINFO_DATA_V2_W>() as u32,
            DriverType: 2, /*SPDIT_COMPATDRIVER*/
            Reserved: 0xD00D,
            Description: [0; 256],
            MfgName: [0; 256],
            ProviderName: [0; 256],
            DriverDate: FILETIME { dwLowDateTime: 0x9ac2_41a0, dwHighDateTime: 0x01d9_5eb3 },
            DriverVersion: 0x000a_0000_4a61_0000,
        };
        for (index, utf16_char) in "Realtek PCIe GbE Family Controller".encode_utf16().enumerate() {
            native.Description[index] = utf16_char;
        }
        for (index, utf16_char) in "Realtek".encode_utf16().enumerate() {
            native.MfgName[index] = utf16_char;
        }
        for (index, utf16_char) in "Microsoft".encode_utf16().enumerate() {
            native.ProviderName[index] = utf16_char;
        }

        native
    }

    fn native_eq(lhs: &SP_DRVINFO_DATA_V2_W, rhs: &SP_DRVINFO_DATA_V2_W) -> bool {
        lhs.cbSize == rhs.cbSize
            && lhs.DriverType == rhs.DriverType
            && lhs.Reserved == rhs.Reserved
            && lhs.Description == rhs.Description
            && lhs.MfgName == rhs.MfgName
            && lhs.ProviderName == rhs.ProviderName
            && lhs.DriverDate.dwLowDateTime == rhs.DriverDate.dwLowDateTime
            && lhs.DriverDate.dwHighDateTime == rhs.DriverDate.dwHighDateTime
            && lhs.DriverVersion == rhs.DriverVersion
    }

    #[test]
    fn native_to_portable_to_native_is_identity() {
        let native = sample_native();
        let rebuilt = DriverInfoData::from_native(&native).to_native().unwrap();
        assert!(native_eq(&native, &rebuilt));
    }

    #[test]
    fn portable_to_native_to_portable_is_identity() {
        let portable = DriverInfoData {
            driver_type: 1, /*SPDIT_CLASSDRIVER*/
            reserved: 0,
            description: "Generic network adapter".to_string(),
            mfg_name: "Generic".to_string(),
            provider_name: "Generic".to_string(),
            driver_date: FileTime { low_date_time: 17, high_date_time: 42 },
            driver_version: 99,
        };
        let round_tripped = DriverInfoData::from_native(&portable.to_native().unwrap());
        assert_eq!(portable, round_tripped);
    }

    #[test]
    fn portable_decoding_stops_at_the_null_terminator() {
        let portable = DriverInfoData::from_native(&sample_native());
        assert_eq!(portable.description, "Realtek PCIe GbE Family Controller");
        assert_eq!(portable.mfg_name, "Realtek");
        assert_eq!(portable.provider_name, "Microsoft");
    }

    #[test]
    fn oversized_strings_do_not_fit_the_fixed_layout() {
        let mut portable = DriverInfoData::from_native(&sample_native());
        portable.description = "x".repeat(256);
        assert_eq!(portable.to_native().unwrap_err(), SetupApiError::InvalidParameter);

        // the longest string which still leaves room for its null terminator fits
        portable.description = "x".repeat(255);
        assert!(portable.to_native().is_ok());
    }

    #[test]
    fn interior_nulls_do_not_fit_the_fixed_layout() {
        let mut portable = DriverInfoData::from_native(&sample_native());
        portable.mfg_name = "Real\0tek".to_string();
        assert_eq!(portable.to_native().unwrap_err(), SetupApiError::InvalidParameter);
    }
}
