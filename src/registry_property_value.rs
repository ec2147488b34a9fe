// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::wide_text;
use log::warn;
use windows_sys::Win32::System::Registry::{
    REG_DWORD, REG_EXPAND_SZ, REG_MULTI_SZ, REG_SZ, REG_VALUE_TYPE,
};

/// A decoded device registry property value.
///
/// Which variant a given property decodes to follows from the registry data type the provider
/// returns alongside the raw bytes; a data type this crate does not model (or a fixed-size value
/// of the wrong size) falls back to the raw `Binary` bytes rather than being discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryPropertyValue {
    String(/*value: */ String),
    MultiString(/*values: */ Vec<String>),
    Dword(/*value: */ u32),
    Binary(/*raw_value: */ Vec<u8>),
}
//
impl RegistryPropertyValue {
    pub(crate) fn decode(registry_data_type: REG_VALUE_TYPE, property_buffer: &[u8]) -> RegistryPropertyValue {
        match registry_data_type {
            REG_SZ => {
                let utf16_chars = wide_text::utf16_chars_from_bytes(property_buffer);
                RegistryPropertyValue::String(wide_text::string_from_utf16_until_nul(&utf16_chars))
            }
            REG_EXPAND_SZ => {
                let utf16_chars = wide_text::utf16_chars_from_bytes(property_buffer);
                let unexpanded = wide_text::string_from_utf16_until_nul(&utf16_chars);
                RegistryPropertyValue::String(expand_environment_strings(&unexpanded))
            }
            REG_MULTI_SZ => {
                let utf16_chars = wide_text::utf16_chars_from_bytes(property_buffer);
                RegistryPropertyValue::MultiString(split_multi_string(&utf16_chars))
            }
            REG_DWORD => match <[u8; 4]>::try_from(property_buffer) {
                Ok(value_bytes) => RegistryPropertyValue::Dword(u32::from_ne_bytes(value_bytes)),
                Err(_) => {
                    debug_assert!(false, "REG_DWORD property value is not four bytes long");
                    RegistryPropertyValue::Binary(property_buffer.to_vec())
                }
            },
            _ => RegistryPropertyValue::Binary(property_buffer.to_vec()),
        }
    }
}

// a REG_MULTI_SZ buffer is a run of null-terminated strings with an extra null terminating the
// list; the list terminator must not be read as a trailing empty string
pub(crate) fn split_multi_string(utf16_chars: &[u16]) -> Vec<String> {
    let mut values = Vec::<String>::new();
    for utf16_string in utf16_chars.split(|&utf16_char| utf16_char == 0) {
        if utf16_string.is_empty() {
            break;
        }
        values.push(String::from_utf16_lossy(utf16_string));
    }

    values
}

// expands %...% environment references; an expansion failure yields the source string unchanged
fn expand_environment_strings(source: &str) -> String {
    use windows_sys::Win32::System::Environment::ExpandEnvironmentStringsW;

    let source_as_utf16_chars = wide_text::to_utf16_with_nul(source);

    // see: https://learn.microsoft.com/en-us/windows/win32/api/processenv/nf-processenv-expandenvironmentstringsw
    let required_size = unsafe { ExpandEnvironmentStringsW(source_as_utf16_chars.as_ptr(), std::ptr::null_mut(), 0) };
    if required_size == 0 {
        warn!("could not expand environment references in registry value");
        return source.to_string();
    }

    let mut expanded_utf16_chars = vec![0u16; required_size as usize];
    let expanded_size = unsafe {
        ExpandEnvironmentStringsW(source_as_utf16_chars.as_ptr(), expanded_utf16_chars.as_mut_ptr(), required_size)
    };
    if expanded_size == 0 || expanded_size > required_size {
        warn!("could not expand environment references in registry value");
        return source.to_string();
    }

    wide_text::string_from_utf16_until_nul(&expanded_utf16_chars)
}
