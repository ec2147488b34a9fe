// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

// UTF-16 staging/decoding helpers shared by the FFI call sites.
//
// NOTE: the encoded vectors returned here must outlive any PCWSTR pointer taken from them; call
//       sites keep the vector bound to a local for the duration of the call (i.e. do not collapse
//       the vector binding into the pointer expression).

pub(crate) fn to_utf16_with_nul(text: &str) -> Vec<u16> {
    let mut utf16_chars: Vec<u16> = text.encode_utf16().collect();
    utf16_chars.push(0);
    utf16_chars
}

// NOTE: an absent or empty string means "no argument" at the FFI boundary (e.g. the local
//       machine); call sites pass a null pointer in that case
pub(crate) fn optional_to_utf16_with_nul(text: Option<&str>) -> Option<Vec<u16>> {
    match text {
        Some(value) if !value.is_empty() => Some(to_utf16_with_nul(value)),
        _ => None,
    }
}

pub(crate) fn optional_utf16_as_pcwstr(utf16_chars: &Option<Vec<u16>>) -> *const u16 {
    match utf16_chars {
        Some(value) => value.as_ptr(),
        None => std::ptr::null(),
    }
}

// decodes up to the first null terminator; an unterminated buffer decodes in full
pub(crate) fn string_from_utf16_until_nul(utf16_chars: &[u16]) -> String {
    let length = utf16_chars.iter().position(|&utf16_char| utf16_char == 0).unwrap_or(utf16_chars.len());
    String::from_utf16_lossy(&utf16_chars[0..length])
}

// reinterprets a little/native-endian byte buffer as utf16 chars; a trailing odd byte is dropped
pub(crate) fn utf16_chars_from_bytes(buffer: &[u8]) -> Vec<u16> {
    buffer
        .chunks_exact(2)
        .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_stops_at_the_first_null_terminator() {
        let utf16_chars: Vec<u16> = "Net\0garbage".encode_utf16().collect();
        assert_eq!(string_from_utf16_until_nul(&utf16_chars), "Net");
    }

    #[test]
    fn decode_tolerates_a_missing_terminator() {
        let utf16_chars: Vec<u16> = "Net".encode_utf16().collect();
        assert_eq!(string_from_utf16_until_nul(&utf16_chars), "Net");
    }

    #[test]
    fn byte_reinterpretation_drops_a_trailing_odd_byte() {
        let buffer = [0x4e, 0x00, 0x65, 0x00, 0x74, 0x00, 0xff];
        let utf16_chars = utf16_chars_from_bytes(&buffer);
        assert_eq!(string_from_utf16_until_nul(&utf16_chars), "Net");
    }

    #[test]
    fn empty_and_absent_strings_stage_as_null() {
        assert_eq!(optional_to_utf16_with_nul(None), None);
        assert_eq!(optional_to_utf16_with_nul(Some("")), None);
        assert!(optional_utf16_as_pcwstr(&None).is_null());
    }
}
