// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use windows_sys::core::GUID;

// Text bridge for the registry's GUID notation ("{4d36e972-e325-11ce-bfc1-08002be10318}").
// Setup class GUIDs travel as strings in several registry properties (e.g. the ClassGuid device
// registry property), so parsing/formatting stays in this one module.

/// Formats a GUID in the braced, lowercase-hex registry notation.
pub fn format_guid(guid: &GUID) -> String {
    format!(
        "{{{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}}}",
        guid.data1,
        guid.data2,
        guid.data3,
        guid.data4[0],
        guid.data4[1],
        guid.data4[2],
        guid.data4[3],
        guid.data4[4],
        guid.data4[5],
        guid.data4[6],
        guid.data4[7],
    )
}

// NOTE: windows_sys's GUID does not implement PartialEq, so comparisons are field-by-field
pub fn guid_eq(lhs: &GUID, rhs: &GUID) -> bool {
    lhs.data1 == rhs.data1 && lhs.data2 == rhs.data2 && lhs.data3 == rhs.data3 && lhs.data4 == rhs.data4
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseGuidError;

impl std::fmt::Display for ParseGuidError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid guid string")
    }
}

impl std::error::Error for ParseGuidError {}

/// Parses the `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` notation, with or without enclosing curly
/// braces, case-insensitively.
pub fn parse_guid(text: &str) -> Result<GUID, ParseGuidError> {
    // if present, remove the enclosing curly braces (both must be present, or neither)
    let unbraced = match (text.starts_with('{'), text.ends_with('}')) {
        (true, true) => &text[1..text.len() - 1],
        (false, false) => text,
        _ => return Err(ParseGuidError),
    };

    // every remaining character must be a hex digit or a group separator (this also rules out
    // the sign prefixes from_str_radix would otherwise accept)
    if !unbraced.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        return Err(ParseGuidError);
    }

    let groups: Vec<&str> = unbraced.split('-').collect();
    if groups.len() != 5 {
        return Err(ParseGuidError);
    }
    if groups[0].len() != 8 || groups[1].len() != 4 || groups[2].len() != 4 || groups[3].len() != 4 || groups[4].len() != 12 {
        return Err(ParseGuidError);
    }

    let data1 = u32::from_str_radix(groups[0], 16).map_err(|_| ParseGuidError)?;
    let data2 = u16::from_str_radix(groups[1], 16).map_err(|_| ParseGuidError)?;
    let data3 = u16::from_str_radix(groups[2], 16).map_err(|_| ParseGuidError)?;

    let mut data4 = [0u8; 8];
    let clock_seq_and_node = format!("{}{}", groups[3], groups[4]);
    for (index, octet) in data4.iter_mut().enumerate() {
        *octet = u8::from_str_radix(&clock_seq_and_node[index * 2..index * 2 + 2], 16).map_err(|_| ParseGuidError)?;
    }

    Ok(GUID { data1, data2, data3, data4 })
}
