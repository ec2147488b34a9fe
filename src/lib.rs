// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

#[cfg(target_os = "windows")]
mod enums;
#[cfg(target_os = "windows")]
pub use enums::*;

#[cfg(target_os = "windows")]
mod errors;
#[cfg(target_os = "windows")]
pub use errors::*;

#[cfg(target_os = "windows")]
mod dev_reg_key;
#[cfg(target_os = "windows")]
pub use dev_reg_key::DevRegKey;

#[cfg(target_os = "windows")]
mod device_class;
#[cfg(target_os = "windows")]
pub use device_class::{class_guids_from_name, class_name_from_guid};

#[cfg(target_os = "windows")]
mod device_enumerator;
#[cfg(target_os = "windows")]
pub use device_enumerator::DeviceInfoIter;

#[cfg(target_os = "windows")]
mod device_info_data;
#[cfg(target_os = "windows")]
pub use device_info_data::DeviceInfoData;

#[cfg(target_os = "windows")]
mod device_info_set;
#[cfg(target_os = "windows")]
pub use device_info_set::{DeviceInfoListDetail, DeviceInfoSet};

#[cfg(target_os = "windows")]
mod device_property;
#[cfg(target_os = "windows")]
pub use device_property::DeviceInstallParams;

#[cfg(target_os = "windows")]
mod device_registry_property;
#[cfg(target_os = "windows")]
pub use device_registry_property::DeviceRegistryProperty;

#[cfg(target_os = "windows")]
mod driver_info_data;
#[cfg(target_os = "windows")]
pub use driver_info_data::{DriverInfoData, FileTime};

#[cfg(target_os = "windows")]
mod driver_info_detail;
#[cfg(target_os = "windows")]
pub use driver_info_detail::DriverInfoDetail;

#[cfg(target_os = "windows")]
mod driver_info_list;
#[cfg(target_os = "windows")]
pub use driver_info_list::{DriverInfoIter, DriverInfoList};

#[cfg(target_os = "windows")]
mod guid_text;
#[cfg(target_os = "windows")]
pub use guid_text::{format_guid, guid_eq, parse_guid, ParseGuidError};

#[cfg(target_os = "windows")]
mod registry_property_value;
#[cfg(target_os = "windows")]
pub use registry_property_value::RegistryPropertyValue;

#[cfg(target_os = "windows")]
mod wide_text;
