// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    SPDRP_ADDRESS, SPDRP_BASE_CONTAINERID, SPDRP_BUSNUMBER, SPDRP_BUSTYPEGUID,
    SPDRP_CAPABILITIES, SPDRP_CHARACTERISTICS, SPDRP_CLASS, SPDRP_CLASSGUID,
    SPDRP_COMPATIBLEIDS, SPDRP_CONFIGFLAGS, SPDRP_DEVICEDESC, SPDRP_DEVICE_POWER_DATA,
    SPDRP_DEVTYPE, SPDRP_DRIVER, SPDRP_ENUMERATOR_NAME, SPDRP_EXCLUSIVE, SPDRP_FRIENDLYNAME,
    SPDRP_HARDWAREID, SPDRP_INSTALL_STATE, SPDRP_LEGACYBUSTYPE, SPDRP_LOCATION_INFORMATION,
    SPDRP_LOCATION_PATHS, SPDRP_LOWERFILTERS, SPDRP_MFG, SPDRP_PHYSICAL_DEVICE_OBJECT_NAME,
    SPDRP_REMOVAL_POLICY, SPDRP_REMOVAL_POLICY_HW_DEFAULT, SPDRP_REMOVAL_POLICY_OVERRIDE,
    SPDRP_SECURITY, SPDRP_SECURITY_SDS, SPDRP_SERVICE, SPDRP_UI_NUMBER,
    SPDRP_UI_NUMBER_DESC_FORMAT, SPDRP_UPPERFILTERS,
};

/// The fixed enumeration of per-device registry properties (the legacy SPDRP_* kinds).
///
/// Each kind has a documented value shape which `RegistryPropertyValue::decode` recovers from
/// the registry data type returned alongside the raw bytes: e.g. `Class` is a single string,
/// `HardwareId`/`CompatibleIds` are string lists, `ConfigFlags` is a dword and
/// `DevicePowerData` is a binary blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceRegistryProperty {
    DeviceDesc,
    HardwareId,
    CompatibleIds,
    Service,
    Class,
    ClassGuid,
    Driver,
    ConfigFlags,
    Mfg,
    FriendlyName,
    LocationInformation,
    PhysicalDeviceObjectName,
    Capabilities,
    UiNumber,
    UpperFilters,
    LowerFilters,
    BusTypeGuid,
    LegacyBusType,
    BusNumber,
    EnumeratorName,
    Security,
    SecuritySds,
    DevType,
    Exclusive,
    Characteristics,
    Address,
    UiNumberDescFormat,
    DevicePowerData,
    RemovalPolicy,
    RemovalPolicyHwDefault,
    RemovalPolicyOverride,
    InstallState,
    LocationPaths,
    BaseContainerId,
}
//
impl DeviceRegistryProperty {
    pub(crate) fn to_spdrp(self) -> u32 {
        match self {
            DeviceRegistryProperty::DeviceDesc => SPDRP_DEVICEDESC,
            DeviceRegistryProperty::HardwareId => SPDRP_HARDWAREID,
            DeviceRegistryProperty::CompatibleIds => SPDRP_COMPATIBLEIDS,
            DeviceRegistryProperty::Service => SPDRP_SERVICE,
            DeviceRegistryProperty::Class => SPDRP_CLASS,
            DeviceRegistryProperty::ClassGuid => SPDRP_CLASSGUID,
            DeviceRegistryProperty::Driver => SPDRP_DRIVER,
            DeviceRegistryProperty::ConfigFlags => SPDRP_CONFIGFLAGS,
            DeviceRegistryProperty::Mfg => SPDRP_MFG,
            DeviceRegistryProperty::FriendlyName => SPDRP_FRIENDLYNAME,
            DeviceRegistryProperty::LocationInformation => SPDRP_LOCATION_INFORMATION,
            DeviceRegistryProperty::PhysicalDeviceObjectName => SPDRP_PHYSICAL_DEVICE_OBJECT_NAME,
            DeviceRegistryProperty::Capabilities => SPDRP_CAPABILITIES,
            DeviceRegistryProperty::UiNumber => SPDRP_UI_NUMBER,
            DeviceRegistryProperty::UpperFilters => SPDRP_UPPERFILTERS,
            DeviceRegistryProperty::LowerFilters => SPDRP_LOWERFILTERS,
            DeviceRegistryProperty::BusTypeGuid => SPDRP_BUSTYPEGUID,
            DeviceRegistryProperty::LegacyBusType => SPDRP_LEGACYBUSTYPE,
            DeviceRegistryProperty::BusNumber => SPDRP_BUSNUMBER,
            DeviceRegistryProperty::EnumeratorName => SPDRP_ENUMERATOR_NAME,
            DeviceRegistryProperty::Security => SPDRP_SECURITY,
            DeviceRegistryProperty::SecuritySds => SPDRP_SECURITY_SDS,
            DeviceRegistryProperty::DevType => SPDRP_DEVTYPE,
            DeviceRegistryProperty::Exclusive => SPDRP_EXCLUSIVE,
            DeviceRegistryProperty::Characteristics => SPDRP_CHARACTERISTICS,
            DeviceRegistryProperty::Address => SPDRP_ADDRESS,
            DeviceRegistryProperty::UiNumberDescFormat => SPDRP_UI_NUMBER_DESC_FORMAT,
            DeviceRegistryProperty::DevicePowerData => SPDRP_DEVICE_POWER_DATA,
            DeviceRegistryProperty::RemovalPolicy => SPDRP_REMOVAL_POLICY,
            DeviceRegistryProperty::RemovalPolicyHwDefault => SPDRP_REMOVAL_POLICY_HW_DEFAULT,
            DeviceRegistryProperty::RemovalPolicyOverride => SPDRP_REMOVAL_POLICY_OVERRIDE,
            DeviceRegistryProperty::InstallState => SPDRP_INSTALL_STATE,
            DeviceRegistryProperty::LocationPaths => SPDRP_LOCATION_PATHS,
            DeviceRegistryProperty::BaseContainerId => SPDRP_BASE_CONTAINERID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_kinds_map_to_their_documented_codes() {
        assert_eq!(DeviceRegistryProperty::DeviceDesc.to_spdrp(), 0);
        assert_eq!(DeviceRegistryProperty::Class.to_spdrp(), 7);
        assert_eq!(DeviceRegistryProperty::ClassGuid.to_spdrp(), 8);
        assert_eq!(DeviceRegistryProperty::ConfigFlags.to_spdrp(), 10);
        assert_eq!(DeviceRegistryProperty::DevicePowerData.to_spdrp(), 30);
        assert_eq!(DeviceRegistryProperty::BaseContainerId.to_spdrp(), 36);
    }
}
