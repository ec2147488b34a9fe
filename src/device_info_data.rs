// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::device_info_set::DeviceInfoSet;
use windows_sys::core::GUID;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::SP_DEVINFO_DATA;

/// One member device record inside a device information set.
///
/// A record is only meaningful against the set that produced it, so it carries a borrow of that
/// set; it cannot outlive the set's open handle.
pub struct DeviceInfoData<'set> {
    devinfo_data: SP_DEVINFO_DATA,
    set: &'set DeviceInfoSet,
}
//
impl<'set> DeviceInfoData<'set> {
    pub(crate) fn new(devinfo_data: SP_DEVINFO_DATA, set: &'set DeviceInfoSet) -> DeviceInfoData<'set> {
        DeviceInfoData { devinfo_data, set }
    }

    /// The setup class this device belongs to.
    pub fn class_guid(&self) -> GUID {
        self.devinfo_data.ClassGuid
    }

    /// The opaque device instance token the provider uses to address this device.
    pub fn dev_inst(&self) -> u32 {
        self.devinfo_data.DevInst
    }

    pub(crate) fn owning_set(&self) -> &'set DeviceInfoSet {
        self.set
    }

    // NOTE: a copy, not a borrow; call sites need a mutable SP_DEVINFO_DATA to hand to the
    //       provider (which treats it as a pure identity record)
    pub(crate) fn raw_devinfo_data(&self) -> SP_DEVINFO_DATA {
        self.devinfo_data
    }
}
