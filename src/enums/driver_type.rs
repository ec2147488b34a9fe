// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    SETUP_DI_DRIVER_TYPE, SPDIT_CLASSDRIVER, SPDIT_COMPATDRIVER,
};

/// Which candidate-driver list to build/enumerate for a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverType {
    ClassDriver,
    CompatDriver,
}
//
impl DriverType {
    pub(crate) fn to_spdit(self) -> SETUP_DI_DRIVER_TYPE {
        match self {
            DriverType::ClassDriver => SPDIT_CLASSDRIVER,
            DriverType::CompatDriver => SPDIT_COMPATDRIVER,
        }
    }
}
