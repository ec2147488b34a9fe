// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    DICS_FLAG_CONFIGSPECIFIC, DICS_FLAG_GLOBAL, DIREG_DEV, DIREG_DRV,
};

/// Which hardware profile a device registry key belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegKeyScope {
    Global,
    ConfigSpecific,
}
//
impl RegKeyScope {
    pub(crate) fn to_dics_flag(self) -> u32 {
        match self {
            RegKeyScope::Global => DICS_FLAG_GLOBAL,
            RegKeyScope::ConfigSpecific => DICS_FLAG_CONFIGSPECIFIC,
        }
    }
}

/// Which of a device's registry keys to open: the hardware key (device subtree) or the software
/// key (driver subtree).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegKeyType {
    Hardware,
    Software,
}
//
impl RegKeyType {
    pub(crate) fn to_direg(self) -> u32 {
        match self {
            RegKeyType::Hardware => DIREG_DEV,
            RegKeyType::Software => DIREG_DRV,
        }
    }
}
