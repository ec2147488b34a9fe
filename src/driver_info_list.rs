// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::device_info_data::DeviceInfoData;
use crate::driver_info_data::DriverInfoData;
use crate::driver_info_detail::{get_driver_info_detail, DriverInfoDetail};
use crate::enums::DriverType;
use crate::SetupApiError;
use log::warn;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    SetupDiBuildDriverInfoList, SetupDiDestroyDriverInfoList, SetupDiEnumDriverInfoW,
    SetupDiGetSelectedDriverW, SetupDiSetSelectedDriverW, SP_DRVINFO_DATA_V2_W,
};
use windows_sys::Win32::Foundation::FILETIME;

impl<'set> DeviceInfoData<'set> {
    /// Builds the candidate-driver list for this device and driver type, returning the handle
    /// that owns it.
    ///
    /// The provider keeps one list per (device, driver type); whether rebuilding without
    /// destroying the previous list first is safe is not specified, so the returned value owns
    /// the list and destroys it when dropped (or via `destroy`), making destroy-before-rebuild
    /// the only expressible order unless a list is deliberately leaked.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdibuilddriverinfolist
    pub fn build_driver_info_list(&self, driver_type: DriverType) -> Result<DriverInfoList<'_>, SetupApiError> {
        let mut devinfo_data = self.raw_devinfo_data();

        let build_result = unsafe {
            SetupDiBuildDriverInfoList(self.owning_set().raw_handle(), &mut devinfo_data, driver_type.to_spdit())
        };
        if build_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(DriverInfoList { device: self, driver_type })
    }

    /// The driver most recently recorded for this device via `DriverInfoList::set_selected`.
    /// Fails with the provider's native code if no driver has been selected.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdigetselecteddriverw
    pub fn selected_driver(&self) -> Result<DriverInfoData, SetupApiError> {
        let mut devinfo_data = self.raw_devinfo_data();

        let mut driver_info_data = empty_drvinfo_data();
        let get_selected_result = unsafe {
            SetupDiGetSelectedDriverW(self.owning_set().raw_handle(), &mut devinfo_data, &mut driver_info_data)
        };
        if get_selected_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(DriverInfoData::from_native(&driver_info_data))
    }
}

/// The candidate-driver list attached to one (device, driver type) pair.
///
/// A transient provider resource: it exists from `build_driver_info_list` until this value is
/// dropped or explicitly `destroy`ed, and is released with the set either way.
pub struct DriverInfoList<'device> {
    device: &'device DeviceInfoData<'device>,
    driver_type: DriverType,
}
//
impl<'device> DriverInfoList<'device> {
    pub fn driver_type(&self) -> DriverType {
        self.driver_type
    }

    /// The candidate driver at `member_index` (dense, zero-based). `NoMoreItems` terminates the
    /// index-probe loop, exactly as for device enumeration.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdienumdriverinfow
    pub fn enum_at(&self, member_index: u32) -> Result<DriverInfoData, SetupApiError> {
        let mut devinfo_data = self.device.raw_devinfo_data();

        let mut driver_info_data = empty_drvinfo_data();
        let enum_driver_info_result = unsafe {
            SetupDiEnumDriverInfoW(
                self.device.owning_set().raw_handle(),
                &mut devinfo_data,
                self.driver_type.to_spdit(),
                member_index,
                &mut driver_info_data,
            )
        };
        if enum_driver_info_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(DriverInfoData::from_native(&driver_info_data))
    }

    /// A lazy walk over the list's candidate drivers, ending at `NoMoreItems`; transient errors
    /// surface as `Err` items and the walk continues at the next index.
    pub fn drivers(&self) -> DriverInfoIter<'_> {
        DriverInfoIter {
            list: self,
            next_member_index: 0,
            finished: false,
        }
    }

    /// Records `driver` as the selected driver for this device.
    ///
    /// `driver` must be a value produced by this list (the provider matches it against the most
    /// recently built list for this device and driver type; anything else fails with the
    /// provider's native code).
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdisetselecteddriverw
    pub fn set_selected(&self, driver: &DriverInfoData) -> Result<(), SetupApiError> {
        let mut devinfo_data = self.device.raw_devinfo_data();

        let mut driver_info_data = driver.to_native()?;
        let set_selected_result = unsafe {
            SetupDiSetSelectedDriverW(self.device.owning_set().raw_handle(), &mut devinfo_data, &mut driver_info_data)
        };
        if set_selected_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(())
    }

    /// Extended static metadata for `driver` (INF source, hardware/compatible IDs).
    pub fn detail(&self, driver: &DriverInfoData) -> Result<DriverInfoDetail, SetupApiError> {
        let mut devinfo_data = self.device.raw_devinfo_data();
        let mut driver_info_data = driver.to_native()?;

        get_driver_info_detail(self.device.owning_set().raw_handle(), &mut devinfo_data, &mut driver_info_data)
    }

    /// Destroys the list. Dropping it does the same; use `destroy` when the failure code
    /// matters.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdidestroydriverinfolist
    pub fn destroy(self) -> Result<(), SetupApiError> {
        let device = self.device;
        let driver_type = self.driver_type;
        std::mem::forget(self);

        let mut devinfo_data = device.raw_devinfo_data();
        let destroy_result = unsafe {
            SetupDiDestroyDriverInfoList(device.owning_set().raw_handle(), &mut devinfo_data, driver_type.to_spdit())
        };
        if destroy_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(())
    }
}
//
impl Drop for DriverInfoList<'_> {
    fn drop(&mut self) {
        let mut devinfo_data = self.device.raw_devinfo_data();
        let destroy_result = unsafe {
            SetupDiDestroyDriverInfoList(self.device.owning_set().raw_handle(), &mut devinfo_data, self.driver_type.to_spdit())
        };
        if destroy_result == 0 {
            warn!("could not destroy driver info list; win32 error: {}", SetupApiError::from_last_error().code());
            debug_assert!(false, "Could not clean up driver info list");
        }
    }
}

fn empty_drvinfo_data() -> SP_DRVINFO_DATA_V2_W {
    SP_DRVINFO_DATA_V2_W {
        cbSize: std::mem::size_of::<SP_DRVINFO_DATA_V2_W>() as u32,
        DriverType: 0,
        Reserved: 0,
        Description: [0; 256],
        MfgName: [0; 256],
        ProviderName: [0; 256],
        DriverDate: FILETIME { dwLowDateTime: 0, dwHighDateTime: 0 },
        DriverVersion: 0,
    }
}

/// Iterator over the candidate drivers of a `DriverInfoList`. See `DriverInfoList::drivers`.
pub struct DriverInfoIter<'list> {
    list: &'list DriverInfoList<'list>,
    next_member_index: u32,
    finished: bool,
}
//
impl Iterator for DriverInfoIter<'_> {
    type Item = Result<DriverInfoData, SetupApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let enum_result = self.list.enum_at(self.next_member_index);
        self.next_member_index += 1;

        match enum_result {
            Err(SetupApiError::NoMoreItems) => {
                self.finished = true;
                None
            }
            other => Some(other),
        }
    }
}
//
impl std::iter::FusedIterator for DriverInfoIter<'_> {}
