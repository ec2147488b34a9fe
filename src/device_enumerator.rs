// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

use crate::device_info_data::DeviceInfoData;
use crate::device_info_set::{empty_devinfo_data, DeviceInfoSet};
use crate::SetupApiError;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::SetupDiEnumDeviceInfo;

impl DeviceInfoSet {
    /// The member device at `member_index` (dense, zero-based, provider-ordered).
    ///
    /// `NoMoreItems` signals that `member_index` is past the last member; it terminates an
    /// index-probe loop and is not a failure. Any other error is transient and the caller may
    /// retry the same index or skip it. The member order is provider-defined and must not be
    /// assumed stable across set mutation.
    ///
    /// see: https://learn.microsoft.com/en-us/windows/win32/api/setupapi/nf-setupapi-setupdienumdeviceinfo
    pub fn enum_device_info(&self, member_index: u32) -> Result<DeviceInfoData<'_>, SetupApiError> {
        let mut devinfo_data = empty_devinfo_data();

        let enum_device_info_result = unsafe { SetupDiEnumDeviceInfo(self.raw_handle(), member_index, &mut devinfo_data) };
        if enum_device_info_result == 0 {
            return Err(SetupApiError::from_last_error());
        }

        Ok(DeviceInfoData::new(devinfo_data, self))
    }

    /// A lazy, finite, non-restartable walk over the set's current members, ending when the
    /// provider reports `NoMoreItems`.
    ///
    /// Transient errors surface as `Err` items and the walk continues at the next index (i.e.
    /// the failed index is skipped); use `enum_device_info` directly to retry an index. Results
    /// are never cached: a fresh iterator re-enumerates against possibly-changed provider
    /// state.
    pub fn devices(&self) -> DeviceInfoIter<'_> {
        DeviceInfoIter {
            set: self,
            next_member_index: 0,
            finished: false,
        }
    }
}

/// Iterator over the member devices of a `DeviceInfoSet`. See `DeviceInfoSet::devices`.
pub struct DeviceInfoIter<'set> {
    set: &'set DeviceInfoSet,
    next_member_index: u32,
    finished: bool,
}
//
impl<'set> Iterator for DeviceInfoIter<'set> {
    type Item = Result<DeviceInfoData<'set>, SetupApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let enum_result = self.set.enum_device_info(self.next_member_index);
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
impl std::iter::FusedIterator for DeviceInfoIter<'_> {}
