// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

// Live-provider tests: these exercise the real setup API against the local machine's device
// tree (and, where noted, against the local machine addressed by its own computer name, which
// takes the remote-machine code paths).

#![cfg(target_os = "windows")]

use scalefs_windowssetupapi::{
    class_guids_from_name, class_name_from_guid, guid_eq, parse_guid, DeviceInfoSet,
    DeviceRegistryProperty, DriverType, RegKeyScope, RegKeyType, RegistryPropertyValue,
    SetupApiError,
};
use windows_sys::core::GUID;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{DICD_GENERATE_ID, DIGCF_PRESENT};
use windows_sys::Win32::System::Registry::KEY_READ;

const DEVICE_CLASS_NET_GUID: GUID = GUID {
    data1: 0x4d36e972,
    data2: 0xe325,
    data3: 0x11ce,
    data4: [0xbf, 0xc1, 0x08, 0x00, 0x2b, 0xe1, 0x03, 0x18],
};

fn computer_name() -> String {
    std::env::var("COMPUTERNAME").expect("COMPUTERNAME should always be set on Windows")
}

#[test]
fn create_device_info_set() {
    let set = DeviceInfoSet::create(Some(&DEVICE_CLASS_NET_GUID), None).expect("Error creating local device info set");
    set.close().expect("Error closing local device info set");

    let set = DeviceInfoSet::create(Some(&DEVICE_CLASS_NET_GUID), Some(&computer_name()))
        .expect("Error creating device info set against this machine's name");
    set.close().expect("Error closing device info set");

    let set = DeviceInfoSet::create(None, None).expect("Error creating classless device info set");
    set.close().expect("Error closing classless device info set");
}

#[test]
fn list_detail_reports_the_machine_scope() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening local device info set");
    let detail = set.list_detail().expect("Error getting device info list detail");
    assert!(guid_eq(&detail.class_guid, &DEVICE_CLASS_NET_GUID), "list detail returned a different class GUID");
    assert!(detail.remote_machine_handle.is_null(), "local set should have a null remote machine handle");
    assert_eq!(detail.remote_machine_name, "", "local set should have an empty remote machine name");
    set.close().expect("Error closing device info set");

    let machine_name = computer_name();
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, Some(&machine_name))
        .expect("Error opening device info set against this machine's name");
    let detail = set.list_detail().expect("Error getting device info list detail");
    assert!(guid_eq(&detail.class_guid, &DEVICE_CLASS_NET_GUID), "list detail returned a different class GUID");
    assert!(!detail.remote_machine_handle.is_null(), "remote set should have a non-null remote machine handle");
    assert_eq!(detail.remote_machine_name, machine_name, "remote set should report the machine name it was opened with");
    set.close().expect("Error closing device info set");
}

#[test]
fn create_device_info_requires_elevation_or_succeeds() {
    let machine_name = computer_name();
    let set = DeviceInfoSet::create(Some(&DEVICE_CLASS_NET_GUID), Some(&machine_name))
        .expect("Error creating device info set");

    let class_name = class_name_from_guid(&DEVICE_CLASS_NET_GUID, Some(&machine_name))
        .expect("Error resolving the network class name");

    match set.create_device_info(&class_name, &DEVICE_CLASS_NET_GUID, Some("This is a test device"), DICD_GENERATE_ID) {
        Ok(device) => {
            assert!(guid_eq(&device.class_guid(), &DEVICE_CLASS_NET_GUID), "created device has a different class GUID");
        }
        // creating a device record requires elevation, so access denied is an expected outcome
        Err(SetupApiError::AccessDenied) => {}
        Err(error) => panic!("Error creating device info: {}", error),
    }
}

#[test]
fn enumerated_devices_carry_the_filter_class() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening device info set");

    for device in set.devices().flatten() {
        assert!(guid_eq(&device.class_guid(), &DEVICE_CLASS_NET_GUID), "enumerator returned a different class GUID");
    }
}

#[test]
fn enumeration_ends_with_no_more_items() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening device info set");

    let member_count = set.devices().count() as u32;
    assert_eq!(
        set.enum_device_info(member_count).err(),
        Some(SetupApiError::NoMoreItems),
        "index one past the last member should report NoMoreItems"
    );
}

#[test]
fn build_enumerate_and_select_drivers() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening device info set");

    for device in set.devices().flatten() {
        let driver_list = device
            .build_driver_info_list(DriverType::CompatDriver)
            .expect("Error building driver info list");

        let mut last_selected = None;
        for driver in driver_list.drivers().flatten() {
            // the portable and native forms must describe the same driver
            let round_tripped = scalefs_windowssetupapi::DriverInfoData::from_native(
                &driver.to_native().expect("Error converting driver info to its native form"),
            );
            assert_eq!(driver, round_tripped, "driver info did not survive the native round trip");

            if driver.driver_type == 0 {
                continue;
            }

            driver_list.set_selected(&driver).expect("Error selecting driver");
            driver_list.detail(&driver).expect("Error getting driver info detail");
            last_selected = Some(driver);
        }

        if let Some(expected) = last_selected {
            let selected = device.selected_driver().expect("Error getting selected driver");
            assert_eq!(selected, expected, "selected driver should be the driver most recently set");
        }

        driver_list.destroy().expect("Error destroying driver info list");
    }
}

#[test]
fn open_requires_a_class_or_an_enumerator() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), Some("PCI"), DIGCF_PRESENT, Some(&computer_name()))
        .expect("Error opening device info set filtered by enumerator");
    set.close().expect("Error closing device info set");

    assert_eq!(
        DeviceInfoSet::open(None, None, DIGCF_PRESENT, None).err(),
        Some(SetupApiError::InvalidParameter),
        "opening with neither a class GUID nor an enumerator should fail with InvalidParameter"
    );
}

#[test]
fn open_dev_reg_key_for_every_member() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening device info set");

    for device in set.devices().flatten() {
        let key = device
            .open_dev_reg_key(RegKeyScope::Global, 0, RegKeyType::Software, KEY_READ)
            .expect("Error opening device registry key");
        key.close().expect("Error closing device registry key");
    }
}

#[test]
fn registry_properties_decode_per_their_kind() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening device info set");

    for device in set.devices().flatten() {
        match device.registry_property(DeviceRegistryProperty::Class) {
            Ok(RegistryPropertyValue::String(class_name)) => {
                assert!(class_name.eq_ignore_ascii_case("net"), "Class property should be \"Net\", got {:?}", class_name);
            }
            other => panic!("Class property should decode as a string, got {:?}", other),
        }

        match device.registry_property(DeviceRegistryProperty::ClassGuid) {
            Ok(RegistryPropertyValue::String(class_guid_text)) => {
                let class_guid = parse_guid(&class_guid_text).expect("ClassGuid property should parse as a GUID");
                assert!(guid_eq(&class_guid, &DEVICE_CLASS_NET_GUID), "ClassGuid property should name the network class");
            }
            other => panic!("ClassGuid property should decode as a string, got {:?}", other),
        }

        match device.registry_property(DeviceRegistryProperty::CompatibleIds) {
            Ok(RegistryPropertyValue::MultiString(_)) => {}
            // some devices simply have no compatible IDs
            Err(SetupApiError::NotPresent) => {}
            other => panic!("CompatibleIds property should decode as a string list or be absent, got {:?}", other),
        }

        match device.registry_property(DeviceRegistryProperty::ConfigFlags) {
            Ok(RegistryPropertyValue::Dword(_)) => {}
            other => panic!("ConfigFlags property should decode as a dword, got {:?}", other),
        }

        match device.registry_property(DeviceRegistryProperty::DevicePowerData) {
            Ok(RegistryPropertyValue::Binary(_)) => {}
            other => panic!("DevicePowerData property should decode as binary, got {:?}", other),
        }
    }
}

#[test]
fn install_params_are_readable_for_every_member() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening device info set");

    for device in set.devices().flatten() {
        device.install_params().expect("Error getting device install params");
    }
}

#[test]
fn class_name_resolves_locally_and_remotely() {
    let class_name = class_name_from_guid(&DEVICE_CLASS_NET_GUID, None).expect("Error resolving class name");
    assert!(class_name.eq_ignore_ascii_case("net"), "network class should be named \"Net\", got {:?}", class_name);

    let class_name = class_name_from_guid(&DEVICE_CLASS_NET_GUID, Some(&computer_name()))
        .expect("Error resolving class name against this machine's name");
    assert!(class_name.eq_ignore_ascii_case("net"), "network class should be named \"Net\", got {:?}", class_name);
}

#[test]
fn class_guids_resolve_from_name() {
    let class_guids = class_guids_from_name("Net", None).expect("Error resolving class GUIDs");
    assert!(
        class_guids.iter().any(|class_guid| guid_eq(class_guid, &DEVICE_CLASS_NET_GUID)),
        "\"Net\" should resolve to the network class GUID"
    );

    let class_guids = class_guids_from_name("foobar-34274a51-a6e6-45f0-80d6-c62be96dd5fe", Some(&computer_name()))
        .expect("Error resolving class GUIDs for an unknown name");
    assert!(class_guids.is_empty(), "an unknown class name should resolve to no GUIDs");
}

#[test]
fn selected_device_round_trips() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening device info set");

    for device in set.devices().flatten() {
        set.set_selected_device(&device).expect("Error setting selected device");

        let selected = set.selected_device().expect("Error getting selected device");
        assert_eq!(selected.dev_inst(), device.dev_inst(), "selected device should be the device just set");
        assert!(guid_eq(&selected.class_guid(), &device.class_guid()), "selected device should carry the same class");
    }
}

#[test]
fn selecting_a_foreign_device_is_rejected() {
    let set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening device info set");
    let other_set = DeviceInfoSet::open(Some(&DEVICE_CLASS_NET_GUID), None, DIGCF_PRESENT, None)
        .expect("Error opening second device info set");

    if let Some(Ok(device)) = set.devices().next() {
        assert_eq!(
            other_set.set_selected_device(&device).err(),
            Some(SetupApiError::InvalidParameter),
            "selecting a device produced by a different set should fail with InvalidParameter"
        );
    }
}
