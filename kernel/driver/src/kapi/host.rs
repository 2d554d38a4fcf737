use alloc::vec::Vec;

use kmon_driver_core::{
    dispatch::MajorFunctionTable,
    kapi::{
        DriverHandle,
        IoHost,
        NTSTATUS,
    },
};

use super::{
    DeviceHandle,
    OwnedUnicodeString,
};
use crate::kdef::{
    IoCreateDevice,
    IoCreateSymbolicLink,
    IoDeleteDevice,
    IoDeleteSymbolicLink,
    KeEnterGuardedRegion,
    KeLeaveGuardedRegion,
    DEVICE_FLAGS,
    DRIVER_OBJECT,
    PDEVICE_OBJECT,
    PDRIVER_DISPATCH,
    PDRIVER_UNLOAD,
};

/// The I/O manager as seen from our driver object.
pub struct KernelHost {
    driver: *mut DRIVER_OBJECT,
    dispatch: PDRIVER_DISPATCH,
    unload: PDRIVER_UNLOAD,
}

unsafe impl Send for KernelHost {}
unsafe impl Sync for KernelHost {}

impl KernelHost {
    pub fn new(driver: &mut DRIVER_OBJECT, dispatch: PDRIVER_DISPATCH, unload: PDRIVER_UNLOAD) -> Self {
        Self {
            driver,
            dispatch,
            unload,
        }
    }
}

impl IoHost for KernelHost {
    type Device = DeviceHandle;

    fn driver_handle(&self) -> DriverHandle {
        DriverHandle(self.driver as usize)
    }

    fn create_device(
        &self,
        device_name: &str,
        device_type: u32,
        characteristics: u32,
        exclusive: bool,
    ) -> Result<Self::Device, NTSTATUS> {
        let device_name = OwnedUnicodeString::new(device_name);
        let device_name = device_name.as_unicode_string();

        let mut device_ptr: PDEVICE_OBJECT = core::ptr::null_mut();
        unsafe {
            IoCreateDevice(
                self.driver,
                0,
                &device_name,
                device_type,
                characteristics,
                exclusive,
                &mut device_ptr,
            )
        }
        .ok()?;

        let mut device = DeviceHandle(device_ptr);
        *device.flags_mut() |= DEVICE_FLAGS::DO_BUFFERED_IO as u32;
        device.mark_initialized();
        Ok(device)
    }

    fn delete_device(&self, device: Self::Device) {
        unsafe { IoDeleteDevice(device.0) };
    }

    fn device_objects(&self) -> Vec<Self::Device> {
        let mut devices = Vec::new();

        let mut current = unsafe { (*self.driver).DeviceObject };
        while !current.is_null() {
            devices.push(DeviceHandle(current));
            current = unsafe { (*current).NextDevice };
        }

        devices
    }

    fn create_symbolic_link(&self, link_name: &str, device_name: &str) -> NTSTATUS {
        let link_name = OwnedUnicodeString::new(link_name);
        let device_name = OwnedUnicodeString::new(device_name);
        unsafe {
            IoCreateSymbolicLink(
                &link_name.as_unicode_string(),
                &device_name.as_unicode_string(),
            )
        }
    }

    fn delete_symbolic_link(&self, link_name: &str) -> NTSTATUS {
        let link_name = OwnedUnicodeString::new(link_name);
        unsafe { IoDeleteSymbolicLink(&link_name.as_unicode_string()) }
    }

    fn install_routes(&self, routes: &MajorFunctionTable) {
        let driver = unsafe { &mut *self.driver };
        driver.DriverUnload = if routes.unload_enabled() {
            self.unload
        } else {
            None
        };

        for major in routes.delegated() {
            driver.MajorFunction[major as usize] = self.dispatch;
        }
    }

    fn enter_guarded_region(&self) {
        unsafe { KeEnterGuardedRegion() };
    }

    fn leave_guarded_region(&self) {
        unsafe { KeLeaveGuardedRegion() };
    }
}
