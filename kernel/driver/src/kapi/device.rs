use core::fmt;

use crate::kdef::{
    DEVICE_FLAGS,
    DEVICE_OBJECT,
    PDEVICE_OBJECT,
};

/// A device object created by this driver.
///
/// The handle does not own the object, deletion is driven by the core's device chain.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DeviceHandle(pub PDEVICE_OBJECT);

unsafe impl Send for DeviceHandle {}
unsafe impl Sync for DeviceHandle {}

impl DeviceHandle {
    pub fn from_object(device: &mut DEVICE_OBJECT) -> Self {
        Self(device)
    }

    pub fn flags(&self) -> u32 {
        unsafe { (*self.0).Flags }
    }

    pub fn flags_mut(&mut self) -> &mut u32 {
        unsafe { &mut (*self.0).Flags }
    }

    pub fn mark_initialized(&mut self) {
        *self.flags_mut() &= !(DEVICE_FLAGS::DO_DEVICE_INITIALIZING as u32);
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.0)
    }
}
