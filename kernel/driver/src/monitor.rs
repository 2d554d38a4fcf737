//! Bindings to the monitoring and keyboard subsystems, linked in as a static library.

use core::ffi::c_void;

use kmon_driver_core::{
    kapi::{
        DriverHandle,
        NTSTATUS,
    },
    subsystem::{
        KbdOutcome,
        KeyboardDispatch,
        Monitor,
    },
};
use kmon_driver_shared::requests::{
    KmonInit,
    KmonRelease,
    KmonScreenshot,
    OpenDesktop,
    OpenWinsta,
};

use crate::{
    kapi::{
        DeviceHandle,
        KmIrp,
    },
    kdef::{
        DRIVER_OBJECT,
        IRP,
        PDEVICE_OBJECT,
    },
};

extern "C" {
    fn MonitorInit(driver: *mut DRIVER_OBJECT);
    fn MonitorStart(request: *mut KmonInit) -> NTSTATUS;
    fn MonitorStop(request: *mut KmonRelease) -> NTSTATUS;
    fn MonitorOpenWinsta(request: *mut OpenWinsta) -> NTSTATUS;
    fn MonitorOpenDesktop(request: *mut OpenDesktop) -> NTSTATUS;
    fn MonitorScreenshot(request: *mut KmonScreenshot) -> NTSTATUS;

    /// The keyboard state of the monitor instance.
    fn MonitorGetKeyboard() -> *mut c_void;
    fn KbdDispatchGeneral(
        keyboard: *mut c_void,
        device: PDEVICE_OBJECT,
        irp: *mut IRP,
        handled: *mut bool,
    ) -> NTSTATUS;
}

/// The monitoring subsystem. Serializes its entry points internally.
pub struct KernelMonitor;

impl Monitor for KernelMonitor {
    fn init(&self, driver: DriverHandle) {
        unsafe { MonitorInit(driver.0 as *mut DRIVER_OBJECT) };
    }

    fn start(&self, request: &mut KmonInit) -> NTSTATUS {
        unsafe { MonitorStart(request) }
    }

    fn stop(&self, request: Option<&mut KmonRelease>) -> NTSTATUS {
        let request = match request {
            Some(request) => request as *mut KmonRelease,
            None => core::ptr::null_mut(),
        };

        unsafe { MonitorStop(request) }
    }

    fn open_window_station(&self, request: &mut OpenWinsta) -> NTSTATUS {
        unsafe { MonitorOpenWinsta(request) }
    }

    fn open_desktop(&self, request: &mut OpenDesktop) -> NTSTATUS {
        unsafe { MonitorOpenDesktop(request) }
    }

    fn capture_screenshot(&self, request: &mut KmonScreenshot) -> NTSTATUS {
        unsafe { MonitorScreenshot(request) }
    }
}

/// Keyboard filter devices of the monitor instance.
pub struct KernelKeyboard;

impl<'a> KeyboardDispatch<DeviceHandle, KmIrp<'a>> for KernelKeyboard {
    fn dispatch_general(&self, device: DeviceHandle, mut irp: KmIrp<'a>) -> KbdOutcome<KmIrp<'a>> {
        let mut handled = false;
        let status = unsafe {
            KbdDispatchGeneral(MonitorGetKeyboard(), device.0, irp.as_raw(), &mut handled)
        };

        if handled {
            /* the keyboard subsystem owns the completion */
            KbdOutcome::Handled(status)
        } else {
            KbdOutcome::Pass(irp)
        }
    }
}
