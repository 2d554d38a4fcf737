//! Contracts of the subsystems the driver delegates to.

use kmon_driver_shared::requests::{
    KmonInit,
    KmonRelease,
    KmonScreenshot,
    OpenDesktop,
    OpenWinsta,
};

use crate::kapi::{
    DriverHandle,
    IoRequest,
    NTSTATUS,
};

/// The monitoring subsystem.
///
/// Control requests are dispatched from arbitrary threads without any
/// lock held, therefore every entry point must tolerate concurrent
/// invocation. Requests are mutated in place and echoed back to the caller.
pub trait Monitor: Sync {
    fn init(&self, driver: DriverHandle);

    fn start(&self, request: &mut KmonInit) -> NTSTATUS;

    /// Stop monitoring. Must succeed as a no-op when monitoring has never
    /// been started. `None` is passed during driver unload.
    fn stop(&self, request: Option<&mut KmonRelease>) -> NTSTATUS;

    /// The name is passed as sent by the caller and may fill the whole
    /// buffer without a terminator.
    fn open_window_station(&self, request: &mut OpenWinsta) -> NTSTATUS;

    fn open_desktop(&self, request: &mut OpenDesktop) -> NTSTATUS;

    fn capture_screenshot(&self, request: &mut KmonScreenshot) -> NTSTATUS;
}

/// Result of offering a request to the keyboard subsystem.
#[derive(Debug)]
pub enum KbdOutcome<R> {
    /// The subsystem handled and completed the request.
    Handled(NTSTATUS),

    /// Not for the keyboard subsystem. Ownership goes back to the caller.
    Pass(R),
}

/// The keyboard subsystem's general dispatch.
pub trait KeyboardDispatch<D, R: IoRequest> {
    fn dispatch_general(&self, device: D, irp: R) -> KbdOutcome<R>;
}

/// Keyboard dispatch which never claims a request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoKeyboard;

impl<D, R: IoRequest> KeyboardDispatch<D, R> for NoKeyboard {
    fn dispatch_general(&self, _device: D, irp: R) -> KbdOutcome<R> {
        KbdOutcome::Pass(irp)
    }
}
