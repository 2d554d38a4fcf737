//! Device control requests.

use alloc::vec::Vec;
use core::{
    mem::size_of,
    ptr,
};

use kmon_driver_shared::requests::{
    KmonInit,
    KmonRelease,
    KmonRequest,
    KmonScreenshot,
    OpenDesktop,
    OpenWinsta,
};

use crate::{
    kapi::{
        GuardedRegion,
        IoHost,
        IoRequest,
        NTSTATUS,
    },
    subsystem::Monitor,
};

mod desktop;
pub use desktop::*;

mod screenshot;
pub use screenshot::*;

mod session;
pub use session::*;

pub type ControlHandler<M> = fn(&M, &mut [u8]) -> NTSTATUS;

/// A registered control operation.
pub struct ControlEntry<M> {
    pub control_code: u32,
    pub name: &'static str,
    /// Minimum number of input bytes the operation requires.
    pub input_size: usize,
    handler: ControlHandler<M>,
}

impl<M> ControlEntry<M> {
    pub fn invoke(&self, monitor: &M, buffer: &mut [u8]) -> NTSTATUS {
        (self.handler)(monitor, buffer)
    }
}

/// Control code to handler mapping. Built once while the driver loads.
pub struct ControlTable<M> {
    entries: Vec<ControlEntry<M>>,
}

impl<M: Monitor> ControlTable<M> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All control operations the driver supports.
    pub fn kmon() -> Self {
        let mut table = Self::new();
        table.register::<KmonInit>(handler_init::<M>);
        table.register::<KmonRelease>(handler_release::<M>);
        table.register::<OpenWinsta>(handler_open_winsta::<M>);
        table.register::<OpenDesktop>(handler_open_desktop::<M>);
        table.register::<KmonScreenshot>(handler_screenshot::<M>);
        table
    }

    /// Register a handler for the request `R`.
    /// The handler will only be invoked with at least `size_of::<R>()` input bytes.
    pub fn register<R: KmonRequest>(&mut self, handler: ControlHandler<M>) {
        let control_code = R::control_code();
        self.entries.retain(|entry| entry.control_code != control_code);
        self.entries.push(ControlEntry {
            control_code,
            name: R::NAME,
            input_size: size_of::<R>(),
            handler,
        });
    }

    pub fn lookup(&self, control_code: u32) -> Option<&ControlEntry<M>> {
        self.entries
            .iter()
            .find(|entry| entry.control_code == control_code)
    }

    pub fn entries(&self) -> &[ControlEntry<M>] {
        &self.entries
    }
}

impl<M: Monitor> Default for ControlTable<M> {
    fn default() -> Self {
        Self::kmon()
    }
}

/// Decode `R` from the start of the buffer, hand it to `f` and write the
/// (possibly modified) request back in place.
pub(crate) fn with_request<R, F>(buffer: &mut [u8], f: F) -> NTSTATUS
where
    R: KmonRequest,
    F: FnOnce(&mut R) -> NTSTATUS,
{
    let buffer = match buffer.get_mut(..size_of::<R>()) {
        Some(buffer) => buffer,
        None => return NTSTATUS::BufferTooSmall,
    };

    /* Safety: KmonRequest guarantees every bit pattern is valid and the slice holds size_of::<R>() bytes. */
    let mut request = unsafe { ptr::read_unaligned(buffer.as_ptr() as *const R) };
    let status = f(&mut request);
    unsafe { ptr::write_unaligned(buffer.as_mut_ptr() as *mut R, request) };

    status
}

/// Validate a device control request and hand it to the monitor.
pub fn device_control<H, M, R>(
    host: &H,
    controls: &ControlTable<M>,
    monitor: &M,
    device: H::Device,
    mut irp: R,
) -> NTSTATUS
where
    H: IoHost,
    M: Monitor,
    R: IoRequest,
{
    let params = match irp.device_control() {
        Some(params) => params,
        None => {
            log::error!("dev={:?} device control request without parameters", device);
            return irp.complete_request(NTSTATUS::InvalidParameter, 0);
        }
    };

    log::debug!("IoControl fdo {:?}, ioctl {:X}", device, params.control_code);

    let (status, result_length) = if params.output_length < params.input_length {
        log::error!(
            "invalid outputlen={:X} vs inputlen={:X}",
            params.output_length,
            params.input_length
        );
        (NTSTATUS::InvalidParameter, 0)
    } else {
        let _guarded = GuardedRegion::enter(host);
        let input_length = params.input_length as usize;

        match controls.lookup(params.control_code) {
            Some(entry) if input_length < entry.input_size => {
                log::warn!(
                    "{}: input of {} bytes is smaller than {}",
                    entry.name,
                    input_length,
                    entry.input_size
                );
                (NTSTATUS::BufferTooSmall, 0)
            }
            Some(entry) => {
                log::info!("{}", entry.name);
                let buffer = irp.system_buffer();
                let status = match buffer.get_mut(..input_length) {
                    Some(input) => entry.invoke(monitor, input),
                    None => NTSTATUS::BufferTooSmall,
                };
                (status, input_length)
            }
            None => (NTSTATUS::InvalidDeviceRequest, input_length),
        }
    };

    log::info!(
        "dev={:?} IoControl: {:X} bytes: {:X}, Status={}",
        device,
        params.control_code,
        result_length,
        status
    );
    irp.complete_request(status, result_length)
}
