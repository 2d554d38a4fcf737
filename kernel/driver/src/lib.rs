#![no_std]
#![feature(sync_unsafe_cell)]

use core::cell::SyncUnsafeCell;

use kapi::{
    DeviceHandle,
    KernelHost,
    KmIrp,
    UnicodeStringEx,
};
use kdef::{
    DbgPrintEx,
    DEVICE_OBJECT,
    DPFLTR_IHVDRIVER_ID,
    DPFLTR_LEVEL,
    DRIVER_OBJECT,
    IRP,
    UNICODE_STRING,
};
use kmon_driver_core::{
    config::DriverConfig,
    kapi::{
        IoRequest,
        NTSTATUS,
    },
    logger::FacadeLogBackend,
    Collaborators,
    DriverContext,
    InitError,
};
use monitor::{
    KernelKeyboard,
    KernelMonitor,
};

use crate::logger::APP_LOGGER;

mod kapi;
mod kdef;
mod logger;
mod monitor;
mod panic_hook;

extern crate alloc;

type KmonDriver = DriverContext<KernelHost, KernelMonitor, KernelKeyboard, FacadeLogBackend>;

static DRIVER: SyncUnsafeCell<Option<KmonDriver>> = SyncUnsafeCell::new(None);

extern "system" fn driver_unload(_driver: &mut DRIVER_OBJECT) {
    let driver = unsafe { &mut *DRIVER.get() }.take();
    if let Some(driver) = driver {
        driver.unload();
    }
}

extern "system" fn irp_dispatch(device: &mut DEVICE_OBJECT, irp: &mut IRP) -> NTSTATUS {
    let device = DeviceHandle::from_object(device);
    let irp = KmIrp::new(irp);

    match unsafe { &*DRIVER.get() } {
        Some(driver) => driver.dispatch(device, irp),
        None => irp.complete_request(NTSTATUS::DeviceNotReady, 0),
    }
}

#[no_mangle]
pub extern "system" fn driver_entry(
    driver: &mut DRIVER_OBJECT,
    registry_path: &UNICODE_STRING,
) -> NTSTATUS {
    let config = DriverConfig {
        log_level: if cfg!(debug_assertions) {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        },
        ..Default::default()
    };

    let host = KernelHost::new(driver, Some(irp_dispatch), Some(driver_unload));
    let collaborators = Collaborators {
        monitor: KernelMonitor,
        keyboard: KernelKeyboard,
        logging: FacadeLogBackend::new(&APP_LOGGER, config.log_level),
    };

    let registry_path = registry_path.as_string_lossy();
    match kmon_driver_core::driver_entry(host, collaborators, &registry_path, &config) {
        Ok(context) => {
            unsafe { *DRIVER.get() = Some(context) };
            NTSTATUS::Success
        }
        Err(InitError::Logging(status)) => {
            unsafe {
                DbgPrintEx(
                    DPFLTR_IHVDRIVER_ID,
                    DPFLTR_LEVEL::ERROR as u32,
                    "[KMON] Failed to initialize app logger!\n\0".as_ptr(),
                );
            }
            status
        }
        Err(error) => error.status(),
    }
}
