use std::{
    mem,
    net::SocketAddrV4,
    slice,
    sync::atomic::{
        AtomicUsize,
        Ordering,
    },
};

use kmon_driver_shared::{
    requests::{
        KmonInit,
        KmonRelease,
        KmonRequest,
        KmonScreenshot,
        OpenDesktop,
        OpenWinsta,
    },
    str_to_fixed_wide,
    KMON_MAX_NAME,
};

use crate::{
    DriverInterface,
    KInterfaceError,
    KResult,
};

/// Interface for our kernel driver
pub struct KernelInterface {
    driver: Box<dyn DriverInterface>,
    request_count: AtomicUsize,
}

impl KernelInterface {
    pub fn new(driver: Box<dyn DriverInterface>) -> Self {
        Self {
            driver,
            request_count: AtomicUsize::new(0),
        }
    }

    /// Open the driver's device. The device path can be overridden
    /// with the `KMON_DEVICE_PATH` environment variable.
    #[cfg(windows)]
    pub fn create_from_env() -> KResult<Self> {
        use obfstr::obfstr;

        let path = std::env::var(obfstr!("KMON_DEVICE_PATH"))
            .unwrap_or_else(|_| kmon_driver_shared::KMON_WIN32_DEVICE_PATH.to_string());

        log::debug!("Opening kernel interface at {}", path);
        let driver = crate::IoctrlDriverInterface::create(&path)?;
        Ok(Self::new(Box::new(driver)))
    }

    pub fn total_requests(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Send `request` and return the request as updated by the driver.
    pub fn execute_request<R: KmonRequest>(&self, request: &R) -> KResult<R> {
        self.request_count.fetch_add(1, Ordering::Relaxed);

        let mut response = R::default();
        let request_bytes = unsafe {
            slice::from_raw_parts(request as *const R as *const u8, mem::size_of::<R>())
        };
        let response_bytes = unsafe {
            slice::from_raw_parts_mut(&mut response as *mut R as *mut u8, mem::size_of::<R>())
        };

        let length = self
            .driver
            .execute_request(R::control_code(), request_bytes, response_bytes)?;
        if length < mem::size_of::<R>() {
            return Err(KInterfaceError::ResponseTooShort {
                name: R::NAME,
                provided: length,
                expected: mem::size_of::<R>(),
            });
        }

        log::trace!("{} completed with {} bytes", R::NAME, length);
        Ok(response)
    }

    /// Start monitoring and report to the collector at `collector`.
    pub fn start_monitor(&self, collector: SocketAddrV4) -> KResult<KmonInit> {
        self.execute_request(&KmonInit {
            server_address: u32::from_ne_bytes(collector.ip().octets()),
            server_port: collector.port(),
            ..Default::default()
        })
    }

    pub fn stop_monitor(&self) -> KResult<KmonRelease> {
        self.execute_request(&KmonRelease::default())
    }

    pub fn open_window_station(&self, name: &str) -> KResult<OpenWinsta> {
        let mut request = OpenWinsta::default();
        encode_name(&mut request.name, name)?;
        self.execute_request(&request)
    }

    pub fn open_desktop(&self, window_station: u64, name: &str) -> KResult<OpenDesktop> {
        let mut request = OpenDesktop {
            window_station,
            ..Default::default()
        };
        encode_name(&mut request.name, name)?;
        self.execute_request(&request)
    }

    pub fn screenshot(&self, desktop: u64) -> KResult<KmonScreenshot> {
        self.execute_request(&KmonScreenshot {
            desktop,
            ..Default::default()
        })
    }
}

fn encode_name(buffer: &mut [u16], name: &str) -> KResult<()> {
    if str_to_fixed_wide(buffer, name) {
        Ok(())
    } else {
        Err(KInterfaceError::NameTooLong {
            provided: name.encode_utf16().count(),
            limit: KMON_MAX_NAME - 1,
        })
    }
}
