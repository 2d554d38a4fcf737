use crate::{
    ctl_code,
    fixed_wide_units,
    str_to_fixed_wide,
    FILE_ANY_ACCESS,
    FILE_DEVICE_UNKNOWN,
    KMON_MAX_NAME,
    METHOD_BUFFERED,
};

pub const IOCTL_KMON_INIT: u32 = kmon_ioctl(0x801);
pub const IOCTL_KMON_RELEASE: u32 = kmon_ioctl(0x802);
pub const IOCTL_KMON_OPEN_WINSTA: u32 = kmon_ioctl(0x803);
pub const IOCTL_KMON_OPEN_DESKTOP: u32 = kmon_ioctl(0x804);
pub const IOCTL_KMON_SCREENSHOT: u32 = kmon_ioctl(0x805);

const fn kmon_ioctl(function: u32) -> u32 {
    ctl_code(FILE_DEVICE_UNKNOWN, function, METHOD_BUFFERED, FILE_ANY_ACCESS)
}

/// A request structure exchanged through the shared system buffer.
///
/// # Safety
/// Implementors must be `#[repr(C)]` plain old data: every bit pattern
/// of `size_of::<Self>()` bytes has to be a valid value, as the driver
/// reads the structure straight out of a caller supplied buffer.
pub unsafe trait KmonRequest: Copy + Default + Sized {
    /// Human readable name used for logging.
    const NAME: &'static str;

    /// The 12 bit function number of the request.
    fn function_code() -> u16;

    fn control_code() -> u32 {
        kmon_ioctl(Self::function_code() as u32)
    }
}

/// Start monitoring and stream results to the given collector.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KmonInit {
    /// IPv4 address of the collector (network byte order).
    pub server_address: u32,
    /// TCP port of the collector (host byte order).
    pub server_port: u16,
    pub reserved: u16,
    pub flags: u32,
    /// Status reported back by the monitor.
    pub error: i32,
}

unsafe impl KmonRequest for KmonInit {
    const NAME: &'static str = "IOCTL_KMON_INIT";

    fn function_code() -> u16 {
        0x801
    }
}

/// Stop monitoring.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KmonRelease {
    pub flags: u32,
    pub error: i32,
}

unsafe impl KmonRequest for KmonRelease {
    const NAME: &'static str = "IOCTL_KMON_RELEASE";

    fn function_code() -> u16 {
        0x802
    }
}

/// Open a window station by name.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenWinsta {
    pub name: [u16; KMON_MAX_NAME],
    /// Kernel handle of the opened window station.
    pub handle: u64,
    pub error: i32,
    pub reserved: u32,
}

impl Default for OpenWinsta {
    fn default() -> Self {
        Self {
            name: [0; KMON_MAX_NAME],
            handle: 0,
            error: 0,
            reserved: 0,
        }
    }
}

impl OpenWinsta {
    pub fn new(name: &str) -> Self {
        let mut request = Self::default();
        str_to_fixed_wide(&mut request.name, name);
        request
    }

    pub fn name_units(&self) -> impl Iterator<Item = u16> + '_ {
        fixed_wide_units(&self.name)
    }
}

unsafe impl KmonRequest for OpenWinsta {
    const NAME: &'static str = "IOCTL_KMON_OPEN_WINSTA";

    fn function_code() -> u16 {
        0x803
    }
}

/// Open a desktop within a previously opened window station.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenDesktop {
    pub name: [u16; KMON_MAX_NAME],
    pub window_station: u64,
    /// Kernel handle of the opened desktop.
    pub handle: u64,
    pub error: i32,
    pub reserved: u32,
}

impl Default for OpenDesktop {
    fn default() -> Self {
        Self {
            name: [0; KMON_MAX_NAME],
            window_station: 0,
            handle: 0,
            error: 0,
            reserved: 0,
        }
    }
}

impl OpenDesktop {
    pub fn new(window_station: u64, name: &str) -> Self {
        let mut request = Self {
            window_station,
            ..Default::default()
        };
        str_to_fixed_wide(&mut request.name, name);
        request
    }

    pub fn name_units(&self) -> impl Iterator<Item = u16> + '_ {
        fixed_wide_units(&self.name)
    }
}

unsafe impl KmonRequest for OpenDesktop {
    const NAME: &'static str = "IOCTL_KMON_OPEN_DESKTOP";

    fn function_code() -> u16 {
        0x804
    }
}

/// Capture the given desktop. The monitor fills in the image geometry,
/// the pixel data itself is delivered through the collector connection.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KmonScreenshot {
    pub desktop: u64,
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub data_size: u32,
    pub error: i32,
    pub reserved: u32,
}

unsafe impl KmonRequest for KmonScreenshot {
    const NAME: &'static str = "IOCTL_KMON_SCREENSHOT";

    fn function_code() -> u16 {
        0x805
    }
}
