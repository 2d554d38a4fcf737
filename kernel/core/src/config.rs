use kmon_driver_shared::{
    FILE_DEVICE_UNKNOWN,
    KMON_DOS_DEVICE_NAME,
    KMON_NT_DEVICE_NAME,
};
use log::LevelFilter;

/// Load time configuration of the driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Install the unload routine. When disabled the driver can not be
    /// removed at runtime and stays resident until shutdown.
    pub allow_unload: bool,

    pub device_name: &'static str,
    pub symbolic_link: &'static str,

    pub device_type: u32,
    pub device_characteristics: u32,
    pub exclusive: bool,

    pub log_level: LevelFilter,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            allow_unload: cfg!(feature = "unload"),

            device_name: KMON_NT_DEVICE_NAME,
            symbolic_link: KMON_DOS_DEVICE_NAME,

            device_type: FILE_DEVICE_UNKNOWN,
            device_characteristics: 0,
            exclusive: false,

            log_level: LevelFilter::Info,
        }
    }
}
