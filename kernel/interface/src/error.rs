use thiserror::Error;

#[derive(Error, Debug)]
pub enum KInterfaceError {
    #[error("kernel interface path contains invalid characters")]
    DeviceInvalidPath(std::ffi::NulError),

    #[cfg(windows)]
    #[error("kernel interface unavailable: {0}")]
    DeviceUnavailable(windows::core::Error),

    #[error("request {control_code:X} failed with {code:X}")]
    RequestFailed { control_code: u32, code: u32 },

    #[error("{name} returned {provided} bytes but {expected} are expected")]
    ResponseTooShort {
        name: &'static str,
        provided: usize,
        expected: usize,
    },

    #[error("name has {provided} characters but only {limit} are supported")]
    NameTooLong { provided: usize, limit: usize },
}

pub type KResult<T> = std::result::Result<T, KInterfaceError>;
