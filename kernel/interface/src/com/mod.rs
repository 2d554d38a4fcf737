use crate::KResult;

/// Transport used to deliver control requests to the driver.
pub trait DriverInterface: Sync + Send {
    /// Execute a buffered control request.
    /// Returns the number of bytes the driver reported back.
    #[must_use]
    fn execute_request(
        &self,
        control_code: u32,
        request: &[u8],
        response: &mut [u8],
    ) -> KResult<usize>;
}

#[cfg(windows)]
mod ioctrl;
#[cfg(windows)]
pub use ioctrl::*;
