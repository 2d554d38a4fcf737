use alloc::vec::Vec;
use core::fmt;

use super::NTSTATUS;
use crate::dispatch::MajorFunctionTable;

/// Opaque identity of the driver object, handed to the monitor so it can
/// enumerate the driver's devices later on.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverHandle(pub usize);

impl fmt::Debug for DriverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DriverHandle(0x{:X})", self.0)
    }
}

/// The I/O manager services the driver consumes.
///
/// Kernel builds implement this on top of `IoCreateDevice` & co,
/// tests implement it with a journaling mock.
pub trait IoHost {
    /// Handle to a device object created through this host.
    type Device: Copy + Eq + fmt::Debug;

    fn driver_handle(&self) -> DriverHandle;

    fn create_device(
        &self,
        device_name: &str,
        device_type: u32,
        characteristics: u32,
        exclusive: bool,
    ) -> Result<Self::Device, NTSTATUS>;

    fn delete_device(&self, device: Self::Device);

    /// Every device object currently attached to the driver object,
    /// including those created by collaborators.
    fn device_objects(&self) -> Vec<Self::Device>;

    fn create_symbolic_link(&self, link_name: &str, device_name: &str) -> NTSTATUS;

    fn delete_symbolic_link(&self, link_name: &str) -> NTSTATUS;

    /// Publish the major function table (and the unload routine, if enabled)
    /// on the driver object.
    fn install_routes(&self, routes: &MajorFunctionTable);

    /// Disable delivery of normal kernel APCs to the current thread.
    fn enter_guarded_region(&self);

    fn leave_guarded_region(&self);
}
