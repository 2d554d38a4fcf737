//! I/O request packets (IRP).

use super::NTSTATUS;

/// Number of slots in a driver's major function table.
pub const IRP_MJ_MAXIMUM_FUNCTION: usize = 0x1C;

/// `IRP` Major Function Codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrpMajor {
    /// Opens a handle to the device object.
    Create = 0x00,
    CreateNamedPipe = 0x01,
    /// The last handle of the file object has been closed and released.
    Close = 0x02,
    Read = 0x03,
    Write = 0x04,
    QueryInformation = 0x05,
    SetInformation = 0x06,
    QueryEa = 0x07,
    SetEa = 0x08,
    FlushBuffers = 0x09,
    QueryVolumeInformation = 0x0A,
    SetVolumeInformation = 0x0B,
    DirectoryControl = 0x0C,
    FileSystemControl = 0x0D,
    /// A user-mode thread has called `DeviceIoControl`.
    DeviceControl = 0x0E,
    InternalDeviceControl = 0x0F,
    Shutdown = 0x10,
    LockControl = 0x11,
    /// The last handle of the file object has been closed, outstanding
    /// requests might still be pending.
    Cleanup = 0x12,
    CreateMailslot = 0x13,
    QuerySecurity = 0x14,
    SetSecurity = 0x15,
    Power = 0x16,
    SystemControl = 0x17,
    DeviceChange = 0x18,
    QueryQuota = 0x19,
    SetQuota = 0x1A,
    Pnp = 0x1B,
}

impl IrpMajor {
    pub const ALL: [IrpMajor; IRP_MJ_MAXIMUM_FUNCTION] = [
        Self::Create,
        Self::CreateNamedPipe,
        Self::Close,
        Self::Read,
        Self::Write,
        Self::QueryInformation,
        Self::SetInformation,
        Self::QueryEa,
        Self::SetEa,
        Self::FlushBuffers,
        Self::QueryVolumeInformation,
        Self::SetVolumeInformation,
        Self::DirectoryControl,
        Self::FileSystemControl,
        Self::DeviceControl,
        Self::InternalDeviceControl,
        Self::Shutdown,
        Self::LockControl,
        Self::Cleanup,
        Self::CreateMailslot,
        Self::QuerySecurity,
        Self::SetSecurity,
        Self::Power,
        Self::SystemControl,
        Self::DeviceChange,
        Self::QueryQuota,
        Self::SetQuota,
        Self::Pnp,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// Parameters of an `IRP_MJ_DEVICE_CONTROL` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceControlParameters {
    pub control_code: u32,
    pub input_length: u32,
    pub output_length: u32,
}

/// A single I/O request owned by the driver until it gets completed.
///
/// Completion consumes the request, hence every request can only be
/// completed once. Dropping a request without completing it is only
/// permitted for a party which hands ownership of the completion
/// elsewhere (e.g. a subsystem which completed the packet itself).
pub trait IoRequest: Sized {
    fn major_function(&self) -> u8;

    fn minor_function(&self) -> u8;

    /// Device control parameters.
    /// Returns `None` unless this is a `IRP_MJ_DEVICE_CONTROL` request.
    fn device_control(&self) -> Option<DeviceControlParameters>;

    /// The buffered I/O system buffer. Input and output share this buffer.
    fn system_buffer(&mut self) -> &mut [u8];

    /// Indicates that all processing for this request has been completed
    /// and returns it to the I/O manager.
    fn complete_request(self, status: NTSTATUS, information: usize) -> NTSTATUS;

    fn major(&self) -> Option<IrpMajor> {
        IrpMajor::from_raw(self.major_function())
    }
}
