//! NT Status codes.
#![allow(non_upper_case_globals)]
#![allow(overflowing_literals)]

use core::fmt;

/// An NT status value as handed back to the I/O manager.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NTSTATUS(pub i32);

impl NTSTATUS {
    pub const Success: NTSTATUS = NTSTATUS(0x0000_0000);
    pub const Unsuccessful: NTSTATUS = NTSTATUS(0xC000_0001);
    pub const NotImplemented: NTSTATUS = NTSTATUS(0xC000_0002);
    pub const InvalidParameter: NTSTATUS = NTSTATUS(0xC000_000D);
    pub const InvalidDeviceRequest: NTSTATUS = NTSTATUS(0xC000_0010);
    pub const AccessDenied: NTSTATUS = NTSTATUS(0xC000_0022);
    pub const BufferTooSmall: NTSTATUS = NTSTATUS(0xC000_0023);
    pub const ObjectNameCollision: NTSTATUS = NTSTATUS(0xC000_0035);
    pub const InsufficientResources: NTSTATUS = NTSTATUS(0xC000_009A);
    pub const DeviceNotReady: NTSTATUS = NTSTATUS(0xC000_00A3);
    pub const NotSupported: NTSTATUS = NTSTATUS(0xC000_00BB);

    /// Evaluates to `true` if the status is a success type (`0..0x3FFFFFFF`)
    /// or an informational type (`0x40000000..0x7FFFFFFF`).
    pub const fn is_ok(&self) -> bool {
        self.0 >= 0
    }

    /// Status is a warning or error type.
    pub const fn is_err(&self) -> bool {
        self.0 < 0
    }

    /// Status is a success type.
    pub const fn is_success(&self) -> bool {
        (self.0 as u32) <= 0x3FFF_FFFF
    }

    /// Status is a information type.
    pub const fn is_information(&self) -> bool {
        let c = self.0 as u32;
        c >= 0x4000_0000 && c <= 0x7FFF_FFFF
    }

    /// Status is a warning type.
    pub const fn is_warning(&self) -> bool {
        let c = self.0 as u32;
        c >= 0x8000_0000 && c <= 0xBFFF_FFFF
    }

    /// Status is a error type.
    pub const fn is_error(&self) -> bool {
        (self.0 as u32) >= 0xC000_0000
    }

    pub fn ok(self) -> Result<(), NTSTATUS> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::Success => "STATUS_SUCCESS",
            Self::Unsuccessful => "STATUS_UNSUCCESSFUL",
            Self::NotImplemented => "STATUS_NOT_IMPLEMENTED",
            Self::InvalidParameter => "STATUS_INVALID_PARAMETER",
            Self::InvalidDeviceRequest => "STATUS_INVALID_DEVICE_REQUEST",
            Self::AccessDenied => "STATUS_ACCESS_DENIED",
            Self::BufferTooSmall => "STATUS_BUFFER_TOO_SMALL",
            Self::ObjectNameCollision => "STATUS_OBJECT_NAME_COLLISION",
            Self::InsufficientResources => "STATUS_INSUFFICIENT_RESOURCES",
            Self::DeviceNotReady => "STATUS_DEVICE_NOT_READY",
            Self::NotSupported => "STATUS_NOT_SUPPORTED",
            _ => return None,
        };
        Some(name)
    }
}

impl From<i32> for NTSTATUS {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<NTSTATUS> for i32 {
    fn from(value: NTSTATUS) -> Self {
        value.0
    }
}

impl fmt::Display for NTSTATUS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0 as u32)
    }
}

impl fmt::Debug for NTSTATUS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self),
            None => write!(f, "NTSTATUS({})", self),
        }
    }
}
