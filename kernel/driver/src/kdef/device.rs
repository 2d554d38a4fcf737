//! Device Object.

use kmon_driver_core::kapi::NTSTATUS;

use super::{
    DRIVER_OBJECT,
    IRP,
    UNICODE_STRING,
};

extern "system" {
	pub fn IoCreateDevice(DriverObject: *mut DRIVER_OBJECT, DeviceExtensionSize: u32, DeviceName: *const UNICODE_STRING,
		DeviceType: u32, DeviceCharacteristics: u32, Exclusive: bool, DeviceObject: *mut *mut DEVICE_OBJECT) -> NTSTATUS;

	pub fn IoDeleteDevice(DeviceObject: *mut DEVICE_OBJECT);
	pub fn IoCreateSymbolicLink(SymbolicLinkName: &UNICODE_STRING, DeviceName: &UNICODE_STRING) -> NTSTATUS;
	pub fn IoDeleteSymbolicLink(SymbolicLinkName: &UNICODE_STRING) -> NTSTATUS;
}

/// Device object flags.
#[repr(C)]
pub enum DEVICE_FLAGS {
	NONE = 0,
	DO_BUFFERED_IO                  = 0x00000004,
	DO_EXCLUSIVE                    = 0x00000008,
	DO_DIRECT_IO                    = 0x00000010,
	DO_DEVICE_HAS_NAME              = 0x00000040,
	DO_DEVICE_INITIALIZING          = 0x00000080,
}

/// The leading, documented part of the `DEVICE_OBJECT` structure.
///
/// Device objects are allocated by the I/O manager and only ever accessed
/// through pointers, the remaining fields are never touched.
#[repr(C)]
pub struct DEVICE_OBJECT
{
	pub Type: u16,
	pub Size: u16,
	pub ReferenceCount: i32,
	pub DriverObject: *const DRIVER_OBJECT,
	pub NextDevice: *mut DEVICE_OBJECT,
	pub AttachedDevice: *mut DEVICE_OBJECT,
	pub CurrentIrp: *const IRP,
	pub Timer: *mut u8,
	pub Flags: u32,
	pub Characteristics: u32,
	pub Vpb: *mut u8,
	pub DeviceExtension: *mut u8,
	pub DeviceType: u32,
	pub StackSize: u8,
}

pub type PDEVICE_OBJECT = *mut DEVICE_OBJECT;

pub type PDRIVER_CANCEL = Option<extern "system" fn (DeviceObject: &mut DEVICE_OBJECT, Irp: &mut IRP)>;

pub type PDRIVER_DISPATCH = Option<extern "system" fn (DeviceObject: &mut DEVICE_OBJECT, Irp: &mut IRP) -> NTSTATUS>;
