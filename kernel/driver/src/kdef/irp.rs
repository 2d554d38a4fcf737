//! I/O request packets (IRP).

use super::{
    IO_PRIORITY::KPRIORITY_BOOST,
    IO_STATUS_BLOCK,
    KIRQL,
    KPROCESSOR_MODE,
    PDEVICE_OBJECT,
    PDRIVER_CANCEL,
    PIO_APC_ROUTINE,
    PIO_STATUS_BLOCK,
    PVOID,
    _LIST_ENTRY,
};

pub type PIRP = *mut IRP;
pub type PIO_STACK_LOCATION = *mut IO_STACK_LOCATION;

extern "system"
{
	#[link_name = "IofCompleteRequest"]
	pub fn IoCompleteRequest(Irp: PIRP, PriorityBoost: KPRIORITY_BOOST);
}

/// The `IRP` structure is a partial opaque structure that represents an I/O request packet.
#[repr(C)]
pub struct IRP
{
	pub Type: u16,
	pub Size: u16,
	/// Pointer to an `MDL` describing a user buffer, if the driver is using direct I/O.
	pub MdlAddress: PVOID,
	/// Flags word - used to remember various flags.
	pub Flags: u32,
	/// Pointer to a system-space buffer if the driver is using buffered I/O.
	pub SystemBuffer: PVOID,
	pub ThreadListEntry: _LIST_ENTRY,
	/// I/O status - final status of operation.
	pub IoStatus: IO_STATUS_BLOCK,
	/// Indicates the execution mode of the original requester of the operation.
	pub RequestorMode: KPROCESSOR_MODE,
	/// If set to `TRUE`, a driver has marked the IRP pending.
	pub PendingReturned: bool,
	/// Stack state information.
	pub StackCount: i8,
	/// Stack state information.
	pub CurrentLocation: i8,
	/// If set to `TRUE`, the IRP either is or should be canceled.
	pub Cancel: bool,
	/// Irql at which the cancel spinlock was acquired.
	pub CancelIrql: KIRQL,
	pub ApcEnvironment: u8,
	/// Allocation control flags.
	pub AllocationFlags: u8,
	/// User parameters.
	pub UserIosb: PIO_STATUS_BLOCK,
	pub UserEvent: *const () /* PKEVENT */,

	// union {
	pub UserApcRoutine: PIO_APC_ROUTINE,
	pub UserApcContext: PVOID,
	// } Overlay

	/// Contains the entry point for a driver-supplied `Cancel` routine to be called if the IRP is canceled.
	pub CancelRoutine: PDRIVER_CANCEL,
	/// Contains the address of an output buffer for `IRP_MJ_DEVICE_CONTROL`.
	pub UserBuffer: PVOID,

	// union {
	pub Overlay: _IRP_OVERLAY,
	// } Tail
}

/// Kernel structures for IRP.
#[repr(C)]
pub struct _IRP_OVERLAY
{
	pub DriverContext: [PVOID; 4],
	pub Thread: *const () /* PETHREAD */,
	pub AuxiliaryBuffer: PVOID,
	pub ListEntry: _LIST_ENTRY,
	/// Current stack location.
	pub CurrentStackLocation: PIO_STACK_LOCATION,
	pub OriginalFileObject: *const () /* PFILE_OBJECT */,
}

/// I/O Stack Locations.
#[repr(C)]
pub struct IO_STACK_LOCATION
{
	/// The IRP major function code indicating the type of I/O operation to be performed.
	pub MajorFunction: u8,
	/// A subfunction code for `MajorFunction`.
	pub MinorFunction: u8,
	pub Flags: u8,
	/// Stack location control flags.
	pub Control: u8,

	// union Parameters
	pub Parameters: [PVOID; 4],

	pub DeviceObject: PDEVICE_OBJECT,
	pub FileObject: *const () /* PFILE_OBJECT */,
	pub CompletionRoutine: PVOID,
	pub Context: PVOID,
}

/// Parameters for `IRP_MJ_DEVICE_CONTROL`.
#[repr(C)]
pub struct _IO_STACK_LOCATION_IRP_MJ_DEVICE_CONTROL
{
	pub OutputBufferLength: u32,
	pub Padding0: [u8; 4],

	pub InputBufferLength: u32,
	pub Padding1: [u8; 4],

	pub IoControlCode: u32,
	pub Padding2: [u8; 4],

	pub Type3InputBuffer: PVOID
}

impl IRP {
	/// Returns a pointer to the caller's stack location in the given `IRP`.
	pub fn get_current_stack_location(&self) -> &IO_STACK_LOCATION {
		unsafe { &*self.Overlay.CurrentStackLocation }
	}
}

impl IO_STACK_LOCATION {
	/// Access parameters for `IRP_MJ_DEVICE_CONTROL`.
	pub fn ParametersDeviceIoControl(&self) -> &_IO_STACK_LOCATION_IRP_MJ_DEVICE_CONTROL {
		unsafe { &*(self.Parameters.as_ptr() as *const _IO_STACK_LOCATION_IRP_MJ_DEVICE_CONTROL) }
	}
}
