use kmon_driver_core::kapi::NTSTATUS;

pub type VOID = ();
pub type PVOID = *mut VOID;
pub type PCVOID = *const VOID;

/// IRQL type.
pub type KIRQL = u8;

/// Doubly linked list structure.
#[repr(C)]
pub struct _LIST_ENTRY {
    pub Flink: *const _LIST_ENTRY,
    pub Blink: *const _LIST_ENTRY,
}

pub type PIO_APC_ROUTINE = Option<
    extern "system" fn(ApcContext: PCVOID, IoStatusBlock: *const IO_STATUS_BLOCK, Reserved: u32),
>;

/// An I/O status block.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct IO_STATUS_BLOCK {
    /// Completion status.
    pub Status: NTSTATUS,
    /// Request-dependent value.
    pub Information: usize,
}

pub type PIO_STATUS_BLOCK = *mut IO_STATUS_BLOCK;

/// Processor modes.
#[repr(u8)]
#[derive(Copy, Clone)]
pub enum KPROCESSOR_MODE {
    KernelMode,
    UserMode,
}

/// I/O Request priority.
pub mod IO_PRIORITY {
    pub type KPRIORITY_BOOST = u8;

    pub const IO_NO_INCREMENT: KPRIORITY_BOOST = 0;
}
