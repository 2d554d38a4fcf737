//! Debugger support.

extern "system" {
    pub fn KeBugCheck(code: u32) -> !;

	/// Breaks into the kernel debugger.
	pub fn DbgBreakPoint();
}

extern "C" {
    pub fn DbgPrintEx(ComponentId: u32, Level: u32, Format: *const u8, ...) -> u32;
}

/// `DPFLTR_IHVDRIVER_ID`, the component id for third party drivers.
pub const DPFLTR_IHVDRIVER_ID: u32 = 77;

/// `DbgPrintEx` Message severity.
#[repr(C)]
pub enum DPFLTR_LEVEL {
	ERROR = 0,
	WARNING,
	TRACE,
	INFO,
}
