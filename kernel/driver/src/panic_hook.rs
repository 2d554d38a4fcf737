use core::panic::PanicInfo;

use crate::kdef::{
    DbgBreakPoint,
    DbgPrintEx,
    KeBugCheck,
    DPFLTR_IHVDRIVER_ID,
    DPFLTR_LEVEL,
};

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    unsafe {
        DbgPrintEx(
            DPFLTR_IHVDRIVER_ID,
            DPFLTR_LEVEL::ERROR as u32,
            "[KMON] Driver paniced. Trigger BugCheck.\n\0".as_ptr(),
        );
        DbgBreakPoint();
        KeBugCheck(1);
    }
}

#[export_name = "_fltused"]
static _FLTUSED: i32 = 0;

/// Referenced by `alloc` even though unwinding is disabled.
#[no_mangle]
extern "C" fn __CxxFrameHandler3() -> ! {
    unsafe {
        DbgPrintEx(
            DPFLTR_IHVDRIVER_ID,
            DPFLTR_LEVEL::ERROR as u32,
            "[KMON] __CxxFrameHandler3 has been called. This should no occur.\n\0".as_ptr(),
        );
        DbgBreakPoint();
        KeBugCheck(1);
    }
}
