use core::alloc::GlobalAlloc;

use crate::kdef::{
    ExAllocatePoolWithTag,
    ExFreePoolWithTag,
    POOL_TYPE,
    VOID,
};

/// 'KMON'
const POOL_TAG: u32 = u32::from_le_bytes(*b"KMON");

struct NonPagedAllocator;
unsafe impl GlobalAlloc for NonPagedAllocator {
    unsafe fn alloc(&self, layout: core::alloc::Layout) -> *mut u8 {
        ExAllocatePoolWithTag(POOL_TYPE::NonPagedPool, layout.size(), POOL_TAG) as *mut u8
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: core::alloc::Layout) {
        ExFreePoolWithTag(ptr as *mut VOID, POOL_TAG);
    }
}

#[global_allocator]
static GLOBAL_ALLOC: NonPagedAllocator = NonPagedAllocator;
