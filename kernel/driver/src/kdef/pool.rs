//! Kernel Mode pools.

use super::PVOID;

extern "system" {
    /// Allocates pool memory of the specified type and tag.
    pub fn ExAllocatePoolWithTag(PoolType: POOL_TYPE, NumberOfBytes: usize, Tag: u32) -> PVOID;
    /// Deallocates a block of pool memory allocated with the specified tag.
    pub fn ExFreePoolWithTag(P: PVOID, Tag: u32);
}

/// Specifies the type of system memory to allocate.
#[repr(C)]
pub enum POOL_TYPE {
    /// Nonpageable system memory, can be accessed from any IRQL.
    NonPagedPool = 0,
    /// Pageable system memory, can only be allocated and accessed at IRQL < DISPATCH_LEVEL.
    PagedPool,
}
