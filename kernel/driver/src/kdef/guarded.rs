//! Guarded regions.

extern "system" {
    /// Disables the delivery of all APCs to the current thread.
    pub fn KeEnterGuardedRegion();

    pub fn KeLeaveGuardedRegion();
}
