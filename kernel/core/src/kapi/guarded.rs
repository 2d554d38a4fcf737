use super::IoHost;

/// RAII guard for a guarded region.
///
/// While held, asynchronous procedure calls targeting the current thread
/// are not delivered. This does not exclude other threads.
pub struct GuardedRegion<'a, H: IoHost + ?Sized> {
    host: &'a H,
}

impl<'a, H: IoHost + ?Sized> GuardedRegion<'a, H> {
    pub fn enter(host: &'a H) -> Self {
        host.enter_guarded_region();
        Self { host }
    }
}

impl<'a, H: IoHost + ?Sized> Drop for GuardedRegion<'a, H> {
    fn drop(&mut self) {
        self.host.leave_guarded_region();
    }
}
