use kmon_driver_shared::requests::{
    KmonInit,
    KmonRelease,
};

use super::with_request;
use crate::{
    kapi::NTSTATUS,
    subsystem::Monitor,
};

pub fn handler_init<M: Monitor>(monitor: &M, buffer: &mut [u8]) -> NTSTATUS {
    with_request::<KmonInit, _>(buffer, |request| {
        /* server_address is kept in network byte order */
        let [a, b, c, d] = request.server_address.to_ne_bytes();
        log::debug!("start monitoring, collector {}.{}.{}.{}:{}", a, b, c, d, request.server_port);
        monitor.start(request)
    })
}

pub fn handler_release<M: Monitor>(monitor: &M, buffer: &mut [u8]) -> NTSTATUS {
    with_request::<KmonRelease, _>(buffer, |request| monitor.stop(Some(request)))
}
