use kmon_driver_shared::requests::{
    OpenDesktop,
    OpenWinsta,
};

use super::with_request;
use crate::{
    kapi::NTSTATUS,
    subsystem::Monitor,
};

pub fn handler_open_winsta<M: Monitor>(monitor: &M, buffer: &mut [u8]) -> NTSTATUS {
    with_request::<OpenWinsta, _>(buffer, |request| monitor.open_window_station(request))
}

pub fn handler_open_desktop<M: Monitor>(monitor: &M, buffer: &mut [u8]) -> NTSTATUS {
    with_request::<OpenDesktop, _>(buffer, |request| monitor.open_desktop(request))
}
