use kmon_driver_shared::requests::KmonScreenshot;

use super::with_request;
use crate::{
    kapi::NTSTATUS,
    subsystem::Monitor,
};

pub fn handler_screenshot<M: Monitor>(monitor: &M, buffer: &mut [u8]) -> NTSTATUS {
    with_request::<KmonScreenshot, _>(buffer, |request| monitor.capture_screenshot(request))
}
