use alloc::{
    ffi::CString,
    format,
};

use crate::kdef::{
    DbgPrintEx,
    DPFLTR_IHVDRIVER_ID,
    DPFLTR_LEVEL,
};

pub struct KernelLogger;

impl log::Log for KernelLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let (level_prefix, log_level) = match record.level() {
            log::Level::Trace => ("T", DPFLTR_LEVEL::TRACE),
            log::Level::Debug => ("D", DPFLTR_LEVEL::TRACE),
            log::Level::Info => ("I", DPFLTR_LEVEL::INFO),
            log::Level::Warn => ("W", DPFLTR_LEVEL::WARNING),
            log::Level::Error => ("E", DPFLTR_LEVEL::ERROR),
        };

        let payload = format!("[{}] {}", level_prefix, record.args());
        let payload = match CString::new(payload) {
            Ok(payload) => payload,
            Err(_) => c"logging message contains null char".into(),
        };

        unsafe {
            DbgPrintEx(
                DPFLTR_IHVDRIVER_ID,
                log_level as u32,
                "[KMON]%s\n\0".as_ptr(),
                payload.as_ptr(),
            );
        }
    }

    fn flush(&self) {}
}

pub static APP_LOGGER: KernelLogger = KernelLogger;
