use log::LevelFilter;

use crate::kapi::NTSTATUS;

/// The logging collaborator's lifecycle.
///
/// Messages themselves go through the `log` facade and never fail the caller.
pub trait LogBackend {
    fn init(&self) -> NTSTATUS;

    fn release(&self);
}

/// Installs a static `log::Log` implementation as the global logger.
pub struct FacadeLogBackend {
    logger: &'static dyn log::Log,
    level: LevelFilter,
}

impl FacadeLogBackend {
    pub const fn new(logger: &'static dyn log::Log, level: LevelFilter) -> Self {
        Self { logger, level }
    }
}

impl LogBackend for FacadeLogBackend {
    fn init(&self) -> NTSTATUS {
        if log::set_logger(self.logger).is_err() {
            return NTSTATUS::Unsuccessful;
        }

        log::set_max_level(self.level);
        NTSTATUS::Success
    }

    fn release(&self) {
        self.logger.flush();
        log::set_max_level(LevelFilter::Off);
    }
}
