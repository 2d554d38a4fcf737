//! Driver load and unload.

use thiserror::Error;

use crate::{
    config::DriverConfig,
    device::{
        DeviceChain,
        DeviceExtension,
        DeviceId,
    },
    dispatch::{
        MajorFunctionTable,
        DELEGATED_MAJORS,
    },
    handler::ControlTable,
    kapi::{
        IoHost,
        NTSTATUS,
    },
    logger::LogBackend,
    subsystem::Monitor,
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    #[error("failed to initialize logging ({0})")]
    Logging(NTSTATUS),

    #[error("IoCreateDevice failed with {0}")]
    CreateDevice(NTSTATUS),

    #[error("IoCreateSymbolicLink failed with {0}")]
    CreateSymbolicLink(NTSTATUS),
}

impl InitError {
    /// The status reported back to the I/O manager.
    pub fn status(&self) -> NTSTATUS {
        match self {
            Self::Logging(status) | Self::CreateDevice(status) | Self::CreateSymbolicLink(status) => *status,
        }
    }
}

/// The subsystems the driver delegates to.
pub struct Collaborators<M, K, L> {
    pub monitor: M,
    pub keyboard: K,
    pub logging: L,
}

/// State of a loaded driver.
///
/// Created by [`driver_entry`] and consumed by [`DriverContext::unload`].
/// Requests are dispatched through a shared reference, the device chain
/// can only be modified while the context is exclusively owned.
pub struct DriverContext<H: IoHost, M, K, L> {
    pub(crate) host: H,
    pub(crate) monitor: M,
    pub(crate) keyboard: K,
    pub(crate) logging: L,

    pub(crate) devices: DeviceChain<H::Device>,
    pub(crate) routes: MajorFunctionTable,
    pub(crate) controls: ControlTable<M>,
}

/// Bring up the driver.
///
/// On failure every resource acquired up to that point has been released again
/// and no device is visible to user mode.
pub fn driver_entry<H, M, K, L>(
    host: H,
    collaborators: Collaborators<M, K, L>,
    registry_path: &str,
    config: &DriverConfig,
) -> Result<DriverContext<H, M, K, L>, InitError>
where
    H: IoHost,
    M: Monitor,
    L: LogBackend,
{
    let Collaborators {
        monitor,
        keyboard,
        logging,
    } = collaborators;

    let status = logging.init();
    if let Err(status) = status.ok() {
        return Err(InitError::Logging(status));
    }

    log::info!(
        "DriverEntry drvObj={:?}, regPath={}",
        host.driver_handle(),
        registry_path
    );

    let routes = MajorFunctionTable::with_delegated(&DELEGATED_MAJORS, config.allow_unload);
    host.install_routes(&routes);

    let device = match host.create_device(
        config.device_name,
        config.device_type,
        config.device_characteristics,
        config.exclusive,
    ) {
        Ok(device) => device,
        Err(status) => {
            log::error!("Failed to create device {}: {}", config.device_name, status);
            logging.release();
            return Err(InitError::CreateDevice(status));
        }
    };

    let extension = DeviceExtension::new(device, config.symbolic_link);
    log::info!("created Device {:?}, DevExt={:?}", device, extension);

    let status = host.create_symbolic_link(extension.symbolic_link(), config.device_name);
    if let Err(status) = status.ok() {
        log::error!(
            "Failed to create symlink {}: {}",
            extension.symbolic_link(),
            status
        );
        host.delete_device(device);
        logging.release();
        return Err(InitError::CreateSymbolicLink(status));
    }

    let mut devices = DeviceChain::new();
    devices.push(device, Some(extension));

    monitor.init(host.driver_handle());

    log::info!("DriverEntry successfully completed");
    Ok(DriverContext {
        host,
        monitor,
        keyboard,
        logging,

        devices,
        routes,
        controls: ControlTable::kmon(),
    })
}

impl<H, M, K, L> DriverContext<H, M, K, L>
where
    H: IoHost,
    M: Monitor,
    L: LogBackend,
{
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    pub fn routes(&self) -> &MajorFunctionTable {
        &self.routes
    }

    pub fn controls(&self) -> &ControlTable<M> {
        &self.controls
    }

    pub fn devices(&self) -> &DeviceChain<H::Device> {
        &self.devices
    }

    pub fn device_extension(&self, device: H::Device) -> Option<&DeviceExtension<H::Device>> {
        self.devices.extension(device)
    }

    /// Append a device created by one of the collaborators (e.g. a filter
    /// device of the keyboard subsystem) so it gets released on unload.
    pub fn attach_device(
        &mut self,
        device: H::Device,
        extension: Option<DeviceExtension<H::Device>>,
    ) -> DeviceId {
        self.devices.push(device, extension)
    }

    /// Tear down the driver. Only reachable if the unload routine has been
    /// installed, see [`DriverConfig::allow_unload`].
    pub fn unload(mut self) {
        log::info!("UnloadRoutine");

        /* the monitor may still reference our devices */
        if let Err(status) = self.monitor.stop(None).ok() {
            log::warn!("Failed to stop monitor: {}", status);
        }

        let adopted = self.devices.adopt(self.host.device_objects());
        if adopted > 0 {
            log::info!("Found {} additional device(s) on the driver object", adopted);
        }
        self.devices.teardown(&self.host);

        log::info!("UnloadRoutine completed");
        self.logging.release();
    }
}
