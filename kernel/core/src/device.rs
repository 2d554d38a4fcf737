//! Device objects owned by the driver.

use alloc::{
    string::String,
    vec::Vec,
};

use crate::kapi::IoHost;

/// Per device state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceExtension<D> {
    device: D,
    symbolic_link: String,
}

impl<D: Copy> DeviceExtension<D> {
    pub fn new(device: D, symbolic_link: impl Into<String>) -> Self {
        Self {
            device,
            symbolic_link: symbolic_link.into(),
        }
    }

    /// The device this extension belongs to.
    pub fn device(&self) -> D {
        self.device
    }

    pub fn symbolic_link(&self) -> &str {
        &self.symbolic_link
    }
}

/// Stable handle of a device within the [`DeviceChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(usize);

/// A device object together with the symbolic link registered for it.
///
/// Releasing the record always removes the link before the object.
#[derive(Debug)]
pub struct DeviceRecord<D> {
    device: D,
    extension: Option<DeviceExtension<D>>,
}

impl<D: Copy + Eq + core::fmt::Debug> DeviceRecord<D> {
    pub fn device(&self) -> D {
        self.device
    }

    pub fn extension(&self) -> Option<&DeviceExtension<D>> {
        self.extension.as_ref()
    }

    fn release<H: IoHost<Device = D> + ?Sized>(self, host: &H) {
        match &self.extension {
            Some(extension) => {
                log::info!(
                    "Deleted device ext {:?} device {:?}",
                    self.device,
                    extension.device()
                );
                log::info!("Deleted symlink = {}", extension.symbolic_link());
                if let Err(status) = host.delete_symbolic_link(extension.symbolic_link()).ok() {
                    log::warn!(
                        "Failed to delete symlink {}: {}",
                        extension.symbolic_link(),
                        status
                    );
                }
            }
            None => {
                log::warn!("Device {:?} has no extension", self.device);
            }
        }

        host.delete_device(self.device);
    }
}

/// All device objects of the driver in creation order.
///
/// The chain only grows while the driver initializes and only shrinks
/// when it unloads.
#[derive(Debug)]
pub struct DeviceChain<D> {
    records: Vec<DeviceRecord<D>>,
}

impl<D> Default for DeviceChain<D> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<D: Copy + Eq + core::fmt::Debug> DeviceChain<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, device: D, extension: Option<DeviceExtension<D>>) -> DeviceId {
        self.records.push(DeviceRecord { device, extension });
        DeviceId(self.records.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: DeviceId) -> Option<&DeviceRecord<D>> {
        self.records.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceRecord<D>> {
        self.records.iter()
    }

    pub fn extension(&self, device: D) -> Option<&DeviceExtension<D>> {
        self.records
            .iter()
            .find(|record| record.device == device)
            .and_then(DeviceRecord::extension)
    }

    /// Take ownership of every device in `devices` the chain does not know yet.
    /// Adopted devices have no extension and therefore no symbolic link.
    pub fn adopt(&mut self, devices: impl IntoIterator<Item = D>) -> usize {
        let mut adopted = 0;
        for device in devices {
            if self.records.iter().any(|record| record.device == device) {
                continue;
            }

            log::debug!("Adopting device {:?}", device);
            self.push(device, None);
            adopted += 1;
        }

        adopted
    }

    /// Release every device front to back, each one completely before
    /// moving on to the next.
    pub fn teardown<H: IoHost<Device = D> + ?Sized>(&mut self, host: &H) {
        for record in self.records.drain(..) {
            record.release(host);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{
        Event,
        MockDevice,
        MockHost,
    };

    fn chain_of(host: &MockHost, count: usize) -> DeviceChain<MockDevice> {
        let mut chain = DeviceChain::new();
        for index in 0..count {
            let device = host.spawn_device();
            chain.push(device, Some(DeviceExtension::new(device, alloc::format!("\\DosDevices\\kmon{}", index))));
        }
        chain
    }

    #[test]
    fn teardown_empty() {
        let host = MockHost::new();
        let mut chain = chain_of(&host, 0);
        chain.teardown(&host);

        assert!(host.journal().events().is_empty());
    }

    #[test]
    fn teardown_single() {
        let host = MockHost::new();
        let mut chain = chain_of(&host, 1);
        let device = chain.iter().next().unwrap().device();
        chain.teardown(&host);

        assert!(chain.is_empty());
        assert_eq!(
            host.journal().events(),
            [
                Event::DeleteLink("\\DosDevices\\kmon0".into()),
                Event::DeleteDevice(device),
            ]
        );
    }

    #[test]
    fn teardown_in_chain_order() {
        let host = MockHost::new();
        let mut chain = chain_of(&host, 16);
        let devices = chain.iter().map(DeviceRecord::device).collect::<Vec<_>>();
        chain.teardown(&host);

        let events = host.journal().events();
        assert_eq!(events.len(), 32);
        for (index, device) in devices.iter().enumerate() {
            assert_eq!(
                events[index * 2],
                Event::DeleteLink(alloc::format!("\\DosDevices\\kmon{}", index))
            );
            assert_eq!(events[index * 2 + 1], Event::DeleteDevice(*device));
        }
    }

    #[test]
    fn teardown_without_extension() {
        let host = MockHost::new();
        let mut chain = chain_of(&host, 1);
        let orphan = host.spawn_device();
        chain.push(orphan, None);
        let first = chain.iter().next().unwrap().device();

        assert!(chain.extension(orphan).is_none());
        assert_eq!(chain.extension(first).map(DeviceExtension::device), Some(first));

        chain.teardown(&host);
        assert_eq!(
            host.journal().events(),
            [
                Event::DeleteLink("\\DosDevices\\kmon0".into()),
                Event::DeleteDevice(first),
                Event::DeleteDevice(orphan),
            ]
        );
    }

    #[test]
    fn adopt_skips_known_devices() {
        let host = MockHost::new();
        let mut chain = chain_of(&host, 2);
        let known = chain.iter().map(DeviceRecord::device).collect::<Vec<_>>();
        let foreign = host.spawn_device();

        let adopted = chain.adopt([known[1], foreign, known[0], foreign]);
        assert_eq!(adopted, 1);
        assert_eq!(chain.len(), 3);
        assert!(chain.extension(foreign).is_none());

        chain.teardown(&host);
        assert_eq!(
            host.journal().events()[4..],
            [Event::DeleteDevice(foreign)]
        );
    }

    #[test]
    fn failed_link_removal_still_deletes_device() {
        let host = MockHost::new();
        host.fail_delete_link(crate::kapi::NTSTATUS::Unsuccessful);

        let mut chain = chain_of(&host, 1);
        let device = chain.iter().next().unwrap().device();
        chain.teardown(&host);

        assert_eq!(host.journal().events().last(), Some(&Event::DeleteDevice(device)));
    }
}
