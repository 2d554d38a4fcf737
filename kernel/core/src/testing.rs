//! Journaling stand-ins for the I/O manager and the collaborators.

use std::sync::{
    atomic::{
        AtomicBool,
        AtomicI32,
        AtomicUsize,
        Ordering,
    },
    Arc,
    Mutex,
};

use kmon_driver_shared::requests::{
    KmonInit,
    KmonRelease,
    KmonScreenshot,
    OpenDesktop,
    OpenWinsta,
};

use crate::{
    config::DriverConfig,
    device::DeviceRecord,
    dispatch::MajorFunctionTable,
    driver::{
        driver_entry,
        Collaborators,
        InitError,
    },
    kapi::{
        DeviceControlParameters,
        DriverHandle,
        IoHost,
        IoRequest,
        IrpMajor,
        NTSTATUS,
    },
    logger::LogBackend,
    subsystem::{
        KbdOutcome,
        KeyboardDispatch,
        Monitor,
    },
    DriverContext,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LogInit,
    LogRelease,
    InstallRoutes { unload: bool },
    CreateDevice(String, MockDevice),
    DeleteDevice(MockDevice),
    CreateLink(String, String),
    DeleteLink(String),
    EnterGuarded,
    LeaveGuarded,
    MonitorInit(DriverHandle),
    MonitorCall(&'static str),
    KeyboardOffer(MockDevice, u8),
    Complete { status: NTSTATUS, information: usize },
}

/// Ordered record of everything the driver did to its environment.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Journal {
    pub fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn completions(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Event::Complete { .. }))
            .count()
    }

    /// The most recent completion.
    pub fn completion(&self) -> Option<(NTSTATUS, usize)> {
        self.events().iter().rev().find_map(|event| match event {
            Event::Complete {
                status,
                information,
            } => Some((*status, *information)),
            _ => None,
        })
    }

    pub fn monitor_call_names(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .filter_map(|event| match event {
                Event::MonitorCall(name) => Some(*name),
                _ => None,
            })
            .collect()
    }

    pub fn monitor_calls(&self) -> usize {
        self.monitor_call_names().len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockDevice(pub usize);

pub struct MockHost {
    journal: Journal,
    next_device: AtomicUsize,
    attached: Mutex<Vec<MockDevice>>,

    create_device_status: Mutex<Option<NTSTATUS>>,
    create_link_status: Mutex<Option<NTSTATUS>>,
    delete_link_status: Mutex<Option<NTSTATUS>>,
}

impl MockHost {
    pub const DRIVER: DriverHandle = DriverHandle(0xFFFF_8000_1234_0000);

    pub fn new() -> Self {
        Self::with_journal(&Journal::default())
    }

    pub fn with_journal(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            next_device: AtomicUsize::new(0x1000),
            attached: Default::default(),

            create_device_status: Default::default(),
            create_link_status: Default::default(),
            delete_link_status: Default::default(),
        }
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Allocate a device handle without going through `create_device`.
    pub fn spawn_device(&self) -> MockDevice {
        MockDevice(self.next_device.fetch_add(0x10, Ordering::Relaxed))
    }

    /// Attach a device to the driver object the way a collaborator would,
    /// bypassing the driver's own bookkeeping.
    pub fn attach_foreign_device(&self) -> MockDevice {
        let device = self.spawn_device();
        self.attached.lock().unwrap().insert(0, device);
        device
    }

    pub fn fail_create_device(&self, status: NTSTATUS) {
        *self.create_device_status.lock().unwrap() = Some(status);
    }

    pub fn fail_create_link(&self, status: NTSTATUS) {
        *self.create_link_status.lock().unwrap() = Some(status);
    }

    pub fn fail_delete_link(&self, status: NTSTATUS) {
        *self.delete_link_status.lock().unwrap() = Some(status);
    }
}

impl IoHost for MockHost {
    type Device = MockDevice;

    fn driver_handle(&self) -> DriverHandle {
        Self::DRIVER
    }

    fn create_device(
        &self,
        device_name: &str,
        _device_type: u32,
        _characteristics: u32,
        _exclusive: bool,
    ) -> Result<Self::Device, NTSTATUS> {
        if let Some(status) = *self.create_device_status.lock().unwrap() {
            return Err(status);
        }

        let device = self.spawn_device();
        self.attached.lock().unwrap().insert(0, device);
        self.journal
            .push(Event::CreateDevice(device_name.to_string(), device));
        Ok(device)
    }

    fn delete_device(&self, device: Self::Device) {
        self.attached.lock().unwrap().retain(|attached| *attached != device);
        self.journal.push(Event::DeleteDevice(device));
    }

    fn device_objects(&self) -> Vec<Self::Device> {
        self.attached.lock().unwrap().clone()
    }

    fn create_symbolic_link(&self, link_name: &str, device_name: &str) -> NTSTATUS {
        self.journal.push(Event::CreateLink(
            link_name.to_string(),
            device_name.to_string(),
        ));
        self.create_link_status
            .lock()
            .unwrap()
            .unwrap_or(NTSTATUS::Success)
    }

    fn delete_symbolic_link(&self, link_name: &str) -> NTSTATUS {
        self.journal.push(Event::DeleteLink(link_name.to_string()));
        self.delete_link_status
            .lock()
            .unwrap()
            .unwrap_or(NTSTATUS::Success)
    }

    fn install_routes(&self, routes: &MajorFunctionTable) {
        self.journal.push(Event::InstallRoutes {
            unload: routes.unload_enabled(),
        });
    }

    fn enter_guarded_region(&self) {
        self.journal.push(Event::EnterGuarded);
    }

    fn leave_guarded_region(&self) {
        self.journal.push(Event::LeaveGuarded);
    }
}

#[derive(Default)]
struct MonitorState {
    response: AtomicI32,
    started: AtomicBool,
    calls: AtomicUsize,
    driver: Mutex<Option<DriverHandle>>,
}

/// Monitor answering every request with a configurable status.
#[derive(Clone)]
pub struct MockMonitor {
    journal: Journal,
    state: Arc<MonitorState>,
}

impl MockMonitor {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            state: Default::default(),
        }
    }

    pub fn respond(&self, status: NTSTATUS) {
        self.state.response.store(status.0, Ordering::Relaxed);
    }

    pub fn started(&self) -> bool {
        self.state.started.load(Ordering::Relaxed)
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.load(Ordering::Relaxed)
    }

    pub fn driver(&self) -> Option<DriverHandle> {
        *self.state.driver.lock().unwrap()
    }

    fn call(&self, name: &'static str) -> NTSTATUS {
        self.state.calls.fetch_add(1, Ordering::Relaxed);
        self.journal.push(Event::MonitorCall(name));
        NTSTATUS(self.state.response.load(Ordering::Relaxed))
    }
}

impl Monitor for MockMonitor {
    fn init(&self, driver: DriverHandle) {
        *self.state.driver.lock().unwrap() = Some(driver);
        self.journal.push(Event::MonitorInit(driver));
    }

    fn start(&self, request: &mut KmonInit) -> NTSTATUS {
        let status = self.call("start");
        request.error = request.server_port as i32;
        self.state.started.store(true, Ordering::Relaxed);
        status
    }

    fn stop(&self, _request: Option<&mut KmonRelease>) -> NTSTATUS {
        let status = self.call("stop");
        self.state.started.store(false, Ordering::Relaxed);
        status
    }

    fn open_window_station(&self, _request: &mut OpenWinsta) -> NTSTATUS {
        self.call("open_window_station")
    }

    fn open_desktop(&self, _request: &mut OpenDesktop) -> NTSTATUS {
        self.call("open_desktop")
    }

    fn capture_screenshot(&self, _request: &mut KmonScreenshot) -> NTSTATUS {
        self.call("capture_screenshot")
    }
}

/// Keyboard subsystem which either passes everything or claims everything.
#[derive(Clone)]
pub struct MockKeyboard {
    journal: Journal,
    claim: Arc<Mutex<Option<NTSTATUS>>>,
}

impl MockKeyboard {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            claim: Default::default(),
        }
    }

    /// Complete every following request with `status`.
    pub fn claim(&self, status: NTSTATUS) {
        *self.claim.lock().unwrap() = Some(status);
    }
}

impl KeyboardDispatch<MockDevice, MockIrp> for MockKeyboard {
    fn dispatch_general(&self, device: MockDevice, irp: MockIrp) -> KbdOutcome<MockIrp> {
        self.journal
            .push(Event::KeyboardOffer(device, irp.major_function()));

        let claim = *self.claim.lock().unwrap();
        match claim {
            Some(status) => KbdOutcome::Handled(irp.complete_request(status, 0)),
            None => KbdOutcome::Pass(irp),
        }
    }
}

pub struct MockLogging {
    journal: Journal,
    status: NTSTATUS,
}

impl MockLogging {
    pub fn new(journal: &Journal, status: NTSTATUS) -> Self {
        Self {
            journal: journal.clone(),
            status,
        }
    }
}

impl LogBackend for MockLogging {
    fn init(&self) -> NTSTATUS {
        self.journal.push(Event::LogInit);
        self.status
    }

    fn release(&self) {
        self.journal.push(Event::LogRelease);
    }
}

pub struct MockIrp {
    journal: Journal,
    major_function: u8,
    parameters: Option<DeviceControlParameters>,
    buffer: Vec<u8>,
    output: Arc<Mutex<Vec<u8>>>,
}

impl MockIrp {
    pub fn new(journal: &Journal, major: IrpMajor) -> Self {
        Self {
            journal: journal.clone(),
            major_function: major as u8,
            parameters: None,
            buffer: Vec::new(),
            output: Default::default(),
        }
    }

    /// Device control request with `buffer` as input.
    pub fn control(journal: &Journal, control_code: u32, buffer: Vec<u8>, output_length: u32) -> Self {
        Self {
            parameters: Some(DeviceControlParameters {
                control_code,
                input_length: buffer.len() as u32,
                output_length,
            }),
            buffer,
            ..Self::new(journal, IrpMajor::DeviceControl)
        }
    }

    pub fn with_input_length(mut self, input_length: u32) -> Self {
        if let Some(parameters) = &mut self.parameters {
            parameters.input_length = input_length;
        }
        self
    }

    /// The system buffer as seen by the caller once the request completed.
    pub fn output(&self) -> Arc<Mutex<Vec<u8>>> {
        self.output.clone()
    }
}

impl IoRequest for MockIrp {
    fn major_function(&self) -> u8 {
        self.major_function
    }

    fn minor_function(&self) -> u8 {
        0
    }

    fn device_control(&self) -> Option<DeviceControlParameters> {
        self.parameters
    }

    fn system_buffer(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    fn complete_request(self, status: NTSTATUS, information: usize) -> NTSTATUS {
        *self.output.lock().unwrap() = self.buffer;
        self.journal.push(Event::Complete {
            status,
            information,
        });
        status
    }
}

pub type MockDriver = DriverContext<MockHost, MockMonitor, MockKeyboard, MockLogging>;

/// A loaded driver with handles to its mocks.
pub struct Fixture {
    pub driver: MockDriver,
    pub device: MockDevice,
    pub journal: Journal,
    pub monitor: MockMonitor,
    pub keyboard: MockKeyboard,
}

impl Fixture {
    pub const REGISTRY_PATH: &'static str =
        "\\Registry\\Machine\\System\\CurrentControlSet\\Services\\kmon";

    pub fn loaded() -> Self {
        Self::with_config(MockHost::new(), &DriverConfig::default()).expect("driver to load")
    }

    pub fn with_config(host: MockHost, config: &DriverConfig) -> Result<Self, InitError> {
        let journal = host.journal();
        let driver = Self::entry(&journal, host, NTSTATUS::Success, config)?;
        let device = driver
            .devices()
            .iter()
            .next()
            .map(DeviceRecord::device)
            .expect("a control device");

        Ok(Self {
            device,
            monitor: driver.monitor().clone(),
            keyboard: driver.keyboard().clone(),
            journal,
            driver,
        })
    }

    /// Run the driver entry against fresh collaborators.
    pub fn entry(
        journal: &Journal,
        host: MockHost,
        log_status: NTSTATUS,
        config: &DriverConfig,
    ) -> Result<MockDriver, InitError> {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Trace)
            .try_init();

        driver_entry(
            host,
            Collaborators {
                monitor: MockMonitor::new(journal),
                keyboard: MockKeyboard::new(journal),
                logging: MockLogging::new(journal, log_status),
            },
            Self::REGISTRY_PATH,
            config,
        )
    }
}
