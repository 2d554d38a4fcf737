//! Request delegation: every request reaching one of our devices passes through here.

use crate::{
    handler,
    kapi::{
        IoHost,
        IoRequest,
        IrpMajor,
        IRP_MJ_MAXIMUM_FUNCTION,
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

/// Major functions routed to the driver. Everything else is left to the
/// I/O manager's default handler.
pub const DELEGATED_MAJORS: [IrpMajor; 8] = [
    IrpMajor::Create,
    IrpMajor::Close,
    IrpMajor::Read,
    IrpMajor::Write,
    IrpMajor::FlushBuffers,
    IrpMajor::DeviceControl,
    IrpMajor::Cleanup,
    IrpMajor::Power,
];

/// The driver object's dispatch table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorFunctionTable {
    delegated: [bool; IRP_MJ_MAXIMUM_FUNCTION],
    unload: bool,
}

impl MajorFunctionTable {
    pub const fn empty() -> Self {
        Self {
            delegated: [false; IRP_MJ_MAXIMUM_FUNCTION],
            unload: false,
        }
    }

    pub fn with_delegated(majors: &[IrpMajor], unload: bool) -> Self {
        let mut table = Self::empty();
        for major in majors {
            table.delegate(*major);
        }
        table.unload = unload;
        table
    }

    pub fn delegate(&mut self, major: IrpMajor) {
        self.delegated[major as usize] = true;
    }

    pub fn is_delegated(&self, major_function: u8) -> bool {
        self.delegated
            .get(major_function as usize)
            .copied()
            .unwrap_or(false)
    }

    pub fn delegated(&self) -> impl Iterator<Item = IrpMajor> + '_ {
        IrpMajor::ALL
            .into_iter()
            .filter(|major| self.delegated[*major as usize])
    }

    pub fn unload_enabled(&self) -> bool {
        self.unload
    }
}

impl<H, M, K, L> DriverContext<H, M, K, L>
where
    H: IoHost,
    M: Monitor,
    L: LogBackend,
{
    /// Entry point for every request the I/O manager delivers.
    pub fn dispatch<R>(&self, device: H::Device, irp: R) -> NTSTATUS
    where
        R: IoRequest,
        K: KeyboardDispatch<H::Device, R>,
    {
        log::trace!(
            "DevObj {:?} Major {:X} Minor {:X}",
            device,
            irp.major_function(),
            irp.minor_function()
        );

        if !self.routes.is_delegated(irp.major_function()) {
            log::warn!(
                "DevObj {:?} received non routed major {:X}",
                device,
                irp.major_function()
            );
            return irp.complete_request(NTSTATUS::InvalidDeviceRequest, 0);
        }

        let irp = match self.keyboard.dispatch_general(device, irp) {
            KbdOutcome::Handled(status) => return status,
            KbdOutcome::Pass(irp) => irp,
        };

        if irp.major() == Some(IrpMajor::DeviceControl) {
            handler::device_control(&self.host, &self.controls, &self.monitor, device, irp)
        } else {
            /* create/close/read/... only exist so user mode can open a handle */
            irp.complete_request(NTSTATUS::Success, 0)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{
        Event,
        Fixture,
        MockIrp,
    };

    #[test]
    fn table_lists_delegated() {
        let table = MajorFunctionTable::with_delegated(&DELEGATED_MAJORS, false);
        assert_eq!(table.delegated().count(), DELEGATED_MAJORS.len());
        assert!(table.is_delegated(IrpMajor::Power as u8));
        assert!(!table.is_delegated(IrpMajor::Pnp as u8));
        assert!(!table.is_delegated(0xFF));
        assert!(!table.unload_enabled());
    }

    #[test]
    fn plain_categories_complete_successfully() {
        for major in DELEGATED_MAJORS {
            if major == IrpMajor::DeviceControl {
                continue;
            }

            let fixture = Fixture::loaded();
            fixture.journal.clear();

            let irp = MockIrp::new(&fixture.journal, major);
            let status = fixture.driver.dispatch(fixture.device, irp);
            assert_eq!(status, NTSTATUS::Success);

            assert_eq!(
                fixture.journal.events(),
                [
                    Event::KeyboardOffer(fixture.device, major as u8),
                    Event::Complete {
                        status: NTSTATUS::Success,
                        information: 0
                    },
                ],
                "{:?}",
                major
            );
        }
    }

    #[test]
    fn claimed_requests_are_left_alone() {
        let fixture = Fixture::loaded();
        fixture.keyboard.claim(NTSTATUS(0x0000_0103));
        fixture.journal.clear();

        for major in DELEGATED_MAJORS {
            let irp = MockIrp::new(&fixture.journal, major);
            let status = fixture.driver.dispatch(fixture.device, irp);
            assert_eq!(status, NTSTATUS(0x0000_0103));
        }

        /* the keyboard subsystem completed every request, nobody else did */
        let events = fixture.journal.events();
        assert_eq!(fixture.journal.completions(), DELEGATED_MAJORS.len());
        assert!(events.iter().all(|event| !matches!(
            event,
            Event::MonitorCall(_) | Event::EnterGuarded | Event::LeaveGuarded
        )));
    }

    #[test]
    fn claimed_control_request_skips_validation() {
        let fixture = Fixture::loaded();
        fixture.keyboard.claim(NTSTATUS::Unsuccessful);
        fixture.journal.clear();

        /* would fail validation (output < input) if it reached the control router */
        let irp = MockIrp::control(&fixture.journal, 0xDEAD_0000, vec![0; 16], 8);
        let status = fixture.driver.dispatch(fixture.device, irp);

        assert_eq!(status, NTSTATUS::Unsuccessful);
        assert_eq!(
            fixture.journal.events(),
            [
                Event::KeyboardOffer(fixture.device, IrpMajor::DeviceControl as u8),
                Event::Complete {
                    status: NTSTATUS::Unsuccessful,
                    information: 0
                },
            ]
        );
    }

    #[test]
    fn non_routed_major() {
        let fixture = Fixture::loaded();
        fixture.journal.clear();

        let irp = MockIrp::new(&fixture.journal, IrpMajor::QueryInformation);
        let status = fixture.driver.dispatch(fixture.device, irp);

        assert_eq!(status, NTSTATUS::InvalidDeviceRequest);
        assert_eq!(
            fixture.journal.events(),
            [Event::Complete {
                status: NTSTATUS::InvalidDeviceRequest,
                information: 0
            }]
        );
    }
}
