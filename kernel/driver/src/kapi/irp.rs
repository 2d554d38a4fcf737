use kmon_driver_core::kapi::{
    DeviceControlParameters,
    IoRequest,
    IrpMajor,
    NTSTATUS,
};

use crate::kdef::{
    IoCompleteRequest,
    IO_PRIORITY::IO_NO_INCREMENT,
    IRP,
};

/// An IRP delivered to one of our dispatch routines.
pub struct KmIrp<'a> {
    irp: &'a mut IRP,
}

impl<'a> KmIrp<'a> {
    pub fn new(irp: &'a mut IRP) -> Self {
        Self { irp }
    }

    pub fn as_raw(&mut self) -> *mut IRP {
        self.irp
    }
}

impl IoRequest for KmIrp<'_> {
    fn major_function(&self) -> u8 {
        self.irp.get_current_stack_location().MajorFunction
    }

    fn minor_function(&self) -> u8 {
        self.irp.get_current_stack_location().MinorFunction
    }

    fn device_control(&self) -> Option<DeviceControlParameters> {
        let stack = self.irp.get_current_stack_location();
        if stack.MajorFunction != IrpMajor::DeviceControl as u8 {
            return None;
        }

        let params = stack.ParametersDeviceIoControl();
        Some(DeviceControlParameters {
            control_code: params.IoControlCode,
            input_length: params.InputBufferLength,
            output_length: params.OutputBufferLength,
        })
    }

    fn system_buffer(&mut self) -> &mut [u8] {
        /* METHOD_BUFFERED: the I/O manager allocates max(input, output) bytes */
        let length = match self.device_control() {
            Some(params) => params.input_length.max(params.output_length) as usize,
            None => 0,
        };

        if length == 0 || self.irp.SystemBuffer.is_null() {
            return &mut [];
        }

        unsafe { core::slice::from_raw_parts_mut(self.irp.SystemBuffer as *mut u8, length) }
    }

    fn complete_request(self, status: NTSTATUS, information: usize) -> NTSTATUS {
        self.irp.IoStatus.Status = status;
        self.irp.IoStatus.Information = information;
        unsafe { IoCompleteRequest(self.irp, IO_NO_INCREMENT) };
        status
    }
}
