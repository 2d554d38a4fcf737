#![no_std]

pub mod requests;

/// NT name of the control device.
pub const KMON_NT_DEVICE_NAME: &str = "\\Device\\kmon";

/// Symbolic link exposing the control device to user mode.
pub const KMON_DOS_DEVICE_NAME: &str = "\\DosDevices\\kmon";

/// Path user mode opens to reach the symbolic link.
pub const KMON_WIN32_DEVICE_PATH: &str = "\\\\.\\kmon";

/// Capacity (in UTF-16 code units, terminator included) of the name fields
/// within the request structures.
pub const KMON_MAX_NAME: usize = 64;

pub const FILE_DEVICE_UNKNOWN: u32 = 0x00000022;
pub const METHOD_BUFFERED: u32 = 0x00000000;
pub const FILE_ANY_ACCESS: u32 = 0x00000000;

/// Equivalent of the `CTL_CODE` macro.
pub const fn ctl_code(device_type: u32, function: u32, method: u32, access: u32) -> u32 {
    (device_type << 16) | (access << 14) | ((function & 0xFFF) << 2) | (method & 0x3)
}

/// Extract the function number from a control code.
pub const fn ctl_function(control_code: u32) -> u32 {
    (control_code >> 2) & 0xFFF
}

/// Copy `value` into a fixed, zero terminated UTF-16 buffer.
/// Returns `false` if the value had to be truncated.
pub fn str_to_fixed_wide(buffer: &mut [u16], value: &str) -> bool {
    if buffer.is_empty() {
        return value.is_empty();
    }

    let capacity = buffer.len() - 1;
    let mut written = 0;
    let mut truncated = false;
    for unit in value.encode_utf16() {
        if written >= capacity {
            truncated = true;
            break;
        }

        buffer[written] = unit;
        written += 1;
    }

    buffer[written..].fill(0);
    !truncated
}

/// Iterate the UTF-16 units of a fixed buffer up to its terminator.
pub fn fixed_wide_units(buffer: &[u16]) -> impl Iterator<Item = u16> + '_ {
    buffer.iter().copied().take_while(|unit| *unit != 0)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn control_code_layout() {
        /* CTL_CODE(FILE_DEVICE_UNKNOWN, 0x801, METHOD_BUFFERED, FILE_ANY_ACCESS) */
        assert_eq!(ctl_code(FILE_DEVICE_UNKNOWN, 0x801, METHOD_BUFFERED, FILE_ANY_ACCESS), 0x0022_2004);
        assert_eq!(ctl_function(0x0022_2004), 0x801);
    }

    #[test]
    fn fixed_wide_truncates() {
        let mut buffer = [0xFFFFu16; 4];
        assert!(!str_to_fixed_wide(&mut buffer, "WinSta0"));
        assert_eq!(buffer, [b'W' as u16, b'i' as u16, b'n' as u16, 0]);

        assert!(str_to_fixed_wide(&mut buffer, "A"));
        assert_eq!(buffer, [b'A' as u16, 0, 0, 0]);
        assert_eq!(fixed_wide_units(&buffer).count(), 1);
    }
}
