use alloc::{
    string::String,
    vec::Vec,
};

use crate::kdef::UNICODE_STRING;

pub trait UnicodeStringEx {
    fn as_string_lossy(&self) -> String;
}

impl UnicodeStringEx for UNICODE_STRING {
    fn as_string_lossy(&self) -> String {
        if self.Buffer.is_null() {
            return String::new();
        }

        String::from_utf16_lossy(unsafe {
            core::slice::from_raw_parts(self.Buffer, (self.Length / 2) as usize)
        })
    }
}

/// A null terminated UTF-16 copy of a Rust string.
pub struct OwnedUnicodeString {
    buffer: Vec<u16>,
}

impl OwnedUnicodeString {
    pub fn new(value: &str) -> Self {
        let mut buffer = value.encode_utf16().collect::<Vec<_>>();
        buffer.push(0);
        Self { buffer }
    }

    /// Borrow as `UNICODE_STRING`. The result must not outlive `self`.
    pub fn as_unicode_string(&self) -> UNICODE_STRING {
        let length = (self.buffer.len() - 1) * 2;
        UNICODE_STRING {
            Length: length.min(0xFFFC) as u16,
            MaximumLength: (length + 2).min(0xFFFE) as u16,
            Buffer: self.buffer.as_ptr(),
        }
    }
}

impl From<&str> for OwnedUnicodeString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
