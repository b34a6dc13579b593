use core::ffi::CStr;

use heapless::Vec;

use crate::constants::SERVER_NAME_BUFFER_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Empty,
    TooLong,
    InteriorNul,
}

/// Broker hostname with its NUL terminator, as mbedTLS-style stacks expect
/// for SNI and certificate checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerName {
    bytes: Vec<u8, SERVER_NAME_BUFFER_SIZE>,
}

impl ServerName {
    pub fn new(hostname: &str) -> Result<Self, Error> {
        if hostname.is_empty() {
            return Err(Error::Empty);
        }
        if hostname.as_bytes().contains(&0) {
            return Err(Error::InteriorNul);
        }

        let mut bytes = Vec::new();
        bytes
            .extend_from_slice(hostname.as_bytes())
            .map_err(|_| Error::TooLong)?;
        bytes.push(0).map_err(|_| Error::TooLong)?;

        Ok(Self { bytes })
    }

    pub fn as_c_str(&self) -> &CStr {
        // `new` guarantees exactly one NUL, at the end
        CStr::from_bytes_with_nul(&self.bytes).unwrap_or_default()
    }

    /// Hostname without the terminator
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.bytes.len() - 1]).unwrap_or_default()
    }
}
