//! Device identity: the `c<CELL>-<name>-<name>` device id and the
//! campus/course/class labels used to attribute telemetry.

use core::fmt::{self, Write};

use heapless::String;

use crate::constants::{HOSTNAME_MAX_LEN, TOPIC_MAX_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    MissingCellPrefix,
    InvalidCellNumber,
    WrongSegmentCount,
    EmptyName,
    InvalidNameCharacter,
    CellMismatch { configured: u8, encoded: u8 },
    InvalidLabel,
    TooLong,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingCellPrefix => f.write_str("device id must start with 'c' and the cell number"),
            Error::InvalidCellNumber => f.write_str("cell number is not a value between 0 and 255"),
            Error::WrongSegmentCount => f.write_str("device id must have the form c<cell>-<name>-<name>"),
            Error::EmptyName => f.write_str("device id contains an empty name"),
            Error::InvalidNameCharacter => {
                f.write_str("device id names may only contain lowercase letters and digits")
            }
            Error::CellMismatch { configured, encoded } => write!(
                f,
                "device id encodes cell {:02} but CELL_ID is {:02}",
                encoded, configured
            ),
            Error::InvalidLabel => f.write_str(
                "identity label is empty or contains whitespace, control characters, '/', '+' or '#'",
            ),
            Error::TooLong => f.write_str("identity does not fit its buffer"),
        }
    }
}

/// Parsed device identifier, e.g. `c07-gabriela-nicolas`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId<'a> {
    cell: u8,
    members: [&'a str; 2],
}

impl<'a> DeviceId<'a> {
    pub fn new(cell: u8, first: &'a str, second: &'a str) -> Result<Self, Error> {
        check_name(first)?;
        check_name(second)?;
        Ok(Self {
            cell,
            members: [first, second],
        })
    }

    /// Parse `c<digits>-<name>-<name>`. Leading zeros in the cell number are
    /// accepted, so both `c7` and `c07` give cell 7.
    pub fn parse(id: &'a str) -> Result<Self, Error> {
        let mut segments = id.split('-');

        let cell = segments
            .next()
            .and_then(|s| s.strip_prefix('c'))
            .ok_or(Error::MissingCellPrefix)?;
        if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidCellNumber);
        }
        let cell = cell.parse().map_err(|_| Error::InvalidCellNumber)?;

        let first = segments.next().ok_or(Error::WrongSegmentCount)?;
        let second = segments.next().ok_or(Error::WrongSegmentCount)?;
        if segments.next().is_some() {
            return Err(Error::WrongSegmentCount);
        }

        Self::new(cell, first, second)
    }

    pub fn cell(&self) -> u8 {
        self.cell
    }

    pub fn members(&self) -> [&'a str; 2] {
        self.members
    }
}

impl fmt::Display for DeviceId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{:02}-{}-{}", self.cell, self.members[0], self.members[1])
    }
}

fn check_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if !name.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
        return Err(Error::InvalidNameCharacter);
    }
    Ok(())
}

// Labels become MQTT topic levels: any UTF-8 except separators, wildcards,
// whitespace and control characters.
fn check_label(label: &str) -> Result<(), Error> {
    let valid = !label.is_empty()
        && label
            .chars()
            .all(|c| !c.is_control() && !c.is_whitespace() && !matches!(c, '/' | '+' | '#'));

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidLabel)
    }
}

/// Everything that identifies this device on the network and the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity<'a> {
    pub campus: &'a str,
    pub course: &'a str,
    pub class: &'a str,
    pub cell_id: u8,
    pub device_id: &'a str,
}

impl<'a> Identity<'a> {
    /// Parsed device id, checked against the configured cell.
    pub fn device(&self) -> Result<DeviceId<'a>, Error> {
        let device = DeviceId::parse(self.device_id)?;
        if device.cell() != self.cell_id {
            return Err(Error::CellMismatch {
                configured: self.cell_id,
                encoded: device.cell(),
            });
        }
        Ok(device)
    }

    /// MQTT client identifier
    pub fn client_id(&self) -> &'a str {
        self.device_id
    }

    /// DHCP hostname announced by the network stack
    pub fn hostname(&self) -> Result<String<HOSTNAME_MAX_LEN>, Error> {
        String::try_from(self.device_id).map_err(|_| Error::TooLong)
    }

    /// `campus/course/class/device_id`
    pub fn topic_prefix(&self) -> Result<String<TOPIC_MAX_LEN>, Error> {
        for label in [self.campus, self.course, self.class, self.device_id] {
            check_label(label)?;
        }

        let mut topic = String::new();
        write!(
            topic,
            "{}/{}/{}/{}",
            self.campus, self.course, self.class, self.device_id
        )
        .map_err(|_| Error::TooLong)?;
        Ok(topic)
    }

    /// Topic prefix with one more level appended, e.g. `.../telemetry`.
    pub fn topic(&self, leaf: &str) -> Result<String<TOPIC_MAX_LEN>, Error> {
        check_label(leaf)?;
        let mut topic = self.topic_prefix()?;
        write!(topic, "/{}", leaf).map_err(|_| Error::TooLong)?;
        Ok(topic)
    }
}
