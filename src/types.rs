//! Types for SDS011 operations

use std::fmt;

use thiserror::Error;

/// A PM2.5 / PM10 reading decoded from a `0xC0` data frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// PM2.5 concentration in µg/m³
    pub pm2_5: f32,
    /// PM10 concentration in µg/m³
    pub pm10: f32,
    /// Received checksum byte
    pub checksum: u8,
    /// Checksum computed over the data window
    pub computed_checksum: u8,
    /// Trailer byte, `0xAB` on a well-formed frame
    pub trailer: u8,
}

impl Measurement {
    /// True when both the checksum and the trailer byte match
    pub fn checksum_valid(&self) -> bool {
        is_valid(self.checksum, self.computed_checksum, self.trailer)
    }

    /// Turn an invalid reading into [`Sds011Error::ChecksumMismatch`]
    pub fn verify(self) -> Result<Self, Sds011Error> {
        verify(self.checksum, self.computed_checksum, self.trailer).map(|_| self)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PM 2.5: {:.1} µg/m³  PM 10: {:.1} µg/m³ CRC={}",
            self.pm2_5,
            self.pm10,
            if self.checksum_valid() { "OK" } else { "NOK" }
        )
    }
}

/// Firmware build date and device ID reported by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    /// Two-digit year
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub device_id: u16,
    pub checksum: u8,
    pub computed_checksum: u8,
    pub trailer: u8,
}

impl FirmwareVersion {
    /// True when both the checksum and the trailer byte match
    pub fn checksum_valid(&self) -> bool {
        is_valid(self.checksum, self.computed_checksum, self.trailer)
    }

    /// Turn an invalid version frame into [`Sds011Error::ChecksumMismatch`]
    pub fn verify(self) -> Result<Self, Sds011Error> {
        verify(self.checksum, self.computed_checksum, self.trailer).map(|_| self)
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Y: {}, M: {}, D: {}, ID: {:#06x}, CRC={}",
            self.year,
            self.month,
            self.day,
            self.device_id,
            if self.checksum_valid() { "OK" } else { "NOK" }
        )
    }
}

/// Generic `0xC5` reply to a command
///
/// `data` holds frame bytes 3..6: for mode, sleep and working-period
/// replies that is `[query(0)/set(1), value, 0x00]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    /// Command byte the device is answering
    pub command: u8,
    pub data: [u8; 3],
    pub device_id: u16,
    pub checksum: u8,
    pub computed_checksum: u8,
    pub trailer: u8,
}

impl Reply {
    pub fn checksum_valid(&self) -> bool {
        is_valid(self.checksum, self.computed_checksum, self.trailer)
    }

    pub fn verify(self) -> Result<Self, Sds011Error> {
        verify(self.checksum, self.computed_checksum, self.trailer).map(|_| self)
    }
}

/// How the sensor delivers measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingMode {
    /// Sensor pushes a data frame on every working cycle
    Active,
    /// Sensor only answers explicit query-data commands
    Query,
}

impl ReportingMode {
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            ReportingMode::Active => 0x00,
            ReportingMode::Query => 0x01,
        }
    }

    pub(crate) fn from_byte(value: u8) -> Result<Self, Sds011Error> {
        match value {
            0x00 => Ok(ReportingMode::Active),
            0x01 => Ok(ReportingMode::Query),
            other => Err(Sds011Error::InvalidResponse(format!(
                "Unknown reporting mode: 0x{:02X}",
                other
            ))),
        }
    }
}

/// Fan and laser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkState {
    Sleeping,
    Working,
}

impl WorkState {
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            WorkState::Sleeping => 0x00,
            WorkState::Working => 0x01,
        }
    }

    pub(crate) fn from_byte(value: u8) -> Result<Self, Sds011Error> {
        match value {
            0x00 => Ok(WorkState::Sleeping),
            0x01 => Ok(WorkState::Working),
            other => Err(Sds011Error::InvalidResponse(format!(
                "Unknown work state: 0x{:02X}",
                other
            ))),
        }
    }
}

/// Errors that can occur during SDS011 operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Sds011Error {
    /// Transport layer error (UART, serial, timeout, disconnect)
    #[error("transport error: {0}")]
    Transport(String),
    /// Invalid parameter passed to a function
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Checksum or trailer of a response frame did not match
    #[error(
        "checksum mismatch: computed 0x{computed:02X}, received 0x{received:02X}, trailer 0x{trailer:02X}"
    )]
    ChecksumMismatch { computed: u8, received: u8, trailer: u8 },
    /// Response does not answer the command that was sent
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

fn is_valid(received: u8, computed: u8, trailer: u8) -> bool {
    received == computed && trailer == crate::frame::TAIL
}

fn verify(received: u8, computed: u8, trailer: u8) -> Result<(), Sds011Error> {
    if is_valid(received, computed, trailer) {
        Ok(())
    } else {
        Err(Sds011Error::ChecksumMismatch {
            computed,
            received,
            trailer,
        })
    }
}

/// Convert bytes to uppercase hex string
pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
