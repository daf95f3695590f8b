//! Frame encoding/decoding for the SDS011 wire protocol.
//!
//! Host to device, 19 bytes:
//!
//! ```text
//! +----+----+-----+--------------+----+----+----------+----+
//! | AA | B4 | cmd | payload[12]  | FF | FF | checksum | AB |
//! +----+----+-----+--------------+----+----+----------+----+
//! ```
//!
//! Device to host, 10 bytes, possibly preceded by noise:
//!
//! ```text
//! +----+---------+---------+----------+----+
//! | AA | subtype | data[6] | checksum | AB |
//! +----+---------+---------+----------+----+
//! ```

use log::{debug, error};

use crate::transport::SensorTransport;
use crate::types::{bytes_to_hex, FirmwareVersion, Measurement, Reply, Sds011Error};

/// Start marker of every frame
pub const HEAD: u8 = 0xAA;
/// End marker of every frame
pub const TAIL: u8 = 0xAB;
/// Subtype of host to device command frames
pub const COMMAND_ID: u8 = 0xB4;
/// Subtype of measurement frames
pub const DATA_REPORT_ID: u8 = 0xC0;
/// Subtype of command replies, firmware version included
pub const REPLY_ID: u8 = 0xC5;

pub const CMD_MODE: u8 = 0x02;
pub const CMD_QUERY_DATA: u8 = 0x04;
pub const CMD_DEVICE_ID: u8 = 0x05;
pub const CMD_SLEEP: u8 = 0x06;
pub const CMD_FIRMWARE: u8 = 0x07;
pub const CMD_WORKING_PERIOD: u8 = 0x08;

pub const COMMAND_FRAME_LEN: usize = 19;
pub const RESPONSE_FRAME_LEN: usize = 10;
pub const MAX_PAYLOAD_LEN: usize = 12;

/// Encoded command frame ready to be written to the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame([u8; COMMAND_FRAME_LEN]);

impl CommandFrame {
    pub fn as_bytes(&self) -> &[u8; COMMAND_FRAME_LEN] {
        &self.0
    }

    pub fn command(&self) -> u8 {
        self.0[2]
    }

    /// Zero-padded payload
    pub fn payload(&self) -> &[u8] {
        &self.0[3..3 + MAX_PAYLOAD_LEN]
    }

    pub fn checksum(&self) -> u8 {
        self.0[17]
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Raw 10-byte frame read from the sensor, not yet interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFrame([u8; RESPONSE_FRAME_LEN]);

impl ResponseFrame {
    pub fn new(bytes: [u8; RESPONSE_FRAME_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; RESPONSE_FRAME_LEN] {
        &self.0
    }

    pub fn subtype(&self) -> u8 {
        self.0[1]
    }

    pub fn is_measurement(&self) -> bool {
        self.subtype() == DATA_REPORT_ID
    }

    pub fn is_reply(&self) -> bool {
        self.subtype() == REPLY_ID
    }

    fn checksum(&self) -> u8 {
        self.0[8]
    }

    fn trailer(&self) -> u8 {
        self.0[9]
    }

    /// Sum of bytes 2..8 modulo 256
    fn computed_checksum(&self) -> u8 {
        self.0[2..8].iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
    }

    fn u16_at(&self, index: usize) -> u16 {
        u16::from_le_bytes([self.0[index], self.0[index + 1]])
    }
}

impl From<[u8; RESPONSE_FRAME_LEN]> for ResponseFrame {
    fn from(bytes: [u8; RESPONSE_FRAME_LEN]) -> Self {
        Self(bytes)
    }
}

/// Build a command frame, zero-padding `payload` to 12 bytes
pub fn encode(command: u8, payload: &[u8]) -> Result<CommandFrame, Sds011Error> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(Sds011Error::InvalidArgument(format!(
            "Payload too long: {} bytes (maximum: {} bytes)",
            payload.len(),
            MAX_PAYLOAD_LEN
        )));
    }

    let mut padded = [0u8; MAX_PAYLOAD_LEN];
    padded[..payload.len()].copy_from_slice(payload);

    // The device sums command, payload and the two 0xFF bytes; 0xFF + 0xFF
    // is -2 modulo 256.
    let checksum = padded
        .iter()
        .fold(command.wrapping_sub(2), |acc, &b| acc.wrapping_add(b));

    let mut frame = [0u8; COMMAND_FRAME_LEN];
    frame[0] = HEAD;
    frame[1] = COMMAND_ID;
    frame[2] = command;
    frame[3..15].copy_from_slice(&padded);
    frame[15] = 0xFF;
    frame[16] = 0xFF;
    frame[17] = checksum;
    frame[18] = TAIL;

    debug!("> {}", bytes_to_hex(&frame));
    Ok(CommandFrame(frame))
}

/// Payload helpers for the individual commands
pub mod payload {
    use crate::types::{ReportingMode, WorkState};

    const SET: u8 = 0x01;
    const QUERY: u8 = 0x00;

    pub fn set_mode(mode: ReportingMode) -> [u8; 2] {
        [SET, mode.to_byte()]
    }

    pub fn set_sleep(sleep: bool) -> [u8; 2] {
        let state = if sleep {
            WorkState::Sleeping
        } else {
            WorkState::Working
        };
        [SET, state.to_byte()]
    }

    pub fn set_working_period(period: u8) -> [u8; 2] {
        [SET, period]
    }

    /// Ten zero bytes, then the new ID low byte first
    pub fn set_device_id(id: u16) -> [u8; 12] {
        let mut payload = [0u8; 12];
        payload[10..].copy_from_slice(&id.to_le_bytes());
        payload
    }

    /// Read-back variant of mode, sleep and working-period commands
    pub fn query() -> [u8; 1] {
        [QUERY]
    }
}

/// Read one response frame, discarding everything before the next `0xAA`
///
/// Blocks for as long as the transport does; there is no cap on the number
/// of discarded bytes.
pub fn read_frame<T: SensorTransport>(transport: &mut T) -> Result<ResponseFrame, Sds011Error> {
    let mut byte = [0u8; 1];
    let mut skipped = 0usize;
    loop {
        read_exact(transport, &mut byte)?;
        if byte[0] == HEAD {
            break;
        }
        skipped += 1;
    }
    if skipped > 0 {
        debug!("Discarded {} bytes before frame start", skipped);
    }

    let mut frame = [0u8; RESPONSE_FRAME_LEN];
    frame[0] = HEAD;
    read_exact(transport, &mut frame[1..])?;

    debug!("< {}", bytes_to_hex(&frame));
    Ok(ResponseFrame(frame))
}

fn read_exact<T: SensorTransport>(transport: &mut T, buf: &mut [u8]) -> Result<(), Sds011Error> {
    transport.read(buf).map_err(|e| {
        error!("Read error: {:?}", e);
        Sds011Error::Transport(format!("{:?}", e))
    })
}

/// Decode a `0xC0` data frame
///
/// The caller checks [`ResponseFrame::is_measurement`] first; any other
/// subtype yields meaningless numbers.
pub fn decode_measurement(frame: &ResponseFrame) -> Measurement {
    Measurement {
        pm2_5: f32::from(frame.u16_at(2)) / 10.0,
        pm10: f32::from(frame.u16_at(4)) / 10.0,
        checksum: frame.checksum(),
        computed_checksum: frame.computed_checksum(),
        trailer: frame.trailer(),
    }
}

/// Decode the reply to a firmware query
///
/// Fields start one byte later than in a data frame (byte 2 carries the
/// echoed command) but the checksum window is still bytes 2..8.
pub fn decode_firmware(frame: &ResponseFrame) -> FirmwareVersion {
    let bytes = frame.as_bytes();
    FirmwareVersion {
        year: bytes[3],
        month: bytes[4],
        day: bytes[5],
        device_id: frame.u16_at(6),
        checksum: frame.checksum(),
        computed_checksum: frame.computed_checksum(),
        trailer: frame.trailer(),
    }
}

/// Decode a generic `0xC5` command reply
pub fn decode_reply(frame: &ResponseFrame) -> Reply {
    let bytes = frame.as_bytes();
    Reply {
        command: bytes[2],
        data: [bytes[3], bytes[4], bytes[5]],
        device_id: frame.u16_at(6),
        checksum: frame.checksum(),
        computed_checksum: frame.computed_checksum(),
        trailer: frame.trailer(),
    }
}
