//! Serial port transport for desktop using serialport crate

use crate::transport::SensorTransport;
use std::io::{Read, Write};
use std::time::Duration;

/// Baud rate the SDS011 ships with; it cannot be changed.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Port settings for [`SerialTransport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    pub baud_rate: u32,
    /// Per-read timeout; a read that waits longer fails with `TimedOut`
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: Duration::from_secs(2),
        }
    }
}

pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Open `port_name` at 9600 baud with the default timeout
    pub fn open(port_name: &str) -> Result<Self, serialport::Error> {
        Self::with_config(port_name, SerialConfig::default())
    }

    pub fn with_config(port_name: &str, config: SerialConfig) -> Result<Self, serialport::Error> {
        let port = serialport::new(port_name, config.baud_rate)
            .timeout(config.timeout)
            .open()?;
        port.clear(serialport::ClearBuffer::Input)?;
        log::debug!("Opened {} at {} baud", port_name, config.baud_rate);

        Ok(Self { port })
    }
}

impl SensorTransport for SerialTransport {
    type Error = std::io::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(data)?;
        self.port.flush()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.port.read_exact(buf)
    }

    fn clear_input(&mut self) -> Result<(), Self::Error> {
        self.port
            .clear(serialport::ClearBuffer::Input)
            .map_err(std::io::Error::other)
    }
}
