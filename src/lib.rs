//! Nova Fitness SDS011 particulate matter sensor driver with support for
//! multiple transport backends.
//!
//! The [`frame`] module holds the wire codec: command frame encoding,
//! resynchronizing response reads and typed response decoders. [`Sds011`]
//! sequences those into one method per device command.
//!
//! # Features
//!
//! - `uart-esp32` - UART transport for ESP32 using esp-idf-svc
//! - `serial` - Serial port transport for desktop using serialport crate
//!
//! # Example
//!
//! ```ignore
//! use sds011::{ReportingMode, Sds011, SerialTransport};
//!
//! let transport = SerialTransport::open("/dev/ttyUSB0")?;
//! let mut sensor = Sds011::new(transport);
//!
//! sensor.set_sleep(false)?;
//! sensor.set_mode(ReportingMode::Query)?;
//! if let Some(m) = sensor.query_data()? {
//!     println!("PM2.5: {} PM10: {}", m.pm2_5, m.pm10);
//! }
//! ```

pub mod frame;
mod sensor;
mod transport;
mod types;

#[cfg(feature = "uart-esp32")]
mod uart;

#[cfg(feature = "serial")]
mod serial;

// Re-exports
pub use frame::{
    decode_firmware, decode_measurement, decode_reply, encode, read_frame, CommandFrame,
    ResponseFrame,
};
pub use sensor::{Sds011, MAX_WORKING_PERIOD};
pub use transport::SensorTransport;
pub use types::{FirmwareVersion, Measurement, Reply, ReportingMode, Sds011Error, WorkState};

#[cfg(feature = "uart-esp32")]
pub use uart::{UartError, UartTransport};

#[cfg(feature = "serial")]
pub use serial::{SerialConfig, SerialTransport, DEFAULT_BAUD_RATE};
