use log::{debug, warn};

use crate::frame::{
    self, payload, CommandFrame, ResponseFrame, CMD_DEVICE_ID, CMD_FIRMWARE, CMD_MODE,
    CMD_QUERY_DATA, CMD_SLEEP, CMD_WORKING_PERIOD,
};
use crate::transport::SensorTransport;
use crate::types::{FirmwareVersion, Measurement, ReportingMode, Sds011Error, WorkState};

/// Longest working period the sensor accepts, in minutes
pub const MAX_WORKING_PERIOD: u8 = 30;

/// SDS011 sensor bound to a transport
///
/// Every method writes one command and reads one response before returning,
/// so requests are never pipelined.
pub struct Sds011<T: SensorTransport> {
    transport: T,
}

impl<T: SensorTransport> Sds011<T> {
    /// Create a new sensor instance with the given transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Give the transport back
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Switch between active reporting and query mode
    pub fn set_mode(&mut self, mode: ReportingMode) -> Result<(), Sds011Error> {
        debug!("Setting reporting mode to {:?}", mode);
        self.exec_set(CMD_MODE, &payload::set_mode(mode))
    }

    /// Read back the reporting mode
    pub fn get_mode(&mut self) -> Result<ReportingMode, Sds011Error> {
        let value = self.exec_get(CMD_MODE)?;
        ReportingMode::from_byte(value)
    }

    /// Query one measurement
    ///
    /// Returns `Ok(None)` when the sensor answers with something other than
    /// a data frame.
    pub fn query_data(&mut self) -> Result<Option<Measurement>, Sds011Error> {
        let response = self.exec(&frame::encode(CMD_QUERY_DATA, &[])?)?;
        if !response.is_measurement() {
            debug!(
                "Query data answered with subtype 0x{:02X}, no measurement",
                response.subtype()
            );
            return Ok(None);
        }
        let measurement = frame::decode_measurement(&response).verify()?;
        debug!("{}", measurement);
        Ok(Some(measurement))
    }

    /// Put the sensor to sleep (`true`) or wake it up (`false`)
    pub fn set_sleep(&mut self, sleep: bool) -> Result<(), Sds011Error> {
        debug!("Setting sleep to {}", sleep);
        self.exec_set(CMD_SLEEP, &payload::set_sleep(sleep))
    }

    /// Read back whether the sensor is sleeping
    pub fn get_work_state(&mut self) -> Result<WorkState, Sds011Error> {
        let value = self.exec_get(CMD_SLEEP)?;
        WorkState::from_byte(value)
    }

    /// Set the working period in minutes (0 = continuous, max 30)
    pub fn set_working_period(&mut self, period: u8) -> Result<(), Sds011Error> {
        if period > MAX_WORKING_PERIOD {
            return Err(Sds011Error::InvalidArgument(format!(
                "Working period too long: {} min (maximum: {} min)",
                period, MAX_WORKING_PERIOD
            )));
        }
        debug!("Setting working period to {} min", period);
        self.exec_set(CMD_WORKING_PERIOD, &payload::set_working_period(period))
    }

    /// Read back the working period in minutes
    pub fn get_working_period(&mut self) -> Result<u8, Sds011Error> {
        self.exec_get(CMD_WORKING_PERIOD)
    }

    /// Get firmware build date and device ID
    ///
    /// The response subtype is not checked; only checksum and trailer are.
    pub fn firmware_version(&mut self) -> Result<FirmwareVersion, Sds011Error> {
        let response = self.exec(&frame::encode(CMD_FIRMWARE, &[])?)?;
        let version = frame::decode_firmware(&response).verify()?;
        debug!("{}", version);
        Ok(version)
    }

    /// Assign a new device ID
    pub fn set_device_id(&mut self, id: u16) -> Result<(), Sds011Error> {
        debug!("Setting device ID to {:#06x}", id);
        self.exec_set(CMD_DEVICE_ID, &payload::set_device_id(id))
    }

    /// Send a set command; the reply is logged, not enforced
    fn exec_set(&mut self, command: u8, params: &[u8]) -> Result<(), Sds011Error> {
        let response = self.exec(&frame::encode(command, params)?)?;
        if !response.is_reply() || response.as_bytes()[2] != command {
            warn!(
                "Unexpected reply to command 0x{:02X}: {:02X?}",
                command,
                response.as_bytes()
            );
        }
        Ok(())
    }

    /// Send a query command and return the value byte of its reply
    fn exec_get(&mut self, command: u8) -> Result<u8, Sds011Error> {
        let response = self.exec(&frame::encode(command, &payload::query())?)?;
        if !response.is_reply() {
            return Err(Sds011Error::InvalidResponse(format!(
                "Expected reply to command 0x{:02X}, got subtype 0x{:02X}",
                command,
                response.subtype()
            )));
        }
        let reply = frame::decode_reply(&response).verify()?;
        if reply.command != command {
            return Err(Sds011Error::InvalidResponse(format!(
                "Reply is for command 0x{:02X}, expected 0x{:02X}",
                reply.command, command
            )));
        }
        Ok(reply.data[1])
    }

    fn exec(&mut self, cmd: &CommandFrame) -> Result<ResponseFrame, Sds011Error> {
        self.transport
            .clear_input()
            .map_err(|e| Sds011Error::Transport(format!("{:?}", e)))?;
        self.transport
            .write(cmd.as_bytes())
            .map_err(|e| Sds011Error::Transport(format!("{:?}", e)))?;
        frame::read_frame(&mut self.transport)
    }
}
