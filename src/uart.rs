//! UART transport for ESP32 using esp-idf-svc

use crate::transport::SensorTransport;
use esp_idf_svc::hal::delay::TickType;
use esp_idf_svc::hal::gpio::{self, InputPin, OutputPin};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartDriver};
use esp_idf_svc::sys::EspError;
use std::time::Duration;

#[derive(Debug)]
pub enum UartError {
    Esp(EspError),
    /// No byte arrived within the read timeout
    Timeout,
}

impl From<EspError> for UartError {
    fn from(e: EspError) -> Self {
        UartError::Esp(e)
    }
}

pub struct UartTransport<'a> {
    uart: UartDriver<'a>,
    read_timeout: Duration,
}

impl<'a> UartTransport<'a> {
    /// Configure `uart` at 9600 baud, the only rate the sensor speaks
    pub fn new(
        uart: impl Peripheral<P = impl uart::Uart> + 'a,
        tx: impl Peripheral<P = impl OutputPin> + 'a,
        rx: impl Peripheral<P = impl InputPin> + 'a,
        read_timeout: Duration,
    ) -> Result<Self, EspError> {
        let config = uart::config::Config::default().baudrate(9600u32.into());
        let uart = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<gpio::Gpio0>::None,
            Option::<gpio::Gpio0>::None,
            &config,
        )?;
        uart.clear_rx()?;

        Ok(Self { uart, read_timeout })
    }
}

impl SensorTransport for UartTransport<'_> {
    type Error = UartError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut sent = 0;
        while sent < data.len() {
            sent += self.uart.write(&data[sent..])?;
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        let ticks = TickType::from(self.read_timeout).ticks();
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.uart.read(&mut buf[filled..], ticks)?;
            if n == 0 {
                return Err(UartError::Timeout);
            }
            filled += n;
        }
        Ok(())
    }

    fn clear_input(&mut self) -> Result<(), Self::Error> {
        Ok(self.uart.clear_rx()?)
    }
}
