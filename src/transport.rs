/// Trait for SDS011 communication backends.
/// Implement this trait for different transports (UART, serial port, etc.)
///
/// Reads and writes block. A backend that enforces a timeout reports it
/// through `Self::Error`; the driver itself never gives up waiting.
pub trait SensorTransport {
    /// Error type for transport operations
    type Error: std::fmt::Debug;

    /// Write the whole buffer to the transport
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` completely, blocking until enough bytes have arrived
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Clear the input buffer
    fn clear_input(&mut self) -> Result<(), Self::Error>;
}

impl<T: SensorTransport + ?Sized> SensorTransport for &mut T {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(buf)
    }

    fn clear_input(&mut self) -> Result<(), Self::Error> {
        (**self).clear_input()
    }
}
