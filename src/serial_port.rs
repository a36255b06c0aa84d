use std::borrow::Cow;
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use log::warn;
use serialport::SerialPort;

use crate::transport::Transport;
use crate::BaudRate;

#[cfg(windows)]
pub use serialport::COMPort as SerialPortImpl;

#[cfg(unix)]
pub use serialport::TTYPort as SerialPortImpl;

const IO_TIMEOUT: Duration = Duration::from_millis(1);

/// A [`Transport`] over a serial port.
///
/// Reception polls the input buffer and never blocks.
/// I/O errors are logged and treated as "no byte available" or "byte not accepted".
#[derive(Debug)]
pub struct Serial<T> {
    port: T,
}

impl<T> Serial<T> {
    /// Wraps the given serial port.
    pub const fn new(port: T) -> Self {
        Self { port }
    }

    /// Returns the underlying serial port.
    pub fn into_inner(self) -> T {
        self.port
    }
}

impl<T> Transport for Serial<T>
where
    T: SerialPort,
{
    fn receive_byte(&mut self) -> Option<u8> {
        match self.port.bytes_to_read() {
            Ok(0) => None,
            Ok(_) => {
                let mut buffer = [0];
                self.port
                    .read_exact(&mut buffer)
                    .inspect_err(|error| warn!("Failed to read from serial port: {error}"))
                    .ok()
                    .map(|()| buffer[0])
            }
            Err(error) => {
                warn!("Failed to poll serial port: {error}");
                None
            }
        }
    }

    fn send_byte(&mut self, byte: u8) -> bool {
        match self.port.write(&[byte]) {
            Ok(written) => written == 1,
            Err(error) if matches!(error.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                false
            }
            Err(error) => {
                warn!("Failed to write to serial port: {error}");
                false
            }
        }
    }
}

/// Opens a serial port depending on the local operating system.
///
/// # Errors
/// For errors please refer to [`SerialPortImpl::open()`] and [`serialport::new()`]
pub fn open<'a>(
    path: impl Into<Cow<'a, str>>,
    baud_rate: BaudRate,
) -> serialport::Result<Serial<SerialPortImpl>> {
    SerialPortImpl::open(&serialport::new(path, baud_rate.into()).timeout(IO_TIMEOUT))
        .map(Serial::new)
}
