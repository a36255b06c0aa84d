//! Small Serial Protocol (`SSP`)
//!
//! A stop-and-wait framing protocol for byte-serial links such as UARTs.
//!
//! Payloads are split into frames of up to 30 bytes, byte-stuffed, protected by a
//! CRC-8 and terminated by an end marker. Each data frame carries a sequence ID and
//! is retransmitted until the peer acknowledges it with an ACK frame.
//!
//! The [`Transceiver`] is driven by periodic calls to [`Transceiver::tick()`] and talks
//! to the outside world exclusively through its [`Transport`] and [`Application`].

pub use application::Application;
pub use baud_rate::BaudRate;
pub use crc8::Crc8;
pub use error::{Capability, Error};
pub use serial_port::{open, Serial, SerialPortImpl};
pub use transceiver::{Builder, Transceiver};
pub use transport::Transport;
pub use utils::{next_id, HexSlice};

pub mod application;
mod baud_rate;
pub mod crc8;
mod error;
mod frame;
pub mod protocol;
mod serial_port;
mod transceiver;
pub mod transport;
mod utils;
