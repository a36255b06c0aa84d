//! Frames as they are kept in the transmit buffers.

pub use ack::Ack;
pub use data::Data;

mod ack;
mod data;

/// Number of trailer bytes stored in front of the end marker: `SIZE`, `ID` and `CRC8`.
pub const TRAILER_FIELDS: usize = crate::protocol::HEADER_SIZE - 1;
