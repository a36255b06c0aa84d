//! Wire constants of the small serial protocol.
//!
//! A frame is sent payload first, followed by a fixed four byte trailer:
//!
//! ```text
//! [escaped payload ...] [SIZE] [ID] [CRC8] [END]
//! ```

use std::num::NonZero;

pub use stuffing::{resolve, Stuff, Stuffer, Unstuff, Unstuffer};

mod stuffing;

/// Terminates every frame on the wire.
pub const END_MARKER: u8 = 0xFF;

/// Introduces a two byte escape sequence.
pub const ESCAPE_MARKER: u8 = 0xAA;

/// Resolver following [`ESCAPE_MARKER`] for a literal [`ESCAPE_MARKER`].
pub const RESOLVE_ESCAPE: u8 = 0x00;

/// Resolver following [`ESCAPE_MARKER`] for a literal [`END_MARKER`].
pub const RESOLVE_END: u8 = 0x01;

/// Number of bytes an escaped payload byte occupies on the wire.
pub const ESCAPE_SIZE: usize = 2;

/// Reserved ID meaning "no frame".
pub const ID_NONE: u8 = 0x00;

/// Smallest frame ID.
pub const ID_MIN: u8 = 0x01;

/// Largest frame ID.
pub const ID_MAX: u8 = 0x80;

/// Size of the trailer including the end marker.
pub const HEADER_SIZE: usize = 4;

/// Size of the receive and transmit buffers.
pub const BUFFER_SIZE: usize = 64;

/// Maximum size of an escaped payload.
pub const PAYLOAD_SIZE_MAX: usize = BUFFER_SIZE - HEADER_SIZE;

/// Maximum number of application bytes per frame.
///
/// In the worst case every input byte needs to be escaped.
pub const INPUT_SIZE_MAX: usize = PAYLOAD_SIZE_MAX / ESCAPE_SIZE;

/// Default number of ticks to wait for an ACK before retransmitting a frame.
pub const TX_TIMEOUT: NonZero<u16> = match NonZero::new(5000) {
    Some(timeout) => timeout,
    None => panic!("timeout must be non-zero"),
};

/// Determines whether a payload byte must be escaped on the wire.
#[must_use]
pub const fn is_reserved(byte: u8) -> bool {
    byte == END_MARKER || byte == ESCAPE_MARKER
}
