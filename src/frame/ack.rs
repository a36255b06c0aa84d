use std::fmt::{Display, Formatter};

use crate::crc8::Checksum;
use crate::protocol::{END_MARKER, HEADER_SIZE, ID_NONE};

/// An acknowledgement: a trailer without payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ack {
    bytes: [u8; HEADER_SIZE],
}

impl Ack {
    /// Placeholder before the first ACK has been built.
    pub const EMPTY: Self = Self {
        bytes: [HEADER_SIZE as u8, ID_NONE, 0, END_MARKER],
    };

    const SIZE_INDEX: usize = 0;
    const ID_INDEX: usize = 1;
    const CRC_INDEX: usize = 2;
    const END_INDEX: usize = 3;

    /// Creates an ACK for the frame with the given ID.
    pub fn new(id: u8, checksum: &mut Checksum) -> Self {
        let mut bytes = [0; HEADER_SIZE];
        bytes[Self::SIZE_INDEX] = HEADER_SIZE as u8;
        bytes[Self::ID_INDEX] = id;
        checksum.reset();
        checksum.extend(bytes[..Self::CRC_INDEX].iter().copied());
        bytes[Self::CRC_INDEX] = checksum.value();
        bytes[Self::END_INDEX] = END_MARKER;
        Self { bytes }
    }

    /// Returns the ID of the acknowledged frame.
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.bytes[Self::ID_INDEX]
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Display for Ack {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ACK({})", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::Ack;
    use crate::crc8::{maxim_dow, Checksum};
    use crate::protocol::{END_MARKER, HEADER_SIZE};

    #[test]
    fn test_new() {
        let ack = Ack::new(1, &mut Checksum::new(maxim_dow));
        assert_eq!(ack.as_bytes(), &[0x04, 0x01, 0x65, 0xFF]);
        assert_eq!(ack.id(), 1);
        assert_eq!(ack.as_bytes()[Ack::CRC_INDEX], 0x65);
    }

    #[test]
    fn test_layout() {
        let ack = Ack::new(2, &mut Checksum::new(maxim_dow));
        assert_eq!(ack.as_bytes().len(), HEADER_SIZE);
        assert_eq!(ack.as_bytes()[Ack::SIZE_INDEX], HEADER_SIZE as u8);
        assert_eq!(ack.as_bytes()[Ack::END_INDEX], END_MARKER);
        assert_eq!(ack.as_bytes()[Ack::CRC_INDEX], 0x87);
    }

    #[test]
    fn test_crc_may_collide_with_end_marker() {
        // The checksum is sent verbatim, even if it looks like an end marker.
        let ack = Ack::new(94, &mut Checksum::new(maxim_dow));
        assert_eq!(ack.as_bytes()[Ack::CRC_INDEX], END_MARKER);
    }

    #[test]
    fn test_to_string() {
        assert_eq!(Ack::new(42, &mut Checksum::new(maxim_dow)).to_string(), "ACK(42)");
    }
}
