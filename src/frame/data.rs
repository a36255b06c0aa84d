use std::fmt::{Display, Formatter};
use std::iter::{from_fn, once};

use log::{debug, error, trace};

use crate::application::Application;
use crate::crc8::Checksum;
use crate::protocol::{Stuff, BUFFER_SIZE, END_MARKER, HEADER_SIZE, ID_NONE, INPUT_SIZE_MAX};
use crate::utils::{next_id, HexSlice};

/// Raw bytes of an outbound frame, trailer included.
pub type RawFrame = heapless::Vec<u8, BUFFER_SIZE>;

/// The outbound data frame.
///
/// Only one data frame exists per link. It is kept until the peer acknowledges it,
/// so that a retransmission repeats the very same bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Data {
    ack_received: bool,
    id: u8,
    bytes: RawFrame,
}

impl Data {
    /// Creates an empty, acknowledged frame record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ack_received: true,
            id: ID_NONE,
            bytes: RawFrame::new(),
        }
    }

    /// Returns the frame ID.
    ///
    /// This is `ID_NONE` until the first frame has been built.
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Determines whether the peer has acknowledged this frame.
    #[must_use]
    pub const fn is_acknowledged(&self) -> bool {
        self.ack_received
    }

    /// Marks the frame as acknowledged by the peer.
    pub fn acknowledge(&mut self) {
        self.ack_received = true;
    }

    /// Returns the wire representation.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Builds a new frame from the bytes the `source` has available.
    ///
    /// At most [`INPUT_SIZE_MAX`] bytes are taken from the source.
    /// Returns `false` and leaves the record untouched if the source has no data.
    pub fn build<A>(&mut self, source: &mut A, checksum: &mut Checksum) -> bool
    where
        A: Application,
    {
        let Some(first) = source.receive_byte() else {
            return false;
        };

        let id = next_id(self.id);
        let input = once(first)
            .chain(from_fn(|| source.receive_byte()))
            .take(INPUT_SIZE_MAX);

        match Self::encode(input, id, checksum) {
            Ok(bytes) => {
                self.bytes = bytes;
                self.id = id;
                self.ack_received = false;
                debug!("Built {self}");
                trace!("Frame bytes: {:#04X}", HexSlice::new(&self.bytes));
                true
            }
            Err(byte) => {
                error!("Frame buffer overflow: {byte:#04X}");
                false
            }
        }
    }

    /// Escapes the payload and appends the trailer.
    fn encode<T>(payload: T, id: u8, checksum: &mut Checksum) -> Result<RawFrame, u8>
    where
        T: Iterator<Item = u8>,
    {
        let mut bytes = RawFrame::new();
        checksum.reset();

        for byte in payload.stuff() {
            checksum.push(byte);
            bytes.push(byte)?;
        }

        let size = (bytes.len() + HEADER_SIZE) as u8;

        for byte in [size, id] {
            checksum.push(byte);
            bytes.push(byte)?;
        }

        // Neither the checksum nor the end marker are escaped.
        bytes.push(checksum.value())?;
        bytes.push(END_MARKER)?;
        Ok(bytes)
    }

    /// Returns the escaped payload.
    #[cfg(test)]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.bytes.len().saturating_sub(HEADER_SIZE)]
    }
}

impl Default for Data {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Data {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DATA({}, {} bytes)",
            self.id,
            self.bytes.len().saturating_sub(HEADER_SIZE)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::Data;
    use crate::application::Application;
    use crate::crc8::{maxim_dow, Checksum, CRC};
    use crate::protocol::{END_MARKER, HEADER_SIZE, ID_MAX, ID_MIN, INPUT_SIZE_MAX};

    #[derive(Debug, Default)]
    struct Source(VecDeque<u8>);

    impl Source {
        fn new(bytes: &[u8]) -> Self {
            Self(bytes.iter().copied().collect())
        }
    }

    impl Application for Source {
        fn receive_byte(&mut self) -> Option<u8> {
            self.0.pop_front()
        }

        fn send_byte(&mut self, _byte: u8) -> bool {
            false
        }
    }

    fn build(data: &mut Data, payload: &[u8]) -> bool {
        data.build(&mut Source::new(payload), &mut Checksum::new(maxim_dow))
    }

    #[test]
    fn test_new() {
        let data = Data::new();
        assert!(data.is_acknowledged());
        assert_eq!(data.id(), 0);
        assert!(data.as_bytes().is_empty());
    }

    #[test]
    fn test_build_reference_frame() {
        let mut data = Data::new();
        assert!(build(&mut data, &[0x11, 0xFF, 0xAA, 0x22]));
        assert_eq!(
            data.as_bytes(),
            &[0x11, 0xAA, 0x01, 0xAA, 0x00, 0x22, 0x0A, 0x01, 0x3F, 0xFF]
        );
        assert_eq!(data.id(), 1);
        assert!(!data.is_acknowledged());
    }

    #[test]
    fn test_build_without_input() {
        let mut data = Data::new();
        assert!(build(&mut data, &[0x01]));
        let before = data.clone();
        assert!(!build(&mut data, &[]));
        assert_eq!(data, before);
    }

    #[test]
    fn test_crc_covers_payload_size_and_id() {
        let mut data = Data::new();
        assert!(build(&mut data, b"hello, world"));
        let bytes = data.as_bytes();
        let crc_index = bytes.len() - 2;
        assert_eq!(bytes[crc_index], CRC.checksum(&bytes[..crc_index]));
        assert_eq!(bytes[crc_index + 1], END_MARKER);
        assert_eq!(usize::from(bytes[crc_index - 2]), data.payload().len() + HEADER_SIZE);
    }

    #[test]
    fn test_input_limit() {
        let mut source = Source::new(&[0x55; INPUT_SIZE_MAX + 5]);
        let mut data = Data::new();
        assert!(data.build(&mut source, &mut Checksum::new(maxim_dow)));
        assert_eq!(data.payload().len(), INPUT_SIZE_MAX);
        assert_eq!(source.0.len(), 5);
    }

    #[test]
    fn test_worst_case_fills_buffer() {
        let mut data = Data::new();
        assert!(build(&mut data, &[0xFF; INPUT_SIZE_MAX]));
        assert_eq!(data.as_bytes().len(), crate::protocol::BUFFER_SIZE);
        assert!(data.payload().chunks(2).all(|pair| pair == [0xAA, 0x01]));
    }

    #[test]
    fn test_ids_cycle() {
        let mut data = Data::new();

        for expected in (ID_MIN..=ID_MAX).chain(ID_MIN..=2) {
            assert!(build(&mut data, &[0x01]));
            assert_eq!(data.id(), expected);
            assert_eq!(data.as_bytes()[2], expected);
        }
    }

    #[test]
    fn test_to_string() {
        let mut data = Data::new();
        assert!(build(&mut data, &[0xFF, 0x01]));
        assert_eq!(data.to_string(), "DATA(1, 3 bytes)");
    }
}
