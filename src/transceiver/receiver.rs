//! Reception state machine and receive buffer.

use log::{trace, warn};

use crate::application::Application;
use crate::crc8::Checksum;
use crate::frame::TRAILER_FIELDS;
use crate::protocol::{
    resolve, BUFFER_SIZE, END_MARKER, ESCAPE_MARKER, HEADER_SIZE, ID_NONE, PAYLOAD_SIZE_MAX,
};
use crate::transport::Transport;
use crate::utils::Ring;

/// Classification of one reception step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reception {
    /// No frame has been completed.
    Nothing,
    /// A valid frame without payload.
    Ack,
    /// A valid frame with payload.
    Frame,
    /// A frame with an invalid trailer or checksum.
    Broken,
}

/// Receive state of a link.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receiver {
    buffer: Ring<BUFFER_SIZE>,
    frame_size: u8,
    frame_id: u8,
    last_relayed_id: u8,
    pending: usize,
    held: bool,
}

impl Receiver {
    /// Creates an empty receiver.
    pub const fn new() -> Self {
        Self {
            buffer: Ring::new(),
            frame_size: 0,
            frame_id: ID_NONE,
            last_relayed_id: ID_NONE,
            pending: 0,
            held: false,
        }
    }

    /// Returns the ID of the most recently delimited frame.
    pub const fn frame_id(&self) -> u8 {
        self.frame_id
    }

    /// Returns the ID of the last frame handed to the application.
    pub const fn last_relayed_id(&self) -> u8 {
        self.last_relayed_id
    }

    /// Determines whether a valid frame waits for an owed ACK to be sent.
    pub const fn is_held(&self) -> bool {
        self.held
    }

    /// Consumes at most one byte from the transport.
    pub fn receive<T>(&mut self, transport: &mut T, checksum: &mut Checksum) -> Reception
    where
        T: Transport,
    {
        match transport.receive_byte() {
            None => Reception::Nothing,
            Some(END_MARKER) => self.delimit(checksum),
            Some(byte) => {
                self.buffer.push(byte);
                Reception::Nothing
            }
        }
    }

    /// Validates the frame that ends at the cursor.
    ///
    /// On success the cursor is moved back to the start of the payload.
    fn delimit(&mut self, checksum: &mut Checksum) -> Reception {
        let crc = self.buffer.peek_back(1);
        let id = self.buffer.peek_back(2);
        let size = self.buffer.peek_back(3);

        let Some(payload_size) = usize::from(size)
            .checked_sub(HEADER_SIZE)
            .filter(|&payload_size| payload_size <= PAYLOAD_SIZE_MAX)
        else {
            warn!("Invalid frame size: {size}");
            return Reception::Broken;
        };

        let offset = TRAILER_FIELDS + payload_size;
        checksum.reset();
        checksum.extend(self.buffer.window(offset, payload_size));
        checksum.push(size);
        checksum.push(id);

        if checksum.value() != crc {
            warn!(
                "CRC mismatch of frame #{id}: expected {crc:#04X}, calculated {:#04X}",
                checksum.value()
            );
            return Reception::Broken;
        }

        self.buffer.rewind(offset);
        self.frame_id = id;
        self.frame_size = size;
        trace!(
            "Frame #{id} with {payload_size} payload bytes at {}",
            self.buffer.cursor()
        );

        if payload_size == 0 {
            Reception::Ack
        } else {
            Reception::Frame
        }
    }

    /// Keeps the delimited frame buffered until it can be acknowledged.
    pub fn hold(&mut self) {
        self.held = true;
    }

    /// Releases a held frame for processing.
    pub fn release(&mut self) {
        self.held = false;
    }

    /// Accepts the delimited frame for relaying.
    ///
    /// Returns `false` if the frame has already been relayed before, in which case it is discarded.
    pub fn accept(&mut self) -> bool {
        if self.frame_id == self.last_relayed_id {
            self.reset();
            return false;
        }

        self.last_relayed_id = self.frame_id;
        self.pending = usize::from(self.frame_size) - HEADER_SIZE;
        true
    }

    /// Hands the payload of an accepted frame to the application.
    ///
    /// Returns `true` once nothing is left to relay.
    pub fn relay<A>(&mut self, application: &mut A) -> bool
    where
        A: Application,
    {
        if self.pending == 0 {
            return true;
        }

        while self.pending > 0 {
            let (byte, width) = self.next_payload_byte();

            if !application.send_byte(byte) {
                return false;
            }

            self.buffer.advance(width);
            self.pending -= width;
        }

        trace!("Relayed frame #{}", self.last_relayed_id);
        self.reset();
        true
    }

    /// Returns the next unescaped payload byte and the number of buffered bytes it occupies.
    fn next_payload_byte(&self) -> (u8, usize) {
        let byte = self.buffer.peek(0);

        if byte == ESCAPE_MARKER && self.pending > 1 {
            if let Some(byte) = resolve(self.buffer.peek(1)) {
                return (byte, 2);
            }
        }

        (byte, 1)
    }

    /// Discards all buffered bytes.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.frame_size = 0;
        self.pending = 0;
        self.held = false;
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::{Receiver, Reception};
    use crate::application::Application;
    use crate::crc8::{maxim_dow, Checksum};
    use crate::transport::Transport;

    const FRAME: [u8; 10] = [0x11, 0xAA, 0x01, 0xAA, 0x00, 0x22, 0x0A, 0x01, 0x3F, 0xFF];
    const ACK: [u8; 4] = [0x04, 0x01, 0x65, 0xFF];

    #[derive(Debug, Default)]
    struct Wire(VecDeque<u8>);

    impl Transport for Wire {
        fn receive_byte(&mut self) -> Option<u8> {
            self.0.pop_front()
        }

        fn send_byte(&mut self, byte: u8) -> bool {
            self.0.push_back(byte);
            true
        }
    }

    #[derive(Debug, Default)]
    struct Sink {
        bytes: Vec<u8>,
        capacity: usize,
    }

    impl Application for Sink {
        fn receive_byte(&mut self) -> Option<u8> {
            None
        }

        fn send_byte(&mut self, byte: u8) -> bool {
            if self.bytes.len() < self.capacity {
                self.bytes.push(byte);
                true
            } else {
                false
            }
        }
    }

    /// Feeds bytes until a reception other than `Nothing` occurs.
    fn feed(receiver: &mut Receiver, bytes: &[u8]) -> Vec<Reception> {
        let mut wire = Wire(bytes.iter().copied().collect());
        let mut checksum = Checksum::new(maxim_dow);
        let mut receptions = Vec::new();

        while !wire.0.is_empty() {
            match receiver.receive(&mut wire, &mut checksum) {
                Reception::Nothing => {}
                reception => receptions.push(reception),
            }
        }

        receptions
    }

    #[test]
    fn test_nothing_available() {
        let mut receiver = Receiver::new();
        let reception = receiver.receive(&mut Wire::default(), &mut Checksum::new(maxim_dow));
        assert_eq!(reception, Reception::Nothing);
    }

    #[test]
    fn test_frame() {
        let mut receiver = Receiver::new();
        assert_eq!(feed(&mut receiver, &FRAME), [Reception::Frame]);
        assert_eq!(receiver.frame_id(), 1);
        assert_eq!(receiver.buffer.cursor(), 0);
    }

    #[test]
    fn test_ack() {
        let mut receiver = Receiver::new();
        assert_eq!(feed(&mut receiver, &ACK), [Reception::Ack]);
        assert_eq!(receiver.frame_id(), 1);
    }

    #[test]
    fn test_corrupted_payload() {
        let mut frame = FRAME;
        frame[0] ^= 0x01;
        assert_eq!(feed(&mut Receiver::new(), &frame), [Reception::Broken]);
    }

    #[test]
    fn test_corrupted_id() {
        let mut frame = FRAME;
        frame[7] = 0x02;
        assert_eq!(feed(&mut Receiver::new(), &frame), [Reception::Broken]);
    }

    #[test]
    fn test_size_below_trailer() {
        assert_eq!(feed(&mut Receiver::new(), &[0x02, 0x01, 0x00, 0xFF]), [Reception::Broken]);
    }

    #[test]
    fn test_size_above_capacity() {
        assert_eq!(feed(&mut Receiver::new(), &[0x41, 0x01, 0x00, 0xFF]), [Reception::Broken]);
    }

    #[test]
    fn test_frame_across_buffer_boundary() {
        let mut receiver = Receiver::new();
        // Leading noise without an end marker moves the cursor close to the end of the ring.
        let mut bytes = vec![0x55; 60];
        bytes.extend_from_slice(&FRAME);
        assert_eq!(feed(&mut receiver, &bytes), [Reception::Frame]);
        assert_eq!(receiver.buffer.cursor(), 60);

        assert!(receiver.accept());
        let mut sink = Sink {
            capacity: usize::MAX,
            ..Sink::default()
        };
        assert!(receiver.relay(&mut sink));
        assert_eq!(sink.bytes, [0x11, 0xFF, 0xAA, 0x22]);
    }

    #[test]
    fn test_relay_resumes_after_rejection() {
        let mut receiver = Receiver::new();
        assert_eq!(feed(&mut receiver, &FRAME), [Reception::Frame]);
        assert!(receiver.accept());

        let mut sink = Sink {
            capacity: 2,
            ..Sink::default()
        };
        assert!(!receiver.relay(&mut sink));
        assert_eq!(sink.bytes, [0x11, 0xFF]);

        sink.capacity = usize::MAX;
        assert!(receiver.relay(&mut sink));
        assert_eq!(sink.bytes, [0x11, 0xFF, 0xAA, 0x22]);
        assert_eq!(receiver.buffer.cursor(), 0);
    }

    #[test]
    fn test_duplicate_is_not_accepted() {
        let mut receiver = Receiver::new();
        assert_eq!(feed(&mut receiver, &FRAME), [Reception::Frame]);
        assert!(receiver.accept());
        assert!(receiver.relay(&mut Sink {
            capacity: usize::MAX,
            ..Sink::default()
        }));

        assert_eq!(feed(&mut receiver, &FRAME), [Reception::Frame]);
        assert!(!receiver.accept());
        assert_eq!(receiver.last_relayed_id(), 1);

        let mut sink = Sink::default();
        assert!(receiver.relay(&mut sink));
        assert!(sink.bytes.is_empty());
    }
}
