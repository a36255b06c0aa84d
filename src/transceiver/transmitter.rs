//! Transmit buffers and ARQ bookkeeping.

use std::num::NonZero;

use log::{debug, trace};

use crate::crc8::Checksum;
use crate::frame::{Ack, Data};
use crate::transport::Transport;
use crate::utils::HexSlice;

/// The buffer currently being drained to the transport.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Outgoing {
    Ack,
    Data,
}

/// Transmit state of a link.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transmitter {
    ack: Ack,
    ack_owed: Option<u8>,
    frame: Data,
    outgoing: Outgoing,
    cursor: usize,
    size: usize,
    timer: u16,
    timeout: NonZero<u16>,
}

impl Transmitter {
    /// Creates an idle transmitter with the given retransmission timeout in ticks.
    pub const fn new(timeout: NonZero<u16>) -> Self {
        Self {
            ack: Ack::EMPTY,
            ack_owed: None,
            frame: Data::new(),
            outgoing: Outgoing::Data,
            cursor: 0,
            size: 0,
            timer: 0,
            timeout,
        }
    }

    /// Returns the ID an ACK is owed for, if any.
    pub const fn ack_owed(&self) -> Option<u8> {
        self.ack_owed
    }

    /// Schedules an ACK for the given frame ID.
    pub fn owe_ack(&mut self, id: u8) {
        self.ack_owed.replace(id);
    }

    /// Returns the outbound data frame.
    pub const fn frame(&self) -> &Data {
        &self.frame
    }

    /// Returns the outbound data frame for building a new one.
    pub fn frame_mut(&mut self) -> &mut Data {
        &mut self.frame
    }

    /// Returns the remaining ticks until the outbound frame is retransmitted.
    pub const fn timer(&self) -> u16 {
        self.timer
    }

    /// Determines whether nothing is waiting to be sent.
    pub const fn is_idle(&self) -> bool {
        self.cursor >= self.size
    }

    /// Handles an ACK from the peer.
    ///
    /// Returns `true` if it acknowledges the outbound frame whose ACK is awaited.
    pub fn acknowledge(&mut self, id: u8) -> bool {
        if self.timer == 0 || self.frame.id() != id {
            return false;
        }

        self.timer = 0;
        self.frame.acknowledge();
        true
    }

    /// Sends pending bytes until the transport rejects one.
    ///
    /// Returns `true` if everything has been sent.
    pub fn flush<T>(&mut self, transport: &mut T) -> bool
    where
        T: Transport,
    {
        if self.is_idle() {
            return true;
        }

        let bytes = match self.outgoing {
            Outgoing::Ack => self.ack.as_bytes(),
            Outgoing::Data => self.frame.as_bytes(),
        };

        while let Some(&byte) = bytes.get(self.cursor) {
            if !transport.send_byte(byte) {
                trace!("Transport rejected byte {byte:#04X} at {}", self.cursor);
                return false;
            }

            self.cursor += 1;
        }

        match self.outgoing {
            Outgoing::Ack => {
                debug!("Sent {}", self.ack);
                self.ack_owed = None;
            }
            Outgoing::Data => {
                debug!("Sent {}", self.frame);
                self.timer = self.timeout.get();
            }
        }

        true
    }

    /// Counts the retransmission timer down by one tick.
    pub fn count_down(&mut self) {
        self.timer = self.timer.saturating_sub(1);
    }

    /// Builds the ACK for the given ID and queues it for sending.
    pub fn arm_ack(&mut self, id: u8, checksum: &mut Checksum) {
        self.ack = Ack::new(id, checksum);
        trace!("ACK bytes: {:#04X}", HexSlice::new(self.ack.as_bytes()));
        self.arm(Outgoing::Ack, self.ack.as_bytes().len());
    }

    /// Queues the outbound data frame for (re)sending.
    pub fn arm_data(&mut self) {
        self.arm(Outgoing::Data, self.frame.as_bytes().len());
        self.timer = 0;
    }

    fn arm(&mut self, outgoing: Outgoing, size: usize) {
        self.outgoing = outgoing;
        self.size = size;
        self.cursor = 0;
    }
}
