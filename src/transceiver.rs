//! The protocol engine.

pub use builder::Builder;

use log::trace;

use crate::application::Application;
use crate::crc8::{Checksum, Crc8};
use crate::protocol::{ID_NONE, TX_TIMEOUT};
use crate::transport::Transport;
use receiver::Receiver;
use transmitter::Transmitter;

mod builder;
mod receiver;
mod relay;
mod transmission;
mod transmitter;


/// Small serial protocol transceiver.
///
/// The transceiver owns all state of one link together with its capabilities:
/// the CRC-8 function, the byte [`Transport`] and the [`Application`] that provides
/// and consumes payloads.
///
/// It has no thread or timer of its own. Instead, [`tick()`](Self::tick) is called
/// periodically and performs one non-blocking step of the protocol.
/// The retransmission timeout is counted in ticks, so the tick period should be steady.
///
/// # Usage
///
/// ```
/// use std::collections::VecDeque;
/// use ssp::{application, crc8, transport, Transceiver};
///
/// let mut wire = Vec::new();
/// let mut outbox = VecDeque::from(*b"hi");
/// let mut inbox = Vec::new();
/// let mut transceiver = Transceiver::new(
///     crc8::maxim_dow,
///     transport::from_fn(
///         || None,
///         |byte| {
///             wire.push(byte);
///             true
///         },
///     ),
///     application::from_fn(
///         || outbox.pop_front(),
///         |byte| {
///             inbox.push(byte);
///             true
///         },
///     ),
/// );
///
/// transceiver.tick(); // Builds the frame.
/// transceiver.tick(); // Sends the frame.
/// drop(transceiver);
/// assert_eq!(wire, [b'h', b'i', 0x06, 0x01, 0x53, 0xFF]);
/// ```
#[derive(Debug)]
pub struct Transceiver<T, A> {
    checksum: Checksum,
    transport: T,
    application: A,
    receiver: Receiver,
    transmitter: Transmitter,
}

impl<T, A> Transceiver<T, A>
where
    T: Transport,
    A: Application,
{
    /// Creates a new transceiver with the default retransmission timeout.
    ///
    /// Use a [`Builder`] to configure the timeout.
    #[must_use]
    pub const fn new(crc8: Crc8, transport: T, application: A) -> Self {
        Self {
            checksum: Checksum::new(crc8),
            transport,
            application,
            receiver: Receiver::new(),
            transmitter: Transmitter::new(TX_TIMEOUT),
        }
    }

    /// Performs one step of the protocol.
    ///
    /// A step relays pending payload bytes to the application, processes at most one
    /// byte from the transport and then drains or prepares the outbound frame.
    /// No new bytes are taken from the transport while a received payload is being relayed.
    pub fn tick(&mut self) {
        if self.receiver.relay(&mut self.application) {
            let reception = self.receive();
            self.handle(reception);
        } else {
            trace!("Application is busy, deferring reception.");
        }

        self.transmit();
    }

    /// Determines whether the last sent data frame still waits for its ACK.
    #[must_use]
    pub const fn is_awaiting_ack(&self) -> bool {
        !self.transmitter.frame().is_acknowledged()
    }

    /// Returns the ID of the frame an ACK is owed for, if any.
    #[must_use]
    pub const fn ack_pending(&self) -> Option<u8> {
        self.transmitter.ack_owed()
    }

    /// Returns the ID of the most recently built data frame, if any.
    #[must_use]
    pub const fn frame_id(&self) -> Option<u8> {
        match self.transmitter.frame().id() {
            ID_NONE => None,
            id => Some(id),
        }
    }

    /// Returns the ID of the last frame relayed to the application, if any.
    #[must_use]
    pub const fn last_relayed_id(&self) -> Option<u8> {
        match self.receiver.last_relayed_id() {
            ID_NONE => None,
            id => Some(id),
        }
    }

    /// Returns a reference to the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Returns a reference to the application.
    pub const fn application(&self) -> &A {
        &self.application
    }

    /// Returns a mutable reference to the application.
    pub fn application_mut(&mut self) -> &mut A {
        &mut self.application
    }

    /// Dissolves the transceiver into its transport and application.
    pub fn into_parts(self) -> (T, A) {
        (self.transport, self.application)
    }
}
