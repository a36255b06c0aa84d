use std::num::NonZero;

use crate::application::Application;
use crate::crc8::{Checksum, Crc8};
use crate::error::{Capability, Error};
use crate::protocol::TX_TIMEOUT;
use crate::transceiver::receiver::Receiver;
use crate::transceiver::transmitter::Transmitter;
use crate::transceiver::Transceiver;
use crate::transport::Transport;

/// Collects the capabilities of a [`Transceiver`].
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
/// use ssp::{application, crc8, transport, Builder, Capability, Error};
///
/// type Uart = transport::FromFn<fn() -> Option<u8>, fn(u8) -> bool>;
///
/// let incomplete = Builder::<Uart, _>::new()
///     .crc8(crc8::maxim_dow)
///     .application(application::from_fn(|| None, |_| true))
///     .build();
/// assert_eq!(
///     incomplete.err(),
///     Some(Error::MissingCapability(Capability::Transport))
/// );
///
/// let transceiver = Builder::new()
///     .crc8(crc8::maxim_dow)
///     .transport(transport::from_fn(|| None, |_| true))
///     .application(application::from_fn(|| None, |_| true))
///     .retransmit_timeout(NonZero::new(100).expect("timeout is non-zero"))
///     .build();
/// assert!(transceiver.is_ok());
/// ```
#[derive(Debug)]
pub struct Builder<T, A> {
    crc8: Option<Crc8>,
    transport: Option<T>,
    application: Option<A>,
    timeout: NonZero<u16>,
}

impl<T, A> Builder<T, A> {
    /// Creates a builder without any capabilities.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            crc8: None,
            transport: None,
            application: None,
            timeout: TX_TIMEOUT,
        }
    }

    /// Sets the CRC-8 function.
    #[must_use]
    pub fn crc8(mut self, crc8: Crc8) -> Self {
        self.crc8.replace(crc8);
        self
    }

    /// Sets the byte transport.
    #[must_use]
    pub fn transport(mut self, transport: T) -> Self {
        self.transport.replace(transport);
        self
    }

    /// Sets the payload source and sink.
    #[must_use]
    pub fn application(mut self, application: A) -> Self {
        self.application.replace(application);
        self
    }

    /// Sets the number of ticks to wait for an ACK before a frame is sent again.
    #[must_use]
    pub fn retransmit_timeout(mut self, ticks: NonZero<u16>) -> Self {
        self.timeout = ticks;
        self
    }

    /// Creates the transceiver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCapability`] if any capability has not been set.
    pub fn build(self) -> Result<Transceiver<T, A>, Error>
    where
        T: Transport,
        A: Application,
    {
        let crc8 = self.crc8.ok_or(Error::MissingCapability(Capability::Crc8))?;
        let transport = self
            .transport
            .ok_or(Error::MissingCapability(Capability::Transport))?;
        let application = self
            .application
            .ok_or(Error::MissingCapability(Capability::Application))?;

        Ok(Transceiver {
            checksum: Checksum::new(crc8),
            transport,
            application,
            receiver: Receiver::new(),
            transmitter: Transmitter::new(self.timeout),
        })
    }
}

impl<T, A> Default for Builder<T, A> {
    fn default() -> Self {
        Self::new()
    }
}
