//! Byte transport underneath a link, e.g. a UART.

/// A non-blocking, byte-at-a-time duplex channel.
pub trait Transport {
    /// Returns the next received byte, if one is available.
    fn receive_byte(&mut self) -> Option<u8>;

    /// Tries to send one byte.
    ///
    /// Returns `true` if the byte was accepted. A rejected byte is offered again on a later tick.
    fn send_byte(&mut self, byte: u8) -> bool;
}

impl<T> Transport for &mut T
where
    T: Transport + ?Sized,
{
    fn receive_byte(&mut self) -> Option<u8> {
        (**self).receive_byte()
    }

    fn send_byte(&mut self, byte: u8) -> bool {
        (**self).send_byte(byte)
    }
}

/// A transport assembled from a receive and a send function.
///
/// See [`from_fn`].
#[derive(Clone, Debug)]
pub struct FromFn<G, P> {
    get: G,
    put: P,
}

/// Creates a transport from a receive function `get` and a send function `put`.
///
/// # Examples
///
/// ```
/// use std::collections::VecDeque;
/// use ssp::transport::{self, Transport};
///
/// let mut rx = VecDeque::from([0x42]);
/// let mut tx = Vec::new();
/// let mut uart = transport::from_fn(
///     || rx.pop_front(),
///     |byte| {
///         tx.push(byte);
///         true
///     },
/// );
///
/// assert_eq!(uart.receive_byte(), Some(0x42));
/// assert!(uart.send_byte(0xFF));
/// ```
pub const fn from_fn<G, P>(get: G, put: P) -> FromFn<G, P>
where
    G: FnMut() -> Option<u8>,
    P: FnMut(u8) -> bool,
{
    FromFn { get, put }
}

impl<G, P> Transport for FromFn<G, P>
where
    G: FnMut() -> Option<u8>,
    P: FnMut(u8) -> bool,
{
    fn receive_byte(&mut self) -> Option<u8> {
        (self.get)()
    }

    fn send_byte(&mut self, byte: u8) -> bool {
        (self.put)(byte)
    }
}
