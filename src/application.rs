//! Application side of a link: the payload source and sink.

/// Source and sink of payload bytes.
///
/// Payloads are exchanged byte by byte. The link pulls outbound bytes from
/// [`receive_byte`](Self::receive_byte) and hands the unescaped bytes of each
/// received frame to [`send_byte`](Self::send_byte), in order and exactly once.
pub trait Application {
    /// Returns the next payload byte to transmit, if there is one.
    fn receive_byte(&mut self) -> Option<u8>;

    /// Tries to deliver one received payload byte.
    ///
    /// Returns `true` if the byte was accepted. A rejected byte is offered again on a later tick.
    fn send_byte(&mut self, byte: u8) -> bool;
}

impl<T> Application for &mut T
where
    T: Application + ?Sized,
{
    fn receive_byte(&mut self) -> Option<u8> {
        (**self).receive_byte()
    }

    fn send_byte(&mut self, byte: u8) -> bool {
        (**self).send_byte(byte)
    }
}

/// An application assembled from a source and a sink function.
///
/// See [`from_fn`].
#[derive(Clone, Debug)]
pub struct FromFn<G, P> {
    source: G,
    sink: P,
}

/// Creates an application from a payload `source` and a payload `sink`.
pub const fn from_fn<G, P>(source: G, sink: P) -> FromFn<G, P>
where
    G: FnMut() -> Option<u8>,
    P: FnMut(u8) -> bool,
{
    FromFn { source, sink }
}

impl<G, P> Application for FromFn<G, P>
where
    G: FnMut() -> Option<u8>,
    P: FnMut(u8) -> bool,
{
    fn receive_byte(&mut self) -> Option<u8> {
        (self.source)()
    }

    fn send_byte(&mut self, byte: u8) -> bool {
        (self.sink)(byte)
    }
}
