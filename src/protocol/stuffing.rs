use crate::protocol::{END_MARKER, ESCAPE_MARKER, RESOLVE_END, RESOLVE_ESCAPE};

/// Returns the raw byte an escape marker followed by `resolver` stands for.
#[must_use]
pub const fn resolve(resolver: u8) -> Option<u8> {
    match resolver {
        RESOLVE_ESCAPE => Some(ESCAPE_MARKER),
        RESOLVE_END => Some(END_MARKER),
        _ => None,
    }
}

/// Trait to allow stuffing of byte iterators.
pub trait Stuff: Iterator<Item = u8> + Sized {
    /// Replaces reserved bytes with their escape sequences.
    fn stuff(self) -> Stuffer<Self> {
        Stuffer::new(self)
    }
}

impl<T> Stuff for T where T: Iterator<Item = u8> {}

/// Iterator yielding the escaped form of a payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stuffer<T>
where
    T: Iterator<Item = u8>,
{
    bytes: T,
    next: Option<u8>,
}

impl<T> Stuffer<T>
where
    T: Iterator<Item = u8>,
{
    /// Creates a stuffer over the given raw payload bytes.
    pub const fn new(bytes: T) -> Self {
        Self { bytes, next: None }
    }
}

impl<T> Iterator for Stuffer<T>
where
    T: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(next) = self.next.take() {
            return Some(next);
        }

        match self.bytes.next()? {
            ESCAPE_MARKER => {
                self.next = Some(RESOLVE_ESCAPE);
                Some(ESCAPE_MARKER)
            }
            END_MARKER => {
                self.next = Some(RESOLVE_END);
                Some(ESCAPE_MARKER)
            }
            byte => Some(byte),
        }
    }
}

/// Trait to allow unstuffing of byte iterators.
///
/// This reverses [`Stuff`], e.g. for tools inspecting raw wire captures.
pub trait Unstuff: Iterator<Item = u8> + Sized {
    /// Resolves escape sequences back into raw payload bytes.
    fn unstuff(self) -> Unstuffer<Self> {
        Unstuffer::new(self)
    }
}

impl<T> Unstuff for T where T: Iterator<Item = u8> {}

/// Iterator yielding the raw form of an escaped payload.
///
/// An escape marker followed by an unknown resolver is passed on verbatim,
/// as is a dangling escape marker at the end of the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unstuffer<T>
where
    T: Iterator<Item = u8>,
{
    bytes: T,
    next: Option<u8>,
}

impl<T> Unstuffer<T>
where
    T: Iterator<Item = u8>,
{
    /// Creates an unstuffer over the given escaped payload bytes.
    pub const fn new(bytes: T) -> Self {
        Self { bytes, next: None }
    }
}

impl<T> Iterator for Unstuffer<T>
where
    T: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(next) = self.next.take() {
            return Some(next);
        }

        match self.bytes.next()? {
            ESCAPE_MARKER => {
                let resolver = self.bytes.next();

                if let Some(byte) = resolver.and_then(resolve) {
                    Some(byte)
                } else {
                    self.next = resolver;
                    Some(ESCAPE_MARKER)
                }
            }
            byte => Some(byte),
        }
    }
}
