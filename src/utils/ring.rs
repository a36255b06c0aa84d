//! Fixed-capacity circular byte buffer.

/// A circular byte buffer with a single cursor.
///
/// Bytes are written at the cursor, which then advances.
/// All positions wrap around the capacity `N`, which must be a power of two.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ring<const N: usize> {
    buffer: [u8; N],
    cursor: usize,
}

impl<const N: usize> Ring<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "ring capacity must be a power of two");
        N - 1
    };

    /// Creates an empty ring with the cursor at position zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; N],
            cursor: 0,
        }
    }

    /// Returns the current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Writes a byte at the cursor and advances the cursor.
    pub fn push(&mut self, byte: u8) {
        self.buffer[self.cursor] = byte;
        self.advance(1);
    }

    /// Returns the byte `offset` positions after the cursor.
    #[must_use]
    pub const fn peek(&self, offset: usize) -> u8 {
        self.buffer[self.cursor.wrapping_add(offset) & Self::MASK]
    }

    /// Returns the byte `offset` positions before the cursor.
    ///
    /// An offset of `1` yields the most recently written byte.
    #[must_use]
    pub const fn peek_back(&self, offset: usize) -> u8 {
        self.buffer[self.cursor.wrapping_sub(offset) & Self::MASK]
    }

    /// Iterates over `len` bytes starting `offset` positions before the cursor.
    pub fn window(&self, offset: usize, len: usize) -> impl Iterator<Item = u8> + '_ {
        let start = self.cursor.wrapping_sub(offset);
        (0..len).map(move |index| self.buffer[start.wrapping_add(index) & Self::MASK])
    }

    /// Advances the cursor by `count` positions.
    pub fn advance(&mut self, count: usize) {
        self.cursor = self.cursor.wrapping_add(count) & Self::MASK;
    }

    /// Moves the cursor back by `count` positions.
    pub fn rewind(&mut self, count: usize) {
        self.cursor = self.cursor.wrapping_sub(count) & Self::MASK;
    }

    /// Moves the cursor back to position zero.
    ///
    /// Stale bytes remain in the storage.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<const N: usize> Default for Ring<N> {
    fn default() -> Self {
        Self::new()
    }
}
