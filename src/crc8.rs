//! CRC-8 accumulation.

use crc::{Crc, CRC_8_MAXIM_DOW};

/// A CRC-8 function folding one byte into a running checksum.
///
/// The first argument is the input byte, the second one the running checksum.
pub type Crc8 = fn(u8, u8) -> u8;

/// CRC-8/MAXIM-DOW (Dallas one-wire) checksum function.
pub const CRC: Crc<u8> = Crc::<u8>::new(&CRC_8_MAXIM_DOW);

/// Folds `byte` into the running CRC-8/MAXIM-DOW checksum `crc`.
///
/// This is a ready-made [`Crc8`] implementation.
#[must_use]
pub fn maxim_dow(byte: u8, crc: u8) -> u8 {
    // The algorithm is reflected, so the register is seeded in reflected order.
    let mut digest = CRC.digest_with_initial(crc.reverse_bits());
    digest.update(&[byte]);
    digest.finalize()
}

/// Running checksum over the bytes of one frame.
#[derive(Clone, Copy, Debug)]
pub struct Checksum {
    function: Crc8,
    value: u8,
}

impl Checksum {
    /// Creates a new checksum accumulator using the given CRC-8 function.
    #[must_use]
    pub const fn new(function: Crc8) -> Self {
        Self { function, value: 0 }
    }

    /// Resets the accumulator before a new checksum computation.
    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Folds a byte into the checksum.
    pub fn push(&mut self, byte: u8) {
        self.value = (self.function)(byte, self.value);
    }

    /// Folds all given bytes into the checksum.
    pub fn extend<T>(&mut self, bytes: T)
    where
        T: IntoIterator<Item = u8>,
    {
        for byte in bytes {
            self.push(byte);
        }
    }

    /// Returns the current checksum.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}
