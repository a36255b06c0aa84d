use std::fmt::{Formatter, LowerHex, Result, UpperHex};

/// Formats a byte slice as a list of hexadecimal numbers, e.g. for wire dumps in log output.
#[derive(Clone, Copy, Debug)]
pub struct HexSlice<'a>(&'a [u8]);

impl<'a> HexSlice<'a> {
    /// Wraps the given bytes.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    fn write_with(
        &self,
        f: &mut Formatter<'_>,
        fmt: fn(&u8, &mut Formatter<'_>) -> Result,
    ) -> Result {
        f.write_str("[")?;

        for (index, byte) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }

            fmt(byte, f)?;
        }

        f.write_str("]")
    }
}

impl<'a> From<&'a [u8]> for HexSlice<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl UpperHex for HexSlice<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.write_with(f, <u8 as UpperHex>::fmt)
    }
}

impl LowerHex for HexSlice<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.write_with(f, <u8 as LowerHex>::fmt)
    }
}
