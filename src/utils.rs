//! Miscellaneous utility types and functions.

pub use hex_slice::HexSlice;
pub use ring::Ring;
pub use sequence::next_id;

mod hex_slice;
mod ring;
mod sequence;
