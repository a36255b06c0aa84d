use std::fmt::{Display, Formatter};

/// A capability a [`Transceiver`](crate::Transceiver) depends on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Capability {
    /// The CRC-8 function.
    Crc8,
    /// The byte transport.
    Transport,
    /// The payload source and sink.
    Application,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Crc8 => write!(f, "CRC-8 function"),
            Self::Transport => write!(f, "transport"),
            Self::Application => write!(f, "application"),
        }
    }
}

/// Errors that occur when setting up a [`Transceiver`](crate::Transceiver).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A capability has not been provided.
    MissingCapability(Capability),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCapability(capability) => write!(f, "Missing capability: {capability}"),
        }
    }
}

impl std::error::Error for Error {}
