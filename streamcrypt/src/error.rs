//! Error type shared by every fallible operation in the toolkit.

use thiserror::Error;

/// Errors reported by hashes, keystreams and the stream protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A keystream was seeded with an empty key.
    #[error("keystream key must be at least one byte")]
    KeyTooShort,

    /// A keystream was seeded with a key longer than the S-box.
    #[error("keystream key of {len} bytes exceeds the {max}-byte seed limit")]
    KeyTooLong { len: usize, max: usize },

    /// A packet was requested below the 21-byte minimum.
    #[error("packet of {0} bytes is below the 21-byte minimum")]
    PacketTooSmall(usize),

    /// A payload handed to the stream protocol exceeds one packet.
    #[error("payload of {len} bytes exceeds the {max}-byte packet size")]
    BufferTooLarge { len: usize, max: usize },

    /// A hash hex string had the wrong length or a non-hex character.
    #[error("hash hex string must be 16, 32, 64 or 128 uppercase hex characters")]
    Parse,

    /// A buffer longer than the packet was masked with wraparound refused.
    #[error("length {len} is unsafe for a {size}-byte packet")]
    UnsafeLength { len: usize, size: usize },

    /// A packet was bound to an algorithm that cannot drive one.
    #[error("the {0} algorithm cannot drive a keystream packet")]
    AlgorithmBind(&'static str),

    /// A checked hash mutation named a byte outside the hash body.
    #[error("byte index {index} is out of range for a {size}-byte hash")]
    IndexOutOfBounds { index: usize, size: usize },
}
