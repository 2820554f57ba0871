//! RC-4 keystream generation over a widened S-box.
//!
//! The S-box spans [`RC4_MAX`] = 2506 bytes rather than the canonical
//! 256. Keystreams produced with the narrow table are incompatible, so
//! the width is part of the wire contract and must not change.

use crate::consts::{RC4_MAX, STREAM_SEED_MAX};
use crate::error::Error;

/// Numeric identifiers for the keystream algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamAlgorithm {
    Null = 0,
    Rc4 = 1,
}

impl StreamAlgorithm {
    /// Wire identifier of the algorithm.
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Display name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            StreamAlgorithm::Null => "NULL Algorithm",
            StreamAlgorithm::Rc4 => "RC-4",
        }
    }
}

/// RC-4 keystream state: the permutation table and the two PRGA cursors.
pub struct Rc4 {
    s: [u8; RC4_MAX],
    i: usize,
    j: usize,
}

impl Rc4 {
    /// Runs the key scheduling algorithm over the given key.
    ///
    /// The key may be anywhere from one byte up to the S-box width;
    /// shorter keys cycle during scheduling.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        if key.is_empty() {
            return Err(Error::KeyTooShort);
        }
        if key.len() > RC4_MAX || key.len() > STREAM_SEED_MAX {
            return Err(Error::KeyTooLong {
                len: key.len(),
                max: STREAM_SEED_MAX,
            });
        }
        Ok(Self::seeded(key))
    }

    // KSA for a key whose length has already been validated.
    pub(crate) fn seeded(key: &[u8]) -> Self {
        let mut rc4 = Rc4 {
            s: [0; RC4_MAX],
            i: 0,
            j: 0,
        };

        // s[i] = i, truncated to a byte above 255 like the original table
        for (i, b) in rc4.s.iter_mut().enumerate() {
            *b = i as u8;
        }

        // j = (j + s[i] + key[i % key_len]) mod MAX
        let mut j = 0usize;
        for i in 0..RC4_MAX {
            j = (j + rc4.s[i] as usize + key[i % key.len()] as usize) % RC4_MAX;
            rc4.s.swap(i, j);
        }

        rc4
    }

    /// Produces the next keystream byte (PRGA step).
    pub fn next_byte(&mut self) -> u8 {
        // i = (i + 1) mod MAX
        self.i = (self.i + 1) % RC4_MAX;
        // j = (j + s[i]) mod MAX
        self.j = (self.j + self.s[self.i] as usize) % RC4_MAX;

        self.s.swap(self.i, self.j);

        // k = s[(s[i] + s[j]) mod MAX]
        self.s[(self.s[self.i] as usize + self.s[self.j] as usize) % RC4_MAX]
    }
}

/// A keystream generator, dispatched by variant.
///
/// `Null` stands in where no real algorithm is bound; it emits zeroes
/// and is rejected wherever keystream material is actually consumed.
pub enum Keystream {
    Null,
    Rc4(Rc4),
}

impl Keystream {
    /// Builds an RC-4 keystream from a key.
    pub fn rc4(key: &[u8]) -> Result<Self, Error> {
        Ok(Keystream::Rc4(Rc4::new(key)?))
    }

    /// The algorithm backing this keystream.
    pub fn algorithm(&self) -> StreamAlgorithm {
        match self {
            Keystream::Null => StreamAlgorithm::Null,
            Keystream::Rc4(_) => StreamAlgorithm::Rc4,
        }
    }

    /// Produces the next keystream byte.
    pub fn next_byte(&mut self) -> u8 {
        match self {
            Keystream::Null => 0,
            Keystream::Rc4(rc4) => rc4.next_byte(),
        }
    }
}
