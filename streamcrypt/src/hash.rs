//! Fixed-width hash values with a uniform contract.
//!
//! A [`Hash`] is a plain value: an algorithm tag plus 8, 16, 32 or 64
//! bytes of digest. Hashes render as hex with the byte order reversed
//! (byte 0 printed last); that ordering is a contract shared with
//! previously stored digests, not a formatting choice.

use core::cmp::Ordering;
use core::fmt;

use crate::consts::{DEFAULT_HASH, HASH_128, HASH_256, HASH_512, HASH_64};
use crate::error::Error;
use crate::hex;
use crate::keystream::Rc4;

/// Numeric identifiers for the hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HashAlgorithm {
    Null = 0,
    Xor = 1,
    Rc4 = 2,
}

impl HashAlgorithm {
    /// Wire identifier of the algorithm.
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Display name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Null => "NULL",
            HashAlgorithm::Xor => "XOR",
            HashAlgorithm::Rc4 => "RC-4",
        }
    }

    /// Digests `data` into a hash of `width` bytes.
    ///
    /// `width` must be one of the four supported widths; anything else
    /// falls back to the 32-byte default. `Null` leaves the digest
    /// zeroed.
    pub fn digest(self, data: &[u8], width: u16) -> Hash {
        let width = match width {
            HASH_64 | HASH_128 | HASH_256 | HASH_512 => width,
            _ => DEFAULT_HASH,
        };
        let mut hash = Hash::zeroed(self, width);
        match self {
            HashAlgorithm::Null => {}
            HashAlgorithm::Xor => hash.fold_xor(data),
            HashAlgorithm::Rc4 => hash.fold_rc4(data),
        }
        hash
    }
}

/// A fixed-width digest tagged with the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hash {
    algorithm: HashAlgorithm,
    data: Vec<u8>,
}

impl Hash {
    /// An all-zero hash of the given width.
    pub fn zeroed(algorithm: HashAlgorithm, size: u16) -> Hash {
        Hash {
            algorithm,
            data: vec![0; size as usize],
        }
    }

    /// Rehydrates a digest computed elsewhere; no hashing is performed.
    ///
    /// Copies up to `size` bytes from `bytes`; if fewer are given the
    /// tail stays zero.
    pub fn from_bytes(algorithm: HashAlgorithm, bytes: &[u8], size: u16) -> Hash {
        let mut hash = Hash::zeroed(algorithm, size);
        let n = bytes.len().min(hash.data.len());
        hash.data[..n].copy_from_slice(&bytes[..n]);
        hash
    }

    /// Parses a reversed-hex digest string.
    pub fn from_hex(algorithm: HashAlgorithm, text: &str) -> Result<Hash, Error> {
        let mut hash = Hash::zeroed(algorithm, DEFAULT_HASH);
        hash.set_hex(text)?;
        Ok(hash)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Digest width in bytes.
    pub fn size(&self) -> u16 {
        self.data.len() as u16
    }

    /// Digest width in bits.
    pub fn size_bits(&self) -> usize {
        self.data.len() * 8
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Reads one digest byte; indexes past the end read as zero.
    pub fn byte(&self, index: usize) -> u8 {
        self.data.get(index).copied().unwrap_or(0)
    }

    /// Overwrites one digest byte, rejecting out-of-range indexes.
    pub fn set_byte(&mut self, index: usize, value: u8) -> Result<(), Error> {
        let size = self.data.len();
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds { index, size }),
        }
    }

    /// Renders the digest as uppercase hex, byte order reversed:
    /// `bytes[size-1]` comes first and `bytes[0]` last.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.data.len() * 2);
        for b in self.data.iter().rev() {
            let [hi, lo] = hex::encode_byte(*b);
            out.push(hi as char);
            out.push(lo as char);
        }
        out
    }

    /// Rebuilds the digest from a reversed-hex string, adopting the
    /// width the string length implies.
    ///
    /// Exactly 16, 32, 64 or 128 uppercase hex characters are accepted.
    /// On any parse failure the digest is zeroed and the old width kept.
    pub fn set_hex(&mut self, text: &str) -> Result<(), Error> {
        let size = match text.len() {
            n if n == HASH_64 as usize * 2 => HASH_64,
            n if n == HASH_128 as usize * 2 => HASH_128,
            n if n == HASH_256 as usize * 2 => HASH_256,
            n if n == HASH_512 as usize * 2 => HASH_512,
            _ => {
                self.data.fill(0);
                return Err(Error::Parse);
            }
        };

        // byte 0 parses from the last two characters
        let chars = text.as_bytes();
        let mut data = vec![0u8; size as usize];
        let mut s = chars.len();
        for slot in data.iter_mut() {
            match hex::decode_byte(chars[s - 2], chars[s - 1]) {
                Ok(v) => *slot = v,
                Err(e) => {
                    self.data.fill(0);
                    return Err(e);
                }
            }
            s -= 2;
        }

        self.data = data;
        Ok(())
    }

    /// Total order over `(algorithm, size, bytes)`, comparing digest
    /// bytes from the highest index down.
    pub fn compare(&self, other: &Hash) -> Ordering {
        self.algorithm
            .cmp(&other.algorithm)
            .then(self.data.len().cmp(&other.data.len()))
            .then_with(|| {
                for (a, b) in self.data.iter().rev().zip(other.data.iter().rev()) {
                    match a.cmp(b) {
                        Ordering::Equal => {}
                        unequal => return unequal,
                    }
                }
                Ordering::Equal
            })
    }

    // result[k mod size] ^= data[k]
    fn fold_xor(&mut self, data: &[u8]) {
        let size = self.data.len();
        for (k, b) in data.iter().enumerate() {
            self.data[k % size] ^= b;
        }
    }

    // Each block of up to `size` input bytes keys a fresh RC-4
    // keystream whose first `size` outputs mix into the digest.
    fn fold_rc4(&mut self, data: &[u8]) {
        let size = self.data.len();
        let mut off = 0;
        while off < data.len() {
            let len = size.min(data.len() - off);
            let mut rc4 = Rc4::seeded(&data[off..off + len]);
            off += len;

            for slot in self.data.iter_mut() {
                *slot ^= rc4.next_byte();
            }
        }
    }
}

impl Ord for Hash {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for Hash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
