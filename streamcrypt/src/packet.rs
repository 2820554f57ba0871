//! Keystream packets: identifier-addressed one-time masks.

use crate::error::Error;
use crate::keystream::{Keystream, StreamAlgorithm};

/// A block of keystream bytes addressable by a 16-bit identifier.
///
/// The constructor draws two bytes to form the identifier and then
/// fills the body from index 0 with *subsequent* draws, so the
/// identifier bytes never appear in the mask itself. Sender and
/// receiver generate packets from synchronized keystreams and must
/// agree on this draw order exactly.
pub struct KeystreamPacket {
    bytes: Vec<u8>,
    identifier: u16,
}

impl KeystreamPacket {
    /// Draws a packet of `size` bytes from the cipher.
    ///
    /// `size` must exceed 20 bytes, and the cipher must carry a real
    /// algorithm; the NULL keystream is rejected.
    pub fn new(cipher: &mut Keystream, size: usize) -> Result<Self, Error> {
        if cipher.algorithm() == StreamAlgorithm::Null {
            return Err(Error::AlgorithmBind(cipher.algorithm().name()));
        }
        if size <= 20 {
            return Err(Error::PacketTooSmall(size));
        }

        // identifier = (b0 << 8) ^ b1 over the first two draws
        let hi = cipher.next_byte();
        let lo = cipher.next_byte();
        let identifier = ((hi as u16) << 8) ^ lo as u16;

        let mut bytes = vec![0u8; size];
        for slot in bytes.iter_mut() {
            *slot = cipher.next_byte();
        }

        Ok(KeystreamPacket { bytes, identifier })
    }

    /// The 16-bit address of this packet. Zero never names a packet
    /// accepted by the stream protocol.
    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    /// The keystream body of the packet.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Packet width in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// XOR-masks `buf` with the packet body, wrapping over the body if
    /// `buf` is longer. Encryption and decryption are the same
    /// operation; applying twice restores the input.
    pub fn apply(&self, buf: &mut [u8]) {
        let size = self.bytes.len();
        for (k, b) in buf.iter_mut().enumerate() {
            *b ^= self.bytes[k % size];
        }
    }

    /// Like [`apply`](Self::apply), but refuses buffers longer than the
    /// packet: wrapping reuses mask bytes within one message.
    pub fn apply_checked(&self, buf: &mut [u8]) -> Result<(), Error> {
        if buf.len() > self.bytes.len() {
            return Err(Error::UnsafeLength {
                len: buf.len(),
                size: self.bytes.len(),
            });
        }
        self.apply(buf);
        Ok(())
    }
}
