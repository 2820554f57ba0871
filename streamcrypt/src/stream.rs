//! The packetized stream protocol: encrypter window and decrypter ring.
//!
//! Both sides derive the same sequence of packets from synchronized
//! keystreams. The encrypter keeps only a sliding window of recent
//! identifiers to guarantee each one is unambiguous; the decrypter
//! holds a ring of packets generated ahead of time so that packets
//! arriving out of order can still be matched by identifier. The ring
//! only advances once the matched position falls behind the lag
//! threshold, which amortizes keystream generation.

use log::{debug, trace};

use crate::consts::{BACKCHECK, DECRYSIZE, LAGCATCH, PACKETSIZE};
use crate::error::Error;
use crate::keystream::Keystream;
use crate::packet::KeystreamPacket;

/// Produces uniquely-identified packets and XOR-masks payloads with them.
pub struct StreamEncrypter {
    cipher: Keystream,
    last_loc: usize,
    id_check: [u16; BACKCHECK],
}

impl StreamEncrypter {
    /// Wraps a keystream. The identifier window starts empty.
    pub fn new(cipher: Keystream) -> Self {
        StreamEncrypter {
            cipher,
            last_loc: 0,
            id_check: [0; BACKCHECK],
        }
    }

    /// Encrypts `buf` in place and returns the identifier of the packet
    /// that masked it.
    ///
    /// The identifier is nonzero and distinct from the previous
    /// `BACKCHECK - 1` identifiers; candidate packets violating that
    /// are discarded and redrawn. The caller transmits the identifier
    /// alongside the ciphertext.
    pub fn send_data(&mut self, buf: &mut [u8]) -> Result<u16, Error> {
        if buf.len() > PACKETSIZE {
            return Err(Error::BufferTooLarge {
                len: buf.len(),
                max: PACKETSIZE,
            });
        }

        let packet = loop {
            let candidate = KeystreamPacket::new(&mut self.cipher, PACKETSIZE)?;
            self.id_check[self.last_loc] = candidate.identifier();
            if self.window_is_unique() {
                break candidate;
            }
            trace!(
                "discarding packet {:#06x}: identifier collides in the send window",
                candidate.identifier()
            );
        };

        self.last_loc = (self.last_loc + 1) % BACKCHECK;
        packet.apply(buf);
        Ok(packet.identifier())
    }

    // The identifier just written at last_loc is nonzero and absent
    // from every other window slot.
    fn window_is_unique(&self) -> bool {
        let id = self.id_check[self.last_loc];
        if id == 0 {
            return false;
        }
        self.id_check
            .iter()
            .enumerate()
            .all(|(c, &other)| c == self.last_loc || other != id)
    }
}

/// Matches incoming packets by identifier against a precomputed ring
/// and decrypts them, tolerating reordering within the ring.
pub struct StreamDecrypter {
    cipher: Keystream,
    packets: Vec<KeystreamPacket>,
    last_value: usize,
    mid_value: usize,
}

impl StreamDecrypter {
    /// Wraps a keystream and precomputes the full packet ring.
    ///
    /// Fails if the keystream cannot drive packets (NULL algorithm).
    pub fn new(mut cipher: Keystream) -> Result<Self, Error> {
        let mut packets: Vec<KeystreamPacket> = Vec::with_capacity(DECRYSIZE);
        while packets.len() < DECRYSIZE {
            let slot = packets.len();
            loop {
                let candidate = KeystreamPacket::new(&mut cipher, PACKETSIZE)?;
                if identifier_is_fresh(&packets, slot, candidate.identifier()) {
                    packets.push(candidate);
                    break;
                }
            }
        }

        Ok(StreamDecrypter {
            cipher,
            packets,
            last_value: 0,
            mid_value: LAGCATCH - 1,
        })
    }

    /// Decrypts `buf` in place with the ring packet named by `flag`.
    ///
    /// Returns `Ok(false)` when no ring slot carries that identifier:
    /// the packet is simply dropped and no state changes, since unknown
    /// or out-of-window identifiers are routine on a lossy transport.
    pub fn receive_data(&mut self, buf: &mut [u8], flag: u16) -> Result<bool, Error> {
        if buf.len() > PACKETSIZE {
            return Err(Error::BufferTooLarge {
                len: buf.len(),
                max: PACKETSIZE,
            });
        }

        // Scan forward from two slots past the BACKCHECK history
        // boundary behind the last match.
        let mut hit = None;
        for c in 2..DECRYSIZE {
            let idx = (c + self.last_value + DECRYSIZE - BACKCHECK) % DECRYSIZE;
            if self.packets[idx].identifier() == flag {
                hit = Some(idx);
                break;
            }
        }
        let Some(hit) = hit else {
            debug!("identifier {:#06x} not in the ring window, dropping", flag);
            return Ok(false);
        };

        self.packets[hit].apply(buf);
        self.last_value = hit;

        if self.within_lag_window() {
            return Ok(true);
        }

        // The match ran past the lag threshold: pull fresh keystream
        // over the slots the window has moved beyond.
        let difference = (self.last_value + DECRYSIZE - self.mid_value) % DECRYSIZE;
        for k in 0..difference {
            let slot = (self.mid_value + DECRYSIZE - LAGCATCH + k + 1) % DECRYSIZE;
            loop {
                let candidate = KeystreamPacket::new(&mut self.cipher, PACKETSIZE)?;
                if identifier_is_fresh(&self.packets, slot, candidate.identifier()) {
                    self.packets[slot] = candidate;
                    break;
                }
            }
        }
        debug!(
            "ring advanced {} slots, matched position now {}",
            difference, self.last_value
        );
        self.mid_value = self.last_value;

        Ok(true)
    }

    // Half-open window (mid_value - LAGCATCH, mid_value], wrapping
    // around the ring.
    fn within_lag_window(&self) -> bool {
        let lag_lo = (self.mid_value + DECRYSIZE - LAGCATCH) % DECRYSIZE;
        let (last, mid) = (self.last_value, self.mid_value);
        (last < mid && last > lag_lo)
            || (mid < lag_lo && (last < mid || last > lag_lo))
            || last == mid
    }
}

// True when `id` is nonzero and distinct from the identifiers of the
// BACKCHECK - 1 ring slots behind `slot`, wrapping backward. Slots not
// yet populated (during ring construction) are skipped.
fn identifier_is_fresh(packets: &[KeystreamPacket], slot: usize, id: u16) -> bool {
    if id == 0 {
        return false;
    }
    for back in 1..BACKCHECK {
        let idx = (slot + DECRYSIZE - back) % DECRYSIZE;
        if let Some(prior) = packets.get(idx) {
            if prior.identifier() == id {
                return false;
            }
        }
    }
    true
}
