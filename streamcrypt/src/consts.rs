//! Width and window constants shared across the toolkit.

/// S-box width for the RC-4 keystream, in bytes.
///
/// Deliberately wider than the canonical 256 of textbook RC-4; the wire
/// format of previously encrypted streams depends on this exact width.
pub const RC4_MAX: usize = 2506;

/// Maximum seed length accepted by any keystream cipher.
pub const STREAM_SEED_MAX: usize = 2506;

/// 64 bit hash width in bytes.
pub const HASH_64: u16 = 8;
/// 128 bit hash width in bytes.
pub const HASH_128: u16 = 16;
/// 256 bit hash width in bytes.
pub const HASH_256: u16 = 32;
/// 512 bit hash width in bytes.
pub const HASH_512: u16 = 64;
/// Default hash width in bytes.
pub const DEFAULT_HASH: u16 = HASH_256;

/// Keystream bytes per packet; also the maximum payload per
/// `send_data`/`receive_data` call.
pub const PACKETSIZE: usize = 508;

/// Number of packets a stream decrypter holds in its ring.
pub const DECRYSIZE: usize = 100;

/// Width of the identifier uniqueness window.
pub const BACKCHECK: usize = 10;

/// Lag threshold past which the decrypter replenishes its ring.
pub const LAGCATCH: usize = DECRYSIZE / 4;
