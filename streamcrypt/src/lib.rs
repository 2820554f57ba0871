//! Keystream hashing and a reorder-tolerant packetized stream cipher.
//!
//! The toolkit has three tightly coupled pieces:
//!
//! - [`Hash`]: fixed-width digest values (XOR and RC-4 based) with a
//!   uniform compare/hex contract,
//! - [`Keystream`]: the RC-4 keystream generator over a widened
//!   2506-byte S-box,
//! - [`StreamEncrypter`] / [`StreamDecrypter`]: a packetized framing
//!   protocol that masks payloads with keystream packets addressed by
//!   16-bit identifiers, tolerating reordering within a bounded window.
//!
//! # Security note
//!
//! RC-4 is cryptographically broken and none of this claims otherwise.
//! The crate exists for compatibility with streams and digests produced
//! by the original protocol, not for protecting new data.
//!
//! # Example
//!
//! ```
//! use streamcrypt::{Keystream, StreamDecrypter, StreamEncrypter};
//!
//! let key = b"shared example key";
//! let mut tx = StreamEncrypter::new(Keystream::rc4(key)?);
//! let mut rx = StreamDecrypter::new(Keystream::rc4(key)?)?;
//!
//! let mut chunk = *b"attack at dawn";
//! let id = tx.send_data(&mut chunk)?;
//! // transmit (id, chunk) over any transport...
//! assert!(rx.receive_data(&mut chunk, id)?);
//! assert_eq!(&chunk, b"attack at dawn");
//! # Ok::<(), streamcrypt::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod consts;
pub mod error;
pub mod hash;
pub mod hex;
pub mod keystream;
pub mod packet;
pub mod stream;

pub use error::Error;
pub use hash::{Hash, HashAlgorithm};
pub use keystream::{Keystream, Rc4, StreamAlgorithm};
pub use packet::KeystreamPacket;
pub use stream::{StreamDecrypter, StreamEncrypter};
