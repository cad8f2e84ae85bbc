//! NIP-19 bare entities: `npub`, `nsec`, `note`.
//!
//! Decoding is two-phase. [`bech32::decode`] validates the string and its
//! checksum; this module then regroups the 5-bit symbols into bytes and
//! classifies the payload by its prefix. A string that passes the first
//! phase but carries the wrong prefix is an [`DecodeError::UnexpectedKind`],
//! never a malformed encoding and never silently reinterpreted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bech32;
use crate::error::{DecodeError, EntryError, Result};
use crate::types::{PublicKey, KEY_LEN};

/// The kind of a NIP-19 entity, named by its bech32 prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nip19Kind {
    /// `npub`: public key.
    Npub,
    /// `nsec`: secret key.
    Nsec,
    /// `note`: event id.
    Note,
    /// Any other prefix (TLV entities like `nprofile`, or foreign bech32).
    Other(String),
}

impl Nip19Kind {
    /// Classify a (lowercase) bech32 prefix.
    pub fn from_hrp(hrp: &str) -> Self {
        match hrp {
            "npub" => Nip19Kind::Npub,
            "nsec" => Nip19Kind::Nsec,
            "note" => Nip19Kind::Note,
            other => Nip19Kind::Other(other.to_string()),
        }
    }

    /// The bech32 prefix for this kind.
    pub fn hrp(&self) -> &str {
        match self {
            Nip19Kind::Npub => "npub",
            Nip19Kind::Nsec => "nsec",
            Nip19Kind::Note => "note",
            Nip19Kind::Other(hrp) => hrp,
        }
    }

    /// Whether this kind carries a fixed 32-byte payload.
    pub fn is_fixed_width(&self) -> bool {
        !matches!(self, Nip19Kind::Other(_))
    }
}

impl fmt::Display for Nip19Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hrp())
    }
}

/// A decoded NIP-19 entity.
#[derive(Clone, PartialEq, Eq)]
pub struct Nip19Entity {
    kind: Nip19Kind,
    data: Vec<u8>,
}

impl Nip19Entity {
    /// The entity kind.
    pub fn kind(&self) -> &Nip19Kind {
        &self.kind
    }

    /// The decoded payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Interpret as a public key; any kind other than `npub` is rejected.
    pub fn into_public_key(self) -> Result<PublicKey> {
        if self.kind != Nip19Kind::Npub {
            return Err(DecodeError::UnexpectedKind {
                expected: Nip19Kind::Npub,
                found: self.kind,
            });
        }
        PublicKey::try_from(self.data.as_slice()).map_err(|_| DecodeError::InvalidPayloadLength {
            kind: Nip19Kind::Npub,
            len: self.data.len(),
        })
    }
}

impl fmt::Debug for Nip19Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Nip19Kind::Nsec => write!(f, "Nip19Entity(nsec, <redacted>)"),
            _ => write!(f, "Nip19Entity({}, {})", self.kind, hex::encode(&self.data)),
        }
    }
}

/// Decode any NIP-19 bare entity.
///
/// Fails with [`DecodeError::MalformedEncoding`] on structural or checksum
/// errors and [`DecodeError::InvalidPayloadLength`] when a known kind does
/// not carry exactly 32 bytes.
pub fn decode(encoded: &str) -> Result<Nip19Entity> {
    let (hrp, symbols) = bech32::decode(encoded)?;
    let data = bech32::convert_bits(&symbols, 5, 8, false)?;
    let kind = Nip19Kind::from_hrp(&hrp);

    if kind.is_fixed_width() && data.len() != KEY_LEN {
        return Err(DecodeError::InvalidPayloadLength {
            kind,
            len: data.len(),
        });
    }

    Ok(Nip19Entity { kind, data })
}

/// Decode an `npub` string into its canonical public key.
pub fn decode_public_key(encoded: &str) -> Result<PublicKey> {
    decode(encoded)?.into_public_key()
}

/// Decode a batch of `npub` strings.
///
/// Stops at the first bad entry and returns no keys at all in that case;
/// the error names the entry's position.
pub fn decode_all<I, S>(entries: I) -> std::result::Result<Vec<PublicKey>, EntryError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry = entry.as_ref();
            decode_public_key(entry.trim()).map_err(|e| EntryError::new(index, entry, e))
        })
        .collect()
}

// A known four-letter prefix plus 32 bytes always fits in 63 characters.
fn encode_fixed(kind: &Nip19Kind, bytes: &[u8; KEY_LEN]) -> String {
    bech32::encode_unchecked(kind.hrp(), bytes)
}

/// Encode a public key as `npub`.
pub fn encode_npub(key: &PublicKey) -> String {
    encode_fixed(&Nip19Kind::Npub, key.as_bytes())
}

/// Encode 32 secret-key bytes as `nsec`.
pub fn encode_nsec(secret: &[u8; KEY_LEN]) -> String {
    encode_fixed(&Nip19Kind::Nsec, secret)
}

/// Encode a 32-byte event id as `note`.
pub fn encode_note(event_id: &[u8; KEY_LEN]) -> String {
    encode_fixed(&Nip19Kind::Note, event_id)
}
