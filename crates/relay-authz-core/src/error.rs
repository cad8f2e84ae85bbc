//! Error types for identity decoding.

use thiserror::Error;

use crate::nip19::Nip19Kind;

/// Structural failures of a bech32 string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bech32Error {
    #[error("invalid length: {0} characters (must be 8..=90)")]
    InvalidLength(usize),

    #[error("invalid character {0:?}")]
    InvalidChar(char),

    #[error("mixed-case string")]
    MixedCase,

    #[error("missing separator '1'")]
    MissingSeparator,

    #[error("empty human-readable part")]
    EmptyHrp,

    #[error("data part shorter than the 6-character checksum")]
    MissingChecksum,

    #[error("checksum mismatch")]
    InvalidChecksum,

    #[error("invalid padding in data part")]
    InvalidPadding,

    #[error("value {0} does not fit the source bit width")]
    InvalidData(u8),

    #[error("invalid human-readable part: {0:?}")]
    InvalidHrp(String),
}

/// Errors from decoding an encoded identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Structural or checksum failure.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] Bech32Error),

    /// Well-formed bech32 of a known kind carrying the wrong payload size.
    #[error("invalid {kind} payload: expected 32 bytes, got {len}")]
    InvalidPayloadLength { kind: Nip19Kind, len: usize },

    /// Well-formed encoding of a different kind than the caller asked for.
    #[error("unexpected kind: expected {expected}, found {found}")]
    UnexpectedKind { expected: Nip19Kind, found: Nip19Kind },
}

impl DecodeError {
    /// True for failures of the encoding itself, as opposed to a kind mismatch.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DecodeError::MalformedEncoding(_) | DecodeError::InvalidPayloadLength { .. }
        )
    }

    /// True when the string decoded cleanly but carries the wrong kind.
    pub fn is_unexpected_kind(&self) -> bool {
        matches!(self, DecodeError::UnexpectedKind { .. })
    }
}

/// A failed entry while decoding a batch of identities.
///
/// Secret-key entries are reduced to their prefix so they never reach logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entry {index} ({entry}): {source}")]
pub struct EntryError {
    /// Position of the entry in the input sequence.
    pub index: usize,
    /// Display form of the entry.
    pub entry: String,
    /// Why the entry was rejected.
    #[source]
    pub source: DecodeError,
}

impl EntryError {
    pub(crate) fn new(index: usize, raw: &str, source: DecodeError) -> Self {
        Self {
            index,
            entry: redact(raw),
            source,
        }
    }
}

fn redact(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    if lowered.starts_with("nsec1") {
        "nsec1...".to_string()
    } else {
        raw.to_string()
    }
}

/// Result type for identity decoding.
pub type Result<T> = std::result::Result<T, DecodeError>;
