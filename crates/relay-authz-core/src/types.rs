//! Strong type definitions for relay-authz.
//!
//! Keys are newtypes so raw byte slices cannot be mistaken for them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::nip19;

/// Length in bytes of a canonical key.
pub const KEY_LEN: usize = 32;

/// A 32-byte Nostr public key (x-only secp256k1) in canonical form.
///
/// Two encodings of the same identity always decode to an identical
/// `PublicKey`; equality is byte-exact.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; KEY_LEN]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != KEY_LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; KEY_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Encode as a NIP-19 `npub` string.
    pub fn to_npub(&self) -> String {
        nip19::encode_npub(self)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; KEY_LEN]> for PublicKey {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; KEY_LEN] = slice.try_into()?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_A: &str = "dd81a8bacbab0b5c3007d1672fb8301383b4e9583d431835985057223eb298a5";

    #[test]
    fn test_public_key_hex_roundtrip() {
        let pk = PublicKey::from_hex(HEX_A).unwrap();
        assert_eq!(pk.to_hex(), HEX_A);
    }

    #[test]
    fn test_public_key_from_hex_rejects_short_input() {
        let short = &HEX_A[..62];
        assert!(PublicKey::from_hex(short).is_err());
        assert!(PublicKey::from_hex("zz").is_err());
    }

    #[test]
    fn test_public_key_display_is_full_hex() {
        let pk = PublicKey::from_bytes([0xab; 32]);
        assert_eq!(format!("{}", pk), "ab".repeat(32));
    }

    #[test]
    fn test_public_key_debug() {
        let pk = PublicKey::from_bytes([0xcd; 32]);
        assert_eq!(format!("{:?}", pk), "PublicKey(cdcdcdcdcdcdcdcd)");
    }

    #[test]
    fn test_try_from_slice_requires_exact_length() {
        assert!(PublicKey::try_from(&[0u8; 32][..]).is_ok());
        assert!(PublicKey::try_from(&[0u8; 31][..]).is_err());
        assert!(PublicKey::try_from(&[0u8; 33][..]).is_err());
        assert!(PublicKey::try_from(&[][..]).is_err());
    }

    #[test]
    fn test_to_npub() {
        let pk = PublicKey::from_hex(HEX_A).unwrap();
        assert_eq!(
            pk.to_npub(),
            "npub1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjs20r4tx"
        );
    }
}
