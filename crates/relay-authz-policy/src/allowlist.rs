//! The allowlist of identities permitted to publish.
//!
//! Built once at startup from configuration and never mutated afterwards,
//! so it can be shared across request handlers without locking.

use std::collections::HashSet;

use relay_authz_core::{nip19, EntryError, PublicKey};

/// An immutable set of canonical public keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlist {
    keys: HashSet<PublicKey>,
}

impl Allowlist {
    /// Build from already-decoded keys. Duplicates collapse.
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = PublicKey>,
    {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Decode `npub` entries and build the allowlist.
    ///
    /// All-or-nothing: the first entry that fails to decode, or decodes to
    /// anything other than a public key, aborts the whole build.
    pub fn from_npubs<I, S>(entries: I) -> Result<Self, EntryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        nip19::decode_all(entries).map(Self::new)
    }

    /// Exact-match membership test.
    pub fn contains(&self, key: &PublicKey) -> bool {
        self.keys.contains(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys are allowed at all.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate the keys in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &PublicKey> {
        self.keys.iter()
    }
}

impl FromIterator<PublicKey> for Allowlist {
    fn from_iter<I: IntoIterator<Item = PublicKey>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NPUB_A: &str = "npub1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjs20r4tx";
    const NPUB_B: &str = "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6";
    const NSEC: &str = "nsec1vl029mgpspedva04g90vltkh6fvh240zqtv9k0t9af8935ke9laqsnlfe5";

    #[test]
    fn test_from_npubs() {
        let allowlist = Allowlist::from_npubs([NPUB_A, NPUB_B]).unwrap();
        assert_eq!(allowlist.len(), 2);

        let a = nip19::decode_public_key(NPUB_A).unwrap();
        assert!(allowlist.contains(&a));
    }

    #[test]
    fn test_from_npubs_empty() {
        let allowlist = Allowlist::from_npubs(Vec::<String>::new()).unwrap();
        assert!(allowlist.is_empty());
    }

    #[test]
    fn test_from_npubs_rejects_invalid_entry() {
        let err = Allowlist::from_npubs([NPUB_A, "invalid"]).unwrap_err();
        assert_eq!(err.index, 1);
        assert!(err.source.is_malformed());
    }

    #[test]
    fn test_from_npubs_rejects_secret_key() {
        let err = Allowlist::from_npubs([NSEC]).unwrap_err();
        assert_eq!(err.index, 0);
        assert!(err.source.is_unexpected_kind());
    }

    #[test]
    fn test_duplicates_collapse() {
        let allowlist = Allowlist::from_npubs([NPUB_A, NPUB_A]).unwrap();
        assert_eq!(allowlist.len(), 1);
    }

    #[test]
    fn test_membership_is_exact() {
        let key = PublicKey::from_bytes([0x42; 32]);
        let allowlist = Allowlist::new([key]);

        for i in 0..32 {
            let mut bytes = [0x42; 32];
            bytes[i] ^= 0x01;
            assert!(!allowlist.contains(&PublicKey::from_bytes(bytes)));
        }
        assert!(allowlist.contains(&key));
    }
}
