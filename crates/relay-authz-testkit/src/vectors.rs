//! Golden NIP-19 vectors.
//!
//! Every implementation of the identity codec must agree on these. Hex
//! values are lowercase.

use relay_authz_core::{nip19, DecodeError, Nip19Kind};

/// What decoding a vector as a public key must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Decodes to this key (hex).
    Key(&'static str),
    /// Well-formed, but of this other kind.
    WrongKind(&'static str),
    /// Rejected as malformed.
    Malformed,
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Input string.
    pub encoded: &'static str,
    pub expected: Expected,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "NIP-19 reference npub",
            encoded: "npub10elfcs4fr0l0r8af98jlmgdh9c8tcxjvz9qkw038js35mp4dma8qzvjptg",
            expected: Expected::Key(
                "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e",
            ),
        },
        GoldenVector {
            name: "allowlisted fixture identity",
            encoded: "npub1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjs20r4tx",
            expected: Expected::Key(
                "dd81a8bacbab0b5c3007d1672fb8301383b4e9583d431835985057223eb298a5",
            ),
        },
        GoldenVector {
            name: "second fixture identity",
            encoded: "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6",
            expected: Expected::Key(
                "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d",
            ),
        },
        GoldenVector {
            name: "uppercase npub",
            encoded: "NPUB1MKQ63WKT4V94CVQ869NJLWPSZWPMF62C84P3SDVC2PTJY04JNZJS20R4TX",
            expected: Expected::Key(
                "dd81a8bacbab0b5c3007d1672fb8301383b4e9583d431835985057223eb298a5",
            ),
        },
        GoldenVector {
            name: "all-zero key",
            encoded: "npub1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqzqujme",
            expected: Expected::Key(
                "0000000000000000000000000000000000000000000000000000000000000000",
            ),
        },
        GoldenVector {
            name: "all-ones key",
            encoded: "npub1lllllllllllllllllllllllllllllllllllllllllllllllllllsq7lrjw",
            expected: Expected::Key(
                "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            ),
        },
        GoldenVector {
            name: "NIP-19 reference nsec",
            encoded: "nsec1vl029mgpspedva04g90vltkh6fvh240zqtv9k0t9af8935ke9laqsnlfe5",
            expected: Expected::WrongKind("nsec"),
        },
        GoldenVector {
            name: "note with the fixture identity's bytes",
            encoded: "note1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjsm9qgjw",
            expected: Expected::WrongKind("note"),
        },
        GoldenVector {
            name: "mixed case",
            encoded: "Npub1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjs20r4tx",
            expected: Expected::Malformed,
        },
        GoldenVector {
            name: "31-byte payload",
            encoded: "npub1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqkxnxjx",
            expected: Expected::Malformed,
        },
        GoldenVector {
            name: "corrupted checksum",
            encoded: "npub1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjs20r4tq",
            expected: Expected::Malformed,
        },
        GoldenVector {
            name: "not bech32",
            encoded: "invalid",
            expected: Expected::Malformed,
        },
        GoldenVector {
            name: "empty string",
            encoded: "",
            expected: Expected::Malformed,
        },
    ]
}

/// Check one vector against the codec.
pub fn verify_vector(vector: &GoldenVector) -> Result<(), String> {
    let result = nip19::decode_public_key(vector.encoded);
    let ok = match (vector.expected, &result) {
        (Expected::Key(hex), Ok(key)) => key.to_hex() == hex,
        (Expected::WrongKind(hrp), Err(DecodeError::UnexpectedKind { expected, found })) => {
            *expected == Nip19Kind::Npub && found.hrp() == hrp
        }
        (Expected::Malformed, Err(e)) => e.is_malformed(),
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(format!(
            "{}: expected {:?}, got {:?}",
            vector.name, vector.expected, result
        ))
    }
}

/// Check every vector, reporting all mismatches at once.
pub fn verify_all_vectors() -> Result<(), String> {
    let failures: Vec<String> = all_vectors()
        .iter()
        .filter_map(|v| verify_vector(v).err())
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("\n"))
    }
}
