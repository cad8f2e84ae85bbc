//! # relay-authz core
//!
//! Canonical public keys and NIP-19 identity decoding.
//!
//! This crate contains no I/O. Every function is pure and safe to call
//! from any number of threads.
//!
//! ## Key Types
//!
//! - [`PublicKey`] - 32-byte canonical key, compared byte-exactly
//! - [`Nip19Entity`] - a decoded `npub`, `nsec` or `note`
//! - [`DecodeError`] - malformed encoding vs. unexpected kind
//!
//! ## Decoding
//!
//! ```rust
//! use relay_authz_core::nip19;
//!
//! let key = nip19::decode_public_key(
//!     "npub1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjs20r4tx",
//! ).unwrap();
//! assert_eq!(
//!     key.to_hex(),
//!     "dd81a8bacbab0b5c3007d1672fb8301383b4e9583d431835985057223eb298a5",
//! );
//! ```

pub mod bech32;
pub mod error;
pub mod nip19;
pub mod types;

pub use error::{Bech32Error, DecodeError, EntryError, Result};
pub use nip19::{decode_all, decode_public_key, Nip19Entity, Nip19Kind};
pub use types::{PublicKey, KEY_LEN};
