//! # relay-authz testkit
//!
//! Testing utilities for relay-authz.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: NIP-19 strings with their known decodings
//! - **Generators**: Proptest strategies for keys, encodings and requests
//! - **Fixtures**: A ready-made engine with two known identities and an
//!   in-memory audit sink
//!
//! ## Golden Vectors
//!
//! ```rust
//! use relay_authz_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! assert!(!all_vectors().is_empty());
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use relay_authz_testkit::generators::public_key;
//!
//! proptest! {
//!     #[test]
//!     fn npub_round_trips(key in public_key()) {
//!         let npub = key.to_npub();
//!         prop_assert_eq!(relay_authz_core::decode_public_key(&npub).unwrap(), key);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use relay_authz_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! assert!(fixture.decide_as(fixture.allowed, fixture.outsider).is_permit());
//! assert_eq!(fixture.audit.len(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{admission_request, public_key, RequestParams};
pub use vectors::{all_vectors, verify_all_vectors, Expected, GoldenVector};
