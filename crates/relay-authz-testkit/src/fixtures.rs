//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use relay_authz_core::{nip19, PublicKey};
use relay_authz_policy::{
    AdmissionDecision, AdmissionEngine, AdmissionRequest, Allowlist, EventDescriptor,
    MemoryAuditSink,
};
use relay_authz_rpc::{Event, EventRequest};

/// Allowlisted identity used throughout the tests.
pub const NPUB_A: &str = "npub1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjs20r4tx";
pub const HEX_A: &str = "dd81a8bacbab0b5c3007d1672fb8301383b4e9583d431835985057223eb298a5";

/// A valid identity that is not on the default allowlist.
pub const NPUB_B: &str = "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6";
pub const HEX_B: &str = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";

/// A secret key encoding. Never a valid allowlist entry.
pub const NSEC: &str = "nsec1vl029mgpspedva04g90vltkh6fvh240zqtv9k0t9af8935ke9laqsnlfe5";

/// Decode a fixture npub.
///
/// Panics on bad input; fixtures are constants.
pub fn key(npub: &str) -> PublicKey {
    nip19::decode_public_key(npub).expect("fixture npub must decode")
}

/// An engine allowing [`NPUB_A`] with an in-memory audit sink.
pub struct TestFixture {
    /// The allowlisted identity.
    pub allowed: PublicKey,
    /// A well-formed identity that is not allowlisted.
    pub outsider: PublicKey,
    pub engine: Arc<AdmissionEngine>,
    pub audit: Arc<MemoryAuditSink>,
}

impl TestFixture {
    pub fn new() -> Self {
        let allowed = key(NPUB_A);
        Self::with_allowlist(Allowlist::new([allowed]))
    }

    /// Same identities, custom allowlist.
    pub fn with_allowlist(allowlist: Allowlist) -> Self {
        let audit = Arc::new(MemoryAuditSink::new());
        let engine = AdmissionEngine::with_audit_sink(allowlist, audit.clone());
        Self {
            allowed: key(NPUB_A),
            outsider: key(NPUB_B),
            engine: Arc::new(engine),
            audit,
        }
    }

    /// Decide a kind-1 event from `author` submitted by `auth`.
    pub fn decide_as(&self, auth: PublicKey, author: PublicKey) -> AdmissionDecision {
        self.engine.decide(&AdmissionRequest::authenticated(
            auth,
            Some(EventDescriptor::new(&author, 1)),
        ))
    }

    pub fn decide(&self, request: &AdmissionRequest) -> AdmissionDecision {
        self.engine.decide(request)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A wire request for a kind-1 event by `author`, optionally authenticated.
pub fn event_request(auth: Option<&PublicKey>, author: &PublicKey) -> EventRequest {
    EventRequest::new(auth, Some(Event::with_author(author, 1)))
}
