//! Proptest generators for property-based testing.

use proptest::prelude::*;

use relay_authz_core::PublicKey;
use relay_authz_policy::{AdmissionRequest, Authentication, EventDescriptor};

/// Generate a random public key.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    any::<[u8; 32]>().prop_map(PublicKey::from_bytes)
}

/// Generate the npub encoding of a random key.
pub fn npub() -> impl Strategy<Value = String> {
    public_key().prop_map(|key| key.to_npub())
}

/// Generate an event kind.
pub fn event_kind() -> impl Strategy<Value = u64> {
    prop_oneof![0u64..=40_000, any::<u64>()]
}

/// Generate an authentication state, including non-canonical byte lengths.
pub fn authentication() -> impl Strategy<Value = Authentication> {
    prop_oneof![
        Just(Authentication::Anonymous),
        public_key().prop_map(Authentication::Authenticated),
        prop::collection::vec(any::<u8>(), 1..64)
            .prop_map(|raw| Authentication::from_bytes(Some(raw.as_slice()))),
    ]
}

/// Generate an event descriptor whose author may be any byte string.
pub fn event_descriptor() -> impl Strategy<Value = EventDescriptor> {
    (prop::collection::vec(any::<u8>(), 0..=33), event_kind())
        .prop_map(|(author, kind)| EventDescriptor::from_raw(author, kind))
}

/// Generate an arbitrary admission request.
pub fn admission_request() -> impl Strategy<Value = AdmissionRequest> {
    (authentication(), prop::option::of(event_descriptor()))
        .prop_map(|(auth, event)| AdmissionRequest::new(auth, event))
}

/// Parameters for an authenticated request with an event.
#[derive(Debug, Clone)]
pub struct RequestParams {
    pub auth: PublicKey,
    pub author: PublicKey,
    pub kind: u64,
}

impl RequestParams {
    pub fn request(&self) -> AdmissionRequest {
        AdmissionRequest::authenticated(
            self.auth,
            Some(EventDescriptor::new(&self.author, self.kind)),
        )
    }
}

impl Arbitrary for RequestParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (public_key(), public_key(), event_kind())
            .prop_map(|(auth, author, kind)| RequestParams { auth, author, kind })
            .boxed()
    }
}
