//! Wire messages for the admission protocol.
//!
//! Field numbers and types match `proto/nauthz.proto`, so frames are
//! interchangeable with any other implementation of that schema.

use bytes::Bytes;

use relay_authz_core::PublicKey;
use relay_authz_policy::{AdmissionDecision, AdmissionRequest, Authentication, EventDescriptor};

/// A Nostr event as forwarded by the relay.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(bytes = "vec", tag = "1")]
    pub id: Vec<u8>,
    /// Claimed author pubkey (32 bytes).
    #[prost(bytes = "vec", tag = "2")]
    pub pubkey: Vec<u8>,
    #[prost(fixed64, tag = "3")]
    pub created_at: u64,
    #[prost(uint64, tag = "4")]
    pub kind: u64,
    #[prost(string, tag = "5")]
    pub content: String,
    #[prost(message, repeated, tag = "6")]
    pub tags: Vec<TagEntry>,
    #[prost(bytes = "vec", tag = "7")]
    pub sig: Vec<u8>,
}

impl Event {
    /// An otherwise empty event with the given author and kind.
    pub fn with_author(author: &PublicKey, kind: u64) -> Self {
        Self {
            pubkey: author.as_bytes().to_vec(),
            kind,
            ..Default::default()
        }
    }
}

/// One event tag.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TagEntry {
    #[prost(string, repeated, tag = "1")]
    pub values: Vec<String>,
}

/// Verified NIP-05 name of the author, if the relay has one.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Nip05Name {
    #[prost(string, tag = "1")]
    pub local: String,
    #[prost(string, tag = "2")]
    pub domain: String,
}

/// Admission request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventRequest {
    #[prost(message, optional, tag = "1")]
    pub event: Option<Event>,
    #[prost(string, optional, tag = "2")]
    pub ip_addr: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub origin: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub user_agent: Option<String>,
    /// NIP-42 authenticated pubkey. Absent and empty both mean anonymous.
    #[prost(bytes = "vec", optional, tag = "5")]
    pub auth_pubkey: Option<Vec<u8>>,
    #[prost(message, optional, tag = "6")]
    pub nip05: Option<Nip05Name>,
}

impl EventRequest {
    /// Request carrying an optional authenticated key and an optional event.
    pub fn new(auth_pubkey: Option<&PublicKey>, event: Option<Event>) -> Self {
        Self {
            event,
            auth_pubkey: auth_pubkey.map(|key| key.as_bytes().to_vec()),
            ..Default::default()
        }
    }

    /// The policy view of this request.
    ///
    /// Only the authenticated pubkey and the event's author and kind are
    /// carried over; the rest of the message is not policy input.
    pub fn admission_request(&self) -> AdmissionRequest {
        let auth = Authentication::from_bytes(self.auth_pubkey.as_deref());
        let event = self
            .event
            .as_ref()
            .map(|e| EventDescriptor::from_raw(Bytes::copy_from_slice(&e.pubkey), e.kind));
        AdmissionRequest::new(auth, event)
    }
}

impl From<&EventRequest> for AdmissionRequest {
    fn from(request: &EventRequest) -> Self {
        request.admission_request()
    }
}

/// Admission outcome on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Decision {
    Unspecified = 0,
    Permit = 1,
    Deny = 2,
}

/// Admission reply.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventReply {
    #[prost(enumeration = "Decision", tag = "1")]
    pub decision: i32,
    /// Present on deny only.
    #[prost(string, optional, tag = "2")]
    pub message: Option<String>,
}

impl From<AdmissionDecision> for EventReply {
    fn from(decision: AdmissionDecision) -> Self {
        match decision {
            AdmissionDecision::Permit => Self {
                decision: Decision::Permit as i32,
                message: None,
            },
            AdmissionDecision::Deny(reason) => Self {
                decision: Decision::Deny as i32,
                message: Some(reason.message().to_string()),
            },
        }
    }
}

impl From<&AdmissionDecision> for EventReply {
    fn from(decision: &AdmissionDecision) -> Self {
        Self::from(*decision)
    }
}
