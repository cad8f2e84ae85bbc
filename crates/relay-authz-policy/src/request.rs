//! Admission request and decision types.

use bytes::Bytes;
use serde::Serialize;
use std::fmt;

use relay_authz_core::PublicKey;

/// Who the relay says the caller is.
///
/// "No bytes" and "zero bytes" are the same thing here: both mean the
/// caller never completed NIP-42 authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    /// No authenticated pubkey (absent or empty).
    Anonymous,
    /// A 32-byte authenticated pubkey.
    Authenticated(PublicKey),
    /// Authenticated bytes that are not a canonical key.
    Unrecognized(Bytes),
}

impl Authentication {
    /// Classify the raw `auth_pubkey` field of a request.
    pub fn from_bytes(bytes: Option<&[u8]>) -> Self {
        match bytes {
            None | Some([]) => Authentication::Anonymous,
            Some(raw) => match PublicKey::try_from(raw) {
                Ok(key) => Authentication::Authenticated(key),
                Err(_) => Authentication::Unrecognized(Bytes::copy_from_slice(raw)),
            },
        }
    }

    /// Hex form of whatever identity bytes were presented.
    pub fn to_hex(&self) -> Option<String> {
        match self {
            Authentication::Anonymous => None,
            Authentication::Authenticated(key) => Some(key.to_hex()),
            Authentication::Unrecognized(raw) => Some(hex::encode(raw)),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Authentication::Anonymous)
    }
}

impl From<PublicKey> for Authentication {
    fn from(key: PublicKey) -> Self {
        Authentication::Authenticated(key)
    }
}

/// The parts of a candidate event the policy looks at.
///
/// The author is kept as raw bytes: it is only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescriptor {
    /// Claimed author pubkey, independent of the authenticated identity.
    pub author: Bytes,
    /// Event kind.
    pub kind: u64,
}

impl EventDescriptor {
    /// Describe an event authored by `author`.
    pub fn new(author: &PublicKey, kind: u64) -> Self {
        Self {
            author: Bytes::copy_from_slice(author.as_bytes()),
            kind,
        }
    }

    /// Describe an event from raw wire bytes.
    pub fn from_raw(author: impl Into<Bytes>, kind: u64) -> Self {
        Self {
            author: author.into(),
            kind,
        }
    }

    /// Hex form of the claimed author.
    pub fn author_hex(&self) -> String {
        hex::encode(&self.author)
    }
}

/// A single admission question: may this caller publish this event?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionRequest {
    pub auth: Authentication,
    pub event: Option<EventDescriptor>,
}

impl AdmissionRequest {
    pub fn new(auth: Authentication, event: Option<EventDescriptor>) -> Self {
        Self { auth, event }
    }

    /// Request from an authenticated key.
    pub fn authenticated(key: PublicKey, event: Option<EventDescriptor>) -> Self {
        Self::new(Authentication::Authenticated(key), event)
    }

    /// Request from a caller that never authenticated.
    pub fn anonymous(event: Option<EventDescriptor>) -> Self {
        Self::new(Authentication::Anonymous, event)
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// Caller must (re-)authenticate.
    AuthRequired,
    /// Request carried no event.
    NoEvent,
    /// Authenticated identity is not on the allowlist.
    NotAuthorized,
}

impl DenyReason {
    /// Message returned to the relay, prefixed per NIP-01 where one applies.
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::AuthRequired => "auth-required: NIP-42 authentication required",
            DenyReason::NoEvent => "blocked: No event provided",
            DenyReason::NotAuthorized => "Your pubkey is not authorized to publish",
        }
    }

    /// Stable code used in audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::AuthRequired => "auth_required",
            DenyReason::NoEvent => "no_event",
            DenyReason::NotAuthorized => "not_authorized",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The outcome of an admission check. A denial is a normal result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdmissionDecision {
    Permit,
    Deny(DenyReason),
}

impl AdmissionDecision {
    pub fn is_permit(&self) -> bool {
        matches!(self, AdmissionDecision::Permit)
    }

    pub fn is_deny(&self) -> bool {
        !self.is_permit()
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            AdmissionDecision::Permit => None,
            AdmissionDecision::Deny(reason) => Some(*reason),
        }
    }

    /// Human-readable message: present on deny, absent on permit.
    pub fn message(&self) -> Option<&'static str> {
        self.reason().map(|r| r.message())
    }
}
