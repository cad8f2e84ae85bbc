//! The admission engine.
//!
//! [`evaluate`] is the decision itself: a pure, total function of the
//! allowlist and the request. [`AdmissionEngine::decide`] wraps it with the
//! audit side effect. The engine holds only immutable state, so one
//! instance behind an `Arc` serves any number of concurrent callers.

use std::fmt;
use std::sync::Arc;

use crate::allowlist::Allowlist;
use crate::audit::{AuditRecord, AuditSink, TracingAuditSink};
use crate::request::{AdmissionDecision, AdmissionRequest, Authentication, DenyReason};

/// Decide a request against an allowlist.
///
/// Checks, first match wins:
/// 1. no authenticated identity: deny, authentication required
/// 2. no event: deny, no event
/// 3. identity not on the allowlist: deny, not authorized
/// 4. otherwise permit
///
/// The event's claimed author is never consulted. An allowlisted identity
/// may admit events authored by any key.
pub fn evaluate(allowlist: &Allowlist, request: &AdmissionRequest) -> AdmissionDecision {
    if request.auth.is_anonymous() {
        return AdmissionDecision::Deny(DenyReason::AuthRequired);
    }

    if request.event.is_none() {
        return AdmissionDecision::Deny(DenyReason::NoEvent);
    }

    let allowed = match &request.auth {
        Authentication::Authenticated(key) => allowlist.contains(key),
        Authentication::Unrecognized(_) | Authentication::Anonymous => false,
    };
    if !allowed {
        return AdmissionDecision::Deny(DenyReason::NotAuthorized);
    }

    AdmissionDecision::Permit
}

/// Allowlist policy plus audit emission.
pub struct AdmissionEngine {
    allowlist: Allowlist,
    audit: Arc<dyn AuditSink>,
}

impl AdmissionEngine {
    /// Create an engine that audits through `tracing`.
    pub fn new(allowlist: Allowlist) -> Self {
        Self::with_audit_sink(allowlist, Arc::new(TracingAuditSink))
    }

    /// Create an engine with a custom audit sink.
    pub fn with_audit_sink(allowlist: Allowlist, audit: Arc<dyn AuditSink>) -> Self {
        Self { allowlist, audit }
    }

    /// The allowlist this engine enforces.
    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    /// Decide a request and emit exactly one audit record for it.
    pub fn decide(&self, request: &AdmissionRequest) -> AdmissionDecision {
        let decision = evaluate(&self.allowlist, request);
        self.audit.record(&AuditRecord::new(request, &decision));
        decision
    }
}

impl fmt::Debug for AdmissionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionEngine")
            .field("allowed_keys", &self.allowlist.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{MemoryAuditSink, Verdict};
    use crate::request::EventDescriptor;
    use bytes::Bytes;
    use relay_authz_core::{nip19, PublicKey};

    const NPUB_A: &str = "npub1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjs20r4tx";
    const HEX_B: &str = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";

    fn key_a() -> PublicKey {
        nip19::decode_public_key(NPUB_A).unwrap()
    }

    fn key_b() -> PublicKey {
        PublicKey::from_hex(HEX_B).unwrap()
    }

    fn engine() -> (AdmissionEngine, Arc<MemoryAuditSink>) {
        let sink = Arc::new(MemoryAuditSink::new());
        let engine = AdmissionEngine::with_audit_sink(Allowlist::new([key_a()]), sink.clone());
        (engine, sink)
    }

    #[test]
    fn test_anonymous_requires_auth() {
        let (engine, _) = engine();
        let request = AdmissionRequest::anonymous(Some(EventDescriptor::new(&key_a(), 1)));
        assert_eq!(
            engine.decide(&request),
            AdmissionDecision::Deny(DenyReason::AuthRequired)
        );
    }

    #[test]
    fn test_empty_auth_bytes_require_auth() {
        let (engine, _) = engine();
        let request = AdmissionRequest::new(
            Authentication::from_bytes(Some(&[])),
            Some(EventDescriptor::new(&key_a(), 1)),
        );
        assert_eq!(
            engine.decide(&request),
            AdmissionDecision::Deny(DenyReason::AuthRequired)
        );
    }

    #[test]
    fn test_missing_event_blocked() {
        let (engine, _) = engine();
        let request = AdmissionRequest::authenticated(key_a(), None);
        assert_eq!(
            engine.decide(&request),
            AdmissionDecision::Deny(DenyReason::NoEvent)
        );
    }

    #[test]
    fn test_auth_checked_before_event() {
        let (engine, _) = engine();
        let request = AdmissionRequest::anonymous(None);
        assert_eq!(
            engine.decide(&request),
            AdmissionDecision::Deny(DenyReason::AuthRequired)
        );
    }

    #[test]
    fn test_allowlisted_key_permitted_for_foreign_author() {
        let (engine, _) = engine();
        let request =
            AdmissionRequest::authenticated(key_a(), Some(EventDescriptor::new(&key_b(), 1)));
        let decision = engine.decide(&request);
        assert_eq!(decision, AdmissionDecision::Permit);
        assert_eq!(decision.message(), None);
    }

    #[test]
    fn test_unlisted_key_not_authorized() {
        let (engine, _) = engine();
        let request =
            AdmissionRequest::authenticated(key_b(), Some(EventDescriptor::new(&key_a(), 1)));
        assert_eq!(
            engine.decide(&request),
            AdmissionDecision::Deny(DenyReason::NotAuthorized)
        );
    }

    #[test]
    fn test_decision_ignores_event_author() {
        let (engine, _) = engine();
        let outsider = PublicKey::from_bytes([0x99; 32]);

        for author in [key_a(), key_b(), outsider] {
            let request =
                AdmissionRequest::authenticated(key_a(), Some(EventDescriptor::new(&author, 7)));
            assert!(engine.decide(&request).is_permit(), "author {}", author);
        }

        let malformed_author =
            AdmissionRequest::authenticated(key_a(), Some(EventDescriptor::from_raw(Bytes::new(), 7)));
        assert!(engine.decide(&malformed_author).is_permit());
    }

    #[test]
    fn test_one_byte_difference_denied() {
        let (engine, _) = engine();
        let mut bytes = *key_a().as_bytes();
        bytes[31] ^= 0x80;
        let near_miss = PublicKey::from_bytes(bytes);

        let request =
            AdmissionRequest::authenticated(near_miss, Some(EventDescriptor::new(&near_miss, 1)));
        assert_eq!(
            engine.decide(&request),
            AdmissionDecision::Deny(DenyReason::NotAuthorized)
        );
    }

    #[test]
    fn test_unrecognized_auth_not_authorized() {
        let (engine, _) = engine();
        let request = AdmissionRequest::new(
            Authentication::from_bytes(Some(&key_a().as_bytes()[..31])),
            Some(EventDescriptor::new(&key_a(), 1)),
        );
        assert_eq!(
            engine.decide(&request),
            AdmissionDecision::Deny(DenyReason::NotAuthorized)
        );
    }

    #[test]
    fn test_empty_allowlist_denies_everyone() {
        let engine = AdmissionEngine::new(Allowlist::default());
        let request =
            AdmissionRequest::authenticated(key_a(), Some(EventDescriptor::new(&key_a(), 1)));
        assert_eq!(
            engine.decide(&request),
            AdmissionDecision::Deny(DenyReason::NotAuthorized)
        );
    }

    #[test]
    fn test_every_decision_audited_once() {
        let (engine, sink) = engine();

        let requests = [
            AdmissionRequest::anonymous(Some(EventDescriptor::new(&key_a(), 1))),
            AdmissionRequest::authenticated(key_a(), None),
            AdmissionRequest::authenticated(key_a(), Some(EventDescriptor::new(&key_b(), 1))),
            AdmissionRequest::authenticated(key_b(), Some(EventDescriptor::new(&key_a(), 1))),
        ];
        for (i, request) in requests.iter().enumerate() {
            engine.decide(request);
            assert_eq!(sink.len(), i + 1);
        }

        let records = sink.records();
        assert_eq!(records[0].decision, Verdict::Deny);
        assert_eq!(records[0].reason, Some(DenyReason::AuthRequired));
        assert_eq!(records[0].auth_pubkey, None);
        assert_eq!(records[0].event_pubkey, Some(key_a().to_hex()));

        assert_eq!(records[1].reason, Some(DenyReason::NoEvent));
        assert_eq!(records[1].event_pubkey, None);
        assert_eq!(records[1].kind, None);

        assert_eq!(records[2].decision, Verdict::Permit);
        assert_eq!(records[2].reason, None);
        assert_eq!(records[2].auth_pubkey, Some(key_a().to_hex()));
        assert_eq!(records[2].event_pubkey, Some(key_b().to_hex()));
        assert_eq!(records[2].kind, Some(1));

        assert_eq!(records[3].reason, Some(DenyReason::NotAuthorized));
        assert_eq!(records[3].auth_pubkey, Some(key_b().to_hex()));
    }

    #[test]
    fn test_evaluate_matches_decide() {
        let (engine, _) = engine();
        let request =
            AdmissionRequest::authenticated(key_b(), Some(EventDescriptor::new(&key_b(), 3)));
        assert_eq!(evaluate(engine.allowlist(), &request), engine.decide(&request));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AdmissionEngine>();
    }

    #[test]
    fn test_concurrent_decisions() {
        let (engine, sink) = engine();
        let engine = Arc::new(engine);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    let key = if i % 2 == 0 { key_a() } else { key_b() };
                    let request =
                        AdmissionRequest::authenticated(key, Some(EventDescriptor::new(&key, 1)));
                    (0..100).all(|_| engine.decide(&request).is_permit() == (i % 2 == 0))
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(sink.len(), 800);
    }
}
