//! End-to-end decision scenarios against the public API.

use relay_authz::core::{nip19, DecodeError, Nip19Kind};
use relay_authz::policy::{
    AdmissionDecision, AdmissionRequest, Authentication, DenyReason, EventDescriptor, Verdict,
};
use relay_authz::{Allowlist, Config, Service, ServiceError};
use relay_authz_testkit::fixtures::{key, TestFixture, HEX_A, HEX_B, NPUB_A, NPUB_B, NSEC};

#[test]
fn decode_allowlisted_npub() {
    let decoded = nip19::decode_public_key(NPUB_A).unwrap();
    assert_eq!(decoded.to_hex(), HEX_A);
}

#[test]
fn decode_garbage_is_malformed() {
    let err = nip19::decode_public_key("invalid").unwrap_err();
    assert!(matches!(err, DecodeError::MalformedEncoding(_)), "{:?}", err);
}

#[test]
fn decode_nsec_is_unexpected_kind() {
    let err = nip19::decode_public_key(NSEC).unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnexpectedKind {
            expected: Nip19Kind::Npub,
            found: Nip19Kind::Nsec,
        }
    );
}

#[test]
fn anonymous_caller_must_authenticate() {
    let fixture = TestFixture::new();
    let decision = fixture.decide(&AdmissionRequest::anonymous(Some(EventDescriptor::new(
        &fixture.outsider,
        1,
    ))));
    assert_eq!(decision, AdmissionDecision::Deny(DenyReason::AuthRequired));
    assert!(decision
        .message()
        .unwrap()
        .contains("authentication required"));
}

#[test]
fn missing_event_is_blocked() {
    let fixture = TestFixture::new();
    let decision = fixture.decide(&AdmissionRequest::authenticated(fixture.allowed, None));
    assert_eq!(decision, AdmissionDecision::Deny(DenyReason::NoEvent));
    assert!(decision.message().unwrap().contains("No event"));
}

#[test]
fn allowlisted_identity_publishes_foreign_event() {
    let fixture = TestFixture::new();
    let decision = fixture.decide_as(fixture.allowed, fixture.outsider);
    assert_eq!(decision, AdmissionDecision::Permit);
    assert_eq!(decision.message(), None);
}

#[test]
fn unlisted_identity_is_not_authorized() {
    let fixture = TestFixture::new();
    let decision = fixture.decide_as(fixture.outsider, fixture.allowed);
    assert_eq!(decision, AdmissionDecision::Deny(DenyReason::NotAuthorized));
    assert!(decision.message().unwrap().contains("not authorized"));

    // The offending identity lands in the audit trail.
    let records = fixture.audit.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].decision, Verdict::Deny);
    assert_eq!(records[0].auth_pubkey.as_deref(), Some(HEX_B));
    assert_eq!(records[0].event_pubkey.as_deref(), Some(HEX_A));
}

#[test]
fn author_never_affects_permit() {
    let fixture = TestFixture::new();
    let stranger = relay_authz::PublicKey::from_bytes([0x42; 32]);
    for author in [fixture.allowed, fixture.outsider, stranger] {
        assert!(fixture.decide_as(fixture.allowed, author).is_permit());
    }
}

#[test]
fn empty_auth_bytes_equal_absent() {
    let fixture = TestFixture::new();
    let event = Some(EventDescriptor::new(&fixture.allowed, 1));
    let absent = fixture.decide(&AdmissionRequest::new(Authentication::from_bytes(None), event.clone()));
    let empty = fixture.decide(&AdmissionRequest::new(
        Authentication::from_bytes(Some(&[])),
        event,
    ));
    assert_eq!(absent, empty);
    assert_eq!(absent, AdmissionDecision::Deny(DenyReason::AuthRequired));
}

#[test]
fn config_to_decisions() {
    let config = Config {
        allowed_npubs: vec![NPUB_A.to_string()],
        ..Config::default()
    };
    let service = Service::from_config(&config).unwrap();
    let allowlist = service.engine().allowlist();
    assert!(allowlist.contains(&key(NPUB_A)));
    assert!(!allowlist.contains(&key(NPUB_B)));
}

#[test]
fn config_with_nsec_refuses_to_start() {
    let config = Config {
        allowed_npubs: vec![NPUB_A.to_string(), NSEC.to_string()],
        ..Config::default()
    };
    let err = Service::from_config(&config).unwrap_err();
    match err {
        ServiceError::Allowlist(entry) => {
            assert_eq!(entry.index, 1);
            assert!(entry.source.is_unexpected_kind());
        }
        other => panic!("expected allowlist error, got {:?}", other),
    }
}

#[test]
fn empty_allowlist_denies_everyone() {
    let fixture = TestFixture::with_allowlist(Allowlist::from_npubs(Vec::<String>::new()).unwrap());
    assert!(fixture.decide_as(fixture.allowed, fixture.allowed).is_deny());
    assert!(fixture.decide_as(fixture.outsider, fixture.outsider).is_deny());
}
