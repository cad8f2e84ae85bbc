//! # relay-authz policy
//!
//! Allowlist admission decisions for NIP-42 authenticated publishers.
//!
//! ## Overview
//!
//! The relay asks one question per event: may the authenticated caller
//! publish it? The answer depends only on whether the caller's pubkey is on
//! the [`Allowlist`]. The event's own author key is recorded for audit but
//! never consulted, so an allowlisted identity can relay events written by
//! anyone.
//!
//! ## Key Types
//!
//! - [`Allowlist`] - immutable set of permitted keys
//! - [`AdmissionRequest`] - authenticated identity plus optional event
//! - [`AdmissionDecision`] - `Permit` or `Deny(reason)`; a denial is not an error
//! - [`AdmissionEngine`] - [`evaluate`] plus one [`AuditRecord`] per call
//!
//! ## Usage
//!
//! ```rust
//! use relay_authz_policy::{
//!     AdmissionDecision, AdmissionEngine, AdmissionRequest, Allowlist, EventDescriptor,
//! };
//!
//! let allowlist = Allowlist::from_npubs([
//!     "npub1mkq63wkt4v94cvq869njlwpszwpmf62c84p3sdvc2ptjy04jnzjs20r4tx",
//! ])
//! .unwrap();
//! let caller = *allowlist.iter().next().unwrap();
//! let engine = AdmissionEngine::new(allowlist);
//!
//! let request = AdmissionRequest::authenticated(caller, Some(EventDescriptor::new(&caller, 1)));
//! assert_eq!(engine.decide(&request), AdmissionDecision::Permit);
//! ```

pub mod allowlist;
pub mod audit;
pub mod engine;
pub mod request;

pub use allowlist::Allowlist;
pub use audit::{AuditRecord, AuditSink, MemoryAuditSink, TracingAuditSink, Verdict, AUDIT_TARGET};
pub use engine::{evaluate, AdmissionEngine};
pub use request::{AdmissionDecision, AdmissionRequest, Authentication, DenyReason, EventDescriptor};
