//! Audit records for admission decisions.
//!
//! Every decision produces exactly one [`AuditRecord`]. The field set is
//! fixed so the audit stream can be diffed mechanically:
//!
//! | field          | present when            |
//! |----------------|-------------------------|
//! | `decision`     | always (`permit`/`deny`)|
//! | `reason`       | deny                    |
//! | `auth_pubkey`  | caller authenticated    |
//! | `event_pubkey` | request carried event   |
//! | `kind`         | request carried event   |
//!
//! Emission is best-effort: sinks cannot fail the decision path.

use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

use crate::request::{AdmissionDecision, AdmissionRequest, DenyReason};

/// `tracing` target for audit events.
pub const AUDIT_TARGET: &str = "relay_authz::audit";

/// Decision as it appears in the audit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Permit,
    Deny,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Permit => f.write_str("permit"),
            Verdict::Deny => f.write_str("deny"),
        }
    }
}

/// One audit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub decision: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_pubkey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_pubkey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<u64>,
}

impl AuditRecord {
    /// Build the record for a request and the decision reached on it.
    pub fn new(request: &AdmissionRequest, decision: &AdmissionDecision) -> Self {
        let verdict = if decision.is_permit() {
            Verdict::Permit
        } else {
            Verdict::Deny
        };

        Self {
            decision: verdict,
            reason: decision.reason(),
            auth_pubkey: request.auth.to_hex(),
            event_pubkey: request.event.as_ref().map(|e| e.author_hex()),
            kind: request.event.as_ref().map(|e| e.kind),
        }
    }
}

/// Destination for audit records.
pub trait AuditSink: Send + Sync {
    /// Deliver one record. Must not block for long and cannot fail.
    fn record(&self, record: &AuditRecord);
}

/// Emits each record as a structured `tracing` event at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &AuditRecord) {
        let summary = match record.reason {
            None => "PERMIT: publishing event",
            Some(DenyReason::AuthRequired) => "DENY: no NIP-42 authentication",
            Some(DenyReason::NoEvent) => "DENY: no event provided",
            Some(DenyReason::NotAuthorized) => "DENY: authenticated pubkey not allowed",
        };

        tracing::info!(
            target: AUDIT_TARGET,
            decision = %record.decision,
            reason = record.reason.map(|r| r.as_str()),
            auth_pubkey = record.auth_pubkey.as_deref(),
            event_pubkey = record.event_pubkey.as_deref(),
            kind = record.kind,
            "{}",
            summary
        );
    }
}

/// Keeps records in memory. For tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &AuditRecord) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
    }
}
