//! # relay-authz
//!
//! NIP-42 allowlist authorization service for Nostr relays.
//!
//! A relay forwards every candidate event together with the pubkey the
//! connection authenticated as (NIP-42). The service permits the event
//! when that pubkey is on the configured allowlist and denies it with a
//! relay-facing message otherwise. Who *authored* the event is not
//! consulted: an allowlisted identity may republish anyone's events.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use relay_authz::{Config, Service};
//!
//! async fn example() -> relay_authz::Result<()> {
//!     let config = Config::from_file("policy-config.toml".as_ref())?;
//!     relay_authz::init_logging(config.level());
//!     Service::from_config(&config)?.run().await
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `relay_authz::core` - public keys and NIP-19 decoding
//! - `relay_authz::policy` - allowlist, admission engine, audit
//! - `relay_authz::rpc` - wire messages, server and client

pub mod config;
pub mod error;
pub mod logging;
pub mod service;

pub use relay_authz_core as core;
pub use relay_authz_policy as policy;
pub use relay_authz_rpc as rpc;

pub use config::{parse_log_level, Config, ConfigError, DEFAULT_CONFIG_FILE};
pub use error::{Result, ServiceError};
pub use logging::init_logging;
pub use service::{BoundService, Service};

pub use relay_authz_core::{PublicKey, DecodeError, EntryError};
pub use relay_authz_policy::{AdmissionDecision, AdmissionEngine, AdmissionRequest, Allowlist, DenyReason};
