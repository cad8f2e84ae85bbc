//! # relay-authz-rpc
//!
//! The admission protocol between a relay and the authorization service.
//!
//! The relay opens a TCP connection and sends one `EventRequest` per
//! candidate event; the service answers each with one `EventReply`. The
//! message schema is `proto/nauthz.proto`.
//!
//! ## Message Flow
//!
//! ```text
//! Relay                               Service
//!   |-------- EventRequest ----------->|
//!   |<------- EventReply --------------|   PERMIT
//!   |-------- EventRequest ----------->|
//!   |<------- EventReply --------------|   DENY + message
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use relay_authz_policy::{AdmissionEngine, Allowlist};
//! use relay_authz_rpc::{AuthorizationServer, ServerConfig};
//!
//! async fn example() -> relay_authz_rpc::Result<()> {
//!     let engine = Arc::new(AdmissionEngine::new(Allowlist::default()));
//!     let server = AuthorizationServer::bind("[::1]:50051", engine, ServerConfig::default()).await?;
//!     server.serve().await
//! }
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod messages;
pub mod server;

pub use client::AuthorizationClient;
pub use codec::{frame_codec, MessageStream, MAX_FRAME_SIZE};
pub use error::{Result, RpcError};
pub use messages::{Decision, Event, EventReply, EventRequest, Nip05Name, TagEntry};
pub use server::{event_admit, serve_connection, AuthorizationServer, ServerConfig};
