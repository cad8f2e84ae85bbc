//! Error types for the service.

use relay_authz_core::EntryError;
use relay_authz_rpc::RpcError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the service from starting or serving.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration could not be loaded.
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),

    /// An `allowed_npubs` entry is not a valid npub.
    #[error("invalid allowlist: {0}")]
    Allowlist(#[from] EntryError),

    /// Binding or serving failed.
    #[error("server error: {0}")]
    Rpc(#[from] RpcError),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
