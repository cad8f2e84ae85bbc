//! Service wiring: configuration in, listening server out.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use relay_authz_policy::{AdmissionEngine, Allowlist, AuditSink};
use relay_authz_rpc::{AuthorizationServer, ServerConfig};
use tracing::info;

use crate::config::Config;
use crate::error::Result;

/// A configured authorization service, not yet listening.
#[derive(Debug)]
pub struct Service {
    engine: Arc<AdmissionEngine>,
    listen_address: String,
    server: ServerConfig,
}

impl Service {
    /// Build the service from configuration.
    ///
    /// # Errors
    ///
    /// Fails on the first `allowed_npubs` entry that is not a valid npub;
    /// the error names the entry's index.
    pub fn from_config(config: &Config) -> Result<Self> {
        let allowlist = Allowlist::from_npubs(&config.allowed_npubs)?;
        info!(allowed_keys = allowlist.len(), "allowlist loaded");
        Ok(Self::new(AdmissionEngine::new(allowlist), &config.listen_address))
    }

    /// Like [`Service::from_config`], with a custom audit sink.
    pub fn with_audit_sink(config: &Config, audit: Arc<dyn AuditSink>) -> Result<Self> {
        let allowlist = Allowlist::from_npubs(&config.allowed_npubs)?;
        Ok(Self::new(
            AdmissionEngine::with_audit_sink(allowlist, audit),
            &config.listen_address,
        ))
    }

    fn new(engine: AdmissionEngine, listen_address: &str) -> Self {
        Self {
            engine: Arc::new(engine),
            listen_address: listen_address.to_string(),
            server: ServerConfig::default(),
        }
    }

    /// Override the server limits.
    pub fn server_config(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }

    pub fn engine(&self) -> &Arc<AdmissionEngine> {
        &self.engine
    }

    pub fn listen_address(&self) -> &str {
        &self.listen_address
    }

    /// Bind the listen address.
    pub async fn bind(self) -> Result<BoundService> {
        let server = AuthorizationServer::bind(
            self.listen_address.as_str(),
            Arc::clone(&self.engine),
            self.server,
        )
        .await?;
        Ok(BoundService { server })
    }

    /// Bind and serve until the process exits.
    pub async fn run(self) -> Result<()> {
        self.bind().await?.serve().await
    }
}

/// A service with its listen socket bound.
pub struct BoundService {
    server: AuthorizationServer,
}

impl BoundService {
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.server.local_addr()?)
    }

    pub async fn serve(self) -> Result<()> {
        Ok(self.server.serve().await?)
    }

    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        Ok(self.server.serve_with_shutdown(shutdown).await?)
    }
}
