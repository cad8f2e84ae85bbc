//! TCP server for the admission protocol.
//!
//! One tokio task per connection, bounded by a semaphore. Every task
//! shares the same [`AdmissionEngine`] through an `Arc`; the engine is
//! immutable, so no locking is involved on the request path.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use relay_authz_policy::AdmissionEngine;

use crate::codec::{MessageStream, MAX_FRAME_SIZE};
use crate::error::{Result, RpcError};
use crate::messages::{EventReply, EventRequest};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum concurrently served connections.
    pub max_connections: usize,
    /// Maximum frame size accepted from clients.
    pub max_frame_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_connections: 1024,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

/// Answer one wire request.
pub fn event_admit(engine: &AdmissionEngine, request: &EventRequest) -> EventReply {
    EventReply::from(engine.decide(&request.admission_request()))
}

/// Serve requests on one connection until the peer closes it.
///
/// Returns an error on a transport fault or an undecodable frame; the
/// caller drops the connection in that case.
pub async fn serve_connection<S>(io: S, engine: &AdmissionEngine, max_frame_size: usize) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut stream = MessageStream::new(io, max_frame_size);
    while let Some(request) = stream.recv::<EventRequest>().await? {
        let reply = event_admit(engine, &request);
        stream.send(&reply).await?;
    }
    Ok(())
}

/// A bound admission server.
pub struct AuthorizationServer {
    listener: TcpListener,
    engine: Arc<AdmissionEngine>,
    config: ServerConfig,
}

impl AuthorizationServer {
    /// Bind the listen address.
    pub async fn bind<A>(addr: A, engine: Arc<AdmissionEngine>, config: ServerConfig) -> Result<Self>
    where
        A: ToSocketAddrs + std::fmt::Display,
    {
        let listener = TcpListener::bind(&addr).await.map_err(|source| RpcError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        Ok(Self {
            listener,
            engine,
            config,
        })
    }

    /// The address actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the process exits.
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves. In-flight connections are left to
    /// finish on their own tasks.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let permits = Arc::new(Semaphore::new(self.config.max_connections));
        tokio::pin!(shutdown);

        if let Ok(addr) = self.listener.local_addr() {
            info!(%addr, allowed_keys = self.engine.allowlist().len(), "authorization server listening");
        }

        loop {
            let permit = tokio::select! {
                _ = &mut shutdown => break,
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let (socket, peer) = tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        warn!(error = %e, "accept failed");
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        continue;
                    }
                },
            };

            let engine = Arc::clone(&self.engine);
            let max_frame_size = self.config.max_frame_size;
            tokio::spawn(async move {
                let _permit = permit;
                debug!(%peer, "connection opened");
                match serve_connection(socket, &engine, max_frame_size).await {
                    Ok(()) => debug!(%peer, "connection closed"),
                    Err(e) => warn!(%peer, error = %e, "connection dropped"),
                }
            });
        }

        info!("authorization server stopped");
        Ok(())
    }
}
