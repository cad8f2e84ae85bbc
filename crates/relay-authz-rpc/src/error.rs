//! Error types for the wire protocol.

use std::io;

use thiserror::Error;
use tokio_util::codec::LengthDelimitedCodecError;

/// Errors on an admission connection.
///
/// A policy denial is never one of these: it travels as a normal
/// [`EventReply`](crate::messages::EventReply).
#[derive(Debug, Error)]
pub enum RpcError {
    /// Could not bind the listen address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Socket-level failure.
    #[error("i/o error: {0}")]
    Io(io::Error),

    /// Peer announced a frame above the configured limit.
    #[error("frame exceeds the maximum frame size")]
    FrameTooLarge,

    /// Frame payload is not a valid protobuf message.
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Peer closed the connection before replying.
    #[error("connection closed")]
    ConnectionClosed,
}

impl From<io::Error> for RpcError {
    fn from(e: io::Error) -> Self {
        let oversized = e
            .get_ref()
            .map_or(false, |inner| inner.is::<LengthDelimitedCodecError>());
        if oversized {
            RpcError::FrameTooLarge
        } else {
            RpcError::Io(e)
        }
    }
}

/// Result type for wire operations.
pub type Result<T> = std::result::Result<T, RpcError>;
