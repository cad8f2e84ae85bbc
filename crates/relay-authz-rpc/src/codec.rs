//! Length-delimited framing.
//!
//! ```text
//! +----------------------------+------------------+
//! | Length (4 bytes, BE)       | protobuf message |
//! +----------------------------+------------------+
//! ```
//!
//! A connection is a sequence of `EventRequest` frames from the client,
//! each answered by exactly one `EventReply` frame, in order.

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use prost::Message;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Framed, LengthDelimitedCodec};

use crate::error::{Result, RpcError};

/// Default maximum frame size (1 MiB). Events are far smaller.
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Build the frame codec with the given size limit.
pub fn frame_codec(max_frame_size: usize) -> LengthDelimitedCodec {
    LengthDelimitedCodec::builder()
        .length_field_length(4)
        .max_frame_length(max_frame_size)
        .new_codec()
}

/// A framed protobuf message stream over any byte transport.
pub struct MessageStream<S> {
    framed: Framed<S, LengthDelimitedCodec>,
}

impl<S> MessageStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(io: S, max_frame_size: usize) -> Self {
        Self {
            framed: Framed::new(io, frame_codec(max_frame_size)),
        }
    }

    /// Read the next message; `None` when the peer closed cleanly.
    pub async fn recv<M: Message + Default>(&mut self) -> Result<Option<M>> {
        match self.framed.next().await {
            Some(frame) => {
                let frame = frame?;
                Ok(Some(M::decode(frame.freeze())?))
            }
            None => Ok(None),
        }
    }

    /// Write one message as a frame.
    pub async fn send<M: Message>(&mut self, message: &M) -> Result<()> {
        self.framed
            .send(Bytes::from(message.encode_to_vec()))
            .await
            .map_err(RpcError::from)
    }
}
