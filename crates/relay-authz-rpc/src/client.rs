//! Client side of the admission protocol, as a relay would use it.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::codec::{MessageStream, MAX_FRAME_SIZE};
use crate::error::{Result, RpcError};
use crate::messages::{EventReply, EventRequest};

/// A connection to an authorization server.
///
/// Requests on one client are answered in order; open several clients for
/// parallel requests.
pub struct AuthorizationClient<S = TcpStream> {
    stream: MessageStream<S>,
}

impl AuthorizationClient<TcpStream> {
    /// Connect over TCP.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let socket = TcpStream::connect(addr).await?;
        socket.set_nodelay(true)?;
        Ok(Self::from_stream(socket))
    }
}

impl<S> AuthorizationClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an established byte stream.
    pub fn from_stream(io: S) -> Self {
        Self {
            stream: MessageStream::new(io, MAX_FRAME_SIZE),
        }
    }

    /// Ask whether the event in `request` may be published.
    pub async fn event_admit(&mut self, request: &EventRequest) -> Result<EventReply> {
        self.stream.send(request).await?;
        self.stream
            .recv::<EventReply>()
            .await?
            .ok_or(RpcError::ConnectionClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::frame_codec;
    use crate::messages::Decision;
    use futures::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio_util::codec::Framed;

    #[tokio::test]
    async fn test_closed_before_reply() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut framed = Framed::new(socket, frame_codec(MAX_FRAME_SIZE));
            // Read the request, then hang up without answering.
            let _ = framed.next().await;
        });

        let mut client = AuthorizationClient::connect(addr).await.unwrap();
        let err = client
            .event_admit(&EventRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::ConnectionClosed));
    }

    #[tokio::test]
    async fn test_oversized_reply_rejected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut framed = Framed::new(socket, frame_codec(usize::MAX >> 1));
            let _ = framed.next().await;
            let big = vec![0u8; MAX_FRAME_SIZE + 1];
            let _ = framed.send(bytes::Bytes::from(big)).await;
        });

        let mut client = AuthorizationClient::connect(addr).await.unwrap();
        let err = client
            .event_admit(&EventRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::FrameTooLarge), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_reply_decoded() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut stream = MessageStream::new(socket, MAX_FRAME_SIZE);
            while let Ok(Some(_)) = stream.recv::<EventRequest>().await {
                let reply = EventReply {
                    decision: Decision::Permit as i32,
                    message: None,
                };
                if stream.send(&reply).await.is_err() {
                    break;
                }
            }
        });

        let mut client = AuthorizationClient::connect(addr).await.unwrap();
        for _ in 0..3 {
            let reply = client.event_admit(&EventRequest::default()).await.unwrap();
            assert_eq!(reply.decision(), Decision::Permit);
        }
    }
}
