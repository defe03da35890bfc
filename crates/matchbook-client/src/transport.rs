//! WebSocket transport for the client.
//!
//! Provides [`ConnectedClient`] which handles WebSocket I/O for frame
//! transport. This is a thin layer that just sends/receives text frames -
//! protocol logic remains in the sans-IO [`Client`](crate::Client).

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connect(String),

    /// WebSocket protocol error.
    #[error("websocket error: {0}")]
    WebSocket(String),

    /// The bridging channel closed.
    #[error("transport channel closed")]
    ChannelClosed,
}

/// Handle to a connected client with WebSocket transport.
///
/// Provides channels for frame transport. Frames are sent/received via the
/// channels, and an internal task handles the socket I/O.
pub struct ConnectedClient {
    /// Send serialized frames to the server.
    pub to_server: mpsc::Sender<String>,
    /// Receive raw text frames from the server. Ends when the socket
    /// closes, which the caller should treat as the `closed` event.
    pub from_server: mpsc::Receiver<String>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedClient {
    /// Stop the connection.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connect to a lobby server via WebSocket.
///
/// Returns a [`ConnectedClient`] with channels for frame transport. A
/// successful return corresponds to the socket's `opened` event.
pub async fn connect(url: &str) -> Result<ConnectedClient, TransportError> {
    let (socket, _response) =
        connect_async(url).await.map_err(|e| TransportError::Connect(e.to_string()))?;

    let (to_server_tx, to_server_rx) = mpsc::channel::<String>(32);
    let (from_server_tx, from_server_rx) = mpsc::channel::<String>(32);

    // Spawn connection handler
    let handle = tokio::spawn(run_connection(socket, to_server_rx, from_server_tx));

    Ok(ConnectedClient {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Run the connection, bridging between channels and the socket.
///
/// Returning drops the `from_server` sender; the caller observes the
/// channel ending as the socket having closed.
async fn run_connection(
    socket: Socket,
    mut to_server: mpsc::Receiver<String>,
    from_server: mpsc::Sender<String>,
) {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            outgoing = to_server.recv() => {
                let Some(text) = outgoing else { break };
                if let Err(e) = sink.send(Message::Text(text.into())).await {
                    tracing::warn!("send failed: {e}");
                    break;
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        if from_server.send(text.to_string()).await.is_err() {
                            break;
                        }
                    },
                    Some(Ok(Message::Ping(payload))) => {
                        if let Err(e) = sink.send(Message::Pong(payload)).await {
                            tracing::warn!("pong failed: {e}");
                            break;
                        }
                    },
                    Some(Ok(Message::Pong(_) | Message::Frame(_))) => {},
                    Some(Ok(Message::Binary(_))) => {
                        tracing::warn!("unexpected binary frame");
                    },
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::warn!("receive failed: {e}");
                        break;
                    },
                }
            }
        }
    }
}
