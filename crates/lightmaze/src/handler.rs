//! Per-connection handler: pump frames in both directions.
//!
//! Each accepted connection gets its own task running [`handle_connection`].
//! The socket is split: a spawned writer drains this client's event channel
//! into the sink, while this task reads frames, decodes intents, and feeds
//! them to the session actor. On any exit path the client is detached,
//! which releases its role claim.

use futures_util::{SinkExt, StreamExt};
use lightmaze_protocol::{
    ClientEvent, ClientId, Codec, JsonCodec, ServerEvent,
};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::TransportError;
use crate::actor::{EventSender, SessionHandle};
use crate::error::ServerError;
use crate::transport::WsStream;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    client: ClientId,
    ws: WsStream,
    session: SessionHandle,
    codec: JsonCodec,
) -> Result<(), ServerError> {
    let (mut ws_tx, mut ws_rx) = ws.split();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ServerEvent>();

    session.attach(client, event_tx.clone()).await;

    // Writer task: encode server events and push them down the socket.
    let writer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let bytes = match codec.encode(&event) {
                Ok(bytes) => bytes,
                Err(error) => {
                    tracing::warn!(%client, %error, "failed to encode event");
                    continue;
                }
            };
            if ws_tx.send(Message::Binary(bytes.into())).await.is_err() {
                break;
            }
        }
    });

    let result =
        read_loop(client, &mut ws_rx, &session, &codec, &event_tx).await;

    session.detach(client).await;
    // Dropping our sender lets the writer drain and exit once the actor's
    // copy is gone too.
    drop(event_tx);
    let _ = writer.await;

    result
}

/// Reads frames until the peer closes or the socket errors.
async fn read_loop(
    client: ClientId,
    ws_rx: &mut futures_util::stream::SplitStream<WsStream>,
    session: &SessionHandle,
    codec: &JsonCodec,
    replies: &EventSender,
) -> Result<(), ServerError> {
    while let Some(frame) = ws_rx.next().await {
        let data: Vec<u8> = match frame {
            Ok(Message::Binary(data)) => data.into(),
            Ok(Message::Text(text)) => text.as_bytes().to_vec(),
            Ok(Message::Close(_)) => {
                tracing::debug!(%client, "connection closed by peer");
                return Ok(());
            }
            Ok(_) => continue, // ping/pong/frame
            Err(e) => {
                return Err(ServerError::Transport(
                    TransportError::ReceiveFailed(e.to_string()),
                ));
            }
        };

        match codec.decode::<ClientEvent>(&data) {
            Ok(event) => session.intent(client, event).await,
            Err(error) => {
                // A malformed intent leaves state unchanged; report the
                // condition to its originator only.
                tracing::debug!(%client, %error, "malformed client frame");
                let _ = replies.send(ServerEvent::Error {
                    code: 400,
                    message: format!("invalid event: {error}"),
                });
            }
        }
    }

    tracing::debug!(%client, "connection stream ended");
    Ok(())
}
