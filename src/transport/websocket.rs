use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;

use std::sync::{Arc, Mutex};

use crate::connection::Connection;
use crate::hub::Hub;
use crate::transport::message::ClientMessage;

/// What to do with the connection after one inbound text frame.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Inbound {
    Continue,
    Close,
}

pub async fn start_websocket_server(addr: &str, hub: Arc<Mutex<Hub>>) {
    let listener = TcpListener::bind(addr).await.expect("Can't bind");

    info!("WebSocket server listening on ws://{addr}");

    serve(listener, hub).await;
}

/// Accept loop over an already-bound listener; one task per connection.
pub async fn serve(listener: TcpListener, hub: Arc<Mutex<Hub>>) {
    while let Ok((stream, _)) = listener.accept().await {
        let hub = hub.clone();
        tokio::spawn(handle_connection(stream, hub));
    }
}

async fn handle_connection(stream: TcpStream, hub: Arc<Mutex<Hub>>) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake error: {e}");
            return;
        }
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Channel drained by this connection's forward task
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    let connection = Connection::new(tx);
    let conn_id = connection.id.clone();

    // Forward messages from hub → client
    let forward_id = conn_id.clone();
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = ws_sender.send(msg).await {
                debug!("send loop for {forward_id} closed: {e}");
                break;
            }
        }
    });

    // The connection is handed to the hub on its init message; until then
    // it stays here, unregistered.
    let mut pending = Some(connection);

    while let Some(Ok(msg)) = ws_receiver.next().await {
        if !msg.is_text() {
            continue;
        }
        let Ok(text) = msg.to_text() else { continue };
        if process_text(&hub, &conn_id, &mut pending, text) == Inbound::Close {
            break;
        }
    }

    debug!("{conn_id} disconnected");

    // Single cleanup path, also safe when the init never arrived.
    hub.lock().unwrap().unregister(&conn_id);
}

/// Handles one inbound text frame against the connection's lifecycle state.
///
/// `pending` holds the connection until its init message registers it; a
/// rejected init closes the connection, everything else is ignored.
pub(crate) fn process_text(
    hub: &Arc<Mutex<Hub>>,
    conn_id: &str,
    pending: &mut Option<Connection>,
    text: &str,
) -> Inbound {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Init { keywords }) => {
            let Some(connection) = pending.take() else {
                debug!("{conn_id} sent another init, ignoring");
                return Inbound::Continue;
            };
            match hub.lock().unwrap().register(connection, &keywords) {
                Ok(()) => {
                    info!("{conn_id} subscribed to {keywords:?}");
                    Inbound::Continue
                }
                Err(e) => {
                    warn!("closing {conn_id}: {e}");
                    Inbound::Close
                }
            }
        }
        Err(e) => {
            debug!("ignoring unrecognized message from {conn_id}: {e}");
            Inbound::Continue
        }
    }
}
