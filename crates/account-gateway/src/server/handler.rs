//! WebSocket handler
//!
//! Handles WebSocket connections and message processing.

use crate::connection::{generate_connection_id, Connection, InFlightEvent};
use crate::protocol::ClientFrame;
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, interval_at, Instant};

/// Channel buffer size for outgoing frames
const MESSAGE_BUFFER_SIZE: usize = 100;

/// Lower bound on how often the idle watchdog looks at a connection
const MIN_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let connection_id = generate_connection_id();
    let idle_timeout = state.config().gateway.connect_timeout();

    // Create channel for outgoing frames
    let (tx, mut rx) = mpsc::channel(MESSAGE_BUFFER_SIZE);

    // Register connection, logged out
    let connection = state
        .connection_manager()
        .add_connection(connection_id.clone(), tx);
    state.identity().connect(&connection_id);

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let state_recv = state.clone();
    let connection_recv = connection.clone();

    // Frames of one connection are handled one at a time, in order
    let mut recv_task = tokio::spawn(async move {
        let connection_id = connection_recv.id();
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    connection_recv.touch();
                    let in_flight = connection_recv.begin_event();

                    // Awaited to keep events in order; the spawned task still
                    // runs to completion if this one is aborted
                    let dispatch = tokio::spawn(handle_text_message(
                        state_recv.clone(),
                        connection_recv.clone(),
                        text,
                        in_flight,
                    ));
                    if let Err(e) = dispatch.await {
                        tracing::error!(
                            connection_id = %connection_id,
                            error = %e,
                            "Event task failed"
                        );
                    }
                }
                Ok(Message::Binary(_)) => {
                    connection_recv.touch();
                    tracing::debug!(
                        connection_id = %connection_id,
                        "Binary frames are not supported, dropping"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    connection_recv.touch();
                    tracing::trace!(connection_id = %connection_id, "Keepalive received");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(connection_id = %connection_id, "Client closed connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    let connection_id_send = connection_id.clone();
    let ping_every = (idle_timeout / 2).max(MIN_CHECK_INTERVAL);

    // Drain the outbound queue; ping so idle clients answer with a pong
    let mut send_task = tokio::spawn(async move {
        let mut pings = interval_at(Instant::now() + ping_every, ping_every);
        loop {
            let message = tokio::select! {
                frame = rx.recv() => match frame {
                    Some(frame) => match frame.to_json() {
                        Ok(json) => Message::Text(json),
                        Err(e) => {
                            tracing::error!(
                                connection_id = %connection_id_send,
                                error = %e,
                                "Failed to encode frame"
                            );
                            continue;
                        }
                    },
                    None => break,
                },
                _ = pings.tick() => Message::Ping(Vec::new()),
            };

            if ws_sink.send(message).await.is_err() {
                tracing::debug!(
                    connection_id = %connection_id_send,
                    "Failed to write to WebSocket"
                );
                break;
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    let connection_idle = connection.clone();

    // Drop connections that stay silent too long
    let mut idle_task = tokio::spawn(async move {
        let mut check_interval = interval((idle_timeout / 4).max(MIN_CHECK_INTERVAL));
        loop {
            check_interval.tick().await;

            let idle_for = connection_idle.idle_for();
            if idle_for > idle_timeout {
                tracing::info!(
                    connection_id = %connection_idle.id(),
                    idle_ms = idle_for.as_millis() as u64,
                    "Connection timed out"
                );
                break;
            }
        }
    });

    // Wait for any task to complete
    tokio::select! {
        _ = &mut recv_task => {
            tracing::debug!(connection_id = %connection_id, "Receive task ended");
        }
        _ = &mut send_task => {
            tracing::debug!(connection_id = %connection_id, "Send task ended");
        }
        _ = &mut idle_task => {
            tracing::debug!(connection_id = %connection_id, "Idle watchdog fired");
        }
    }

    recv_task.abort();
    send_task.abort();
    idle_task.abort();

    cleanup_connection(&state, &connection);
}

/// Parse and dispatch one text frame, replying if the client asked
///
/// The connection counts as active until `_in_flight` drops at the end.
async fn handle_text_message(
    state: GatewayState,
    connection: Arc<Connection>,
    text: String,
    _in_flight: InFlightEvent,
) {
    let frame = match ClientFrame::from_json(&text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(
                connection_id = %connection.id(),
                error = %e,
                "Dropping malformed frame"
            );
            return;
        }
    };

    let (event, payload, ack) = frame.into_parts();
    tracing::trace!(
        connection_id = %connection.id(),
        event = %event,
        ack = ?ack,
        "Received event"
    );

    let Some(reply) = state
        .dispatcher()
        .dispatch(connection.id(), &event, payload, ack)
        .await
    else {
        return;
    };

    if connection.send(reply).await.is_err() {
        tracing::debug!(
            connection_id = %connection.id(),
            event = %event,
            "Connection closed before reply"
        );
    }
}

/// Clean up a connection on disconnect
fn cleanup_connection(state: &GatewayState, connection: &Arc<Connection>) {
    let connection_id = connection.id();

    let account_id = state
        .identity()
        .disconnect(connection_id)
        .and_then(|session| session.account_id);
    state.context().limiters().forget(connection_id);
    state.connection_manager().remove_connection(connection_id);

    tracing::info!(
        connection_id = %connection_id,
        account_id = ?account_id,
        age_ms = connection.age().as_millis() as u64,
        "Connection closed"
    );
}
