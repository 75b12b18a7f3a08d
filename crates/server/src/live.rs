// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live collection snapshots over WebSocket.
//!
//! Every successful write publishes the full contents of the collection it
//! touched. A client receives all three collections on connect and then
//! each new snapshot as it is published, so its view is always the latest
//! committed store contents.
//!
//! # Architecture
//!
//! - Snapshots are broadcast to all connected clients
//! - Snapshots are published only after the write commits
//! - No commands are executed over WebSocket connections

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use epica::Collection;
use epica_domain::{Edition, EditionFilter, Participant, Transaction};
use epica_persistence::{Persistence, PersistenceError};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Maximum number of snapshots to buffer in the broadcast channel.
/// Slow clients skip to newer snapshots.
const EVENT_BUFFER_SIZE: usize = 64;

/// Messages sent to live clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
    /// Every edition, ordered by id.
    EditionsSnapshot {
        /// The editions.
        editions: Vec<Edition>,
    },
    /// Every transaction, newest date first.
    TransactionsSnapshot {
        /// The transactions.
        transactions: Vec<Transaction>,
    },
    /// Every participant, in registration order.
    ParticipantsSnapshot {
        /// The participants.
        participants: Vec<Participant>,
    },
}

/// Reads the current contents of one collection as a live event.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn collection_snapshot(
    persistence: &mut Persistence,
    collection: Collection,
) -> Result<LiveEvent, PersistenceError> {
    Ok(match collection {
        Collection::Editions => LiveEvent::EditionsSnapshot {
            editions: persistence.list_editions()?,
        },
        Collection::Transactions => LiveEvent::TransactionsSnapshot {
            transactions: persistence.list_transactions(&EditionFilter::All)?,
        },
        Collection::Participants => LiveEvent::ParticipantsSnapshot {
            participants: persistence.list_participants(&EditionFilter::All)?,
        },
    })
}

/// Broadcaster for live snapshots.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that allows
/// multiple WebSocket clients to receive store changes.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    /// The broadcast channel sender.
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!("No receivers for live event");
            }
        }
    }

    /// Reads `collection` from the store and broadcasts it.
    ///
    /// The send happens before the store lock is released, so snapshots
    /// reach subscribers in the order they were read. Read failures are
    /// logged and nothing is sent.
    pub async fn publish_collection(&self, persistence: &Mutex<Persistence>, collection: Collection) {
        if self.tx.receiver_count() == 0 {
            return;
        }

        let mut persistence = persistence.lock().await;
        match collection_snapshot(&mut persistence, collection) {
            Ok(event) => self.broadcast(&event),
            Err(e) => warn!(%collection, error = %e, "Failed to read collection for live update"),
        }
    }

    /// Subscribes to the event stream.
    ///
    /// Returns a receiver that will receive all future events.
    /// Events sent before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles WebSocket upgrade requests for live snapshot streaming.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `app_state` - The application state
///
/// # Returns
///
/// An HTTP response that upgrades the connection to WebSocket
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(app_state): AxumState<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

/// Builds the events a new client receives before any update.
async fn initial_events(app_state: &AppState) -> Vec<LiveEvent> {
    let mut events: Vec<LiveEvent> = vec![LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    }];

    let mut persistence = app_state.persistence.lock().await;
    for collection in [
        Collection::Editions,
        Collection::Transactions,
        Collection::Participants,
    ] {
        match collection_snapshot(&mut persistence, collection) {
            Ok(event) => events.push(event),
            Err(e) => error!(%collection, error = %e, "Failed to read initial snapshot"),
        }
    }

    events
}

/// Handles an individual WebSocket connection.
///
/// Sends the initial snapshots, then streams every published snapshot
/// until the client disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, app_state: AppState) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    // Subscribe before reading so no commit between the two is missed.
    let mut rx: broadcast::Receiver<LiveEvent> = app_state.broadcaster.subscribe();

    for event in initial_events(&app_state).await {
        let Ok(json) = serde_json::to_string(&event) else {
            error!("Failed to serialize initial live event");
            continue;
        };
        if sender.send(Message::Text(json.into())).await.is_err() {
            warn!("Failed to send initial snapshot");
            return;
        }
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            let event: LiveEvent = match rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client lagged, skipping to newer snapshots");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };

            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}
