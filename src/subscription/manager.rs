use crate::auth::Identity;
use crate::store::{PlantDeleted, PlantStore, ReadingUpdate};
use crate::subscription::protocol::{
    ClientMessage, ErrorMessage, PlantDeletedMessage, ReadingUpdateMessage,
};
use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Manages a single WebSocket connection with plant subscriptions
pub struct ConnectionManager {
    store: Arc<PlantStore>,

    /// Caller the connection was opened for
    identity: Identity,

    /// Set of plant IDs this connection is subscribed to
    subscriptions: HashSet<Uuid>,
}

impl ConnectionManager {
    pub fn new(store: Arc<PlantStore>, identity: Identity) -> Self {
        Self {
            store,
            identity,
            subscriptions: HashSet::new(),
        }
    }

    /// Handle WebSocket connection lifecycle
    pub async fn handle(
        mut self,
        mut socket: WebSocket,
        mut reading_rx: broadcast::Receiver<ReadingUpdate>,
        mut deletion_rx: broadcast::Receiver<PlantDeleted>,
    ) {
        info!(owner = ?self.identity.owner(), "WebSocket connection established");

        loop {
            tokio::select! {
                // Handle incoming client messages
                Some(msg) = socket.recv() => {
                    match msg {
                        Ok(Message::Text(text)) => {
                            if let Err(e) = self.handle_client_message(&mut socket, &text).await {
                                error!(error = %e, "Error handling client message");
                            }
                        }
                        Ok(Message::Close(_)) => {
                            info!("WebSocket client disconnected");
                            break;
                        }
                        Ok(Message::Ping(data)) => {
                            if let Err(e) = socket.send(Message::Pong(data)).await {
                                error!(error = %e, "Failed to send pong");
                                break;
                            }
                        }
                        Ok(_) => {
                            // Ignore binary, pong messages
                        }
                        Err(e) => {
                            warn!(error = %e, "WebSocket error");
                            break;
                        }
                    }
                }

                // Handle readings from broadcast channel
                result = reading_rx.recv() => {
                    match result {
                        Ok(update) => {
                            if self.should_forward(&update.plant_id, update.owner.as_deref()) {
                                let msg = ReadingUpdateMessage::from(update);
                                if let Err(e) = send_json(&mut socket, &msg).await {
                                    error!(error = %e, "Failed to send reading update");
                                    break;
                                }
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped = skipped, "WebSocket lagged, skipped reading updates");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            error!("Reading broadcast channel closed");
                            break;
                        }
                    }
                }

                // Handle plant deletions
                result = deletion_rx.recv() => {
                    match result {
                        Ok(deleted) => {
                            if self.should_forward(&deleted.plant_id, deleted.owner.as_deref()) {
                                self.subscriptions.remove(&deleted.plant_id);
                                let msg = PlantDeletedMessage::from(deleted);
                                if let Err(e) = send_json(&mut socket, &msg).await {
                                    error!(error = %e, "Failed to send deletion notice");
                                    break;
                                }
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped = skipped, "WebSocket lagged, skipped deletions");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            error!("Deletion broadcast channel closed");
                            break;
                        }
                    }
                }

                else => {
                    break;
                }
            }
        }

        info!("WebSocket connection closed");
    }

    /// Handle client message (subscribe/unsubscribe)
    async fn handle_client_message(
        &mut self,
        socket: &mut WebSocket,
        text: &str,
    ) -> anyhow::Result<()> {
        let msg = match serde_json::from_str::<ClientMessage>(text) {
            Ok(msg) => msg,
            Err(e) => {
                send_json(socket, &ErrorMessage::new(format!("Invalid message: {}", e))).await?;
                return Ok(());
            }
        };

        match self.apply(msg) {
            Ok(()) => Ok(()),
            Err(error) => send_json(socket, &error).await,
        }
    }

    /// Update subscriptions; subscribing to a plant the caller can't see is refused
    pub fn apply(&mut self, msg: ClientMessage) -> Result<(), ErrorMessage> {
        match msg {
            ClientMessage::Subscribe { plant_id } => {
                let visible = self
                    .store
                    .get_plant(&plant_id)
                    .is_some_and(|p| p.owner.as_deref() == self.identity.owner());
                if !visible {
                    return Err(ErrorMessage::new(format!("Plant {} not found", plant_id)));
                }
                info!(plant_id = %plant_id, "Client subscribed to plant");
                self.subscriptions.insert(plant_id);
            }
            ClientMessage::Unsubscribe { plant_id } => {
                info!(plant_id = %plant_id, "Client unsubscribed from plant");
                self.subscriptions.remove(&plant_id);
            }
        }
        Ok(())
    }

    /// Check if an event should be forwarded to this connection
    pub fn should_forward(&self, plant_id: &Uuid, owner: Option<&str>) -> bool {
        if owner != self.identity.owner() {
            return false;
        }

        // If no subscriptions, forward everything the caller owns
        self.subscriptions.is_empty() || self.subscriptions.contains(plant_id)
    }

    pub fn subscriptions(&self) -> &HashSet<Uuid> {
        &self.subscriptions
    }
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, msg: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string(msg)?;
    socket.send(Message::Text(json)).await?;
    Ok(())
}
