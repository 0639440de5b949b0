//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! events and notices back to the frontend bridge.

use std::sync::Arc;

use jobbell_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch messages from the frontend bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers. Runs one message at a time, which is what
    /// serializes all subscription lifecycle transitions.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::SubscribeNotifications(user_id) => {
                services::notification_service::handle_subscribe(self.clone(), user_id).await;
            }
            MessageToBackend::UnsubscribeNotifications => {
                services::notification_service::handle_unsubscribe(self.clone()).await;
            }
            MessageToBackend::RefreshNotificationsRequest => {
                services::notification_service::handle_refresh(self.clone()).await;
            }
            MessageToBackend::MarkNotificationRead(id) => {
                services::notification_service::handle_mark_read(self.clone(), id).await;
            }
        }
    }

    /// Send a message to the frontend bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        self.tx
            .send(message)
            .await
            .expect("failed to send message to frontend");
    }

    /// Send a transient notice (toast) to the frontend bridge.
    pub async fn send_notice(
        &self,
        level: jobbell_bridge::notice::NoticeLevel,
        content: impl Into<String>,
    ) {
        self.send(MessageFromBackend::NoticeMessage(
            jobbell_bridge::notice::Notice {
                level,
                message: content.into(),
            },
        ))
        .await;
    }
}
