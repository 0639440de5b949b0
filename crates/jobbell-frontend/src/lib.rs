//! Headless frontend surface for the notification channel.
//!
//! This crate holds the consumer side of the bridge: a typed command sender
//! ([`BackendBridge`]), the renderable notification state
//! ([`entities::notifications_entity::NotificationsEntity`]), and the
//! dropdown view-model that drives the subscription lifecycle on
//! mount/unmount. [`run`] is the shell used by the binary: it mounts one
//! dropdown and applies backend events as they arrive.

pub mod entities;
pub mod views;

use jobbell_bridge::notification::NotificationId;
use tokio::sync::mpsc;

use crate::entities::notifications_entity::NotificationsEntity;
use crate::views::dropdown::NotificationDropdown;

#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<jobbell_bridge::MessageToBackend>,
}

impl BackendBridge {
    pub async fn subscribe_notifications(&self, user_id: String) {
        self.to_backend
            .send(jobbell_bridge::MessageToBackend::SubscribeNotifications(
                user_id,
            ))
            .await
            .expect("failed to request notification subscription");
    }

    pub async fn unsubscribe_notifications(&self) {
        self.to_backend
            .send(jobbell_bridge::MessageToBackend::UnsubscribeNotifications)
            .await
            .expect("failed to release notification subscription");
    }

    pub async fn refresh_notifications(&self) {
        self.to_backend
            .send(jobbell_bridge::MessageToBackend::RefreshNotificationsRequest)
            .await
            .expect("failed to request notification refresh");
    }

    pub async fn mark_notification_read(&self, id: NotificationId) {
        self.to_backend
            .send(jobbell_bridge::MessageToBackend::MarkNotificationRead(id))
            .await
            .expect("failed to request mark-read");
    }
}

/// Run the frontend shell until the backend bridge closes.
///
/// The user identity comes from `JOBBELL_USER_ID`; without one the dropdown
/// stays unregistered and only renders an empty state, mirroring a
/// signed-out header.
pub fn run(
    mut rx: mpsc::Receiver<jobbell_bridge::MessageFromBackend>,
    tx: mpsc::Sender<jobbell_bridge::MessageToBackend>,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let bridge = BackendBridge { to_backend: tx };
        let mut entity = NotificationsEntity::default();
        let mut dropdown =
            NotificationDropdown::new(bridge.clone(), std::env::var("JOBBELL_USER_ID").ok());
        dropdown.mount().await;

        while let Some(message) = rx.recv().await {
            log::debug!("Got a message from backend: {message:?}");
            entity.apply(message);
            if entity.store.is_empty() {
                log::info!("Notifications: none, connection {:?}", entity.connection);
            } else {
                log::info!(
                    "Notifications: {} total, {} unread, connection {:?}",
                    entity.store.items().len(),
                    entity.store.unread_count(),
                    entity.connection,
                );
            }
        }

        log::info!("Backend bridge closed; shutting down frontend");
    });

    Ok(())
}
