use jobbell_bridge::notification::NotificationId;

use crate::BackendBridge;
use crate::entities::notifications_entity::NotificationsEntity;

/// View-model of the notification bell dropdown.
///
/// Each mounted instance registers interest in notifications exactly once
/// and releases it exactly once, no matter how it is driven:
/// `Unmounted -> Mounted/Registered -> Unmounted`. Mounting without a user
/// identity (signed-out header) registers nothing, and the later unmount is
/// then a no-op too.
pub struct NotificationDropdown {
    bridge: BackendBridge,
    user_id: Option<String>,
    registered: bool,
}

impl NotificationDropdown {
    pub fn new(bridge: BackendBridge, user_id: Option<String>) -> Self {
        Self {
            bridge,
            user_id,
            registered: false,
        }
    }

    /// Declare interest in notifications. Subscribing performs the acquire
    /// and, for the first consumer, the initial pull-fetch backend-side.
    pub async fn mount(&mut self) {
        if self.registered {
            return;
        }
        let Some(user_id) = self.user_id.clone() else {
            return;
        };
        self.bridge.subscribe_notifications(user_id).await;
        self.registered = true;
    }

    /// Release interest in notifications.
    pub async fn unmount(&mut self) {
        if !self.registered {
            return;
        }
        self.bridge.unsubscribe_notifications().await;
        self.registered = false;
    }

    /// Manual refresh: re-issue the pull-fetch without touching the
    /// subscription lifecycle.
    pub async fn refresh(&self) {
        self.bridge.refresh_notifications().await;
    }

    /// Handle a click on a list item: flip the read flag locally first
    /// (optimistic), then tell the server. Clicks on already-read items do
    /// nothing.
    pub async fn click(&self, entity: &mut NotificationsEntity, id: NotificationId) {
        if entity.store.mark_read(id) {
            self.bridge.mark_notification_read(id).await;
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}
