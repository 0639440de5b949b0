use jobbell_bridge::{MessageFromBackend, connection::ConnectionState, notice::Notice};
use jobbell_live::NotificationStore;

/// Renderable notification state shared by all dropdown instances.
///
/// Backend messages are funneled through [`NotificationsEntity::apply`];
/// nothing else mutates the store, which keeps every write going through
/// the store's own operations.
#[derive(Debug, Default)]
pub struct NotificationsEntity {
    pub store: NotificationStore,
    pub connection: ConnectionState,
    /// Most recent transient notice (e.g. a failed fetch), for the toast
    /// layer to pick up.
    pub last_notice: Option<Notice>,
}

impl NotificationsEntity {
    pub fn apply(&mut self, message: MessageFromBackend) {
        match message {
            MessageFromBackend::NotificationListResponse(notifications) => {
                self.store.replace_all(notifications);
            }
            MessageFromBackend::NotificationPushed(notification) => {
                self.store.prepend(notification);
            }
            MessageFromBackend::ConnectionStateUpdate(state) => {
                self.connection = state;
            }
            MessageFromBackend::NoticeMessage(notice) => {
                self.last_notice = Some(notice);
            }
        }
    }
}
