//! Communication bridge between frontend and backend.
//!
//! This crate defines the types and protocols used to connect the job-board
//! UI shell with an asynchronous backend responsible for the REST API calls
//! and the persistent real-time notification connection.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The frontend sends commands (e.g., subscribe to notifications, mark a
//!   notification read, refresh the list).
//! - The backend pushes events (e.g., fetched notification lists, pushed
//!   notifications, connection state changes, notices).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod config;
pub mod connection;
pub mod notice;
pub mod notification;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::notification::{Notification, NotificationId};

/// Messages emitted by the backend to inform the frontend of state updates.
///
/// These are typically sent in response to frontend requests or to push
/// asynchronous events (e.g., real-time notifications, connection drops).
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for transient UI notices (toasts) in the application.
    NoticeMessage(notice::Notice),
    /// Result of a pull-fetch: the full notification list, newest first.
    NotificationListResponse(Vec<Notification>),
    /// A single notification delivered over the real-time connection.
    NotificationPushed(Notification),
    /// The real-time connection went up or down.
    ConnectionStateUpdate(connection::ConnectionState),
}

/// Commands issued by the frontend to control or query the backend.
///
/// These messages drive the notification channel lifecycle.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// A consumer mounted and wants live notifications for this user.
    SubscribeNotifications(String),
    /// A consumer unmounted and no longer wants live notifications.
    UnsubscribeNotifications,
    /// Manual refresh: re-issue the pull-fetch without touching the
    /// subscription lifecycle.
    RefreshNotificationsRequest,
    /// Mark a notification as read server-side.
    MarkNotificationRead(NotificationId),
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
