use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side identifier of a notification.
pub type NotificationId = i64;

/// A notification as stored and delivered by the job-board server.
///
/// Both delivery paths use the same shape: the pull-fetch endpoint returns a
/// JSON array of these, and the real-time connection pushes them one at a
/// time. The only field the client ever mutates is [`Notification::is_read`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier assigned by the server.
    #[serde(rename = "notificationId")]
    pub id: NotificationId,
    /// Short heading shown in the dropdown list.
    pub title: String,
    /// Full message body.
    pub message: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether the user has already read this notification.
    pub is_read: bool,
    /// Optional reference to the related item (job post, application, ...)
    /// used for navigation on click.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_item_id: Option<i64>,
}
