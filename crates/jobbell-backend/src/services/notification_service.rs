use jobbell_bridge::{
    MessageFromBackend,
    connection::ConnectionState,
    notice::NoticeLevel,
    notification::NotificationId,
};
use jobbell_live::{AcquireOutcome, PushHandler, ReleaseOutcome};

/// Handles a consumer mounting (see
/// [`jobbell_bridge::MessageToBackend::SubscribeNotifications`]).
///
/// The registry transition happens synchronously under the state lock; the
/// initial pull-fetch, when one is due, runs as a spawned task so it never
/// blocks later lifecycle messages.
pub async fn handle_subscribe(context: super::AppContextHandle, user_id: String) {
    let outcome = {
        let mut state = context.state.write().await;
        let push_tx = context.tx.clone();
        let handler: PushHandler = Box::new(move |notification| {
            let message = MessageFromBackend::NotificationPushed(notification);
            if push_tx.try_send(message).is_err() {
                log::warn!("Dropping pushed notification: frontend bridge is full or closed");
            }
        });
        state.registry.acquire(&user_id, handler)
    };

    match outcome {
        Ok(AcquireOutcome::Started) => {
            context
                .send(MessageFromBackend::ConnectionStateUpdate(
                    ConnectionState::Connected,
                ))
                .await;
            spawn_notification_fetch(context, user_id);
        }
        Ok(AcquireOutcome::Joined) => {
            log::debug!("Consumer joined the active notification subscription for {user_id}");
        }
        Err(error) => {
            log::error!("Failed to start realtime connection for {user_id}: {error}");
            context
                .send(MessageFromBackend::ConnectionStateUpdate(
                    ConnectionState::Disconnected,
                ))
                .await;
        }
    }
}

/// Handles a consumer unmounting (see
/// [`jobbell_bridge::MessageToBackend::UnsubscribeNotifications`]).
pub async fn handle_unsubscribe(context: super::AppContextHandle) {
    let outcome = {
        let mut state = context.state.write().await;
        state.registry.release()
    };

    if let ReleaseOutcome::Stopped = outcome {
        context
            .send(MessageFromBackend::ConnectionStateUpdate(
                ConnectionState::Disconnected,
            ))
            .await;
    }
}

/// Handles a manual refresh (see
/// [`jobbell_bridge::MessageToBackend::RefreshNotificationsRequest`]).
/// Re-issues the pull-fetch without touching the subscription lifecycle.
pub async fn handle_refresh(context: super::AppContextHandle) {
    let identity = {
        let state = context.state.read().await;
        state.registry.identity().map(str::to_string)
    };

    match identity {
        Some(user_id) => spawn_notification_fetch(context, user_id),
        None => log::debug!("Ignoring refresh with no active subscription"),
    }
}

/// Handles a mark-read request (see
/// [`jobbell_bridge::MessageToBackend::MarkNotificationRead`]).
///
/// The frontend has already applied the read flag optimistically; a server
/// failure is non-critical and is not rolled back.
pub async fn handle_mark_read(context: super::AppContextHandle, id: NotificationId) {
    let api = {
        let state = context.state.read().await;
        state.api.clone()
    };

    if let Err(error) = api.mark_read(id).await {
        log::warn!("Failed to mark notification {id} as read: {error}");
    }
}

/// Issue the pull-fetch for `user_id` in the background and forward the
/// result to the frontend.
///
/// A result arriving after the subscription was torn down or handed to a
/// different user is discarded instead of being applied as a late write.
fn spawn_notification_fetch(context: super::AppContextHandle, user_id: String) {
    tokio::spawn(async move {
        let api = {
            let state = context.state.read().await;
            state.api.clone()
        };

        match api.fetch_notifications(&user_id).await {
            Ok(notifications) => {
                // The read guard stays held across the send so an identity
                // switch cannot slip in between the staleness check and the
                // delivery; the dispatch loop's write simply waits.
                let state = context.state.read().await;
                if !state.registry.is_current(&user_id) {
                    log::debug!("Discarding notification fetch for {user_id}: no longer current");
                    return;
                }
                context
                    .send(MessageFromBackend::NotificationListResponse(notifications))
                    .await;
            }
            Err(error) => {
                log::error!("Failed to fetch notifications for {user_id}: {error}");
                context
                    .send_notice(NoticeLevel::Error, "Failed to load notifications")
                    .await;
            }
        }
    });
}
