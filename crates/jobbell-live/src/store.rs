use jobbell_bridge::notification::{Notification, NotificationId};

/// The single source of truth for the notification list and unread counter.
///
/// All mounted consumers render from the same store, and every mutation
/// goes through one of the three operations below; view code never touches
/// the fields directly. The list is kept newest-first: [`replace_all`]
/// relies on the server returning it in that order, and [`prepend`]
/// preserves it for pushed events.
///
/// [`replace_all`]: NotificationStore::replace_all
/// [`prepend`]: NotificationStore::prepend
#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    items: Vec<Notification>,
    unread: usize,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a pull-fetch result and recompute the
    /// unread counter from the read flags.
    pub fn replace_all(&mut self, items: Vec<Notification>) {
        self.unread = items.iter().filter(|n| !n.is_read).count();
        self.items = items;
    }

    /// Insert a pushed notification at the head of the list and bump the
    /// unread counter.
    ///
    /// No deduplication is performed; the transport is trusted not to
    /// redeliver. Pushed notifications are unread by server contract.
    pub fn prepend(&mut self, notification: Notification) {
        self.items.insert(0, notification);
        self.unread += 1;
    }

    /// Mark the matching notification as read and decrement the unread
    /// counter, floored at 0. Returns whether anything changed; unknown and
    /// already-read ids are no-ops.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notification) if !notification.is_read => {
                notification.is_read = true;
                self.unread = self.unread.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    /// The current list, newest first.
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Number of notifications with the unread flag set.
    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn notification(id: NotificationId, is_read: bool) -> Notification {
        Notification {
            id,
            title: format!("notification {id}"),
            message: "body".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            is_read,
            related_item_id: None,
        }
    }

    fn ids(store: &NotificationStore) -> Vec<NotificationId> {
        store.items().iter().map(|n| n.id).collect()
    }

    #[test]
    fn replace_all_recomputes_unread_count() {
        let mut store = NotificationStore::new();
        assert!(store.is_empty());

        store.replace_all(vec![notification(1, false), notification(2, true)]);
        assert!(!store.is_empty());
        assert_eq!(store.unread_count(), 1);

        store.replace_all(vec![notification(3, true)]);
        assert_eq!(store.unread_count(), 0);
        assert_eq!(ids(&store), vec![3]);
    }

    #[test]
    fn prepend_keeps_newest_first_and_bumps_unread() {
        let mut store = NotificationStore::new();
        store.replace_all(vec![notification(1, false), notification(2, true)]);

        store.prepend(notification(3, false));

        assert_eq!(ids(&store), vec![3, 1, 2]);
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn mark_read_flips_flag_and_decrements() {
        let mut store = NotificationStore::new();
        store.replace_all(vec![notification(1, false), notification(2, true)]);
        store.prepend(notification(3, false));

        assert!(store.mark_read(3));
        assert_eq!(store.unread_count(), 1);
        assert!(store.items()[0].is_read);
    }

    #[test]
    fn mark_read_is_a_noop_for_already_read_ids() {
        let mut store = NotificationStore::new();
        store.replace_all(vec![notification(1, true)]);

        assert!(!store.mark_read(1));
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn mark_read_is_a_noop_for_unknown_ids() {
        let mut store = NotificationStore::new();
        store.replace_all(vec![notification(1, false)]);

        assert!(!store.mark_read(99));
        assert_eq!(store.unread_count(), 1);
    }
}
