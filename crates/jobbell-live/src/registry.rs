use crate::transport::{PushHandler, RealtimeTransport, TransportError};

/// What [`SubscriptionRegistry::acquire`] did for the new consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// A connection was (re)started for this identity. The caller must now
    /// issue the initial pull-fetch.
    Started,
    /// A connection for this identity was already active; the consumer
    /// joined it. No restart, no re-fetch.
    Joined,
}

/// What [`SubscriptionRegistry::release`] did after the consumer left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Other consumers remain; the connection stays up.
    Remaining(usize),
    /// The last consumer left; the connection was torn down.
    Stopped,
}

/// Shares one real-time connection across any number of mounted consumers.
///
/// The registry tracks how many consumers are interested, which user
/// identity the active connection belongs to, and whether a push handler is
/// attached. It is the only place allowed to start or stop the transport.
/// All bookkeeping is updated synchronously before any connection work is
/// issued, and callers are expected to serialize `acquire`/`release` (the
/// backend dispatch loop processes one message at a time), so no interior
/// locking is needed here.
pub struct SubscriptionRegistry<T: RealtimeTransport> {
    transport: T,
    consumers: usize,
    identity: Option<String>,
    handler_attached: bool,
}

impl<T: RealtimeTransport> SubscriptionRegistry<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            consumers: 0,
            identity: None,
            handler_attached: false,
        }
    }

    /// Register a consumer for the given user identity.
    ///
    /// Starts the connection and attaches `handler` if this is the first
    /// consumer; joins the existing connection otherwise (the unused
    /// handler is dropped). If the identity differs from the active one
    /// while consumers are registered, the old connection is fully torn
    /// down first so the new user never sees the old user's stream.
    ///
    /// On a start failure the consumer is still registered (it will call
    /// [`release`] on unmount like any other) but no handler is attached;
    /// the caller surfaces a disconnected state. The registry never retries
    /// by itself.
    ///
    /// [`release`]: SubscriptionRegistry::release
    pub fn acquire(
        &mut self,
        identity: &str,
        handler: PushHandler,
    ) -> Result<AcquireOutcome, TransportError> {
        if self.consumers > 0 && self.identity.as_deref() != Some(identity) {
            // User switched while another consumer was active; reset the
            // connection rather than keep reporting the old user's stream.
            self.teardown();
        }

        if self.consumers > 0 {
            self.consumers += 1;
            return Ok(AcquireOutcome::Joined);
        }

        self.consumers = 1;
        self.identity = Some(identity.to_string());
        self.transport.start(identity)?;
        self.transport.attach(handler);
        self.handler_attached = true;
        Ok(AcquireOutcome::Started)
    }

    /// Deregister one consumer, tearing the connection down when the last
    /// one leaves. The count floors at 0; releasing an empty registry does
    /// not touch the transport again.
    pub fn release(&mut self) -> ReleaseOutcome {
        self.consumers = self.consumers.saturating_sub(1);
        if self.consumers > 0 {
            return ReleaseOutcome::Remaining(self.consumers);
        }

        if self.handler_attached || self.identity.is_some() {
            self.teardown();
        }
        ReleaseOutcome::Stopped
    }

    fn teardown(&mut self) {
        if self.handler_attached {
            self.transport.detach();
            self.handler_attached = false;
        }
        self.transport.stop();
        self.consumers = 0;
        self.identity = None;
    }

    /// Number of currently registered consumers.
    pub fn consumers(&self) -> usize {
        self.consumers
    }

    /// Identity the active connection belongs to, if any.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Whether a push handler is currently attached.
    pub fn handler_attached(&self) -> bool {
        self.handler_attached
    }

    /// Whether a subscription for this identity is still the active one.
    ///
    /// This is the staleness check for results of asynchronous work issued
    /// on behalf of an identity: a pull-fetch completing after the last
    /// consumer released, or after the registry switched to another user,
    /// must be discarded rather than applied as a late write.
    pub fn is_current(&self, identity: &str) -> bool {
        self.consumers > 0 && self.identity.as_deref() == Some(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};
    use jobbell_bridge::notification::Notification;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Start(String),
        Stop,
        Attach,
        Detach,
    }

    #[derive(Default)]
    struct MockState {
        calls: Vec<Call>,
        handler: Option<PushHandler>,
    }

    #[derive(Clone, Default)]
    struct MockTransport {
        state: Arc<Mutex<MockState>>,
        fail_start: bool,
    }

    impl MockTransport {
        fn new() -> Self {
            Self::default()
        }

        fn failing() -> Self {
            Self {
                fail_start: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.state.lock().unwrap().calls.clone()
        }

        fn count(&self, call: &Call) -> usize {
            self.calls().iter().filter(|c| *c == call).count()
        }

        fn deliver(&self, notification: Notification) {
            let mut state = self.state.lock().unwrap();
            if let Some(handler) = state.handler.as_mut() {
                handler(notification);
            }
        }
    }

    impl RealtimeTransport for MockTransport {
        fn start(&mut self, identity: &str) -> Result<(), TransportError> {
            if self.fail_start {
                return Err(TransportError::Start("refused".to_string()));
            }
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::Start(identity.to_string()));
            Ok(())
        }

        fn stop(&mut self) {
            self.state.lock().unwrap().calls.push(Call::Stop);
        }

        fn attach(&mut self, handler: PushHandler) {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::Attach);
            state.handler = Some(handler);
        }

        fn detach(&mut self) {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::Detach);
            state.handler = None;
        }
    }

    fn noop_handler() -> PushHandler {
        Box::new(|_| {})
    }

    fn sample_notification(id: i64) -> Notification {
        Notification {
            id,
            title: "title".to_string(),
            message: "body".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            is_read: false,
            related_item_id: None,
        }
    }

    #[test]
    fn first_consumer_starts_the_connection() {
        let transport = MockTransport::new();
        let mut registry = SubscriptionRegistry::new(transport.clone());

        let outcome = registry.acquire("user-7", noop_handler()).unwrap();

        assert_eq!(outcome, AcquireOutcome::Started);
        assert_eq!(registry.consumers(), 1);
        assert_eq!(registry.identity(), Some("user-7"));
        assert!(registry.handler_attached());
        assert_eq!(
            transport.calls(),
            vec![Call::Start("user-7".to_string()), Call::Attach]
        );
    }

    #[test]
    fn n_consumers_share_one_connection() {
        let transport = MockTransport::new();
        let mut registry = SubscriptionRegistry::new(transport.clone());

        for _ in 0..4 {
            registry.acquire("user-7", noop_handler()).unwrap();
        }
        for _ in 0..4 {
            registry.release();
        }

        assert_eq!(transport.count(&Call::Start("user-7".to_string())), 1);
        assert_eq!(transport.count(&Call::Stop), 1);
        assert_eq!(registry.consumers(), 0);
        assert_eq!(registry.identity(), None);
        assert!(!registry.handler_attached());
    }

    #[test]
    fn same_identity_join_does_not_restart() {
        let transport = MockTransport::new();
        let mut registry = SubscriptionRegistry::new(transport.clone());

        registry.acquire("user-7", noop_handler()).unwrap();
        let outcome = registry.acquire("user-7", noop_handler()).unwrap();

        assert_eq!(outcome, AcquireOutcome::Joined);
        assert_eq!(registry.consumers(), 2);
        assert_eq!(
            transport.calls(),
            vec![Call::Start("user-7".to_string()), Call::Attach]
        );
    }

    #[test]
    fn intermediate_release_keeps_the_connection() {
        let transport = MockTransport::new();
        let mut registry = SubscriptionRegistry::new(transport.clone());

        registry.acquire("user-7", noop_handler()).unwrap();
        registry.acquire("user-7", noop_handler()).unwrap();

        assert_eq!(registry.release(), ReleaseOutcome::Remaining(1));
        assert_eq!(transport.count(&Call::Stop), 0);

        assert_eq!(registry.release(), ReleaseOutcome::Stopped);
        assert_eq!(transport.count(&Call::Stop), 1);
        assert_eq!(transport.count(&Call::Detach), 1);
    }

    #[test]
    fn identity_switch_forces_stop_then_start() {
        let transport = MockTransport::new();
        let mut registry = SubscriptionRegistry::new(transport.clone());

        registry.acquire("user-7", noop_handler()).unwrap();
        let outcome = registry.acquire("user-8", noop_handler()).unwrap();

        assert_eq!(outcome, AcquireOutcome::Started);
        assert_eq!(registry.consumers(), 1);
        assert_eq!(registry.identity(), Some("user-8"));
        assert_eq!(
            transport.calls(),
            vec![
                Call::Start("user-7".to_string()),
                Call::Attach,
                Call::Detach,
                Call::Stop,
                Call::Start("user-8".to_string()),
                Call::Attach,
            ]
        );
    }

    #[test]
    fn release_on_empty_registry_leaves_transport_untouched() {
        let transport = MockTransport::new();
        let mut registry = SubscriptionRegistry::new(transport.clone());

        assert_eq!(registry.release(), ReleaseOutcome::Stopped);
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn start_failure_keeps_consumer_registered() {
        let transport = MockTransport::failing();
        let mut registry = SubscriptionRegistry::new(transport.clone());

        let result = registry.acquire("user-7", noop_handler());

        assert!(result.is_err());
        assert_eq!(registry.consumers(), 1);
        assert_eq!(registry.identity(), Some("user-7"));
        assert!(!registry.handler_attached());

        // The unmount path still runs; stopping the never-started
        // transport is a no-op by contract.
        assert_eq!(registry.release(), ReleaseOutcome::Stopped);
        assert_eq!(transport.count(&Call::Stop), 1);
        assert_eq!(transport.count(&Call::Detach), 0);
    }

    #[test]
    fn fetched_results_are_stale_after_the_last_release() {
        let transport = MockTransport::new();
        let mut registry = SubscriptionRegistry::new(transport);

        registry.acquire("user-7", noop_handler()).unwrap();
        assert!(registry.is_current("user-7"));

        registry.release();
        assert!(!registry.is_current("user-7"));
    }

    #[test]
    fn fetched_results_are_stale_after_an_identity_switch() {
        let transport = MockTransport::new();
        let mut registry = SubscriptionRegistry::new(transport);

        registry.acquire("user-7", noop_handler()).unwrap();
        registry.acquire("user-8", noop_handler()).unwrap();

        assert!(!registry.is_current("user-7"));
        assert!(registry.is_current("user-8"));
    }

    #[test]
    fn pushed_notifications_reach_the_acquired_handler() {
        let transport = MockTransport::new();
        let mut registry = SubscriptionRegistry::new(transport.clone());

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        registry
            .acquire(
                "user-7",
                Box::new(move |notification| sink.lock().unwrap().push(notification.id)),
            )
            .unwrap();

        transport.deliver(sample_notification(41));
        transport.deliver(sample_notification(42));
        assert_eq!(*received.lock().unwrap(), vec![41, 42]);

        registry.release();
        transport.deliver(sample_notification(43));
        assert_eq!(*received.lock().unwrap(), vec![41, 42]);
    }
}
